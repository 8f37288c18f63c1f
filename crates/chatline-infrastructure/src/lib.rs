pub mod paths;
pub mod settings_loader;
pub mod translation;

pub use crate::settings_loader::{SettingsLoader, SettingsOverlay};
pub use crate::translation::{BundledTranslationProvider, MemoryTranslationCache};
