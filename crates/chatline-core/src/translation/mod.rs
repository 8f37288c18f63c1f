//! Translation domain module.
//!
//! Static UI strings are resolved per locale through a [`TranslationProvider`].
//! Providers may memoize catalogs in a [`TranslationCache`], an injectable
//! key-value store addressed by [`cache_key`].

mod model;
mod provider;

pub use model::{DEFAULT_LOCALE, Translations, cache_key};
pub use provider::{TranslationCache, TranslationProvider};
