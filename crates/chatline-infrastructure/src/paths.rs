//! Path management for chatline configuration files.
//!
//! ```text
//! ~/.config/chatline/          # Platform config directory
//! └── settings.json            # Request settings (base URL, API key, timeout)
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "chatline";
const SETTINGS_FILE: &str = "settings.json";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct ChatlinePaths;

impl ChatlinePaths {
    /// Returns the chatline configuration directory (e.g. `~/.config/chatline/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `settings.json`.
    pub fn settings_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(SETTINGS_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_file_lives_in_config_dir() {
        if let (Ok(dir), Ok(file)) = (ChatlinePaths::config_dir(), ChatlinePaths::settings_file()) {
            assert!(dir.ends_with("chatline"));
            assert_eq!(file.parent(), Some(dir.as_path()));
            assert!(file.ends_with("settings.json"));
        }
    }
}
