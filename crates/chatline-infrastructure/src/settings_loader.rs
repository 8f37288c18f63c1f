//! Resolution of [`RequestSettings`].
//!
//! Priority (highest first): explicit overrides from the caller (CLI flags),
//! `settings.json`, environment variables, built-in defaults.
//!
//! Environment variables: `CHATLINE_BASE_URL`, `CHATLINE_API_KEY`,
//! `CHATLINE_TIMEOUT_MS`.

use crate::paths::ChatlinePaths;
use chatline_core::config::RequestSettings;
use chatline_core::{ChatlineError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_BASE_URL: &str = "CHATLINE_BASE_URL";
pub const ENV_API_KEY: &str = "CHATLINE_API_KEY";
pub const ENV_TIMEOUT_MS: &str = "CHATLINE_TIMEOUT_MS";

/// Partially specified settings from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverlay {
    #[serde(default, alias = "url")]
    pub base_url: Option<String>,
    #[serde(default, alias = "xApiKey", alias = "key")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl SettingsOverlay {
    fn apply(self, settings: &mut RequestSettings) {
        if let Some(base_url) = self.base_url {
            settings.base_url = base_url;
        }
        if let Some(api_key) = self.api_key {
            settings.api_key = Some(api_key);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            settings.timeout_ms = Some(timeout_ms);
        }
    }
}

/// Loads request settings from the settings file and environment.
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    file: Option<PathBuf>,
}

impl SettingsLoader {
    /// Uses `~/.config/chatline/settings.json` when the config dir is known.
    pub fn new() -> Self {
        Self {
            file: ChatlinePaths::settings_file().ok(),
        }
    }

    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
        }
    }

    /// Resolves settings from the process environment.
    pub fn load(&self, overrides: SettingsOverlay) -> Result<RequestSettings> {
        self.load_with_env(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves settings with an injectable environment lookup.
    pub fn load_with_env<F>(&self, overrides: SettingsOverlay, env: F) -> Result<RequestSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = RequestSettings::default();

        env_overlay(&env)?.apply(&mut settings);
        if let Some(path) = &self.file
            && let Some(file_overlay) = read_settings_file(path)?
        {
            file_overlay.apply(&mut settings);
        }
        overrides.apply(&mut settings);

        tracing::debug!(
            base_url = %settings.base_url,
            has_api_key = settings.api_key.is_some(),
            timeout_ms = ?settings.timeout_ms,
            "[SettingsLoader] request settings resolved"
        );
        Ok(settings)
    }
}

fn env_overlay<F>(env: &F) -> Result<SettingsOverlay>
where
    F: Fn(&str) -> Option<String>,
{
    let timeout_ms = env(ENV_TIMEOUT_MS)
        .map(|raw| {
            raw.trim().parse::<u64>().map_err(|_| {
                ChatlineError::config(format!("{} must be a number of milliseconds, got '{}'", ENV_TIMEOUT_MS, raw))
            })
        })
        .transpose()?;

    Ok(SettingsOverlay {
        base_url: env(ENV_BASE_URL).filter(|v| !v.trim().is_empty()),
        api_key: env(ENV_API_KEY).filter(|v| !v.trim().is_empty()),
        timeout_ms,
    })
}

fn read_settings_file(path: &Path) -> Result<Option<SettingsOverlay>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "[SettingsLoader] no settings file");
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let overlay = serde_json::from_str(&content)?;
    Ok(Some(overlay))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_sources() {
        let loader = SettingsLoader::default();
        let settings = loader
            .load_with_env(SettingsOverlay::default(), env_from(&[]))
            .unwrap();
        assert_eq!(settings, RequestSettings::default());
    }

    #[test]
    fn test_invalid_timeout_env_is_config_error() {
        let loader = SettingsLoader::default();
        let err = loader
            .load_with_env(SettingsOverlay::default(), env_from(&[(ENV_TIMEOUT_MS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ChatlineError::Config(_)));
    }
}
