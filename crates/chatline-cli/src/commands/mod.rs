pub mod agent;
pub mod chat;

use crate::ConnectionArgs;
use anyhow::{Context, Result};
use chatline_core::config::RequestSettings;
use chatline_infrastructure::{SettingsLoader, SettingsOverlay};

/// Resolves request settings with CLI flags taking priority.
pub fn resolve_settings(connection: &ConnectionArgs) -> Result<RequestSettings> {
    let overrides = SettingsOverlay {
        base_url: connection.base_url.clone(),
        api_key: connection.api_key.clone(),
        timeout_ms: connection.timeout_ms,
    };
    SettingsLoader::new()
        .load(overrides)
        .context("Failed to load request settings")
}
