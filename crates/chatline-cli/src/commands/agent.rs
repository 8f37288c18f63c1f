use super::resolve_settings;
use crate::ConnectionArgs;
use anyhow::{Context, Result};
use chatline_core::assistant::AssistantService;
use chatline_interaction::EnterpriseAssistantService;

pub async fn show(connection: &ConnectionArgs, identifier: &str) -> Result<()> {
    let service = EnterpriseAssistantService::new(resolve_settings(connection)?);
    let profile = service
        .fetch_agent(identifier)
        .await
        .with_context(|| format!("Failed to fetch agent '{}'", identifier))?;

    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
