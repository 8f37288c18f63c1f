//! EnterpriseAssistantService - REST client for the remote assistant API.
//!
//! Endpoints:
//! - `GET  {base}/workout/v1/agent/{agentId}` (authenticated with `x-api-key`)
//! - `POST {base}/workout/v1/chat` with `{"body": SendMessageBody}`

use crate::request_client::{RequestClient, RequestOptions};
use crate::transport::Transport;
use async_trait::async_trait;
use chatline_core::Result;
use chatline_core::assistant::AssistantService;
use chatline_core::config::RequestSettings;
use chatline_core::conversation::{AgentProfile, SendMessageBody};
use serde_json::{Value, json};
use std::sync::Arc;

const AGENT_PATH: &str = "workout/v1/agent";
const CHAT_PATH: &str = "workout/v1/chat";
const API_KEY_HEADER: &str = "x-api-key";

/// Assistant service backed by the resilient request client.
#[derive(Clone)]
pub struct EnterpriseAssistantService {
    client: RequestClient,
    settings: RequestSettings,
}

impl EnterpriseAssistantService {
    /// Creates a service using the reqwest transport.
    pub fn new(settings: RequestSettings) -> Self {
        Self::with_client(RequestClient::default(), settings)
    }

    /// Creates a service over a custom transport.
    pub fn with_transport(transport: Arc<dyn Transport>, settings: RequestSettings) -> Self {
        Self::with_client(RequestClient::new(transport), settings)
    }

    pub fn with_client(client: RequestClient, settings: RequestSettings) -> Self {
        let client = client.with_default_timeout(settings.timeout());
        Self { client, settings }
    }

    pub fn settings(&self) -> &RequestSettings {
        &self.settings
    }
}

#[async_trait]
impl AssistantService for EnterpriseAssistantService {
    async fn fetch_agent(&self, agent_id: &str) -> Result<AgentProfile> {
        let uri = self.settings.endpoint(&format!("{}/{}", AGENT_PATH, agent_id));
        let mut options = RequestOptions::get(uri);
        if let Some(api_key) = &self.settings.api_key {
            options = options.header(API_KEY_HEADER, api_key.clone());
        }

        let response = self.client.send(options).await?;
        let profile = serde_json::from_value(response.body.into_json())?;
        tracing::debug!(agent_id, "[AssistantService] agent profile loaded");
        Ok(profile)
    }

    async fn send_message(&self, body: SendMessageBody) -> Result<Value> {
        let message_count = body.messages.len();
        let options = RequestOptions::post(self.settings.endpoint(CHAT_PATH))
            .json(json!({ "body": body }));

        let response = self.client.send(options).await?;
        tracing::debug!(message_count, "[AssistantService] chat reply received");
        Ok(response.body.into_json())
    }
}
