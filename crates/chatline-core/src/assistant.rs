//! Port for the remote assistant service.
//!
//! The concrete HTTP implementation lives in `chatline-interaction`; the
//! orchestrator only depends on this trait.

use crate::conversation::{AgentProfile, SendMessageBody};
use crate::error::Result;
use serde_json::Value;

#[async_trait::async_trait]
pub trait AssistantService: Send + Sync {
    /// Looks up the public profile of an agent.
    async fn fetch_agent(&self, agent_id: &str) -> Result<AgentProfile>;

    /// Appends messages to a conversation and returns the (loosely typed) reply.
    async fn send_message(&self, body: SendMessageBody) -> Result<Value>;
}
