//! Payloads exchanged with the remote assistant service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One message appended to the conversation since the last send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub id: String,
    pub content: String,
}

/// Conversation-append request. Built fresh for every send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageBody {
    /// Chat session id.
    pub id: String,
    pub agent_uid: String,
    pub user_id: String,
    pub context: String,
    pub messages: Vec<OutgoingMessage>,
}

impl SendMessageBody {
    /// Body for a session where the session id doubles as the user id.
    pub fn for_session(
        chat_uid: impl Into<String>,
        agent_uid: impl Into<String>,
        context: impl Into<String>,
        messages: Vec<OutgoingMessage>,
    ) -> Self {
        let chat_uid = chat_uid.into();
        Self {
            id: chat_uid.clone(),
            agent_uid: agent_uid.into(),
            user_id: chat_uid,
            context: context.into(),
            messages,
        }
    }
}

/// Public description of an assistant agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url_img: Option<String>,
}

/// Renders a loosely typed reply as chat text.
///
/// String replies are used verbatim; any other JSON is shown compactly.
pub fn reply_text(reply: &Value) -> String {
    match reply {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
