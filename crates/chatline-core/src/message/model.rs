//! Chat message record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    #[serde(rename = "AI")]
    Ai,
    #[serde(rename = "USER")]
    User,
}

/// A single entry of the visible conversation thread.
///
/// Records are never edited in place: a later record carrying the same `id`
/// replaces the earlier one through [`super::MessageStore::reconcile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    /// Absent while the reply is still loading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub sender: Sender,
    #[serde(default)]
    pub loading: bool,
    /// Set when the pending reply failed; `loading` is false in that case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Message {
    /// Message typed by the user.
    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: Some(content.into()),
            timestamp: Utc::now(),
            sender: Sender::User,
            loading: false,
            error: None,
        }
    }

    /// Loading AI message standing in for a pending reply.
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: None,
            timestamp: Utc::now(),
            sender: Sender::Ai,
            loading: true,
            error: None,
        }
    }

    /// Resolved AI reply.
    pub fn answer(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: Some(content.into()),
            timestamp: Utc::now(),
            sender: Sender::Ai,
            loading: false,
            error: None,
        }
    }

    /// AI reply that could not be obtained.
    pub fn failure(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: None,
            timestamp: Utc::now(),
            sender: Sender::Ai,
            loading: false,
            error: Some(reason.into()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.loading && self.content.is_none()
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_wire_names() {
        assert_eq!(serde_json::to_string(&Sender::Ai).unwrap(), "\"AI\"");
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"USER\"");
    }

    #[test]
    fn test_placeholder_has_no_content() {
        let msg = Message::placeholder("p1");
        assert!(msg.is_placeholder());
        assert_eq!(msg.sender, Sender::Ai);
        assert!(msg.content.is_none());

        let failed = Message::failure("p1", "Request timeout");
        assert!(!failed.loading);
        assert!(failed.is_failed());
        assert!(!failed.is_placeholder());
    }
}
