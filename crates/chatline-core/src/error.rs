//! Error types for Chatline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name reported for requests cancelled by deadline or by the caller.
pub const TIMEOUT_ERROR_NAME: &str = "TimeoutError";
/// Message reported for every cancelled request, whatever the reason.
pub const TIMEOUT_MESSAGE: &str = "Request timeout";
/// Code reported for every cancelled request.
pub const TIMEOUT_CODE: &str = "ETIMEDOUT";

/// Category of a transport-level request failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestErrorKind {
    /// DNS, connection or body transfer failure.
    Network,
    /// Deadline elapsed or the request was cancelled.
    Timeout,
    /// The request could not be built (bad URI, header, body).
    InvalidRequest,
}

/// Normalized shape of every transport failure surfaced by the request client.
///
/// HTTP status failures are not represented here: they carry a full response
/// and travel on their own channel.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{name}: {message}")]
pub struct RequestError {
    pub kind: RequestErrorKind,
    pub name: String,
    pub message: String,
    pub code: Option<String>,
    /// Debug rendering of the original failure, kept for diagnostics.
    pub trace: Option<String>,
}

impl RequestError {
    /// Cancellation error. Always reports `Request timeout` / `ETIMEDOUT`.
    pub fn timeout() -> Self {
        Self {
            kind: RequestErrorKind::Timeout,
            name: TIMEOUT_ERROR_NAME.to_string(),
            message: TIMEOUT_MESSAGE.to_string(),
            code: Some(TIMEOUT_CODE.to_string()),
            trace: None,
        }
    }

    /// Network failure with an optional errno-style code.
    pub fn network(message: impl Into<String>, code: Option<&str>) -> Self {
        Self {
            kind: RequestErrorKind::Network,
            name: "NetworkError".to_string(),
            message: message.into(),
            code: code.map(str::to_string),
            trace: None,
        }
    }

    /// Failure while constructing the request.
    pub fn invalid_request(message: impl Into<String>, code: &str) -> Self {
        Self {
            kind: RequestErrorKind::InvalidRequest,
            name: "InvalidRequestError".to_string(),
            message: message.into(),
            code: Some(code.to_string()),
            trace: None,
        }
    }

    /// Attaches the original failure's debug trace.
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == RequestErrorKind::Timeout
    }
}

/// A shared error type for the whole Chatline workspace.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ChatlineError {
    /// Transport failure (network, timeout, request construction)
    #[error("Request failed: {0}")]
    Request(RequestError),

    /// Remote service answered with a non-2xx status
    #[error("HTTP error {status}: {body}")]
    Status {
        status: u16,
        body: serde_json::Value,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Operation not allowed in the current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatlineError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an InvalidState error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a timeout/cancellation error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(err) if err.is_timeout())
    }

    /// Check if this is a non-2xx response
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }

    /// Short description suitable for an error-state chat message.
    pub fn summary(&self) -> String {
        match self {
            Self::Request(err) => err.message.clone(),
            Self::Status { status, .. } => format!("HTTP {}", status),
            other => other.to_string(),
        }
    }
}

impl From<RequestError> for ChatlineError {
    fn from(err: RequestError) -> Self {
        Self::Request(err)
    }
}

impl From<std::io::Error> for ChatlineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ChatlineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ChatlineError>`.
pub type Result<T> = std::result::Result<T, ChatlineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_shape() {
        let err = RequestError::timeout();
        assert_eq!(err.message, "Request timeout");
        assert_eq!(err.code.as_deref(), Some("ETIMEDOUT"));
        assert_eq!(err.name, "TimeoutError");
        assert!(err.is_timeout());
    }

    #[test]
    fn test_summary_uses_request_message() {
        let err: ChatlineError = RequestError::timeout().into();
        assert!(err.is_timeout());
        assert_eq!(err.summary(), "Request timeout");

        let err = ChatlineError::Status {
            status: 502,
            body: serde_json::json!("bad gateway"),
        };
        assert!(err.is_status());
        assert_eq!(err.summary(), "HTTP 502");
    }
}
