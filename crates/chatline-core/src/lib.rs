//! Domain layer for Chatline.
//!
//! Holds the message model and its reconciling store, the request error
//! taxonomy, conversation payloads and the ports (assistant service,
//! translation provider, id generator) that the outer crates implement.

pub mod assistant;
pub mod config;
pub mod conversation;
pub mod error;
pub mod id;
pub mod message;
pub mod translation;

// Re-export common error type
pub use error::{ChatlineError, RequestError, RequestErrorKind, Result};
