//! Application layer for Chatline.
//!
//! The [`ConversationOrchestrator`] coordinates a chat session: user submit,
//! placeholder insertion, the send to the assistant service and the final
//! reconcile of the reply. Hosts observe it through [`ConversationListener`].

pub mod listener;
pub mod orchestrator;

pub use listener::{ChannelListener, ConversationEvent, ConversationListener};
pub use orchestrator::{ConversationOrchestrator, OrchestratorState, SubmitOutcome, WidgetConfig};
