//! Host-facing notification contracts.

use chatline_core::message::Message;
use tokio::sync::mpsc;

/// Callbacks a host UI wires up to follow the conversation.
///
/// Both methods default to no-ops.
pub trait ConversationListener: Send + Sync {
    /// The user submitted a message.
    fn on_user_submit(&self, _message: &Message) {}

    /// `message` was reconciled into the thread; `thread` is the full ordered
    /// sequence after the reconcile.
    ///
    /// Runs while the session is locked: calls arrive in store order and
    /// must not block.
    fn on_message_reconciled(&self, _message: &Message, _thread: &[Message]) {}
}

/// Event forwarded by [`ChannelListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationEvent {
    UserSubmitted(Message),
    MessageReconciled(Message),
}

/// Listener that forwards events over an unbounded channel.
pub struct ChannelListener {
    sender: mpsc::UnboundedSender<ConversationEvent>,
}

impl ChannelListener {
    pub fn new(sender: mpsc::UnboundedSender<ConversationEvent>) -> Self {
        Self { sender }
    }

    /// Creates a listener together with its receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ConversationEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl ConversationListener for ChannelListener {
    fn on_user_submit(&self, message: &Message) {
        // Receiver gone means nobody is watching any more.
        let _ = self.sender.send(ConversationEvent::UserSubmitted(message.clone()));
    }

    fn on_message_reconciled(&self, message: &Message, _thread: &[Message]) {
        let _ = self
            .sender
            .send(ConversationEvent::MessageReconciled(message.clone()));
    }
}
