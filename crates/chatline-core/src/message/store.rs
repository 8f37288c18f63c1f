//! Ordered message collection reconciled by identifier.

use super::model::Message;

/// Arrival-ordered messages with at most one record per id.
///
/// The store only grows for the lifetime of a chat session; nothing is
/// evicted.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace-or-insert `incoming` by id.
    ///
    /// Any record sharing `incoming.id` is removed and `incoming` is appended,
    /// so the updated record sits at the position of its latest
    /// reconciliation. All other records keep their relative order.
    pub fn reconcile(&mut self, incoming: Message) -> &[Message] {
        self.messages.retain(|existing| existing.id != incoming.id);
        self.messages.push(incoming);
        &self.messages
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
