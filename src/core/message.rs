//=========================================================================
// Message Manager
//=========================================================================
//
// Double-buffered logic messages.
//
// Messages sent during tick N land in the outbox and become readable in
// the inbox during tick N+1. The engine swaps the buffers once at the
// end of every tick, so every message sensor sees the same snapshot
// regardless of brick order.
//
// ```text
// Message actuator ─send()─> outbox ──swap()──> inbox ─> Message sensors
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== LogicMessage ========================================================

/// A message between game objects. An empty `to` is a broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl LogicMessage {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// `true` if `object` should receive this message.
    pub fn is_for(&self, object: &str) -> bool {
        self.to.is_empty() || self.to == object
    }
}

//=== MessageManager ======================================================

#[derive(Debug, Default)]
pub struct MessageManager {
    inbox: Vec<LogicMessage>,
    outbox: Vec<LogicMessage>,
}

impl MessageManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a message for the next tick.
    pub fn send(&mut self, message: LogicMessage) {
        trace!("Message '{}' from '{}' to '{}'", message.subject, message.from, message.to);
        self.outbox.push(message);
    }

    /// Messages delivered this tick.
    pub fn inbox(&self) -> &[LogicMessage] {
        &self.inbox
    }

    pub fn pending(&self) -> usize {
        self.outbox.len()
    }

    /// Publishes the outbox and drops the previous inbox.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.inbox, &mut self.outbox);
        self.outbox.clear();
    }

    pub fn clear(&mut self) {
        self.inbox.clear();
        self.outbox.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
