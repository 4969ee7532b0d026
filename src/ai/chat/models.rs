//! The core models for managing a stateful chat with an LLM.
use serde::Serialize;

use crate::openai::{Message, Role};

/// Ordered history of a conversation. The first entry is always the
/// system message it was created with and entries are only ever
/// appended.
pub struct Transcript(Vec<Message>);

impl Transcript {
    pub fn new(system_message: &str) -> Self {
        Self(vec![Message::new(Role::System, system_message)])
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn push(&mut self, msg: Message) {
        self.0.push(msg)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }

    /// Drops everything except the system message.
    pub fn reset(&mut self) {
        self.0.truncate(1);
    }
}

/// Whether a chat turn is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnState {
    Idle,
    Pending,
}
