use std::collections::BTreeSet;

use serde::Serialize;

use super::RawMessage;

/// A continuous exchange, oldest message first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conversation {
    pub messages: Vec<RawMessage>,
}

impl Conversation {
    pub fn starting_with(message: RawMessage) -> Self {
        Self { messages: vec![message] }
    }

    pub fn push(&mut self, message: RawMessage) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn participants(&self) -> BTreeSet<&str> {
        self.messages.iter().map(|m| m.username()).collect()
    }
}

/// Consecutive messages from one author merged into a single utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub author: String,
    pub text: String,
}
