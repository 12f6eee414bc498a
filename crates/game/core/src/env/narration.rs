//! Fire-and-forget narration channel.
//!
//! Behaviors report what happened ("The door creaks open.") through a
//! [`NarrationSink`]. When no sink is attached the messages are dropped.

use std::collections::VecDeque;

/// Receives player-facing narration messages.
pub trait NarrationSink {
    fn narrate(&mut self, message: String);
}

impl NarrationSink for Vec<String> {
    fn narrate(&mut self, message: String) {
        self.push(message);
    }
}

/// Bounded message log keeping the most recent messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageLog {
    messages: VecDeque<String>,
    capacity: usize,
}

impl MessageLog {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Removes and returns every buffered message, oldest first.
    pub fn drain(&mut self) -> Vec<String> {
        self.messages.drain(..).collect()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl NarrationSink for MessageLog {
    fn narrate(&mut self, message: String) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }
}
