//! Pending command backlog
//!
//! Strict FIFO: insertion order is delivery order. There is no deduplication
//! and no capacity bound.

use crate::RelayError;
use std::collections::VecDeque;

/// A single instruction waiting for delivery to the rover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedCommand {
    /// Normalized (upper-case) instruction text
    pub text: String,
    /// Admission time in milliseconds since Unix epoch
    pub enqueued_at_ms: u64,
}

impl QueuedCommand {
    /// Validate and normalize raw command text
    pub fn new(raw: Option<&str>, enqueued_at_ms: u64) -> Result<Self, RelayError> {
        match raw {
            Some(text) if !text.is_empty() => Ok(Self {
                text: text.to_uppercase(),
                enqueued_at_ms,
            }),
            _ => Err(RelayError::InvalidCommand),
        }
    }
}

/// Ordered backlog of pending commands
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<QueuedCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail and return the new length
    pub fn push(&mut self, command: QueuedCommand) -> usize {
        self.pending.push_back(command);
        self.pending.len()
    }

    /// Remove and return the head
    pub fn pop(&mut self) -> Option<QueuedCommand> {
        self.pending.pop_front()
    }

    /// Drop everything, returning how many commands were discarded
    pub fn clear(&mut self) -> usize {
        let discarded = self.pending.len();
        self.pending.clear();
        discarded
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Admission time of the oldest pending command
    pub fn oldest_enqueued_at(&self) -> Option<u64> {
        self.pending.front().map(|c| c.enqueued_at_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_upper_cased() {
        let cmd = QueuedCommand::new(Some("turn_left"), 42).unwrap();
        assert_eq!(cmd.text, "TURN_LEFT");
        assert_eq!(cmd.enqueued_at_ms, 42);
    }

    #[test]
    fn test_empty_and_missing_rejected() {
        assert_eq!(QueuedCommand::new(Some(""), 0), Err(RelayError::InvalidCommand));
        assert_eq!(QueuedCommand::new(None, 0), Err(RelayError::InvalidCommand));
    }

    #[test]
    fn test_whitespace_is_a_command() {
        // Only empty input is invalid; content is otherwise opaque
        let cmd = QueuedCommand::new(Some(" "), 0).unwrap();
        assert_eq!(cmd.text, " ");
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = CommandQueue::new();
        for (i, text) in ["a", "b", "c"].iter().enumerate() {
            let len = queue.push(QueuedCommand::new(Some(*text), i as u64).unwrap());
            assert_eq!(len, i + 1);
        }

        assert_eq!(queue.oldest_enqueued_at(), Some(0));
        assert_eq!(queue.pop().unwrap().text, "A");
        assert_eq!(queue.pop().unwrap().text, "B");
        assert_eq!(queue.pop().unwrap().text, "C");
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_duplicates_kept() {
        let mut queue = CommandQueue::new();
        queue.push(QueuedCommand::new(Some("forward"), 0).unwrap());
        queue.push(QueuedCommand::new(Some("FORWARD"), 1).unwrap());
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_clear_reports_discarded() {
        let mut queue = CommandQueue::new();
        queue.push(QueuedCommand::new(Some("x"), 0).unwrap());
        queue.push(QueuedCommand::new(Some("y"), 0).unwrap());

        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
        assert_eq!(queue.clear(), 0);
    }
}
