//! Transient user-facing notifications.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// An operation succeeded.
    Success,
    /// An operation failed; the user stays on the current screen.
    Error,
    /// Informational.
    Info,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text to show.
    pub text: String,
}

impl Notice {
    /// Creates a success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    /// Creates an error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    /// Creates an informational notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }
}

/// Shared queue of pending notices.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    queue: Arc<Mutex<VecDeque<Notice>>>,
}

impl NoticeBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Notice>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a notice.
    pub fn push(&self, notice: Notice) {
        self.lock().push_back(notice);
    }

    /// Removes and returns every pending notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        self.lock().drain(..).collect()
    }

    /// Returns the most recent notice without removing it.
    pub fn latest(&self) -> Option<Notice> {
        self.lock().back().cloned()
    }

    /// Returns the number of pending notices.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns whether no notice is pending.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_is_shared_and_drains_in_order() {
        let board = NoticeBoard::new();
        let other = board.clone();
        board.push(Notice::success("Created successfully!"));
        other.push(Notice::error("Name taken"));

        assert_eq!(board.len(), 2);
        assert_eq!(board.latest().unwrap().level, NoticeLevel::Error);
        let drained = other.drain();
        assert_eq!(drained[0].text, "Created successfully!");
        assert!(board.is_empty());
    }
}
