//! Snapshot-based undo history.

use crate::todo::domain::Todo;
use std::sync::{Mutex, PoisonError};

/// How an undo entry is replayed against the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoEntry {
    /// Overwrite the stored todo with this prior snapshot.
    Restore(Todo),
    /// Recreate a hard-deleted todo from this snapshot.
    Recreate(Todo),
}

impl UndoEntry {
    /// Returns the snapshot carried by the entry.
    #[must_use]
    pub const fn snapshot(&self) -> &Todo {
        match self {
            Self::Restore(todo) | Self::Recreate(todo) => todo,
        }
    }
}

/// Last-in, first-out stack of undo entries, shareable across services.
///
/// Entries bypass the state machine when replayed. This is the only way a
/// soft-deleted todo becomes mutable again.
#[derive(Debug, Default)]
pub struct UndoStack {
    entries: Mutex<Vec<UndoEntry>>,
}

impl UndoStack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Pushes an entry.
    pub fn push(&self, entry: UndoEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    /// Pops the most recent entry.
    #[must_use]
    pub fn pop(&self) -> Option<UndoEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` when nothing can be undone.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
