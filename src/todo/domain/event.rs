//! Domain events emitted by todo lifecycle transitions.

use super::{Title, TodoId};
use chrono::{DateTime, Utc};

/// Notification describing a single todo state change.
///
/// Events carry no ownership of the todo; publishers only need to know which
/// kind of change occurred, for which todo, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoEvent {
    /// A todo was created.
    Created {
        /// Affected todo.
        id: TodoId,
        /// Time of the change.
        occurred_at: DateTime<Utc>,
    },
    /// A todo title changed.
    TitleChanged {
        /// Affected todo.
        id: TodoId,
        /// Title after the change.
        title: Title,
        /// Time of the change.
        occurred_at: DateTime<Utc>,
    },
    /// An active todo was completed.
    Completed {
        /// Affected todo.
        id: TodoId,
        /// Time of the change.
        occurred_at: DateTime<Utc>,
    },
    /// A done todo was reopened.
    Reopened {
        /// Affected todo.
        id: TodoId,
        /// Time of the change.
        occurred_at: DateTime<Utc>,
    },
    /// A done todo was archived.
    Archived {
        /// Affected todo.
        id: TodoId,
        /// Time of the change.
        occurred_at: DateTime<Utc>,
    },
    /// An archived todo was restored to active.
    Restored {
        /// Affected todo.
        id: TodoId,
        /// Time of the change.
        occurred_at: DateTime<Utc>,
    },
    /// A todo was soft-deleted.
    Deleted {
        /// Affected todo.
        id: TodoId,
        /// Time of the change.
        occurred_at: DateTime<Utc>,
    },
}

impl TodoEvent {
    /// Returns the stable event name, e.g. `todo.completed`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => "todo.created",
            Self::TitleChanged { .. } => "todo.title_changed",
            Self::Completed { .. } => "todo.completed",
            Self::Reopened { .. } => "todo.reopened",
            Self::Archived { .. } => "todo.archived",
            Self::Restored { .. } => "todo.restored",
            Self::Deleted { .. } => "todo.deleted",
        }
    }

    /// Returns the affected todo identifier.
    #[must_use]
    pub const fn todo_id(&self) -> &TodoId {
        match self {
            Self::Created { id, .. }
            | Self::TitleChanged { id, .. }
            | Self::Completed { id, .. }
            | Self::Reopened { id, .. }
            | Self::Archived { id, .. }
            | Self::Restored { id, .. }
            | Self::Deleted { id, .. } => id,
        }
    }

    /// Returns when the change occurred.
    #[must_use]
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::Created { occurred_at, .. }
            | Self::TitleChanged { occurred_at, .. }
            | Self::Completed { occurred_at, .. }
            | Self::Reopened { occurred_at, .. }
            | Self::Archived { occurred_at, .. }
            | Self::Restored { occurred_at, .. }
            | Self::Deleted { occurred_at, .. } => *occurred_at,
        }
    }
}
