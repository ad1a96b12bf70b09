//! Error types for todo domain validation and lifecycle transitions.

use super::{TodoAction, TodoId, TodoStatus};
use thiserror::Error;

/// Errors returned while constructing or transitioning todo values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The identifier is empty.
    #[error("todo identifier must not be empty")]
    InvalidId,

    /// The title is empty after trimming or longer than the allowed maximum.
    #[error("invalid title: must be between 1 and {max} characters after trimming")]
    InvalidTitle {
        /// Maximum accepted title length in characters.
        max: usize,
    },

    /// The priority is not one of `low`, `medium`, or `high`.
    #[error("invalid priority '{0}', expected low, medium, or high")]
    InvalidPriority(String),

    /// The due date is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// The requested transition is not permitted from the current status.
    #[error("cannot {action} todo {id} while it is {from}")]
    InvalidTransition {
        /// Todo whose transition was rejected.
        id: TodoId,
        /// Status at the time of the attempt.
        from: TodoStatus,
        /// Transition that was attempted.
        action: TodoAction,
    },

    /// The todo has been soft-deleted and no longer accepts mutations.
    #[error("todo {0} is deleted")]
    Deleted(TodoId),
}

/// Error returned while parsing todo statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown todo status: {0}")]
pub struct ParseTodoStatusError(pub String);
