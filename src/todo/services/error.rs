//! Stable error taxonomy returned by todo services.

use crate::todo::{
    domain::{TodoDomainError, TodoId},
    ports::TodoRepositoryError,
};
use thiserror::Error;

/// Errors returned by todo command and query services.
///
/// Storage-specific failures never escape as their own types; they are
/// folded into one of these variants.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// The todo does not exist.
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// A todo with the same identifier already exists.
    #[error("todo already exists: {0}")]
    Conflict(TodoId),

    /// Input or transition rejected by the domain.
    #[error("validation failed: {0}")]
    ValidationFailed(#[from] TodoDomainError),

    /// Stored content failed structural or domain validation.
    #[error("corrupt data: {0}")]
    CorruptData(String),

    /// Infrastructure failure, including lock contention.
    #[error("unexpected failure: {0}")]
    Unexpected(#[source] TodoRepositoryError),
}

impl TodoServiceError {
    /// Returns `true` when the failure was caused by another holder of the
    /// store lock.
    #[must_use]
    pub const fn is_lock_contention(&self) -> bool {
        matches!(self, Self::Unexpected(TodoRepositoryError::Locked(_)))
    }
}

impl From<TodoRepositoryError> for TodoServiceError {
    fn from(err: TodoRepositoryError) -> Self {
        match err {
            TodoRepositoryError::NotFound(id) => Self::NotFound(id),
            TodoRepositoryError::Conflict(id) => Self::Conflict(id),
            TodoRepositoryError::CorruptData(reason) => Self::CorruptData(reason),
            other @ (TodoRepositoryError::Locked(_) | TodoRepositoryError::Persistence(_)) => {
                Self::Unexpected(other)
            }
        }
    }
}

/// Result type for todo service operations.
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;
