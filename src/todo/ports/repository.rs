//! Repository port for todo persistence and listing.

use crate::todo::{
    domain::{Todo, TodoId},
    query::ListSpec,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for todo repository operations.
pub type TodoRepositoryResult<T> = Result<T, TodoRepositoryError>;

/// Todo persistence contract.
///
/// Reads operate on a fresh snapshot and take no lock, so they may observe
/// either side of a concurrent write.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Stores a new todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::Conflict`] when the identifier already
    /// exists.
    async fn create(&self, todo: &Todo) -> TodoRepositoryResult<()>;

    /// Replaces an existing todo with a new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when the todo does not
    /// exist.
    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<()>;

    /// Loads a todo by identifier, including soft-deleted ones.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when the todo does not
    /// exist.
    async fn get_by_id(&self, id: &TodoId) -> TodoRepositoryResult<Todo>;

    /// Lists todos matching `spec`.
    async fn list(&self, spec: &ListSpec) -> TodoRepositoryResult<Vec<Todo>>;

    /// Soft-deletes a todo through the domain transition and persists it.
    ///
    /// Command handlers should prefer the domain operation followed by
    /// [`TodoRepository::update`] so the emitted event can be published.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when the todo does not
    /// exist.
    async fn soft_delete(&self, id: &TodoId) -> TodoRepositoryResult<()>;

    /// Permanently removes a todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when the todo does not
    /// exist.
    async fn hard_delete(&self, id: &TodoId) -> TodoRepositoryResult<()>;
}

/// Errors returned by todo repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoRepositoryError {
    /// A todo with the same identifier already exists.
    #[error("duplicate todo identifier: {0}")]
    Conflict(TodoId),

    /// The todo was not found.
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// Another process holds the store lock.
    #[error("store is locked: {0}")]
    Locked(String),

    /// Stored content failed structural or domain validation.
    #[error("corrupt data: {0}")]
    CorruptData(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
