//! In-memory repository for todo tests and ephemeral use.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::todo::{
    domain::{Todo, TodoId},
    ports::{TodoRepository, TodoRepositoryError, TodoRepositoryResult},
    query::{ListSpec, run_query},
};

/// Thread-safe in-memory todo repository.
///
/// Readers share the lock; writers are exclusive.
pub struct InMemoryTodoRepository<C = DefaultClock> {
    todos: Arc<RwLock<HashMap<TodoId, Todo>>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryTodoRepository<C> {
    fn clone(&self) -> Self {
        Self {
            todos: Arc::clone(&self.todos),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl InMemoryTodoRepository<DefaultClock> {
    /// Creates an empty in-memory repository using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTodoRepository<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTodoRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty repository stamping soft deletes with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            todos: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Creates a repository pre-populated with `todos`, bypassing conflict
    /// checks.
    #[must_use]
    pub fn seeded(clock: Arc<C>, todos: impl IntoIterator<Item = Todo>) -> Self {
        let map = todos
            .into_iter()
            .map(|todo| (todo.id().clone(), todo))
            .collect();
        Self {
            todos: Arc::new(RwLock::new(map)),
            clock,
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> TodoRepositoryError {
    TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> TodoRepository for InMemoryTodoRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn create(&self, todo: &Todo) -> TodoRepositoryResult<()> {
        let mut todos = self.todos.write().map_err(poisoned)?;
        if todos.contains_key(todo.id()) {
            return Err(TodoRepositoryError::Conflict(todo.id().clone()));
        }
        todos.insert(todo.id().clone(), todo.clone());
        Ok(())
    }

    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<()> {
        let mut todos = self.todos.write().map_err(poisoned)?;
        let slot = todos
            .get_mut(todo.id())
            .ok_or_else(|| TodoRepositoryError::NotFound(todo.id().clone()))?;
        *slot = todo.clone();
        Ok(())
    }

    async fn get_by_id(&self, id: &TodoId) -> TodoRepositoryResult<Todo> {
        let todos = self.todos.read().map_err(poisoned)?;
        todos
            .get(id)
            .cloned()
            .ok_or_else(|| TodoRepositoryError::NotFound(id.clone()))
    }

    async fn list(&self, spec: &ListSpec) -> TodoRepositoryResult<Vec<Todo>> {
        let todos = self.todos.read().map_err(poisoned)?;
        Ok(run_query(todos.values().cloned(), spec))
    }

    async fn soft_delete(&self, id: &TodoId) -> TodoRepositoryResult<()> {
        let mut todos = self.todos.write().map_err(poisoned)?;
        let slot = todos
            .get_mut(id)
            .ok_or_else(|| TodoRepositoryError::NotFound(id.clone()))?;
        let (deleted, _) = slot.soft_delete(self.clock.utc()).into_parts();
        *slot = deleted;
        Ok(())
    }

    async fn hard_delete(&self, id: &TodoId) -> TodoRepositoryResult<()> {
        let mut todos = self.todos.write().map_err(poisoned)?;
        todos
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| TodoRepositoryError::NotFound(id.clone()))
    }
}
