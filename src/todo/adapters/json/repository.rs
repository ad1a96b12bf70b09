//! Repository backed by the single-file JSON store.

use super::{
    JsonStore, StoreError,
    models::{StoreDocument, row_to_todo, to_row},
};
use crate::todo::{
    domain::{Todo, TodoId},
    ports::{TodoRepository, TodoRepositoryError, TodoRepositoryResult},
    query::{ListSpec, run_query},
};
use async_trait::async_trait;
use camino::Utf8PathBuf;
use mockable::Clock;
use std::sync::Arc;

/// Todo repository persisting every record in one JSON file.
///
/// Reads load the whole file without locking. Mutations take the advisory
/// lock, reload, apply the change, and atomically rewrite the file. Lock
/// contention fails immediately with [`TodoRepositoryError::Locked`].
pub struct JsonFileTodoRepository<C> {
    store: Arc<JsonStore<C>>,
}

impl<C> Clone for JsonFileTodoRepository<C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<C> JsonFileTodoRepository<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates a repository for the store file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPath`] when `path` has no file name.
    pub fn open(path: impl Into<Utf8PathBuf>, clock: Arc<C>) -> Result<Self, StoreError> {
        Ok(Self::from_store(JsonStore::new(path, clock)?))
    }

    /// Wraps an existing store.
    #[must_use]
    pub fn from_store(store: JsonStore<C>) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &JsonStore<C> {
        &self.store
    }

    async fn run_blocking<F, T>(&self, f: F) -> TodoRepositoryResult<T>
    where
        F: FnOnce(&JsonStore<C>) -> TodoRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(TodoRepositoryError::persistence)?
    }
}

/// Decodes every row. A single invalid row fails the whole load.
fn decode_all(document: &StoreDocument) -> TodoRepositoryResult<Vec<Todo>> {
    document
        .todos
        .iter()
        .map(|row| {
            row_to_todo(row).map_err(|err| {
                TodoRepositoryError::CorruptData(format!("row '{}': {err}", row.id))
            })
        })
        .collect()
}

fn position(document: &StoreDocument, id: &TodoId) -> Option<usize> {
    document.todos.iter().position(|row| row.id == id.as_str())
}

#[async_trait]
impl<C> TodoRepository for JsonFileTodoRepository<C>
where
    C: Clock + Send + Sync + 'static,
{
    async fn create(&self, todo: &Todo) -> TodoRepositoryResult<()> {
        let id = todo.id().clone();
        let row = to_row(todo);
        self.run_blocking(move |store| {
            store.update(|document| {
                if position(document, &id).is_some() {
                    return Err(TodoRepositoryError::Conflict(id));
                }
                document.todos.push(row);
                Ok(())
            })
        })
        .await
    }

    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<()> {
        let id = todo.id().clone();
        let row = to_row(todo);
        self.run_blocking(move |store| {
            store.update(|document| {
                let slot = position(document, &id)
                    .and_then(|index| document.todos.get_mut(index))
                    .ok_or(TodoRepositoryError::NotFound(id))?;
                *slot = row;
                Ok(())
            })
        })
        .await
    }

    async fn get_by_id(&self, id: &TodoId) -> TodoRepositoryResult<Todo> {
        let id = id.clone();
        self.run_blocking(move |store| {
            let document = store.load()?;
            decode_all(&document)?
                .into_iter()
                .find(|todo| todo.id() == &id)
                .ok_or(TodoRepositoryError::NotFound(id))
        })
        .await
    }

    async fn list(&self, spec: &ListSpec) -> TodoRepositoryResult<Vec<Todo>> {
        let spec = spec.clone();
        self.run_blocking(move |store| {
            let document = store.load()?;
            Ok(run_query(decode_all(&document)?, &spec))
        })
        .await
    }

    async fn soft_delete(&self, id: &TodoId) -> TodoRepositoryResult<()> {
        let id = id.clone();
        self.run_blocking(move |store| {
            let now = store.now();
            store.update(|document| {
                let slot = position(document, &id)
                    .and_then(|index| document.todos.get_mut(index))
                    .ok_or_else(|| TodoRepositoryError::NotFound(id.clone()))?;
                let current = row_to_todo(slot).map_err(|err| {
                    TodoRepositoryError::CorruptData(format!("row '{id}': {err}"))
                })?;
                let (deleted, _) = current.soft_delete(now).into_parts();
                *slot = to_row(&deleted);
                Ok(())
            })
        })
        .await
    }

    async fn hard_delete(&self, id: &TodoId) -> TodoRepositoryResult<()> {
        let id = id.clone();
        self.run_blocking(move |store| {
            store.update(|document| {
                let index = position(document, &id).ok_or(TodoRepositoryError::NotFound(id))?;
                document.todos.remove(index);
                Ok(())
            })
        })
        .await
    }
}
