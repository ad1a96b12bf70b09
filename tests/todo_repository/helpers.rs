//! Shared helpers for todo repository integration tests.

use camino::Utf8PathBuf;
use chrono::{DateTime, TimeZone, Utc};
use mockable::DefaultClock;
use std::sync::Arc;
use tempfile::TempDir;
use tickbox::todo::{
    adapters::{InMemoryTodoRepository, JsonFileTodoRepository},
    domain::{NewTodo, Priority, Tags, Title, Todo, TodoId},
    ports::TodoRepository,
};

/// Repository adapter under test.
#[derive(Debug, Clone, Copy)]
pub enum Backend {
    Memory,
    JsonFile,
}

/// Repository plus whatever keeps its backing storage alive.
pub struct Subject {
    pub repository: Arc<dyn TodoRepository>,
    _dir: Option<TempDir>,
}

/// Builds a fresh, empty repository for `backend`.
///
/// # Errors
///
/// Returns an error when the temporary store cannot be prepared.
pub fn subject(backend: Backend) -> eyre::Result<Subject> {
    Ok(match backend {
        Backend::Memory => Subject {
            repository: Arc::new(InMemoryTodoRepository::new()),
            _dir: None,
        },
        Backend::JsonFile => {
            let dir = tempfile::tempdir()?;
            let path = Utf8PathBuf::from_path_buf(dir.path().join("todos.json"))
                .map_err(|path| eyre::eyre!("non UTF-8 temp path {}", path.display()))?;
            Subject {
                repository: Arc::new(JsonFileTodoRepository::open(path, Arc::new(DefaultClock))?),
                _dir: Some(dir),
            }
        }
    })
}

/// Returns a fixed UTC timestamp on 2026-01-01 at `hour`.
///
/// # Errors
///
/// Returns an error when the hour is out of range.
pub fn at(hour: u32) -> eyre::Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2026, 1, 1, hour, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid hour {hour}"))
}

/// Creates an active todo snapshot without touching a repository.
///
/// # Errors
///
/// Returns an error when the identifier or title is invalid.
pub fn new_todo(id: &str, title: &str, created_at: DateTime<Utc>) -> eyre::Result<Todo> {
    let (todo, _) = Todo::create(
        NewTodo {
            id: TodoId::new(id)?,
            title: Title::new(title)?,
            priority: Priority::Medium,
            tags: Tags::new(["integration"]),
            due_date: None,
        },
        created_at,
    )
    .into_parts();
    Ok(todo)
}
