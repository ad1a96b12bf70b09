//! Serialized document and row models for the JSON file store.

use crate::todo::domain::{
    DueDate, ParseTodoStatusError, PersistedTodoData, Priority, Tags, Title, Todo,
    TodoDomainError, TodoId, TodoStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Schema version written to and required from every store file.
pub const SCHEMA_VERSION: u32 = 1;

/// Whole-file document holding every todo row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    /// Schema version.
    pub version: u32,
    /// Time of the last save.
    pub saved_at: DateTime<Utc>,
    /// Stored rows in insertion order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub todos: Vec<TodoRow>,
}

impl StoreDocument {
    /// Creates an empty document stamped at `now`.
    #[must_use]
    pub const fn empty(now: DateTime<Utc>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            saved_at: now,
            todos: Vec::new(),
        }
    }
}

/// Persisted form of a single todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRow {
    /// Todo identifier.
    pub id: String,
    /// Title text.
    pub title: String,
    /// `active`, `done`, or `archived`.
    pub status: String,
    /// `low`, `medium`, or `high`.
    pub priority: String,
    /// Normalized tags.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Due date in `YYYY-MM-DD` form.
    pub due_date: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Archival timestamp.
    pub archived_at: Option<DateTime<Utc>>,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Reasons a stored row fails revalidation.
#[derive(Debug, Error)]
pub enum RowError {
    /// A field failed value-object validation.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),
    /// The status is unknown.
    #[error(transparent)]
    Status(#[from] ParseTodoStatusError),
    /// `updatedAt` precedes `createdAt`.
    #[error("updatedAt precedes createdAt")]
    Timestamps,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Converts a todo snapshot into its persisted row.
#[must_use]
pub fn to_row(todo: &Todo) -> TodoRow {
    TodoRow {
        id: todo.id().as_str().to_owned(),
        title: todo.title().as_str().to_owned(),
        status: todo.status().as_str().to_owned(),
        priority: todo.priority().as_str().to_owned(),
        tags: todo.tags().as_slice().to_vec(),
        due_date: todo.due_date().map(|due| due.to_string()),
        created_at: todo.created_at(),
        updated_at: todo.updated_at(),
        completed_at: todo.completed_at(),
        archived_at: todo.archived_at(),
        deleted_at: todo.deleted_at(),
    }
}

/// Rebuilds a todo from a stored row, revalidating every field through the
/// same constructors used for fresh input.
///
/// # Errors
///
/// Returns [`RowError`] when any field is invalid.
pub fn row_to_todo(row: &TodoRow) -> Result<Todo, RowError> {
    if row.updated_at < row.created_at {
        return Err(RowError::Timestamps);
    }
    let due_date = row.due_date.as_deref().map(DueDate::parse).transpose()?;

    Ok(Todo::from_persisted(PersistedTodoData {
        id: TodoId::new(row.id.as_str())?,
        title: Title::new(&row.title)?,
        status: TodoStatus::try_from(row.status.as_str())?,
        priority: Priority::parse(&row.priority)?,
        tags: Tags::new(&row.tags),
        due_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
        completed_at: row.completed_at,
        archived_at: row.archived_at,
        deleted_at: row.deleted_at,
    }))
}
