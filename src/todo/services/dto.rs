//! Read models handed to presentation layers.

use crate::todo::domain::Todo;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Flattened, owned projection of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDto {
    /// Identifier.
    pub id: String,
    /// Title text.
    pub title: String,
    /// `active`, `done`, or `archived`.
    pub status: String,
    /// `low`, `medium`, or `high`.
    pub priority: String,
    /// Normalized tags.
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

impl From<&Todo> for TodoDto {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id().to_string(),
            title: todo.title().to_string(),
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
}

impl From<Todo> for TodoDto {
    fn from(todo: Todo) -> Self {
        Self::from(&todo)
    }
}

/// Aggregate counts over the whole store.
///
/// `total` includes soft-deleted todos, which are counted only in `deleted`.
/// The due buckets consider active, non-deleted todos with a due date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    /// Every stored todo.
    pub total: usize,
    /// Non-deleted active todos.
    pub active: usize,
    /// Non-deleted done todos.
    pub done: usize,
    /// Non-deleted archived todos.
    pub archived: usize,
    /// Soft-deleted todos.
    pub deleted: usize,
    /// Active todos due before today.
    pub overdue: usize,
    /// Active todos due today.
    pub due_today: usize,
    /// Active todos due within the next six days.
    pub due_soon: usize,
}
