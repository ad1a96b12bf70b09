//! Todo snapshot, lifecycle status, and pure state transitions.

use super::{
    DueDate, ParseTodoStatusError, Priority, Tags, Title, TodoDomainError, TodoEvent, TodoId,
};
use chrono::{DateTime, Utc};
use std::fmt;

/// Todo lifecycle status. Soft deletion is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoStatus {
    /// Open work.
    Active,
    /// Completed work.
    Done,
    /// Completed work moved out of the way.
    Archived,
}

impl TodoStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Done => "done",
            Self::Archived => "archived",
        }
    }
}

impl TryFrom<&str> for TodoStatus {
    type Error = ParseTodoStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "done" => Ok(Self::Done),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseTodoStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status-changing transitions, used to describe rejected attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoAction {
    /// Move from active to done.
    Complete,
    /// Move from done back to active.
    Reopen,
    /// Move from done to archived.
    Archive,
    /// Move from archived back to active.
    Restore,
}

impl TodoAction {
    /// Returns the verb used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Reopen => "reopen",
            Self::Archive => "archive",
            Self::Restore => "restore",
        }
    }
}

impl fmt::Display for TodoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot of a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: TodoId,
    title: Title,
    status: TodoStatus,
    priority: Priority,
    tags: Tags,
    due_date: Option<DueDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    archived_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for creating a new todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    /// Identifier for the new todo.
    pub id: TodoId,
    /// Validated title.
    pub title: Title,
    /// Initial priority.
    pub priority: Priority,
    /// Initial tags.
    pub tags: Tags,
    /// Optional due date.
    pub due_date: Option<DueDate>,
}

/// Parameter object for reconstructing a persisted todo snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTodoData {
    /// Persisted identifier.
    pub id: TodoId,
    /// Persisted title.
    pub title: Title,
    /// Persisted status.
    pub status: TodoStatus,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted tags.
    pub tags: Tags,
    /// Persisted due date, if any.
    pub due_date: Option<DueDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted archival timestamp, if any.
    pub archived_at: Option<DateTime<Utc>>,
    /// Persisted soft-deletion timestamp, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Result of a lifecycle transition: the next snapshot and its effects.
///
/// Idempotent no-ops return the unchanged snapshot with no events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    todo: Todo,
    events: Vec<TodoEvent>,
}

impl Transition {
    fn changed(todo: Todo, event: TodoEvent) -> Self {
        Self {
            todo,
            events: vec![event],
        }
    }

    const fn unchanged(todo: Todo) -> Self {
        Self {
            todo,
            events: Vec::new(),
        }
    }

    /// Returns the resulting snapshot.
    #[must_use]
    pub const fn todo(&self) -> &Todo {
        &self.todo
    }

    /// Returns the emitted events.
    #[must_use]
    pub fn events(&self) -> &[TodoEvent] {
        &self.events
    }

    /// Returns `true` when the transition changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.events.is_empty()
    }

    /// Splits the transition into its snapshot and events.
    #[must_use]
    pub fn into_parts(self) -> (Todo, Vec<TodoEvent>) {
        (self.todo, self.events)
    }
}

impl Todo {
    /// Creates an active todo stamped at `now` and emits
    /// [`TodoEvent::Created`].
    #[must_use]
    pub fn create(params: NewTodo, now: DateTime<Utc>) -> Transition {
        let NewTodo {
            id,
            title,
            priority,
            tags,
            due_date,
        } = params;
        let event = TodoEvent::Created {
            id: id.clone(),
            occurred_at: now,
        };
        let todo = Self {
            id,
            title,
            status: TodoStatus::Active,
            priority,
            tags,
            due_date,
            created_at: now,
            updated_at: now,
            completed_at: None,
            archived_at: None,
            deleted_at: None,
        };
        Transition::changed(todo, event)
    }

    /// Reconstructs a todo from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTodoData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            status: data.status,
            priority: data.priority,
            tags: data.tags,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
            archived_at: data.archived_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the todo identifier.
    #[must_use]
    pub const fn id(&self) -> &TodoId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TodoStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion timestamp, if done.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the archival timestamp, if archived.
    #[must_use]
    pub const fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    /// Returns the soft-deletion timestamp, if deleted.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` when the todo has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::Deleted`] when the todo is soft-deleted.
    pub fn change_title(
        &self,
        title: Title,
        now: DateTime<Utc>,
    ) -> Result<Transition, TodoDomainError> {
        self.ensure_not_deleted()?;
        if self.title == title {
            return Ok(Transition::unchanged(self.clone()));
        }
        let mut next = self.clone();
        next.title = title.clone();
        next.touch(now);
        let event = TodoEvent::TitleChanged {
            id: self.id.clone(),
            title,
            occurred_at: now,
        };
        Ok(Transition::changed(next, event))
    }

    /// Marks an active todo as done.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidTransition`] when archived and
    /// [`TodoDomainError::Deleted`] when soft-deleted.
    pub fn complete(&self, now: DateTime<Utc>) -> Result<Transition, TodoDomainError> {
        self.ensure_not_deleted()?;
        match self.status {
            TodoStatus::Done => Ok(Transition::unchanged(self.clone())),
            TodoStatus::Active => {
                let mut next = self.clone();
                next.status = TodoStatus::Done;
                next.completed_at = Some(now);
                next.touch(now);
                Ok(Transition::changed(
                    next,
                    TodoEvent::Completed {
                        id: self.id.clone(),
                        occurred_at: now,
                    },
                ))
            }
            TodoStatus::Archived => Err(self.invalid(TodoAction::Complete)),
        }
    }

    /// Moves a done todo back to active and clears its completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidTransition`] when archived and
    /// [`TodoDomainError::Deleted`] when soft-deleted.
    pub fn reopen(&self, now: DateTime<Utc>) -> Result<Transition, TodoDomainError> {
        self.ensure_not_deleted()?;
        match self.status {
            TodoStatus::Active => Ok(Transition::unchanged(self.clone())),
            TodoStatus::Done => {
                let mut next = self.clone();
                next.status = TodoStatus::Active;
                next.completed_at = None;
                next.touch(now);
                Ok(Transition::changed(
                    next,
                    TodoEvent::Reopened {
                        id: self.id.clone(),
                        occurred_at: now,
                    },
                ))
            }
            TodoStatus::Archived => Err(self.invalid(TodoAction::Reopen)),
        }
    }

    /// Archives a done todo.
    ///
    /// Active todos must be completed first; they are never completed
    /// implicitly.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidTransition`] when active and
    /// [`TodoDomainError::Deleted`] when soft-deleted.
    pub fn archive(&self, now: DateTime<Utc>) -> Result<Transition, TodoDomainError> {
        self.ensure_not_deleted()?;
        match self.status {
            TodoStatus::Archived => Ok(Transition::unchanged(self.clone())),
            TodoStatus::Done => {
                let mut next = self.clone();
                next.status = TodoStatus::Archived;
                next.archived_at = Some(now);
                next.touch(now);
                Ok(Transition::changed(
                    next,
                    TodoEvent::Archived {
                        id: self.id.clone(),
                        occurred_at: now,
                    },
                ))
            }
            TodoStatus::Active => Err(self.invalid(TodoAction::Archive)),
        }
    }

    /// Moves an archived todo back to active and clears its completion and
    /// archival times.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidTransition`] when done and
    /// [`TodoDomainError::Deleted`] when soft-deleted.
    pub fn restore(&self, now: DateTime<Utc>) -> Result<Transition, TodoDomainError> {
        self.ensure_not_deleted()?;
        match self.status {
            TodoStatus::Active => Ok(Transition::unchanged(self.clone())),
            TodoStatus::Archived => {
                let mut next = self.clone();
                next.status = TodoStatus::Active;
                next.completed_at = None;
                next.archived_at = None;
                next.touch(now);
                Ok(Transition::changed(
                    next,
                    TodoEvent::Restored {
                        id: self.id.clone(),
                        occurred_at: now,
                    },
                ))
            }
            TodoStatus::Done => Err(self.invalid(TodoAction::Restore)),
        }
    }

    /// Soft-deletes the todo. Deleting twice is a no-op; this never fails.
    #[must_use]
    pub fn soft_delete(&self, now: DateTime<Utc>) -> Transition {
        if self.is_deleted() {
            return Transition::unchanged(self.clone());
        }
        let mut next = self.clone();
        next.deleted_at = Some(now);
        next.touch(now);
        Transition::changed(
            next,
            TodoEvent::Deleted {
                id: self.id.clone(),
                occurred_at: now,
            },
        )
    }

    /// Returns a snapshot with a new priority. Emits no event.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::Deleted`] when the todo is soft-deleted.
    pub fn with_priority(
        &self,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<Self, TodoDomainError> {
        self.edit_attribute(now, |todo| {
            todo.priority = priority;
        })
    }

    /// Returns a snapshot with replaced tags. Emits no event.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::Deleted`] when the todo is soft-deleted.
    pub fn with_tags(&self, tags: Tags, now: DateTime<Utc>) -> Result<Self, TodoDomainError> {
        self.edit_attribute(now, |todo| {
            todo.tags = tags;
        })
    }

    /// Returns a snapshot with the due date set or cleared. Emits no event.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::Deleted`] when the todo is soft-deleted.
    pub fn with_due_date(
        &self,
        due_date: Option<DueDate>,
        now: DateTime<Utc>,
    ) -> Result<Self, TodoDomainError> {
        self.edit_attribute(now, |todo| {
            todo.due_date = due_date;
        })
    }

    /// Applies an attribute edit, stamping `updated_at` only when the
    /// snapshot actually changed.
    fn edit_attribute(
        &self,
        now: DateTime<Utc>,
        edit: impl FnOnce(&mut Self),
    ) -> Result<Self, TodoDomainError> {
        self.ensure_not_deleted()?;
        let mut next = self.clone();
        edit(&mut next);
        if next != *self {
            next.touch(now);
        }
        Ok(next)
    }

    fn ensure_not_deleted(&self) -> Result<(), TodoDomainError> {
        if self.is_deleted() {
            return Err(TodoDomainError::Deleted(self.id.clone()));
        }
        Ok(())
    }

    fn invalid(&self, action: TodoAction) -> TodoDomainError {
        TodoDomainError::InvalidTransition {
            id: self.id.clone(),
            from: self.status,
            action,
        }
    }

    /// Stamps `updated_at`, never moving it backwards.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = self.updated_at.max(now);
    }
}
