//! Command service for todo mutations.

use super::{
    TodoServiceError, TodoServiceResult,
    undo::{UndoEntry, UndoStack},
};
use crate::todo::{
    domain::{
        DueDate, NewTodo, Priority, Tags, Title, Todo, TodoDomainError, TodoEvent, TodoId,
        Transition,
    },
    ports::{EventPublisher, IdGenerator, TodoRepository},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for adding a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTodoRequest {
    title: String,
    priority: Option<String>,
    tags: Vec<String>,
    due_date: Option<String>,
}

impl AddTodoRequest {
    /// Creates a request with the required title. Priority defaults to
    /// `medium`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            priority: None,
            tags: Vec::new(),
            due_date: None,
        }
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the due date in `YYYY-MM-DD` form.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }
}

/// Request payload for editing todo attributes.
///
/// Unset fields are left untouched. The due date is tri-state: untouched,
/// cleared, or set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTodoRequest {
    id: TodoId,
    title: Option<String>,
    priority: Option<String>,
    tags: Option<Vec<String>>,
    due_date: Option<Option<String>>,
}

impl EditTodoRequest {
    /// Creates an edit request that changes nothing.
    #[must_use]
    pub const fn new(id: TodoId) -> Self {
        Self {
            id,
            title: None,
            priority: None,
            tags: None,
            due_date: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Sets the due date in `YYYY-MM-DD` form.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(Some(due_date.into()));
        self
    }

    /// Clears the due date.
    #[must_use]
    pub fn clearing_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Returns the target identifier.
    #[must_use]
    pub const fn id(&self) -> &TodoId {
        &self.id
    }
}

/// Orchestrates todo mutations: validate, transition, persist, publish.
///
/// Publishing is best-effort. A publisher failure is logged and the command
/// still succeeds.
#[derive(Clone)]
pub struct TodoCommandService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    ids: Arc<dyn IdGenerator>,
    publisher: Arc<dyn EventPublisher>,
    undo: Option<Arc<UndoStack>>,
}

impl<R, C> TodoCommandService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    /// Creates a command service without undo history.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        clock: Arc<C>,
        ids: Arc<dyn IdGenerator>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            clock,
            ids,
            publisher,
            undo: None,
        }
    }

    /// Records undo entries on `undo` for every command that changes state.
    #[must_use]
    pub fn with_undo(mut self, undo: Arc<UndoStack>) -> Self {
        self.undo = Some(undo);
        self
    }

    /// Adds a new active todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ValidationFailed`] for invalid input and
    /// [`TodoServiceError::Conflict`] when the generated identifier is taken.
    pub async fn add(&self, request: AddTodoRequest) -> TodoServiceResult<Todo> {
        let title = Title::new(&request.title)?;
        let priority = request
            .priority
            .as_deref()
            .map(Priority::parse)
            .transpose()?
            .unwrap_or_default();
        let due_date = request.due_date.as_deref().map(DueDate::parse).transpose()?;

        let (todo, events) = Todo::create(
            NewTodo {
                id: self.ids.new_id(),
                title,
                priority,
                tags: Tags::new(&request.tags),
                due_date,
            },
            self.clock.utc(),
        )
        .into_parts();

        self.repository.create(&todo).await?;
        self.publish(&events).await;
        Ok(todo)
    }

    /// Edits title, priority, tags, and due date in one step.
    ///
    /// Only a title change emits an event. Every input is validated before
    /// the todo is loaded, and nothing is persisted when the result equals
    /// the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ValidationFailed`] for invalid input or a
    /// deleted todo and [`TodoServiceError::NotFound`] for unknown ids.
    pub async fn edit(&self, request: EditTodoRequest) -> TodoServiceResult<Todo> {
        let EditTodoRequest {
            id,
            title,
            priority,
            tags,
            due_date,
        } = request;
        let title = title.as_deref().map(Title::new).transpose()?;
        let priority = priority.as_deref().map(Priority::parse).transpose()?;
        let tags = tags.map(Tags::new);
        let due_date = due_date
            .map(|due| due.as_deref().map(DueDate::parse).transpose())
            .transpose()?;

        let current = self.repository.get_by_id(&id).await?;
        if current.is_deleted() {
            return Err(TodoDomainError::Deleted(id).into());
        }

        let now = self.clock.utc();
        let mut next = current.clone();
        let mut events = Vec::new();
        if let Some(new_title) = title {
            let (renamed, emitted) = next.change_title(new_title, now)?.into_parts();
            next = renamed;
            events.extend(emitted);
        }
        if let Some(new_priority) = priority {
            next = next.with_priority(new_priority, now)?;
        }
        if let Some(new_tags) = tags {
            next = next.with_tags(new_tags, now)?;
        }
        if let Some(new_due_date) = due_date {
            next = next.with_due_date(new_due_date, now)?;
        }

        if next == current {
            return Ok(current);
        }
        self.repository.update(&next).await?;
        self.record(UndoEntry::Restore(current));
        self.publish(&events).await;
        Ok(next)
    }

    /// Marks an active todo as done.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ValidationFailed`] when the todo is
    /// archived or deleted and [`TodoServiceError::NotFound`] for unknown ids.
    pub async fn complete(&self, id: &TodoId) -> TodoServiceResult<Todo> {
        self.transition(id, Todo::complete).await
    }

    /// Returns a done todo to active.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ValidationFailed`] when the todo is
    /// archived or deleted and [`TodoServiceError::NotFound`] for unknown ids.
    pub async fn reopen(&self, id: &TodoId) -> TodoServiceResult<Todo> {
        self.transition(id, Todo::reopen).await
    }

    /// Archives a done todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ValidationFailed`] when the todo is active
    /// or deleted and [`TodoServiceError::NotFound`] for unknown ids.
    pub async fn archive(&self, id: &TodoId) -> TodoServiceResult<Todo> {
        self.transition(id, Todo::archive).await
    }

    /// Restores an archived todo to active.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ValidationFailed`] when the todo is done
    /// or deleted and [`TodoServiceError::NotFound`] for unknown ids.
    pub async fn restore(&self, id: &TodoId) -> TodoServiceResult<Todo> {
        self.transition(id, Todo::restore).await
    }

    /// Soft-deletes a todo. Deleting twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::NotFound`] for unknown ids.
    pub async fn soft_delete(&self, id: &TodoId) -> TodoServiceResult<Todo> {
        self.transition(id, |todo, now| Ok(todo.soft_delete(now))).await
    }

    /// Permanently removes a todo. Undo recreates it from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::NotFound`] for unknown ids.
    pub async fn hard_delete(&self, id: &TodoId) -> TodoServiceResult<()> {
        let snapshot = self.repository.get_by_id(id).await?;
        self.repository.hard_delete(id).await?;
        self.record(UndoEntry::Recreate(snapshot));
        Ok(())
    }

    /// Replays the most recent undo entry.
    ///
    /// Returns the affected identifier, or `None` when there is nothing to
    /// undo or the service has no undo stack.
    ///
    /// # Errors
    ///
    /// Returns the repository failure when the snapshot cannot be written
    /// back. The entry is consumed either way.
    pub async fn undo(&self) -> TodoServiceResult<Option<TodoId>> {
        let Some(entry) = self.undo.as_ref().and_then(|stack| stack.pop()) else {
            return Ok(None);
        };
        match &entry {
            UndoEntry::Restore(todo) => self.repository.update(todo).await?,
            UndoEntry::Recreate(todo) => self.repository.create(todo).await?,
        }
        let id = entry.snapshot().id().clone();
        tracing::debug!(todo_id = %id, "undo applied");
        Ok(Some(id))
    }

    async fn transition<F>(&self, id: &TodoId, apply: F) -> TodoServiceResult<Todo>
    where
        F: FnOnce(&Todo, DateTime<Utc>) -> Result<Transition, TodoDomainError>,
    {
        let current = self.repository.get_by_id(id).await?;
        let transition = apply(&current, self.clock.utc())?;
        if transition.is_noop() {
            return Ok(current);
        }

        let (next, events) = transition.into_parts();
        self.repository.update(&next).await?;
        self.record(UndoEntry::Restore(current));
        self.publish(&events).await;
        Ok(next)
    }

    fn record(&self, entry: UndoEntry) {
        if let Some(stack) = &self.undo {
            stack.push(entry);
        }
    }

    async fn publish(&self, events: &[TodoEvent]) {
        if events.is_empty() {
            return;
        }
        if let Err(err) = self.publisher.publish(events).await {
            tracing::warn!(error = %err, count = events.len(), "failed to publish todo events");
        }
    }
}
