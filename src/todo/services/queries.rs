//! Read-side service for todo lookups, listings, and statistics.

use super::{
    TodoServiceResult,
    dto::{StatsDto, TodoDto},
};
use crate::todo::{
    domain::{Todo, TodoId, TodoStatus},
    ports::TodoRepository,
    query::{ListSpec, SortField, SortOrder},
};
use chrono::{Days, NaiveDate};
use mockable::Clock;
use std::sync::Arc;

const DUE_SOON_DAYS: u64 = 7;

/// Query service projecting todos into DTOs.
#[derive(Clone)]
pub struct TodoQueryService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TodoQueryService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new query service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Loads one todo, including soft-deleted ones.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::NotFound`] for unknown ids.
    pub async fn get(&self, id: &TodoId) -> TodoServiceResult<TodoDto> {
        let todo = self.repository.get_by_id(id).await?;
        Ok(TodoDto::from(&todo))
    }

    /// Lists todos matching `spec`.
    ///
    /// # Errors
    ///
    /// Returns the mapped repository failure.
    pub async fn list(&self, spec: &ListSpec) -> TodoServiceResult<Vec<TodoDto>> {
        let todos = self.repository.list(spec).await?;
        Ok(todos.iter().map(TodoDto::from).collect())
    }

    /// Counts todos by status and due-date bucket relative to today's UTC
    /// date.
    ///
    /// # Errors
    ///
    /// Returns the mapped repository failure.
    pub async fn stats(&self) -> TodoServiceResult<StatsDto> {
        let spec = ListSpec::new()
            .including_deleted()
            .sorted_by(SortField::Created, SortOrder::Ascending);
        let todos = self.repository.list(&spec).await?;
        let today = self.clock.utc().date_naive();
        Ok(tally(&todos, today))
    }
}

fn tally(todos: &[Todo], today: NaiveDate) -> StatsDto {
    let soon_limit = today.checked_add_days(Days::new(DUE_SOON_DAYS));
    let mut stats = StatsDto {
        total: todos.len(),
        ..StatsDto::default()
    };

    for todo in todos {
        if todo.is_deleted() {
            stats.deleted += 1;
            continue;
        }
        match todo.status() {
            TodoStatus::Active => stats.active += 1,
            TodoStatus::Done => stats.done += 1,
            TodoStatus::Archived => stats.archived += 1,
        }

        let Some(due) = todo.due_date().filter(|_| todo.status() == TodoStatus::Active) else {
            continue;
        };
        let due = due.date();
        if due < today {
            stats.overdue += 1;
        } else if due == today {
            stats.due_today += 1;
        } else if soon_limit.is_some_and(|limit| due < limit) {
            stats.due_soon += 1;
        }
    }
    stats
}
