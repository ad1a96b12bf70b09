//! Shared world state for todo lifecycle BDD scenarios.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::fixture;
use tickbox::todo::{
    adapters::{InMemoryTodoRepository, SequentialIdGenerator},
    domain::{Todo, TodoEvent, TodoId},
    ports::{EventPublisher, PublishError},
    services::{TodoCommandService, TodoServiceError},
};

/// Command service type used by the BDD world.
pub type TestCommandService = TodoCommandService<InMemoryTodoRepository, DefaultClock>;

/// Publisher that keeps every event name for later assertions.
#[derive(Default)]
pub struct RecordingPublisher {
    names: Mutex<Vec<&'static str>>,
}

impl RecordingPublisher {
    /// Returns the names published so far.
    pub fn names(&self) -> Vec<&'static str> {
        self.names
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, events: &[TodoEvent]) -> Result<(), PublishError> {
        let mut names = self
            .names
            .lock()
            .map_err(|err| PublishError(err.to_string()))?;
        names.extend(events.iter().map(TodoEvent::name));
        Ok(())
    }
}

/// Scenario world for todo lifecycle behaviour tests.
pub struct TodoLifecycleWorld {
    pub repository: Arc<InMemoryTodoRepository>,
    pub commands: TestCommandService,
    pub publisher: Arc<RecordingPublisher>,
    pub current: Option<TodoId>,
    pub published_before_command: usize,
    pub last_result: Option<Result<Todo, TodoServiceError>>,
}

impl TodoLifecycleWorld {
    /// Creates a world with an empty repository.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTodoRepository::new());
        let publisher = Arc::new(RecordingPublisher::default());
        let commands = TodoCommandService::new(
            Arc::clone(&repository),
            Arc::new(DefaultClock),
            Arc::new(SequentialIdGenerator::new()),
            Arc::clone(&publisher) as Arc<dyn EventPublisher>,
        );

        Self {
            repository,
            commands,
            publisher,
            current: None,
            published_before_command: 0,
            last_result: None,
        }
    }

    /// Returns the identifier of the todo under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no todo has been created yet.
    pub fn current_id(&self) -> Result<TodoId, eyre::Report> {
        self.current
            .clone()
            .ok_or_else(|| eyre::eyre!("missing current todo in scenario world"))
    }
}

impl Default for TodoLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TodoLifecycleWorld {
    TodoLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Applies the named lifecycle action to the current todo.
///
/// # Errors
///
/// Returns an error for unknown action names or a missing todo.
pub fn apply_action(
    world: &TodoLifecycleWorld,
    action: &str,
) -> Result<Result<Todo, TodoServiceError>, eyre::Report> {
    let id = world.current_id()?;
    let commands = &world.commands;
    Ok(match action {
        "completed" => run_async(commands.complete(&id)),
        "reopened" => run_async(commands.reopen(&id)),
        "archived" => run_async(commands.archive(&id)),
        "restored" => run_async(commands.restore(&id)),
        "deleted" => run_async(commands.soft_delete(&id)),
        other => return Err(eyre::eyre!("unknown lifecycle action '{other}'")),
    })
}
