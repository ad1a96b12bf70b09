//! Then steps for todo lifecycle BDD scenarios.

use super::world::{TodoLifecycleWorld, run_async};
use rstest_bdd_macros::then;
use tickbox::todo::{
    domain::{TodoDomainError, TodoStatus},
    ports::TodoRepository,
    services::TodoServiceError,
};

#[then(r#"the todo status is "{status}""#)]
fn todo_status_is(world: &TodoLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TodoStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let id = world.current_id()?;
    let stored = run_async(world.repository.get_by_id(&id))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then(r#"the last command published "{name}""#)]
fn last_command_published(world: &TodoLifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let names = world.publisher.names();
    let emitted = names.get(world.published_before_command..).unwrap_or_default();

    if emitted != [name.as_str()] {
        return Err(eyre::eyre!("expected [{name}], got {emitted:?}"));
    }
    Ok(())
}

#[then("the last command published nothing")]
fn last_command_published_nothing(world: &TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let names = world.publisher.names();
    if names.len() != world.published_before_command {
        return Err(eyre::eyre!("expected no new events, got {names:?}"));
    }
    Ok(())
}

#[then("the command fails with an invalid transition error")]
fn fails_with_invalid_transition(world: &TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing command result"))?;

    if !matches!(
        result,
        Err(TodoServiceError::ValidationFailed(
            TodoDomainError::InvalidTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!("expected InvalidTransition error, got {result:?}"));
    }
    Ok(())
}

#[then("the command fails with a deleted todo error")]
fn fails_with_deleted_todo(world: &TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing command result"))?;

    if !matches!(
        result,
        Err(TodoServiceError::ValidationFailed(TodoDomainError::Deleted(_)))
    ) {
        return Err(eyre::eyre!("expected Deleted error, got {result:?}"));
    }
    Ok(())
}
