//! Contract tests shared by the in-memory and JSON-file repositories.

use super::helpers::{Backend, at, new_todo, subject};
use eyre::ensure;
use rstest::rstest;
use tickbox::todo::{
    domain::{TodoId, TodoStatus},
    ports::TodoRepositoryError,
    query::{ListSpec, SortField, SortOrder},
};

#[rstest]
#[case::memory(Backend::Memory)]
#[case::json_file(Backend::JsonFile)]
#[tokio::test(flavor = "multi_thread")]
async fn create_then_get_returns_identical_snapshot(#[case] backend: Backend) -> eyre::Result<()> {
    let subject = subject(backend)?;
    let todo = new_todo("a1", "Buy milk", at(8)?)?;

    subject.repository.create(&todo).await?;

    ensure!(subject.repository.get_by_id(todo.id()).await? == todo);
    Ok(())
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::json_file(Backend::JsonFile)]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_create_conflicts(#[case] backend: Backend) -> eyre::Result<()> {
    let subject = subject(backend)?;
    let todo = new_todo("a1", "Buy milk", at(8)?)?;
    subject.repository.create(&todo).await?;

    let result = subject.repository.create(&todo).await;

    ensure!(matches!(result, Err(TodoRepositoryError::Conflict(ref id)) if id == todo.id()));
    Ok(())
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::json_file(Backend::JsonFile)]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_the_stored_snapshot(#[case] backend: Backend) -> eyre::Result<()> {
    let subject = subject(backend)?;
    let todo = new_todo("a1", "Buy milk", at(8)?)?;
    subject.repository.create(&todo).await?;
    let (done, _) = todo.complete(at(9)?)?.into_parts();

    subject.repository.update(&done).await?;

    let stored = subject.repository.get_by_id(todo.id()).await?;
    ensure!(stored.status() == TodoStatus::Done);
    ensure!(stored.completed_at() == Some(at(9)?));
    Ok(())
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::json_file(Backend::JsonFile)]
#[tokio::test(flavor = "multi_thread")]
async fn missing_ids_are_not_found(#[case] backend: Backend) -> eyre::Result<()> {
    let subject = subject(backend)?;
    let ghost = new_todo("ghost", "Ghost", at(8)?)?;
    let id = TodoId::new("ghost")?;

    ensure!(matches!(
        subject.repository.update(&ghost).await,
        Err(TodoRepositoryError::NotFound(_))
    ));
    ensure!(matches!(
        subject.repository.get_by_id(&id).await,
        Err(TodoRepositoryError::NotFound(_))
    ));
    ensure!(matches!(
        subject.repository.soft_delete(&id).await,
        Err(TodoRepositoryError::NotFound(_))
    ));
    ensure!(matches!(
        subject.repository.hard_delete(&id).await,
        Err(TodoRepositoryError::NotFound(_))
    ));
    Ok(())
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::json_file(Backend::JsonFile)]
#[tokio::test(flavor = "multi_thread")]
async fn soft_deleted_todos_stay_addressable_but_hidden(
    #[case] backend: Backend,
) -> eyre::Result<()> {
    let subject = subject(backend)?;
    let todo = new_todo("a1", "Buy milk", at(8)?)?;
    subject.repository.create(&todo).await?;

    subject.repository.soft_delete(todo.id()).await?;

    ensure!(subject.repository.get_by_id(todo.id()).await?.is_deleted());
    ensure!(subject.repository.list(&ListSpec::new()).await?.is_empty());
    ensure!(
        subject
            .repository
            .list(&ListSpec::new().including_deleted())
            .await?
            .len()
            == 1
    );
    Ok(())
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::json_file(Backend::JsonFile)]
#[tokio::test(flavor = "multi_thread")]
async fn hard_delete_removes_the_row(#[case] backend: Backend) -> eyre::Result<()> {
    let subject = subject(backend)?;
    let todo = new_todo("a1", "Buy milk", at(8)?)?;
    subject.repository.create(&todo).await?;

    subject.repository.hard_delete(todo.id()).await?;

    ensure!(matches!(
        subject.repository.get_by_id(todo.id()).await,
        Err(TodoRepositoryError::NotFound(_))
    ));
    Ok(())
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::json_file(Backend::JsonFile)]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_status_in_creation_order(#[case] backend: Backend) -> eyre::Result<()> {
    let subject = subject(backend)?;
    let first = new_todo("a", "First", at(8)?)?;
    let second = new_todo("b", "Second", at(9)?)?;
    let (third, _) = new_todo("c", "Third", at(10)?)?.complete(at(11)?)?.into_parts();
    for todo in [&second, &third, &first] {
        subject.repository.create(todo).await?;
    }

    let spec = ListSpec::new()
        .with_status(TodoStatus::Active)
        .sorted_by(SortField::Created, SortOrder::Ascending);
    let listed = subject.repository.list(&spec).await?;

    let ids: Vec<&str> = listed.iter().map(|todo| todo.id().as_str()).collect();
    ensure!(ids == ["a", "b"], "unexpected order {ids:?}");
    Ok(())
}
