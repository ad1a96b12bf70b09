//! Concurrent writers against a shared repository.

use super::helpers::{Backend, at, new_todo, subject};
use eyre::ensure;
use rstest::rstest;
use tickbox::todo::{ports::TodoRepositoryError, query::ListSpec};

const WRITERS: usize = 16;

#[rstest]
#[case::memory(Backend::Memory)]
#[case::json_file(Backend::JsonFile)]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_never_lose_acknowledged_writes(
    #[case] backend: Backend,
) -> eyre::Result<()> {
    let subject = subject(backend)?;
    let created_at = at(8)?;

    let mut handles = Vec::with_capacity(WRITERS);
    for index in 0..WRITERS {
        let repository = std::sync::Arc::clone(&subject.repository);
        let todo = new_todo(&format!("w{index:02}"), "Concurrent", created_at)?;
        handles.push(tokio::spawn(async move { repository.create(&todo).await }));
    }

    let mut acknowledged = 0;
    for handle in handles {
        match handle.await? {
            Ok(()) => acknowledged += 1,
            // Lock contention fails fast; the write is simply not applied.
            Err(TodoRepositoryError::Locked(_)) => {}
            Err(other) => return Err(other.into()),
        }
    }

    let stored = subject
        .repository
        .list(&ListSpec::new().including_deleted())
        .await?;
    ensure!(acknowledged > 0);
    ensure!(
        stored.len() == acknowledged,
        "{acknowledged} acknowledged writes but {} stored",
        stored.len()
    );
    Ok(())
}
