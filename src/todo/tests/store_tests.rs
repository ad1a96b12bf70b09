//! Unit tests for the JSON file store and its repository.

use crate::todo::{
    adapters::json::{
        JsonFileTodoRepository, JsonStore, StoreError,
        models::{SCHEMA_VERSION, StoreDocument, row_to_todo, to_row},
    },
    domain::TodoStatus,
    ports::{TodoRepository, TodoRepositoryError},
    query::ListSpec,
};
use camino::Utf8PathBuf;
use chrono::TimeDelta;
use eyre::{bail, ensure};
use mockable::Clock;
use rstest::{fixture, rstest};
use std::sync::{Arc, Barrier};
use tempfile::TempDir;

use super::support::{FixedClock, active, at, draft, id};

struct StoreEnv {
    _dir: TempDir,
    path: Utf8PathBuf,
    clock: Arc<FixedClock>,
}

impl StoreEnv {
    fn store(&self) -> JsonStore<FixedClock> {
        JsonStore::new(self.path.clone(), Arc::clone(&self.clock)).expect("valid store path")
    }

    fn repository(&self) -> JsonFileTodoRepository<FixedClock> {
        JsonFileTodoRepository::from_store(self.store())
    }
}

#[fixture]
fn env() -> StoreEnv {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 temp dir");
    StoreEnv {
        path: root.join("todos.json"),
        _dir: dir,
        clock: Arc::new(FixedClock::new(at(2026, 1, 5, 10))),
    }
}

#[rstest]
fn missing_file_loads_as_empty_document(env: StoreEnv) -> eyre::Result<()> {
    let document = env.store().load()?;

    ensure!(document.version == SCHEMA_VERSION);
    ensure!(document.todos.is_empty());
    ensure!(!env.path.exists(), "loading must not create the file");
    Ok(())
}

#[rstest]
fn missing_parent_directory_loads_as_empty_document(env: StoreEnv) -> eyre::Result<()> {
    let nested = env.path.with_file_name("absent").join("todos.json");
    let store = JsonStore::new(nested, Arc::clone(&env.clock))?;

    ensure!(store.load()?.todos.is_empty());
    Ok(())
}

#[rstest]
fn save_writes_camel_case_document_and_removes_temp_file(env: StoreEnv) -> eyre::Result<()> {
    let store = env.store();
    let todo = draft("a1", "Buy milk").due("2026-01-09").create_at(at(2026, 1, 4, 8));
    let mut document = StoreDocument::empty(env.clock.utc());
    document.todos.push(to_row(&todo));

    store.save(document)?;

    ensure!(!store.temp_path().exists());
    let raw = std::fs::read_to_string(&env.path)?;
    ensure!(raw.contains("\"version\": 1"));
    ensure!(raw.contains("\"dueDate\": \"2026-01-09\""));
    ensure!(raw.contains("\"savedAt\""));

    let loaded = store.load()?;
    let [row] = loaded.todos.as_slice() else {
        bail!("expected exactly one row, got {}", loaded.todos.len());
    };
    ensure!(row_to_todo(row)? == todo);
    ensure!(loaded.saved_at == at(2026, 1, 5, 10));
    Ok(())
}

#[rstest]
fn stray_temp_file_leaves_original_intact(env: StoreEnv) -> eyre::Result<()> {
    let store = env.store();
    let mut document = StoreDocument::empty(env.clock.utc());
    document.todos.push(to_row(&active("a1", "Keep me", at(2026, 1, 1, 0))));
    store.save(document)?;

    // Simulates a crash after the temporary file was written but before the
    // rename.
    std::fs::write(store.temp_path(), b"{ \"version\": 1, \"todos\": [")?;

    let loaded = store.load()?;
    ensure!(loaded.todos.len() == 1);

    store.save(loaded)?;
    ensure!(!store.temp_path().exists());
    Ok(())
}

#[rstest]
#[case::not_json("not json at all")]
#[case::truncated("{\"version\": 1, \"savedAt\": \"2026-01-01T00:00:00Z\", \"todos\": [")]
#[case::wrong_version("{\"version\": 2, \"savedAt\": \"2026-01-01T00:00:00Z\", \"todos\": []}")]
fn unreadable_content_is_reported_as_corrupt(
    env: StoreEnv,
    #[case] contents: &str,
) -> eyre::Result<()> {
    std::fs::write(&env.path, contents)?;

    let result = env.store().load();

    ensure!(
        matches!(result, Err(StoreError::Corrupt { .. })),
        "expected corrupt store, got {result:?}"
    );
    Ok(())
}

#[rstest]
fn null_todos_list_loads_as_empty(env: StoreEnv) -> eyre::Result<()> {
    std::fs::write(
        &env.path,
        "{\"version\": 1, \"savedAt\": \"2026-01-01T00:00:00Z\", \"todos\": null}",
    )?;

    ensure!(env.store().load()?.todos.is_empty());
    Ok(())
}

#[rstest]
fn lock_is_exclusive_until_released(env: StoreEnv) -> eyre::Result<()> {
    let store = env.store();
    let guard = store.lock()?;
    ensure!(store.lock_path().join("info.txt").exists());

    let second = store.lock();
    ensure!(
        matches!(&second, Err(StoreError::Locked(path)) if *path == store.lock_path()),
        "expected lock contention, got {second:?}"
    );

    guard.release()?;
    ensure!(!store.lock_path().exists());
    drop(store.lock()?);
    ensure!(!store.lock_path().exists(), "dropping the guard releases the lock");
    Ok(())
}

#[rstest]
fn concurrent_lock_attempts_yield_exactly_one_winner(env: StoreEnv) {
    let store = env.store();
    let barrier = Barrier::new(2);

    let outcomes: Vec<bool> = std::thread::scope(|scope| {
        let attempts: Vec<_> = (0..2)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    store.lock()
                })
            })
            .collect();
        let results: Vec<_> = attempts
            .into_iter()
            .map(|handle| handle.join().expect("lock thread"))
            .collect();
        results.iter().map(Result::is_ok).collect()
    });

    assert_eq!(outcomes.iter().filter(|won| **won).count(), 1);
}

#[rstest]
fn failed_mutation_neither_saves_nor_keeps_the_lock(env: StoreEnv) -> eyre::Result<()> {
    let store = env.store();

    let result: Result<(), TodoRepositoryError> = store.update(|document| {
        document.todos.push(to_row(&active("a1", "Never saved", at(2026, 1, 1, 0))));
        Err(TodoRepositoryError::NotFound(id("a1")))
    });

    ensure!(result.is_err());
    ensure!(!env.path.exists());
    ensure!(!store.lock_path().exists());
    Ok(())
}

#[rstest]
fn saved_mutation_succeeds_even_if_lock_cleanup_fails(env: StoreEnv) -> eyre::Result<()> {
    let store = env.store();
    let lock_path = store.lock_path();

    let result: Result<(), TodoRepositoryError> = store.update(|document| {
        document.todos.push(to_row(&active("a1", "Saved", at(2026, 1, 1, 0))));
        // Someone clears the lock directory while the mutation is running.
        std::fs::remove_dir_all(&lock_path).map_err(TodoRepositoryError::persistence)?;
        Ok(())
    });

    ensure!(result.is_ok(), "persisted mutation reported {result:?}");
    ensure!(store.load()?.todos.len() == 1);
    ensure!(!lock_path.exists());
    Ok(())
}

#[rstest]
fn path_without_file_name_is_rejected(env: StoreEnv) {
    let result = JsonStore::new("/", Arc::clone(&env.clock));
    assert!(matches!(result, Err(StoreError::InvalidPath(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repository_persists_across_instances(env: StoreEnv) -> eyre::Result<()> {
    let todo = active("a1", "Buy milk", at(2026, 1, 4, 8));
    env.repository().create(&todo).await?;

    let reopened = env.repository();
    let fetched = reopened.get_by_id(todo.id()).await?;

    ensure!(fetched == todo);
    ensure!(reopened.list(&ListSpec::new()).await?.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repository_reports_conflicts_and_missing_ids(env: StoreEnv) -> eyre::Result<()> {
    let repository = env.repository();
    let todo = active("a1", "Buy milk", at(2026, 1, 4, 8));
    repository.create(&todo).await?;

    let duplicate = repository.create(&todo).await;
    ensure!(matches!(duplicate, Err(TodoRepositoryError::Conflict(_))));

    let ghost = active("zz", "Ghost", at(2026, 1, 4, 8));
    ensure!(matches!(
        repository.update(&ghost).await,
        Err(TodoRepositoryError::NotFound(_))
    ));
    ensure!(matches!(
        repository.get_by_id(ghost.id()).await,
        Err(TodoRepositoryError::NotFound(_))
    ));
    ensure!(matches!(
        repository.hard_delete(ghost.id()).await,
        Err(TodoRepositoryError::NotFound(_))
    ));
    ensure!(matches!(
        repository.soft_delete(ghost.id()).await,
        Err(TodoRepositoryError::NotFound(_))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repository_soft_delete_uses_store_clock(env: StoreEnv) -> eyre::Result<()> {
    let repository = env.repository();
    let todo = active("a1", "Buy milk", at(2026, 1, 4, 8));
    repository.create(&todo).await?;
    env.clock.advance(TimeDelta::hours(2));

    repository.soft_delete(todo.id()).await?;

    let stored = repository.get_by_id(todo.id()).await?;
    ensure!(stored.deleted_at() == Some(at(2026, 1, 5, 12)));
    ensure!(stored.status() == TodoStatus::Active);
    ensure!(repository.list(&ListSpec::new()).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repository_hard_delete_removes_the_row(env: StoreEnv) -> eyre::Result<()> {
    let repository = env.repository();
    let todo = active("a1", "Buy milk", at(2026, 1, 4, 8));
    repository.create(&todo).await?;

    repository.hard_delete(todo.id()).await?;

    ensure!(
        repository
            .list(&ListSpec::new().including_deleted())
            .await?
            .is_empty()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_row_fails_the_whole_read(env: StoreEnv) -> eyre::Result<()> {
    let mut bad = to_row(&active("a1", "Valid", at(2026, 1, 4, 8)));
    bad.priority = "urgent".to_owned();
    let good = to_row(&active("a2", "Also valid", at(2026, 1, 4, 9)));
    let mut document = StoreDocument::empty(at(2026, 1, 4, 9));
    document.todos = vec![good, bad];
    env.store().save(document)?;

    let result = env.repository().list(&ListSpec::new()).await;

    ensure!(
        matches!(&result, Err(TodoRepositoryError::CorruptData(reason)) if reason.contains("a1")),
        "expected corrupt data, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn held_lock_fails_writes_fast(env: StoreEnv) -> eyre::Result<()> {
    let store = env.store();
    let _guard = store.lock()?;

    let result = env
        .repository()
        .create(&active("a1", "Blocked", at(2026, 1, 4, 8)))
        .await;

    ensure!(
        matches!(result, Err(TodoRepositoryError::Locked(_))),
        "expected lock contention, got {result:?}"
    );
    ensure!(
        env.repository().list(&ListSpec::new()).await?.is_empty(),
        "reads do not take the lock"
    );
    Ok(())
}

#[rstest]
fn rows_with_reversed_timestamps_are_rejected() {
    let mut row = to_row(&active("a1", "Valid", at(2026, 1, 4, 8)));
    row.updated_at = at(2026, 1, 1, 0);

    assert!(row_to_todo(&row).is_err());
}
