//! Deterministic sample-data generator for the `seed` subcommand.

use chrono::{DateTime, TimeDelta, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use thiserror::Error;
use tickbox::todo::{
    domain::{DueDate, NewTodo, Priority, Tags, Title, Todo, TodoDomainError},
    ports::{IdGenerator, TodoRepository, TodoRepositoryError},
};

const VERBS: &[&str] = &[
    "Write", "Review", "Fix", "Plan", "Refactor", "Learn", "Organize", "Ship", "Draft", "Test",
];
const NOUNS: &[&str] = &[
    "report", "feature", "module", "notes", "budget", "workout", "PR", "meeting", "docs",
    "todo app",
];
const EXTRAS: &[&str] = &[
    "today",
    "this week",
    "ASAP",
    "with tests",
    "cleanly",
    "v2",
    "for release",
    "before lunch",
    "tonight",
    "",
];
const TAG_POOL: &[&str] = &[
    "work", "home", "study", "rust", "fitness", "health", "finance", "errands", "reading",
    "project", "chores", "shopping", "dev",
];

/// Percentage of generated todos that carry a due date.
const DUE_DATE_PERCENT: u32 = 65;
/// Oldest generated creation time, in hours before now.
const MAX_AGE_HOURS: i64 = 60 * 24;

/// Parameters for one seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOptions {
    /// Number of todos to create.
    pub count: usize,
    /// Random seed; the same seed yields the same dataset.
    pub seed: u64,
}

/// Failures that abort seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A generated value failed domain validation.
    #[error("generated todo failed validation: {0}")]
    Domain(#[from] TodoDomainError),
    /// The repository rejected a generated todo.
    #[error("failed to store generated todo: {0}")]
    Repository(#[from] TodoRepositoryError),
    /// A generated timestamp fell outside the representable range.
    #[error("generated timestamp is out of range")]
    TimeOutOfRange,
}

/// Generates and stores `options.count` todos, stopping at the first error.
///
/// Returns the number of todos created.
pub async fn seed_todos<R>(
    repository: &R,
    ids: &dyn IdGenerator,
    options: SeedOptions,
    now: DateTime<Utc>,
) -> Result<usize, SeedError>
where
    R: TodoRepository + ?Sized,
{
    let mut rng = StdRng::seed_from_u64(options.seed);
    for created in 0..options.count {
        let todo = generate(&mut rng, ids, now)?;
        repository.create(&todo).await?;
        tracing::trace!(todo_id = %todo.id(), created = created + 1, "seeded todo");
    }
    tracing::info!(count = options.count, seed = options.seed, "seeding finished");
    Ok(options.count)
}

/// Builds one todo through the same domain operations as any caller.
///
/// Status distribution is roughly 70% active, 20% done, 8% archived, and 2%
/// soft-deleted.
pub fn generate(
    rng: &mut StdRng,
    ids: &dyn IdGenerator,
    now: DateTime<Utc>,
) -> Result<Todo, SeedError> {
    let title = Title::new(&random_title(rng))?;
    let priority = random_priority(rng);
    let tags = Tags::new(random_tags(rng));
    let due_date = random_due_date(rng, now)?;
    let created_at = now
        .checked_sub_signed(TimeDelta::hours(rng.gen_range(0..MAX_AGE_HOURS)))
        .ok_or(SeedError::TimeOutOfRange)?;

    let (created, _) = Todo::create(
        NewTodo {
            id: ids.new_id(),
            title,
            priority,
            tags,
            due_date,
        },
        created_at,
    )
    .into_parts();

    let roll = rng.gen_range(0..100_u32);
    let todo = match roll {
        0..20 => created.complete(offset(created_at, 2)?)?.into_parts().0,
        20..28 => {
            let (done, _) = created.complete(offset(created_at, 2)?)?.into_parts();
            done.archive(offset(created_at, 3)?)?.into_parts().0
        }
        28..30 => created.soft_delete(offset(created_at, 4)?).into_parts().0,
        _ => created,
    };
    Ok(todo)
}

fn offset(base: DateTime<Utc>, hours: i64) -> Result<DateTime<Utc>, SeedError> {
    base.checked_add_signed(TimeDelta::hours(hours))
        .ok_or(SeedError::TimeOutOfRange)
}

fn random_title(rng: &mut StdRng) -> String {
    let verb = VERBS.choose(rng).copied().unwrap_or("Plan");
    let noun = NOUNS.choose(rng).copied().unwrap_or("notes");
    match EXTRAS.choose(rng).copied().unwrap_or_default() {
        "" => format!("{verb} {noun}"),
        extra => format!("{verb} {noun} {extra}"),
    }
}

fn random_priority(rng: &mut StdRng) -> Priority {
    match rng.gen_range(0..100_u32) {
        0..20 => Priority::High,
        20..60 => Priority::Medium,
        _ => Priority::Low,
    }
}

fn random_tags(rng: &mut StdRng) -> Vec<&'static str> {
    let count = rng.gen_range(0..5_usize);
    (0..count)
        .filter_map(|_| TAG_POOL.choose(rng).copied())
        .collect()
}

fn random_due_date(rng: &mut StdRng, now: DateTime<Utc>) -> Result<Option<DueDate>, SeedError> {
    if rng.gen_range(0..100_u32) >= DUE_DATE_PERCENT {
        return Ok(None);
    }
    let days = rng.gen_range(-10..=30_i64);
    now.date_naive()
        .checked_add_signed(TimeDelta::days(days))
        .map(|date| Some(DueDate::from_date(date)))
        .ok_or(SeedError::TimeOutOfRange)
}
