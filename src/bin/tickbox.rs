//! Command-line front end for the tickbox todo store.
//!
//! Usage:
//!
//! ```text
//! tickbox [--file <path>] <command> [args]
//! ```
//!
//! The store path resolves from `--file`, then `TICKBOX_FILE`, then
//! `~/.tickbox/todos.json`. Logs go to stderr and are filtered by
//! `TICKBOX_LOG`; set `TICKBOX_LOG_FORMAT=json` for structured output.

#[path = "tickbox/seed.rs"]
mod seed;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use mockable::{Clock, DefaultClock};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tickbox::{
    config::{ConfigError, StoreConfig},
    todo::{
        adapters::{
            JsonFileTodoRepository, RandomIdGenerator, SequentialIdGenerator, StoreError,
            TracingEventPublisher,
        },
        domain::{TodoId, TodoDomainError, TodoStatus},
        query::{ListSpec, SortField, SortOrder},
        services::{
            AddTodoRequest, EditTodoRequest, StatsDto, TodoCommandService, TodoDto,
            TodoQueryService, TodoServiceError,
        },
    },
};
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use seed::{SeedError, SeedOptions, seed_todos};

const LOG_ENV: &str = "TICKBOX_LOG";
const LOG_FORMAT_ENV: &str = "TICKBOX_LOG_FORMAT";
const DEFAULT_LOG_FILTER: &str = "tickbox=info,warn";

type Repository = JsonFileTodoRepository<DefaultClock>;

#[derive(Debug, Parser)]
#[command(name = "tickbox", version, about = "Personal todo tracker")]
struct Cli {
    /// Path to the JSON store file.
    #[arg(long, global = true)]
    file: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(flatten)]
    Todo(TodoCommand),
    /// Generate a deterministic sample dataset.
    Seed {
        /// Number of todos to generate.
        #[arg(long, default_value_t = 1000)]
        n: usize,
        /// Random seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Delete the existing store file first.
        #[arg(long)]
        overwrite: bool,
    },
}

/// Subcommands that operate on an existing store.
#[derive(Debug, Subcommand)]
enum TodoCommand {
    /// Add a new todo.
    Add(AddArgs),
    /// List todos.
    List(ListArgs),
    /// Show one todo.
    Show {
        /// Todo identifier.
        id: String,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Edit title, priority, tags, or due date.
    Edit(EditArgs),
    /// Mark a todo as done.
    Done {
        /// Todo identifier.
        id: String,
    },
    /// Return a done todo to active.
    Reopen {
        /// Todo identifier.
        id: String,
    },
    /// Archive a done todo.
    Archive {
        /// Todo identifier.
        id: String,
    },
    /// Restore an archived todo.
    Restore {
        /// Todo identifier.
        id: String,
    },
    /// Delete a todo (soft by default).
    Rm {
        /// Todo identifier.
        id: String,
        /// Remove the todo permanently.
        #[arg(long)]
        hard: bool,
    },
    /// Show counts by status and due date.
    Stats {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Todo title.
    title: String,
    /// `low`, `medium`, or `high`.
    #[arg(long, short)]
    priority: Option<String>,
    /// Tag; repeat for several.
    #[arg(long = "tag", short)]
    tags: Vec<String>,
    /// Due date as `YYYY-MM-DD`.
    #[arg(long)]
    due: Option<String>,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only show todos with this status.
    #[arg(long, value_parser = parse_status)]
    status: Option<TodoStatus>,
    /// Only show todos carrying this tag.
    #[arg(long)]
    tag: Option<String>,
    /// Case-insensitive title search.
    #[arg(long)]
    search: Option<String>,
    /// Sort field: created, updated, title, priority, or due.
    #[arg(long, value_parser = parse_sort_field)]
    sort: Option<SortField>,
    /// Sort order: asc or desc.
    #[arg(long, value_parser = parse_sort_order)]
    order: Option<SortOrder>,
    /// Number of matches to skip.
    #[arg(long, default_value_t = 0)]
    offset: i64,
    /// Maximum number of matches; zero means unlimited.
    #[arg(long, default_value_t = 0)]
    limit: i64,
    /// Include soft-deleted todos.
    #[arg(long)]
    all: bool,
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct EditArgs {
    /// Todo identifier.
    id: String,
    /// New title.
    #[arg(long)]
    title: Option<String>,
    /// New priority.
    #[arg(long, short)]
    priority: Option<String>,
    /// Replacement tag; repeat for several.
    #[arg(long = "tag", short)]
    tags: Option<Vec<String>>,
    /// New due date as `YYYY-MM-DD`.
    #[arg(long, conflicts_with = "clear_due")]
    due: Option<String>,
    /// Remove the due date.
    #[arg(long)]
    clear_due: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Service(#[from] TodoServiceError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error("invalid todo id: {0}")]
    InvalidId(#[source] TodoDomainError),
    #[error("failed to remove existing store: {0}")]
    Overwrite(#[source] io::Error),
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            if let Err(write_err) = writeln!(io::stderr().lock(), "error: {err}") {
                tracing::error!(error = %write_err, "failed to report error");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match std::env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
            .init(),
        _ => registry
            .with(fmt::layer().compact().with_writer(io::stderr))
            .init(),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = StoreConfig::resolve(cli.file)?;
    config.ensure_parent_dir()?;
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime.block_on(dispatch(config, cli.command))
}

async fn dispatch(config: StoreConfig, command: Command) -> Result<(), CliError> {
    let clock = Arc::new(DefaultClock);
    match command {
        Command::Todo(todo_command) => run_todo_command(config, clock, todo_command).await,
        Command::Seed { n, seed, overwrite } => {
            run_seed(config, clock, SeedOptions { count: n, seed }, overwrite).await
        }
    }
}

async fn run_todo_command(
    config: StoreConfig,
    clock: Arc<DefaultClock>,
    command: TodoCommand,
) -> Result<(), CliError> {
    let repository = Arc::new(Repository::open(config.into_path(), Arc::clone(&clock))?);
    let commands = TodoCommandService::new(
        Arc::clone(&repository),
        Arc::clone(&clock),
        Arc::new(RandomIdGenerator),
        Arc::new(TracingEventPublisher),
    );
    let queries = TodoQueryService::new(repository, clock);
    let mut out = io::stdout().lock();

    match command {
        TodoCommand::Add(args) => {
            let mut request = AddTodoRequest::new(args.title).with_tags(args.tags);
            if let Some(priority) = args.priority {
                request = request.with_priority(priority);
            }
            if let Some(due) = args.due {
                request = request.with_due_date(due);
            }
            let todo = commands.add(request).await?;
            writeln!(out, "added {}", todo.id())?;
        }
        TodoCommand::List(args) => {
            let json = args.json;
            let todos = queries.list(&list_spec(args)).await?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&todos)?)?;
            } else {
                for todo in &todos {
                    writeln!(out, "{}", render_line(todo))?;
                }
            }
        }
        TodoCommand::Show { id, json } => {
            let todo = queries.get(&parse_id(id)?).await?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&todo)?)?;
            } else {
                write_details(&mut out, &todo)?;
            }
        }
        TodoCommand::Edit(args) => {
            let todo = commands.edit(edit_request(args)?).await?;
            writeln!(out, "updated {}", todo.id())?;
        }
        TodoCommand::Done { id } => {
            let todo = commands.complete(&parse_id(id)?).await?;
            writeln!(out, "completed {}", todo.id())?;
        }
        TodoCommand::Reopen { id } => {
            let todo = commands.reopen(&parse_id(id)?).await?;
            writeln!(out, "reopened {}", todo.id())?;
        }
        TodoCommand::Archive { id } => {
            let todo = commands.archive(&parse_id(id)?).await?;
            writeln!(out, "archived {}", todo.id())?;
        }
        TodoCommand::Restore { id } => {
            let todo = commands.restore(&parse_id(id)?).await?;
            writeln!(out, "restored {}", todo.id())?;
        }
        TodoCommand::Rm { id, hard } => {
            let todo_id = parse_id(id)?;
            if hard {
                commands.hard_delete(&todo_id).await?;
                writeln!(out, "removed {todo_id}")?;
            } else {
                commands.soft_delete(&todo_id).await?;
                writeln!(out, "deleted {todo_id}")?;
            }
        }
        TodoCommand::Stats { json } => {
            let stats = queries.stats().await?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
            } else {
                write_stats(&mut out, &stats)?;
            }
        }
    }
    Ok(())
}

async fn run_seed(
    config: StoreConfig,
    clock: Arc<DefaultClock>,
    options: SeedOptions,
    overwrite: bool,
) -> Result<(), CliError> {
    if overwrite {
        match std::fs::remove_file(config.path()) {
            Ok(()) => tracing::info!(path = %config.path(), "removed existing store"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(CliError::Overwrite(err)),
        }
    }
    let now = clock.utc();
    let repository = Repository::open(config.into_path(), clock)?;
    let created = seed_todos(&repository, &SequentialIdGenerator::new(), options, now).await?;
    writeln!(io::stdout().lock(), "seeded {created} todos")?;
    Ok(())
}

fn parse_id(raw: String) -> Result<TodoId, CliError> {
    TodoId::new(raw).map_err(CliError::InvalidId)
}

fn parse_status(raw: &str) -> Result<TodoStatus, String> {
    TodoStatus::try_from(raw).map_err(|err| err.to_string())
}

fn parse_sort_field(raw: &str) -> Result<SortField, String> {
    SortField::try_from(raw).map_err(|err| err.to_string())
}

fn parse_sort_order(raw: &str) -> Result<SortOrder, String> {
    SortOrder::try_from(raw).map_err(|err| err.to_string())
}

fn list_spec(args: ListArgs) -> ListSpec {
    ListSpec {
        status: args.status,
        tag: args.tag,
        search: args.search,
        sort_by: args.sort,
        sort_order: args.order,
        offset: args.offset,
        limit: args.limit,
        include_deleted: args.all,
    }
}

fn edit_request(args: EditArgs) -> Result<EditTodoRequest, CliError> {
    let mut request = EditTodoRequest::new(parse_id(args.id)?);
    if let Some(title) = args.title {
        request = request.with_title(title);
    }
    if let Some(priority) = args.priority {
        request = request.with_priority(priority);
    }
    if let Some(tags) = args.tags {
        request = request.with_tags(tags);
    }
    if args.clear_due {
        request = request.clearing_due_date();
    } else if let Some(due) = args.due {
        request = request.with_due_date(due);
    }
    Ok(request)
}

fn render_line(todo: &TodoDto) -> String {
    let mut line = format!(
        "{:<16}  {:<8}  {:<6}  {:<10}  {}",
        todo.id,
        todo.status,
        todo.priority,
        todo.due_date.as_deref().unwrap_or("-"),
        todo.title,
    );
    for tag in &todo.tags {
        line.push_str(" #");
        line.push_str(tag);
    }
    if todo.deleted_at.is_some() {
        line.push_str(" (deleted)");
    }
    line
}

fn write_details(out: &mut impl Write, todo: &TodoDto) -> io::Result<()> {
    writeln!(out, "id:        {}", todo.id)?;
    writeln!(out, "title:     {}", todo.title)?;
    writeln!(out, "status:    {}", todo.status)?;
    writeln!(out, "priority:  {}", todo.priority)?;
    writeln!(out, "tags:      {}", todo.tags.join(", "))?;
    writeln!(out, "due:       {}", todo.due_date.as_deref().unwrap_or("-"))?;
    writeln!(out, "created:   {}", todo.created_at.to_rfc3339())?;
    writeln!(out, "updated:   {}", todo.updated_at.to_rfc3339())?;
    for (label, stamp) in [
        ("completed", todo.completed_at),
        ("archived", todo.archived_at),
        ("deleted", todo.deleted_at),
    ] {
        if let Some(at) = stamp {
            writeln!(out, "{:<11}{}", format!("{label}:"), at.to_rfc3339())?;
        }
    }
    Ok(())
}

fn write_stats(out: &mut impl Write, stats: &StatsDto) -> io::Result<()> {
    writeln!(out, "total:     {}", stats.total)?;
    writeln!(out, "active:    {}", stats.active)?;
    writeln!(out, "done:      {}", stats.done)?;
    writeln!(out, "archived:  {}", stats.archived)?;
    writeln!(out, "deleted:   {}", stats.deleted)?;
    writeln!(out, "overdue:   {}", stats.overdue)?;
    writeln!(out, "due today: {}", stats.due_today)?;
    writeln!(out, "due soon:  {}", stats.due_soon)?;
    Ok(())
}
