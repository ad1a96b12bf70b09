//! Tickbox: a personal todo tracker backed by a single JSON file.
//!
//! Todos move through an explicit lifecycle (`active`, `done`, `archived`,
//! plus an orthogonal soft-delete flag). Every transition is a pure function
//! of the prior snapshot and a timestamp, returning the next snapshot and the
//! events it emitted.
//!
//! # Architecture
//!
//! Tickbox follows hexagonal architecture principles:
//!
//! - **Domain**: Value objects and the lifecycle state machine
//! - **Ports**: Repository, event publisher, and identifier generator traits
//! - **Adapters**: In-memory and JSON-file repositories, publishers, id
//!   generators
//! - **Services**: Command and query orchestration with a stable error
//!   taxonomy
//!
//! # Modules
//!
//! - [`todo`]: Todo lifecycle, queries, and persistence
//! - [`config`]: Store location resolution

pub mod config;
pub mod todo;
