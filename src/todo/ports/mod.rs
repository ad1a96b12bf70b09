//! Port contracts for todo management.
//!
//! Ports define infrastructure-agnostic interfaces used by todo services.
//! The clock capability is [`mockable::Clock`].

pub mod id_generator;
pub mod publisher;
pub mod repository;

pub use id_generator::IdGenerator;
pub use publisher::{EventPublisher, PublishError};
pub use repository::{TodoRepository, TodoRepositoryError, TodoRepositoryResult};
