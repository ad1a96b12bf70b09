//! Adapter implementations for todo ports.

pub mod ids;
pub mod json;
pub mod memory;
pub mod publisher;

pub use ids::{RandomIdGenerator, SequentialIdGenerator};
pub use json::{JsonFileTodoRepository, JsonStore, StoreError};
pub use memory::InMemoryTodoRepository;
pub use publisher::{NoopEventPublisher, TracingEventPublisher};
