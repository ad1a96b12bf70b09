//! In-memory adapters for todo management.

mod todo;

pub use todo::InMemoryTodoRepository;
