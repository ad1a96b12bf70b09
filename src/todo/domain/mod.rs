//! Domain model for todo lifecycle management.
//!
//! Transitions are pure: each takes a prior snapshot and a timestamp and
//! returns the next snapshot plus the events it emitted. Nothing in this
//! module touches storage, clocks, or publishers.

mod due_date;
mod error;
mod event;
mod ids;
mod priority;
mod tags;
mod title;
mod todo;

pub use due_date::DueDate;
pub use error::{ParseTodoStatusError, TodoDomainError};
pub use event::TodoEvent;
pub use ids::TodoId;
pub use priority::Priority;
pub use tags::Tags;
pub use title::Title;
pub use todo::{NewTodo, PersistedTodoData, Todo, TodoAction, TodoStatus, Transition};
