//! Application services for todo commands and queries.

mod commands;
mod dto;
mod error;
mod queries;
mod undo;

pub use commands::{AddTodoRequest, EditTodoRequest, TodoCommandService};
pub use dto::{StatsDto, TodoDto};
pub use error::{TodoServiceError, TodoServiceResult};
pub use queries::TodoQueryService;
pub use undo::{UndoEntry, UndoStack};
