//! Single-file JSON persistence for todos.

mod error;
mod lock;
pub mod models;
mod repository;
mod store;

pub use error::StoreError;
pub use lock::StoreLock;
pub use repository::JsonFileTodoRepository;
pub use store::JsonStore;
