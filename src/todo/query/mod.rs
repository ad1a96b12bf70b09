//! Query engine for listing todos.
//!
//! Every repository adapter loads a snapshot of its todos and hands it to
//! [`run_query`], so filtering and ordering behave the same regardless of
//! where the data lives.

mod engine;
mod spec;

pub use engine::{compare, run_query};
pub use spec::{ListSpec, ParseSortError, SortField, SortOrder};
