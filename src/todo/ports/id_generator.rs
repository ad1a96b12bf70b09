//! Identifier generator port.

use crate::todo::domain::TodoId;

/// Source of fresh todo identifiers.
pub trait IdGenerator: Send + Sync {
    /// Returns a new identifier.
    fn new_id(&self) -> TodoId;
}
