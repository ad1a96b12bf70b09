//! Identifier type for todo records.

use super::TodoDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a todo.
///
/// Any non-empty string is syntactically valid. Uniqueness is a repository
/// concern and is not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoId(String);

impl TodoId {
    /// Creates a validated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidId`] when the value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, TodoDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(TodoDomainError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// Wraps an identifier produced by a generator that never yields an
    /// empty string.
    pub(crate) fn from_generated(value: String) -> Self {
        debug_assert!(!value.is_empty(), "generated identifiers are non-empty");
        Self(value)
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TodoId {
    type Error = TodoDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoId> for String {
    fn from(value: TodoId) -> Self {
        value.0
    }
}

impl AsRef<str> for TodoId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
