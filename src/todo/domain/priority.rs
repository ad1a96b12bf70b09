//! Todo priority levels.

use super::TodoDomainError;
use std::fmt;

/// Relative importance of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default importance.
    #[default]
    Medium,
    /// Should be handled first.
    High,
}

impl Priority {
    /// Parses a priority case-insensitively, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidPriority`] for anything other than
    /// `low`, `medium`, or `high`.
    pub fn parse(raw: &str) -> Result<Self, TodoDomainError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TodoDomainError::InvalidPriority(raw.to_owned())),
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Sort rank where `high` outranks `medium`, which outranks `low`.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = TodoDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
