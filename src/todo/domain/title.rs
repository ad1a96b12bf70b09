//! Validated todo title.

use super::TodoDomainError;
use std::fmt;

/// Trimmed todo title between one and [`Title::MAX_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    /// Maximum title length in characters, measured after trimming.
    pub const MAX_LEN: usize = 200;

    /// Creates a title from raw input, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidTitle`] when the trimmed value is
    /// empty or longer than [`Title::MAX_LEN`] characters.
    pub fn new(raw: &str) -> Result<Self, TodoDomainError> {
        let trimmed = raw.trim();
        let length = trimmed.chars().count();
        if length == 0 || length > Self::MAX_LEN {
            return Err(TodoDomainError::InvalidTitle { max: Self::MAX_LEN });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
