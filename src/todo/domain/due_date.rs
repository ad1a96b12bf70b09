//! Calendar due dates without a time component.

use super::TodoDomainError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt;

const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Calendar date a todo is due, parsed only from strict `YYYY-MM-DD` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Parses a due date in strict `YYYY-MM-DD` form.
    ///
    /// Reordered components, missing zero padding, and surrounding
    /// whitespace are all rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidDueDate`] when the input is not a
    /// real calendar date in canonical form.
    pub fn parse(raw: &str) -> Result<Self, TodoDomainError> {
        if !has_canonical_shape(raw) {
            return Err(TodoDomainError::InvalidDueDate(raw.to_owned()));
        }
        NaiveDate::parse_from_str(raw, CANONICAL_FORMAT)
            .map(Self)
            .map_err(|_| TodoDomainError::InvalidDueDate(raw.to_owned()))
    }

    /// Creates a due date from an already valid calendar date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the wrapped calendar date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Returns UTC midnight at the start of the due date.
    #[must_use]
    pub fn as_utc_midnight(self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }
}

/// Checks the `dddd-dd-dd` layout before handing off to chrono, which is
/// more lenient about padding and sign.
fn has_canonical_shape(raw: &str) -> bool {
    raw.len() == 10
        && raw.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}
