//! List specification: filters, ordering, and pagination.

use crate::todo::domain::TodoStatus;
use std::fmt;
use thiserror::Error;

/// Field a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    /// Creation timestamp.
    #[default]
    Created,
    /// Latest modification timestamp.
    Updated,
    /// Title, compared case-insensitively.
    Title,
    /// Priority rank, `high > medium > low`.
    Priority,
    /// Due date; todos without one always sort last.
    Due,
}

impl SortField {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Title => "title",
            Self::Priority => "priority",
            Self::Due => "due",
        }
    }
}

impl TryFrom<&str> for SortField {
    type Error = ParseSortError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "title" => Ok(Self::Title),
            "priority" => Ok(Self::Priority),
            "due" => Ok(Self::Due),
            _ => Err(ParseSortError::Field(value.to_owned())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

impl SortOrder {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl TryFrom<&str> for SortOrder {
    type Error = ParseSortError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ParseSortError::Order(value.to_owned())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing sort options from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseSortError {
    /// Unknown sort field.
    #[error("unknown sort field '{0}', expected created, updated, title, priority, or due")]
    Field(String),
    /// Unknown sort direction.
    #[error("unknown sort order '{0}', expected asc or desc")]
    Order(String),
}

/// Query over a todo collection.
///
/// Filters are AND-combined. Unset sort options fall back to
/// [`SortField::Created`] and [`SortOrder::Descending`]. Negative offsets and
/// limits clamp to zero and a zero limit means unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSpec {
    /// Only include todos with this status.
    pub status: Option<TodoStatus>,
    /// Only include todos carrying this tag.
    pub tag: Option<String>,
    /// Case-insensitive title substring.
    pub search: Option<String>,
    /// Ordering field.
    pub sort_by: Option<SortField>,
    /// Ordering direction.
    pub sort_order: Option<SortOrder>,
    /// Number of matching todos to skip.
    pub offset: i64,
    /// Maximum number of todos to return; zero means unlimited.
    pub limit: i64,
    /// Include soft-deleted todos.
    pub include_deleted: bool,
}

impl ListSpec {
    /// Creates a specification matching every non-deleted todo.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TodoStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results to todos carrying `tag`.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Restricts results to titles containing `query`.
    #[must_use]
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub const fn sorted_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_by = Some(field);
        self.sort_order = Some(order);
        self
    }

    /// Sets the page window.
    #[must_use]
    pub const fn paginate(mut self, offset: i64, limit: i64) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    /// Includes soft-deleted todos.
    #[must_use]
    pub const fn including_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    /// Returns the effective sort field.
    #[must_use]
    pub fn effective_sort_by(&self) -> SortField {
        self.sort_by.unwrap_or_default()
    }

    /// Returns the effective sort direction.
    #[must_use]
    pub fn effective_sort_order(&self) -> SortOrder {
        self.sort_order.unwrap_or_default()
    }
}
