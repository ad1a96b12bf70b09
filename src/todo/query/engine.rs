//! Filter, sort, and paginate over an in-memory todo collection.

use super::{ListSpec, SortField, SortOrder};
use crate::todo::domain::Todo;
use std::cmp::Ordering;

/// Runs `spec` over `todos` and returns a freshly allocated result.
///
/// Filtering happens first (soft-delete exclusion, status, tag, title
/// search), then a stable sort, then the offset/limit window.
#[must_use]
pub fn run_query<I>(todos: I, spec: &ListSpec) -> Vec<Todo>
where
    I: IntoIterator<Item = Todo>,
{
    let search = spec
        .search
        .as_deref()
        .map(|query| query.trim().to_lowercase())
        .filter(|query| !query.is_empty());

    let mut matched: Vec<Todo> = todos
        .into_iter()
        .filter(|todo| spec.include_deleted || !todo.is_deleted())
        .filter(|todo| spec.status.is_none_or(|status| todo.status() == status))
        .filter(|todo| {
            spec.tag
                .as_deref()
                .is_none_or(|tag| todo.tags().contains(tag))
        })
        .filter(|todo| {
            search.as_deref().is_none_or(|query| {
                todo.title().as_str().to_lowercase().contains(query)
            })
        })
        .collect();

    let field = spec.effective_sort_by();
    let order = spec.effective_sort_order();
    matched.sort_by(|left, right| compare(left, right, field, order));

    paginate(matched, spec.offset, spec.limit)
}

/// Orders two todos by `field` in `order`.
///
/// Due-date ordering keeps todos without a due date after every dated todo
/// in both directions; only the dated ones are reversed.
#[must_use]
pub fn compare(left: &Todo, right: &Todo, field: SortField, order: SortOrder) -> Ordering {
    match field {
        SortField::Created => directed(left.created_at().cmp(&right.created_at()), order),
        SortField::Updated => directed(left.updated_at().cmp(&right.updated_at()), order),
        SortField::Title => directed(
            left.title()
                .as_str()
                .to_lowercase()
                .cmp(&right.title().as_str().to_lowercase()),
            order,
        ),
        SortField::Priority => directed(
            left.priority().rank().cmp(&right.priority().rank()),
            order,
        ),
        SortField::Due => match (left.due_date(), right.due_date()) {
            (Some(left_due), Some(right_due)) => directed(left_due.cmp(&right_due), order),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

const fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

fn paginate(items: Vec<Todo>, offset: i64, limit: i64) -> Vec<Todo> {
    let skip = usize::try_from(offset).unwrap_or(0);
    let take = usize::try_from(limit).unwrap_or(0);
    if skip >= items.len() {
        return Vec::new();
    }
    let window = items.into_iter().skip(skip);
    if take == 0 {
        window.collect()
    } else {
        window.take(take).collect()
    }
}
