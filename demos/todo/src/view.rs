//! Derived read models over the todo list.
//!
//! Everything here is a pure function of the current list (plus the
//! transient search query); nothing is stored.

use crate::types::TodoItem;
use std::borrow::Cow;

/// Number of completed items. O(n).
#[must_use]
pub fn completed_count(items: &[TodoItem]) -> usize {
    items.iter().filter(|item| item.completed).count()
}

/// Case-insensitive substring filter.
///
/// A blank query returns the list unchanged (borrowed, no copy).
/// Otherwise the result is the subsequence of items whose text
/// contains the trimmed query, ignoring case. Order is preserved.
#[must_use]
pub fn filter<'a>(items: &'a [TodoItem], query: &str) -> Cow<'a, [TodoItem]> {
    let needle = query.trim();
    if needle.is_empty() {
        return Cow::Borrowed(items);
    }

    let needle = needle.to_lowercase();
    Cow::Owned(
        items
            .iter()
            .filter(|item| item.text.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}

/// Human-readable progress summary mirrored into the display title
#[must_use]
pub fn summary(completed: usize, total: usize) -> String {
    format!("완료 {completed} / 전체 {total}")
}
