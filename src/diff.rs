use std::hash::Hash;

pub use diff_span::{DiffSpan, DiffTag};
use matching_blocks::matching_blocks;

use crate::lines::split_lines;

mod diff_span;
mod matching_blocks;

/// Aligns two line sequences and classifies every line into spans.
///
/// The returned spans are ordered; their `old_range`-s partition
/// `0..old.len()` and their `new_range`-s partition `0..new.len()`. Two
/// consecutive spans never share a tag.
///
/// Identical inputs short-circuit to a single `equal` span (or no spans at
/// all when both inputs are empty) without running the alignment.
///
/// ## Example
///
/// ```
/// use rule_redline::{DiffSpan, DiffTag, diff};
///
/// let spans = diff(&["(a)", "(b)"], &["(a)", "(b)", "(c)"]);
/// assert_eq!(
///     spans,
///     vec![
///         DiffSpan::new(DiffTag::Equal, 0..2, 0..2),
///         DiffSpan::new(DiffTag::Insert, 2..2, 2..3),
///     ]
/// );
/// ```
pub fn diff<T>(old: &[T], new: &[T]) -> Vec<DiffSpan>
where
    T: Eq + Hash,
{
    if old == new {
        if old.is_empty() {
            return Vec::new();
        }
        return vec![DiffSpan::new(DiffTag::Equal, 0..old.len(), 0..new.len())];
    }

    let mut spans = Vec::new();
    let mut old_cursor = 0;
    let mut new_cursor = 0;

    for block in matching_blocks(old, new) {
        spans.extend(DiffSpan::from_gap(
            old_cursor..block.old_start,
            new_cursor..block.new_start,
        ));
        spans.push(DiffSpan::new(
            DiffTag::Equal,
            block.old_start..block.old_end(),
            block.new_start..block.new_end(),
        ));

        old_cursor = block.old_end();
        new_cursor = block.new_end();
    }

    spans.extend(DiffSpan::from_gap(
        old_cursor..old.len(),
        new_cursor..new.len(),
    ));

    spans
}

/// Splits both texts into lines and diffs them.
pub fn diff_text(old: &str, new: &str) -> Vec<DiffSpan> {
    diff(&split_lines(old), &split_lines(new))
}
