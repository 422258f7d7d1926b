pub use fold::FoldedRow;
pub use row::{DiffStats, LeftStatus, RedlineCell, RedlineRow, RightStatus};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
pub use sizing::SizingPolicy;

use crate::{
    diff::{DiffSpan, DiffTag, diff},
    lines::split_lines,
};

mod fold;
mod row;
mod sizing;

/// A side-by-side comparison of two documents in document order.
///
/// This is plain data: front ends decide how to draw deleted, added and
/// absent cells.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDiff {
    rows: Vec<RedlineRow>,
}

impl RenderedDiff {
    pub fn rows(&self) -> &[RedlineRow] { &self.rows }

    pub fn into_rows(self) -> Vec<RedlineRow> { self.rows }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// True when every row is unchanged on both sides.
    pub fn is_unchanged(&self) -> bool { self.rows.iter().all(RedlineRow::is_unchanged) }

    pub fn stats(&self) -> DiffStats { self.rows.iter().collect() }

    /// Folds long unchanged stretches, keeping `context` rows around every
    /// change.
    pub fn fold(&self, context: usize) -> Vec<FoldedRow> { fold::fold(&self.rows, context) }
}

/// Turns diff spans into side-by-side rows.
///
/// `replace` spans pair old and new lines by position: the `n`-th deleted
/// line shares a row with the `n`-th added line and the shorter side is
/// padded with absent cells. The pairing keeps both columns aligned; it does
/// not claim that paired lines correspond to each other.
///
/// `spans` must come from [`diff`] on the same `old` and `new`.
pub fn render<S>(old: &[S], new: &[S], spans: &[DiffSpan]) -> RenderedDiff
where
    S: AsRef<str>,
{
    let mut rows = Vec::with_capacity(old.len().max(new.len()));

    for span in spans {
        match span.tag {
            DiffTag::Equal => {
                rows.extend(
                    span.old_range
                        .clone()
                        .zip(span.new_range.clone())
                        .map(|(i, j)| RedlineRow::unchanged(i, j, old[i].as_ref())),
                );
            }
            DiffTag::Delete => {
                rows.extend(
                    span.old_range
                        .clone()
                        .map(|i| RedlineRow::deleted(i, old[i].as_ref())),
                );
            }
            DiffTag::Insert => {
                rows.extend(
                    span.new_range
                        .clone()
                        .map(|j| RedlineRow::added(j, new[j].as_ref())),
                );
            }
            DiffTag::Replace => {
                for offset in 0..span.old_len().max(span.new_len()) {
                    let i = span.old_range.start + offset;
                    let j = span.new_range.start + offset;

                    let left = if span.old_range.contains(&i) {
                        RedlineCell::present(i, old[i].as_ref(), LeftStatus::Deleted)
                    } else {
                        RedlineCell::absent(LeftStatus::Absent)
                    };
                    let right = if span.new_range.contains(&j) {
                        RedlineCell::present(j, new[j].as_ref(), RightStatus::Added)
                    } else {
                        RedlineCell::absent(RightStatus::Absent)
                    };

                    rows.push(RedlineRow { left, right });
                }
            }
        }
    }

    RenderedDiff { rows }
}

/// Splits, diffs and renders two texts.
pub fn render_text(old: &str, new: &str) -> RenderedDiff {
    let old = split_lines(old);
    let new = split_lines(new);
    let spans = diff(&old, &new);

    render(&old, &new, &spans)
}
