#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::row::RedlineRow;

/// A row of a redline with long unchanged stretches folded away.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "kind", rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoldedRow {
    Row(RedlineRow),

    /// `count` unchanged rows were hidden, starting at the given 1-based
    /// line numbers.
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Skipped {
        first_left_line: usize,
        first_right_line: usize,
        count: usize,
    },
}

/// Keeps every changed row plus up to `context` unchanged rows on either side
/// of it. Each maximal run of at least two remaining unchanged rows is
/// replaced by a single `Skipped` marker; a lone hidden row is kept since a
/// marker would take as much room as the row itself.
///
/// When nothing changed, a redline of two or more rows folds into one
/// marker.
pub fn fold(rows: &[RedlineRow], context: usize) -> Vec<FoldedRow> {
    let mut visible = vec![false; rows.len()];
    for (index, row) in rows.iter().enumerate() {
        if row.is_unchanged() {
            continue;
        }

        let start = index.saturating_sub(context);
        let end = (index + context + 1).min(rows.len());
        visible[start..end].fill(true);
    }

    let mut result = Vec::new();
    let mut hidden: Vec<&RedlineRow> = Vec::new();

    for (row, is_visible) in rows.iter().zip(visible) {
        if is_visible {
            flush_hidden(&mut result, &mut hidden);
            result.push(FoldedRow::Row(row.clone()));
        } else {
            hidden.push(row);
        }
    }
    flush_hidden(&mut result, &mut hidden);

    result
}

fn flush_hidden(result: &mut Vec<FoldedRow>, hidden: &mut Vec<&RedlineRow>) {
    match hidden.as_slice() {
        [] => {}
        [row] => result.push(FoldedRow::Row((*row).clone())),
        [first, ..] => result.push(FoldedRow::Skipped {
            first_left_line: first.left.line_number.unwrap_or_default(),
            first_right_line: first.right.line_number.unwrap_or_default(),
            count: hidden.len(),
        }),
    }
    hidden.clear();
}
