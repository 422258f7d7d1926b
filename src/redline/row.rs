#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::side::Side;

/// Status of a line in the old (left) column.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftStatus {
    Unchanged,
    Deleted,
    Absent,
}

/// Status of a line in the new (right) column.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RightStatus {
    Unchanged,
    Added,
    Absent,
}

/// One column of a row. `line_number` is 1-based; both it and `text` are
/// `None` exactly when the status is `Absent`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedlineCell<S> {
    pub line_number: Option<usize>,
    pub text: Option<String>,
    pub status: S,
}

impl<S> RedlineCell<S> {
    pub(crate) fn present(index: usize, text: &str, status: S) -> Self {
        Self {
            line_number: Some(index + 1),
            text: Some(text.to_owned()),
            status,
        }
    }

    pub(crate) fn absent(status: S) -> Self {
        Self {
            line_number: None,
            text: None,
            status,
        }
    }

    pub fn is_present(&self) -> bool { self.line_number.is_some() }
}

/// A side-by-side row of a redline.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedlineRow {
    pub left: RedlineCell<LeftStatus>,
    pub right: RedlineCell<RightStatus>,
}

impl RedlineRow {
    pub(crate) fn unchanged(old_index: usize, new_index: usize, text: &str) -> Self {
        Self {
            left: RedlineCell::present(old_index, text, LeftStatus::Unchanged),
            right: RedlineCell::present(new_index, text, RightStatus::Unchanged),
        }
    }

    pub(crate) fn deleted(old_index: usize, text: &str) -> Self {
        Self {
            left: RedlineCell::present(old_index, text, LeftStatus::Deleted),
            right: RedlineCell::absent(RightStatus::Absent),
        }
    }

    pub(crate) fn added(new_index: usize, text: &str) -> Self {
        Self {
            left: RedlineCell::absent(LeftStatus::Absent),
            right: RedlineCell::present(new_index, text, RightStatus::Added),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.left.status == LeftStatus::Unchanged && self.right.status == RightStatus::Unchanged
    }

    pub fn line_number(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.left.line_number,
            Side::Right => self.right.line_number,
        }
    }

    pub fn text(&self, side: Side) -> Option<&str> {
        match side {
            Side::Left => self.left.text.as_deref(),
            Side::Right => self.right.text.as_deref(),
        }
    }
}

/// Line counts of a redline.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

impl DiffStats {
    pub fn has_changes(&self) -> bool { self.added > 0 || self.deleted > 0 }
}

impl<'a> FromIterator<&'a RedlineRow> for DiffStats {
    fn from_iter<I: IntoIterator<Item = &'a RedlineRow>>(rows: I) -> Self {
        rows.into_iter().fold(Self::default(), |mut stats, row| {
            if row.is_unchanged() {
                stats.unchanged += 1;
            }
            if row.left.status == LeftStatus::Deleted {
                stats.deleted += 1;
            }
            if row.right.status == RightStatus::Added {
                stats.added += 1;
            }
            stats
        })
    }
}
