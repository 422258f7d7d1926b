use std::{fmt::Display, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classification of a region of the two compared line sequences.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffTag {
    Equal,
    Insert,
    Delete,
    Replace,
}

impl DiffTag {
    /// The tag describing the same region when old and new are swapped.
    pub fn mirror(self) -> Self {
        match self {
            DiffTag::Insert => DiffTag::Delete,
            DiffTag::Delete => DiffTag::Insert,
            DiffTag::Equal | DiffTag::Replace => self,
        }
    }
}

impl Display for DiffTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffTag::Equal => write!(f, "equal"),
            DiffTag::Insert => write!(f, "insert"),
            DiffTag::Delete => write!(f, "delete"),
            DiffTag::Replace => write!(f, "replace"),
        }
    }
}

/// A contiguous, classified region of a diff.
///
/// `old_range` and `new_range` are half-open ranges of 0-based line indices.
/// An `insert` span has an empty `old_range` positioned where the lines go,
/// a `delete` span has an empty `new_range`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiffSpan {
    pub tag: DiffTag,
    pub old_range: Range<usize>,
    pub new_range: Range<usize>,
}

impl DiffSpan {
    pub fn new(tag: DiffTag, old_range: Range<usize>, new_range: Range<usize>) -> Self {
        debug_assert!(
            match tag {
                DiffTag::Equal => old_range.len() == new_range.len(),
                DiffTag::Insert => old_range.is_empty() && !new_range.is_empty(),
                DiffTag::Delete => !old_range.is_empty() && new_range.is_empty(),
                DiffTag::Replace => !old_range.is_empty() && !new_range.is_empty(),
            },
            "Span ranges {old_range:?} / {new_range:?} are inconsistent with tag `{tag}`"
        );

        Self {
            tag,
            old_range,
            new_range,
        }
    }

    /// Classifies the gap between two matching blocks.
    ///
    /// Returns `None` when both sides of the gap are empty.
    pub(crate) fn from_gap(old_range: Range<usize>, new_range: Range<usize>) -> Option<Self> {
        let tag = match (old_range.is_empty(), new_range.is_empty()) {
            (true, true) => return None,
            (false, true) => DiffTag::Delete,
            (true, false) => DiffTag::Insert,
            (false, false) => DiffTag::Replace,
        };

        Some(Self::new(tag, old_range, new_range))
    }

    /// The same span as seen by a diff with its arguments swapped.
    #[must_use]
    pub fn mirror(&self) -> Self {
        Self {
            tag: self.tag.mirror(),
            old_range: self.new_range.clone(),
            new_range: self.old_range.clone(),
        }
    }

    pub fn old_len(&self) -> usize { self.old_range.len() }

    pub fn new_len(&self) -> usize { self.new_range.len() }
}
