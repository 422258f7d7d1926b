#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Suggests how tall a redline should be displayed: linear in the longer of
/// the two documents, clamped to `minimum..=maximum`. The unit is up to the
/// front end (pixels, terminal rows).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizingPolicy {
    pub per_line: u32,
    pub minimum: u32,
    pub maximum: u32,
}

impl Default for SizingPolicy {
    fn default() -> Self {
        Self {
            per_line: 20,
            minimum: 200,
            maximum: 600,
        }
    }
}

impl SizingPolicy {
    /// A `minimum` above `maximum` resolves to `maximum`.
    pub fn suggested_size(&self, old_line_count: usize, new_line_count: usize) -> u32 {
        let line_count = u32::try_from(old_line_count.max(new_line_count)).unwrap_or(u32::MAX);

        line_count
            .saturating_mul(self.per_line)
            .max(self.minimum)
            .min(self.maximum)
    }
}
