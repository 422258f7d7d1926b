//! Line-level diffing and side-by-side redline rendering.
//!
//! [`diff`] aligns two line sequences into [`DiffSpan`]-s and [`render`]
//! turns those spans into a [`RenderedDiff`]: numbered, classified rows that
//! any front end can draw.
//!
//! ```
//! use rule_redline::{LeftStatus, RightStatus, render_text};
//!
//! let redline = render_text("(a) Members shall\n(b) Reports", "(a) Members must\n(b) Reports");
//! let first = &redline.rows()[0];
//! assert_eq!(first.left.status, LeftStatus::Deleted);
//! assert_eq!(first.right.status, RightStatus::Added);
//! assert!(redline.rows()[1].is_unchanged());
//! ```

mod diff;
mod lines;
mod redline;
mod utils;

pub use diff::{DiffSpan, DiffTag, diff, diff_text};
pub use lines::split_lines;
pub use redline::{
    DiffStats, FoldedRow, LeftStatus, RedlineCell, RedlineRow, RenderedDiff, RightStatus,
    SizingPolicy, render, render_text,
};
pub use utils::side::Side;
