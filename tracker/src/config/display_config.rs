use log::debug;
use rule_redline::SizingPolicy;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_COLUMN_WIDTH, DEFAULT_CONTEXT_LINES, DEFAULT_MAXIMUM_HEIGHT, DEFAULT_MINIMUM_HEIGHT,
    DEFAULT_PER_LINE_HEIGHT,
};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Unchanged lines kept around each change when folding a redline.
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,

    #[serde(default = "default_per_line_height")]
    pub per_line_height: u32,

    #[serde(default = "default_minimum_height")]
    pub minimum_height: u32,

    #[serde(default = "default_maximum_height")]
    pub maximum_height: u32,

    /// Width of each column of the terminal redline, in characters.
    #[serde(default = "default_column_width")]
    pub column_width: usize,
}

impl DisplayConfig {
    pub fn sizing_policy(&self) -> SizingPolicy {
        SizingPolicy {
            per_line: self.per_line_height,
            minimum: self.minimum_height,
            maximum: self.maximum_height,
        }
    }
}

fn default_context_lines() -> usize {
    debug!("Using default context lines: {DEFAULT_CONTEXT_LINES}");
    DEFAULT_CONTEXT_LINES
}

fn default_per_line_height() -> u32 {
    debug!("Using default per-line height: {DEFAULT_PER_LINE_HEIGHT}");
    DEFAULT_PER_LINE_HEIGHT
}

fn default_minimum_height() -> u32 {
    debug!("Using default minimum height: {DEFAULT_MINIMUM_HEIGHT}");
    DEFAULT_MINIMUM_HEIGHT
}

fn default_maximum_height() -> u32 {
    debug!("Using default maximum height: {DEFAULT_MAXIMUM_HEIGHT}");
    DEFAULT_MAXIMUM_HEIGHT
}

fn default_column_width() -> usize {
    debug!("Using default column width: {DEFAULT_COLUMN_WIDTH}");
    DEFAULT_COLUMN_WIDTH
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            context_lines: default_context_lines(),
            per_line_height: default_per_line_height(),
            minimum_height: default_minimum_height(),
            maximum_height: default_maximum_height(),
            column_width: default_column_width(),
        }
    }
}
