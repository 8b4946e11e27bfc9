//! Sampling limits for snapshot extraction

use serde::{Deserialize, Serialize};

/// Bounds on what a snapshot records from a worksheet
///
/// Every window starts at row 1 / column A. With `bounded_by_extent` set, a
/// window also stops at the sheet's used extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingLimits {
    /// Columns whose explicit width is recorded
    pub width_columns: u16,
    /// Rows whose explicit height is recorded
    pub height_rows: u32,
    /// Rows of the style sample window
    pub style_rows: u32,
    /// Columns of the style sample window
    pub style_columns: u16,
    /// Characters kept from each sampled display value
    pub value_chars: usize,
    /// Clip every window to the sheet's max row / max column
    pub bounded_by_extent: bool,
}

impl Default for SamplingLimits {
    fn default() -> Self {
        Self {
            width_columns: 19,
            height_rows: 19,
            style_rows: 5,
            style_columns: 9,
            value_chars: 50,
            bounded_by_extent: true,
        }
    }
}

impl SamplingLimits {
    /// Number of leading columns to read widths from
    pub fn width_column_count(&self, max_column: u32) -> u16 {
        self.clip_columns(self.width_columns, max_column)
    }

    /// Number of leading rows to read heights from
    pub fn height_row_count(&self, max_row: u32) -> u32 {
        self.clip_rows(self.height_rows, max_row)
    }

    /// `(rows, columns)` of the style sample window
    pub fn style_window(&self, max_row: u32, max_column: u32) -> (u32, u16) {
        (
            self.clip_rows(self.style_rows, max_row),
            self.clip_columns(self.style_columns, max_column),
        )
    }

    /// Upper bound on sampled cells
    pub fn max_style_cells(&self) -> usize {
        self.style_rows as usize * self.style_columns as usize
    }

    fn clip_rows(&self, limit: u32, max_row: u32) -> u32 {
        if self.bounded_by_extent {
            limit.min(max_row)
        } else {
            limit
        }
    }

    fn clip_columns(&self, limit: u16, max_column: u32) -> u16 {
        if self.bounded_by_extent {
            limit.min(max_column.min(u16::MAX as u32) as u16)
        } else {
            limit
        }
    }
}
