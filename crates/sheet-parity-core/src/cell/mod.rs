//! Cell-related types
//!
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A rectangular range (e.g., "B5:D5")
//! - [`Cell`] - Value plus the resolved style, if the cell carries one

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::CellValue;

use crate::style::CellStyle;

/// A stored cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    /// Cell value (may be empty for style-only cells)
    pub value: CellValue,
    /// Resolved style; `None` when the cell references no style record
    pub style: Option<CellStyle>,
}

impl Cell {
    /// Create a cell holding a value and no style
    pub fn new(value: CellValue) -> Self {
        Self { value, style: None }
    }

    /// Attach a style
    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Check whether the cell holds displayable content
    pub fn has_content(&self) -> bool {
        !self.value.is_blank()
    }
}
