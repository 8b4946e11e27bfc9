//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{Cell, CellAddress, CellRange, CellValue};
use crate::error::{Error, Result};
use crate::style::CellStyle;
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet as loaded from a document
///
/// Only the presentation-relevant parts of a sheet are modeled: stored cells
/// (value and resolved style), explicit column widths and row heights, merged
/// ranges and the frozen-pane anchor.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    name: String,
    cells: BTreeMap<CellAddress, Cell>,
    /// Explicit column widths keyed by 0-based column
    column_widths: BTreeMap<u16, f64>,
    /// Explicit row heights keyed by 0-based row
    row_heights: BTreeMap<u32, f64>,
    merged: Vec<CellRange>,
    /// Raw top-left cell of the scrollable pane, as written in the file
    frozen_pane: Option<String>,
}

impl Worksheet {
    /// Create an empty worksheet
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get the worksheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cells ===

    /// Get a cell by A1 address
    pub fn cell(&self, address: &str) -> Result<Option<&Cell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(&addr))
    }

    /// Get a cell by 0-based row/column
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&CellAddress::new(row, col))
    }

    /// Get a cell value by 0-based row/column (empty if the cell is not stored)
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cell_at(row, col)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty)
    }

    /// Set a cell value by A1 address, keeping any existing style
    pub fn set_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by 0-based row/column, keeping any existing style
    pub fn set_value_at<V: Into<CellValue>>(&mut self, row: u32, col: u16, value: V) -> Result<()> {
        let addr = Self::checked(row, col)?;
        self.cells.entry(addr).or_default().value = value.into();
        Ok(())
    }

    /// Set a cell style by A1 address
    pub fn set_style(&mut self, address: &str, style: CellStyle) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_style_at(addr.row, addr.col, style)
    }

    /// Set a cell style by 0-based row/column
    ///
    /// A style-only cell still counts toward the sheet extent.
    pub fn set_style_at(&mut self, row: u32, col: u16, style: CellStyle) -> Result<()> {
        let addr = Self::checked(row, col)?;
        self.cells.entry(addr).or_default().style = Some(style);
        Ok(())
    }

    /// Iterate stored cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (&CellAddress, &Cell)> {
        self.cells.iter()
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn checked(row: u32, col: u16) -> Result<CellAddress> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col as u32, MAX_COLS - 1));
        }
        Ok(CellAddress::new(row, col))
    }

    // === Extent ===

    /// Highest 1-based row holding a stored cell (1 for an empty sheet)
    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|a| a.row + 1).max().unwrap_or(1)
    }

    /// Highest 1-based column holding a stored cell (1 for an empty sheet)
    pub fn max_column(&self) -> u32 {
        self.cells.keys().map(|a| a.col as u32 + 1).max().unwrap_or(1)
    }

    /// Used range as an A1 string ("A1:M40"); "A1:A1" for an empty sheet
    pub fn dimensions(&self) -> String {
        let min_row = self.cells.keys().map(|a| a.row).min().unwrap_or(0);
        let min_col = self.cells.keys().map(|a| a.col).min().unwrap_or(0);
        let start = CellAddress::new(min_row, min_col);
        let end = CellAddress::new(self.max_row() - 1, (self.max_column() - 1) as u16);
        format!("{}:{}", start, end)
    }

    // === Column widths / row heights ===

    /// Explicit width of a 0-based column
    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    /// Set an explicit column width
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    /// All explicit column widths keyed by 0-based column
    pub fn column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    /// Explicit height of a 0-based row
    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    /// Set an explicit row height
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    /// All explicit row heights keyed by 0-based row
    pub fn row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.row_heights
    }

    // === Merged cells ===

    /// Merged regions in document order
    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged
    }

    /// Record a merged region
    pub fn merge_cells(&mut self, range: CellRange) {
        self.merged.push(range);
    }

    // === Frozen panes ===

    /// Raw frozen-pane anchor (first scrollable cell), if any
    pub fn frozen_pane(&self) -> Option<&str> {
        self.frozen_pane.as_deref()
    }

    /// Set or clear the frozen-pane anchor
    pub fn set_frozen_pane(&mut self, anchor: Option<String>) {
        self.frozen_pane = anchor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FontStyle;

    #[test]
    fn test_empty_sheet_extent() {
        let sheet = Worksheet::new("Empty");
        assert_eq!(sheet.max_row(), 1);
        assert_eq!(sheet.max_column(), 1);
        assert_eq!(sheet.dimensions(), "A1:A1");
    }

    #[test]
    fn test_extent_includes_style_only_cells() {
        let mut sheet = Worksheet::new("Data");
        sheet.set_value("B2", "x").unwrap();
        sheet
            .set_style("M40", CellStyle::new().with_font(FontStyle::new().with_bold(true)))
            .unwrap();
        assert_eq!(sheet.max_row(), 40);
        assert_eq!(sheet.max_column(), 13);
        assert_eq!(sheet.dimensions(), "B2:M40");
    }

    #[test]
    fn test_value_and_style_merge_into_one_cell() {
        let mut sheet = Worksheet::new("Data");
        sheet
            .set_style_at(0, 0, CellStyle::new().with_font(FontStyle::new().with_bold(true)))
            .unwrap();
        sheet.set_value_at(0, 0, "Title").unwrap();

        let cell = sheet.cell("A1").unwrap().unwrap();
        assert_eq!(cell.value, CellValue::from("Title"));
        assert_eq!(cell.style.as_ref().and_then(|s| s.bold()), Some(true));
        assert_eq!(sheet.cell_count(), 1);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut sheet = Worksheet::new("Data");
        assert!(sheet.set_value_at(MAX_ROWS, 0, 1.0).is_err());
        assert!(sheet.set_value_at(0, MAX_COLS, 1.0).is_err());
    }

    #[test]
    fn test_layout_metadata() {
        let mut sheet = Worksheet::new("Data");
        sheet.set_column_width(0, 25.75);
        sheet.set_row_height(3, 30.0);
        sheet.merge_cells(CellRange::parse("B5:D5").unwrap());
        sheet.set_frozen_pane(Some("B5".into()));

        assert_eq!(sheet.column_width(0), Some(25.75));
        assert_eq!(sheet.column_width(1), None);
        assert_eq!(sheet.row_height(3), Some(30.0));
        assert_eq!(sheet.merged_regions()[0].to_string(), "B5:D5");
        assert_eq!(sheet.frozen_pane(), Some("B5"));
    }
}
