//! # sheet-parity-core
//!
//! Read-only spreadsheet model shared by the sheet-parity reader and differ.
//!
//! - [`CellAddress`], [`CellRange`] and [`ColumnRef`] - cell addressing
//! - [`CellValue`] - what a cell holds, with the display form used in reports
//! - [`CellStyle`] - style facets, each one optional so "unset" stays distinct
//!   from "explicitly off"
//! - [`Workbook`], [`Worksheet`] - the loaded document
//!
//! ## Example
//!
//! ```rust
//! use sheet_parity_core::{CellValue, Workbook, Worksheet};
//!
//! let mut sheet = Worksheet::new("Data");
//! sheet.set_value("B5", CellValue::from("07:00")).unwrap();
//! sheet.set_frozen_pane(Some("B5".to_string()));
//!
//! let mut workbook = Workbook::new();
//! workbook.add_worksheet(sheet).unwrap();
//!
//! let sheet = workbook.worksheet(0).unwrap();
//! assert_eq!(sheet.max_row(), 5);
//! assert_eq!(sheet.max_column(), 2);
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod style;
pub mod workbook;
pub mod worksheet;

pub use cell::{Cell, CellAddress, CellRange, CellValue};
pub use column::ColumnRef;
pub use error::{Error, Result};
pub use style::{
    Alignment, BorderLineStyle, BorderStyle, CellStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, VerticalAlignment,
};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
