//! # sheet-parity-xlsx
//!
//! XLSX (Office Open XML) reader for sheet-parity.
//!
//! Reads the parts a formatting comparison needs: sheet order and names,
//! cell values, resolved cell styles, column widths, row heights, merged
//! ranges and frozen panes. Everything else in the package is ignored.

pub mod error;
pub mod reader;

mod styles;
mod xml;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
