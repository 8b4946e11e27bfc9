//! Workbook type - the loaded document

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook: worksheets in document order
///
/// Names are unique within a workbook. Nothing assumes they line up with the
/// names in any other workbook.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    /// Create a workbook with no worksheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a worksheet by name (case-insensitive)
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets
            .iter()
            .find(|ws| ws.name().eq_ignore_ascii_case(name))
    }

    /// Iterate worksheets in document order
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Sheet names in document order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.worksheets.iter().map(|ws| ws.name()).collect()
    }

    /// Append a worksheet, returning its index
    pub fn add_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        let name = worksheet.name();
        if name.is_empty() || name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(name.to_string()));
        }
        if self.worksheet_by_name(name).is_some() {
            return Err(Error::DuplicateSheetName(name.to_string()));
        }
        self.worksheets.push(worksheet);
        Ok(self.worksheets.len() - 1)
    }
}
