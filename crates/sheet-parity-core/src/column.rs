//! Column references

use crate::cell::CellAddress;
use crate::error::{Error, Result};
use crate::MAX_COLS;
use std::fmt;
use std::str::FromStr;

/// A worksheet column, identified by its 0-based index
///
/// Displays as spreadsheet letters and orders by index, so `J` < `K` < `Z` < `AA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnRef(u16);

impl ColumnRef {
    /// Create from a 0-based index
    pub fn new(index: u16) -> Result<Self> {
        if index >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(index as u32, MAX_COLS - 1));
        }
        Ok(Self(index))
    }

    /// Create from a 0-based index, clamping to the last column
    pub const fn saturating(index: u16) -> Self {
        if index < MAX_COLS {
            Self(index)
        } else {
            Self(MAX_COLS - 1)
        }
    }

    /// Create from a 1-based column number (A = 1)
    pub fn from_number(number: u32) -> Result<Self> {
        if number == 0 || number > MAX_COLS as u32 {
            return Err(Error::ColumnOutOfBounds(
                number.saturating_sub(1),
                MAX_COLS - 1,
            ));
        }
        Ok(Self((number - 1) as u16))
    }

    /// Parse column letters ("A", "aa")
    pub fn parse(letters: &str) -> Result<Self> {
        CellAddress::letters_to_column(letters.trim()).map(Self)
    }

    /// 0-based index
    pub fn index(&self) -> u16 {
        self.0
    }

    /// 1-based column number
    pub fn number(&self) -> u32 {
        self.0 as u32 + 1
    }

    /// Column letters
    pub fn letters(&self) -> String {
        CellAddress::column_to_letters(self.0)
    }

    /// The cell in this column on the given 1-based row
    pub fn cell(&self, row_number: u32) -> CellAddress {
        CellAddress::new(row_number.saturating_sub(1), self.0)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.letters())
    }
}

impl FromStr for ColumnRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ColumnRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.letters())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ColumnRef {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
