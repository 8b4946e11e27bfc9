//! Positional sheet alignment

use serde::{Deserialize, Serialize};

/// An original sheet and the generated sheet at the same position, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetPairing {
    pub original_index: usize,
    pub generated_index: Option<usize>,
}

impl SheetPairing {
    /// Whether the generated document has no sheet at this position
    pub fn is_missing(&self) -> bool {
        self.generated_index.is_none()
    }
}

/// Pair sheets by index
///
/// One pairing per original sheet. Names play no part; extra generated
/// sheets are not reported.
pub fn align_sheets(original_count: usize, generated_count: usize) -> Vec<SheetPairing> {
    (0..original_count)
        .map(|i| SheetPairing {
            original_index: i,
            generated_index: (i < generated_count).then_some(i),
        })
        .collect()
}
