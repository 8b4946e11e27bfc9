//! # sheet-parity-diff
//!
//! Formatting comparison between an "original" workbook and a "generated" one.
//!
//! The crate works on snapshots, never on documents:
//!
//! 1. [`SheetSnapshot::extract`] samples a bounded window of a worksheet
//!    (see [`SamplingLimits`]).
//! 2. [`align_sheets`] pairs sheets by position, ignoring names.
//! 3. [`compare_snapshots`] builds a [`DifferenceReport`]; findings are data,
//!    never errors.
//! 4. [`remediation_hints`] turns the findings into advisory fixes.
//!
//! [`analyze_detailed`] is the narrower first-sheet analysis with the
//! numeric width policy and a symmetric header check.
//!
//! ## Example
//!
//! ```rust
//! use sheet_parity_core::{Workbook, Worksheet};
//! use sheet_parity_diff::{compare_snapshots, CompareOptions, SamplingLimits, WorkbookSnapshot};
//!
//! let mut original = Worksheet::new("Roster");
//! original.set_value("A1", "Title").unwrap();
//! original.set_frozen_pane(Some("B5".to_string()));
//! let mut generated = Worksheet::new("Export");
//! generated.set_value("A1", "Title").unwrap();
//!
//! let mut a = Workbook::new();
//! a.add_worksheet(original).unwrap();
//! let mut b = Workbook::new();
//! b.add_worksheet(generated).unwrap();
//!
//! let limits = SamplingLimits::default();
//! let report = compare_snapshots(
//!     &WorkbookSnapshot::extract("original.xlsx", &a, &limits),
//!     &WorkbookSnapshot::extract("generated.xlsx", &b, &limits),
//!     &CompareOptions::default(),
//! );
//! assert_eq!(report.mismatch_count(), 1);
//! ```

pub mod align;
pub mod compare;
pub mod detailed;
pub mod facet;
pub mod hints;
pub mod limits;
pub mod snapshot;
pub mod width;

pub use align::{align_sheets, SheetPairing};
pub use compare::{
    compare_cells, compare_sheets, compare_snapshots, CellComparison, CompareOptions,
    DifferenceReport, DimensionComparison, FacetComparison, FacetPolicy, FrozenPaneComparison,
    MergedComparison, SheetComparison, SheetEntry,
};
pub use detailed::{
    analyze_detailed, DataRowCheck, DetailedAnalysis, DetailedOptions, RowSpan, WrapFinding,
};
pub use facet::{FacetValue, StyleFacet};
pub use hints::{remediation_hints, Hint};
pub use limits::SamplingLimits;
pub use snapshot::{CellStyleSample, Dimensions, SheetSnapshot, WorkbookSnapshot};
pub use width::{
    compare_width_maps, compare_width_range, NumericTolerance, SymbolicDefault, WidthComparison,
    WidthPolicy, WidthPolicyKind, WidthValue,
};

/// Render a float the way reports show it: whole numbers keep one decimal
/// ("13.0"), everything else uses the shortest exact form ("25.7109375").
pub(crate) fn display_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// First `max_chars` characters of `s`
pub(crate) fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => s[..end].to_string(),
        None => s.to_string(),
    }
}
