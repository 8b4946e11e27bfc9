//! # sheet-parity
//!
//! Check that a generated XLSX workbook keeps the formatting of a template.
//!
//! Both documents are loaded completely, reduced to bounded snapshots and
//! compared sheet by sheet, pairing sheets by position. Any document that
//! cannot be opened aborts the run with an [`OpenError`]; everything else is
//! a finding in the returned report.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheet_parity::prelude::*;
//!
//! let report = compare_files(
//!     "original.xlsx",
//!     "generated.xlsx",
//!     &SamplingLimits::default(),
//!     &CompareOptions::default(),
//! )?;
//! for hint in remediation_hints(&report) {
//!     println!("{}", hint);
//! }
//! # Ok::<(), OpenError>(())
//! ```

pub mod error;
pub mod prelude;

pub use error::{OpenError, OpenResult};

// Re-export core types
pub use sheet_parity_core::{
    Alignment, BorderLineStyle, BorderStyle, Cell, CellAddress, CellRange, CellStyle, CellValue,
    Color, ColumnRef, Error, FillStyle, FontStyle, HorizontalAlignment, Result,
    VerticalAlignment, Workbook, Worksheet, MAX_COLS, MAX_ROWS,
};

// Re-export the comparison engine
pub use sheet_parity_diff::{
    align_sheets, analyze_detailed, compare_cells, compare_sheets, compare_snapshots,
    compare_width_maps, compare_width_range, remediation_hints, CellComparison, CellStyleSample,
    CompareOptions, DataRowCheck, DetailedAnalysis, DetailedOptions, DifferenceReport,
    DimensionComparison, Dimensions, FacetComparison, FacetPolicy, FacetValue,
    FrozenPaneComparison, Hint, MergedComparison, NumericTolerance, RowSpan, SamplingLimits,
    SheetComparison, SheetEntry, SheetPairing, SheetSnapshot, StyleFacet, SymbolicDefault,
    WidthComparison, WidthPolicy, WidthPolicyKind, WidthValue, WorkbookSnapshot, WrapFinding,
};

// Re-export I/O types
pub use sheet_parity_xlsx::{XlsxError, XlsxReader};

use std::path::Path;

/// Extension trait for Workbook to add file input
pub trait WorkbookExt {
    /// Open a workbook from a file, choosing the reader by extension
    fn open<P: AsRef<Path>>(path: P) -> OpenResult<Workbook>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> OpenResult<Workbook> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") => {
                XlsxReader::read_file(path).map_err(|source| OpenError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
            _ => Err(OpenError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Open a workbook
pub fn open_workbook<P: AsRef<Path>>(path: P) -> OpenResult<Workbook> {
    let path = path.as_ref();
    let workbook = Workbook::open(path)?;
    tracing::info!(
        path = %path.display(),
        sheets = workbook.sheet_count(),
        "opened workbook"
    );
    Ok(workbook)
}

/// Open a workbook and extract its snapshot
pub fn snapshot_file<P: AsRef<Path>>(
    path: P,
    limits: &SamplingLimits,
) -> OpenResult<WorkbookSnapshot> {
    let path = path.as_ref();
    let workbook = open_workbook(path)?;
    Ok(WorkbookSnapshot::extract(
        path.display().to_string(),
        &workbook,
        limits,
    ))
}

/// Compare two files
///
/// Both documents are opened before anything is compared, so a failure on
/// either one yields no partial report.
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(
    original: P,
    generated: Q,
    limits: &SamplingLimits,
    options: &CompareOptions,
) -> OpenResult<DifferenceReport> {
    let original = snapshot_file(original, limits)?;
    let generated = snapshot_file(generated, limits)?;
    Ok(compare_snapshots(&original, &generated, options))
}

/// Run the detailed analysis on the first sheet of each file
pub fn detailed_files<P: AsRef<Path>, Q: AsRef<Path>>(
    original: P,
    generated: Q,
    options: &DetailedOptions,
) -> OpenResult<DetailedAnalysis> {
    let limits = options.sampling_limits();
    let original = first_sheet_snapshot(original.as_ref(), &limits)?;
    let generated = first_sheet_snapshot(generated.as_ref(), &limits)?;
    Ok(analyze_detailed(&original, &generated, options))
}

fn first_sheet_snapshot(path: &Path, limits: &SamplingLimits) -> OpenResult<SheetSnapshot> {
    let workbook = open_workbook(path)?;
    let sheet = workbook
        .worksheet(0)
        .ok_or_else(|| OpenError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?;
    Ok(SheetSnapshot::extract(sheet, limits))
}
