//! Prelude module - common imports for sheet-parity users
//!
//! ```rust
//! use sheet_parity::prelude::*;
//! ```

pub use crate::{
    // Entry points
    compare_files,
    compare_snapshots,
    detailed_files,
    open_workbook,
    remediation_hints,
    snapshot_file,

    CellAddress,
    CellValue,
    ColumnRef,
    CompareOptions,
    DetailedAnalysis,
    DetailedOptions,
    DifferenceReport,
    Hint,

    // Error types
    OpenError,
    OpenResult,

    SamplingLimits,
    SheetEntry,
    SheetSnapshot,
    StyleFacet,
    WidthPolicyKind,
    Workbook,
    // Extension traits
    WorkbookExt,
    WorkbookSnapshot,
    Worksheet,
};
