//! Detailed first-sheet analysis
//!
//! A narrower, stricter pass than [`compare_snapshots`](crate::compare_snapshots):
//! a fixed block of columns under the numeric width policy, a symmetric
//! header check, and a wrap-text check over the first data rows.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use sheet_parity_core::ColumnRef;

use crate::compare::{compare_cells, CellComparison, FacetPolicy, FrozenPaneComparison};
use crate::facet::{FacetValue, StyleFacet};
use crate::hints::{cell_hints, frozen_pane_hint, width_hints, Hint};
use crate::limits::SamplingLimits;
use crate::snapshot::SheetSnapshot;
use crate::truncate_chars;
use crate::width::{compare_width_range, NumericTolerance, WidthComparison};

/// Facets checked on header cells
pub const HEADER_FACETS: [StyleFacet; 3] = [
    StyleFacet::Bold,
    StyleFacet::WrapText,
    StyleFacet::HorizontalAlignment,
];

/// Inclusive span of 1-based rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSpan {
    pub first: u32,
    pub last: u32,
}

impl RowSpan {
    pub fn new(first: u32, last: u32) -> Self {
        Self {
            first: first.min(last),
            last: first.max(last),
        }
    }

    pub fn rows(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }

    pub fn contains(&self, row: u32) -> bool {
        self.rows().contains(&row)
    }
}

/// Options for [`analyze_detailed`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedOptions {
    /// Columns 1..=columns are checked for widths and header styling
    pub columns: u16,
    pub header_rows: RowSpan,
    pub data_rows: RowSpan,
    /// Column whose value labels each data row
    pub label_column: ColumnRef,
    pub label_chars: usize,
    pub widths: NumericTolerance,
}

impl Default for DetailedOptions {
    fn default() -> Self {
        Self {
            columns: 13,
            header_rows: RowSpan::new(1, 4),
            data_rows: RowSpan::new(5, 7),
            label_column: ColumnRef::saturating(1),
            label_chars: 40,
            widths: NumericTolerance::default(),
        }
    }
}

impl DetailedOptions {
    /// Sampling limits that cover every cell this analysis reads
    ///
    /// Windows are not clipped to the sheet extent: a column missing from a
    /// short sheet still has a width to compare.
    pub fn sampling_limits(&self) -> SamplingLimits {
        let defaults = SamplingLimits::default();
        let last_row = self.header_rows.last.max(self.data_rows.last);
        let last_column = (self.label_column.number().min(u16::MAX as u32) as u16).max(self.columns);
        SamplingLimits {
            width_columns: self.columns,
            height_rows: defaults.height_rows,
            style_rows: last_row,
            style_columns: last_column,
            value_chars: defaults.value_chars.max(self.label_chars),
            bounded_by_extent: false,
        }
    }

    fn column_refs(&self) -> impl Iterator<Item = ColumnRef> {
        (1..=self.columns as u32).filter_map(|n| ColumnRef::from_number(n).ok())
    }
}

/// An original cell that wraps where the generated one does not
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrapFinding {
    pub column: ColumnRef,
    /// Generated wrap-text setting
    pub generated: Option<bool>,
}

/// One data row: its label on each side and lost wrapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataRowCheck {
    pub row: u32,
    pub original_label: Option<String>,
    pub generated_label: Option<String>,
    pub missing_wrap: Vec<WrapFinding>,
}

/// Result of [`analyze_detailed`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedAnalysis {
    pub original_sheet: String,
    pub generated_sheet: String,
    pub frozen_panes: FrozenPaneComparison,
    pub column_widths: Vec<WidthComparison>,
    /// Header cells with at least one mismatching facet; only the
    /// mismatching facets are kept
    pub header_issues: Vec<CellComparison>,
    pub data_rows: Vec<DataRowCheck>,
}

impl DetailedAnalysis {
    pub fn has_findings(&self) -> bool {
        !self.frozen_panes.matches
            || self.column_widths.iter().any(|w| !w.matches)
            || !self.header_issues.is_empty()
            || self.data_rows.iter().any(|r| !r.missing_wrap.is_empty())
    }

    /// Fixes derived from the findings
    pub fn hints(&self) -> Vec<Hint> {
        let sheet = self.generated_sheet.as_str();
        let mut hints: Vec<Hint> = frozen_pane_hint(sheet, &self.frozen_panes)
            .into_iter()
            .chain(width_hints(sheet, &self.column_widths))
            .chain(cell_hints(sheet, &self.header_issues))
            .collect();
        for check in &self.data_rows {
            for finding in &check.missing_wrap {
                hints.push(Hint::SetFacet {
                    sheet: sheet.to_string(),
                    cell: finding.column.cell(check.row),
                    facet: StyleFacet::WrapText,
                    value: Some(FacetValue::Flag(true)),
                });
            }
        }
        hints
    }
}

/// Analyze a pair of first sheets
///
/// Both snapshots should be extracted with [`DetailedOptions::sampling_limits`].
pub fn analyze_detailed(
    original: &SheetSnapshot,
    generated: &SheetSnapshot,
    options: &DetailedOptions,
) -> DetailedAnalysis {
    let column_widths = compare_width_range(
        &original.column_widths,
        &generated.column_widths,
        options.column_refs(),
        &options.widths,
    );

    let header_issues = original
        .sample_cells
        .iter()
        .filter(|(addr, _)| {
            options.header_rows.contains(addr.row_number())
                && addr.column_number() <= options.columns as u32
        })
        .filter_map(|(addr, sample)| {
            let mut cmp = compare_cells(
                *addr,
                sample,
                generated.sample_cells.get(addr),
                &HEADER_FACETS,
                FacetPolicy::Exact,
                options.label_chars,
            );
            cmp.facets.retain(|f| !f.matches);
            (!cmp.facets.is_empty()).then_some(cmp)
        })
        .collect();

    let label = |snapshot: &SheetSnapshot, row: u32| {
        snapshot
            .sample_cells
            .get(&options.label_column.cell(row))
            .map(|s| truncate_chars(&s.value, options.label_chars))
    };

    let data_rows = options
        .data_rows
        .rows()
        .map(|row| {
            let missing_wrap = options
                .column_refs()
                .filter_map(|column| {
                    let addr = column.cell(row);
                    let orig = original.sample_cells.get(&addr)?;
                    if orig.alignment_wrap_text != Some(true) {
                        return None;
                    }
                    let generated_wrap = generated
                        .sample_cells
                        .get(&addr)
                        .and_then(|s| s.alignment_wrap_text);
                    (generated_wrap != Some(true)).then_some(WrapFinding {
                        column,
                        generated: generated_wrap,
                    })
                })
                .collect();
            DataRowCheck {
                row,
                original_label: label(original, row),
                generated_label: label(generated, row),
                missing_wrap,
            }
        })
        .collect();

    let analysis = DetailedAnalysis {
        original_sheet: original.name.clone(),
        generated_sheet: generated.name.clone(),
        frozen_panes: FrozenPaneComparison::new(
            original.frozen_panes.as_deref(),
            generated.frozen_panes.as_deref(),
        ),
        column_widths,
        header_issues,
        data_rows,
    };
    tracing::debug!(
        original = %analysis.original_sheet,
        generated = %analysis.generated_sheet,
        findings = analysis.has_findings(),
        "detailed analysis done"
    );
    analysis
}
