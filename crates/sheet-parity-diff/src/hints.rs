//! Remediation hints
//!
//! Advisory fixes derived from findings. They never change the outcome of a
//! comparison.

use std::fmt;

use serde::Serialize;
use sheet_parity_core::{CellAddress, ColumnRef};

use crate::compare::{CellComparison, DifferenceReport, FrozenPaneComparison, SheetEntry};
use crate::facet::{FacetValue, StyleFacet};
use crate::width::{WidthComparison, WidthValue};

/// A suggested change to the generated document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Hint {
    AddSheet {
        index: usize,
        name: String,
    },
    SetFrozenPane {
        sheet: String,
        anchor: String,
    },
    RemoveFrozenPane {
        sheet: String,
    },
    SetColumnWidth {
        sheet: String,
        column: ColumnRef,
        width: WidthValue,
    },
    MatchMergedRegions {
        sheet: String,
        expected: usize,
        found: usize,
        regions: Vec<String>,
    },
    /// Give a cell facet the original's value; `None` means unset it
    SetFacet {
        sheet: String,
        cell: CellAddress,
        facet: StyleFacet,
        value: Option<FacetValue>,
    },
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::AddSheet { index, name } => {
                write!(f, "Add sheet {} ('{}') to the generated file", index + 1, name)
            }
            Hint::SetFrozenPane { sheet, anchor } => {
                write!(f, "[{}] Set frozen pane to {}", sheet, anchor)
            }
            Hint::RemoveFrozenPane { sheet } => write!(f, "[{}] Remove the frozen pane", sheet),
            Hint::SetColumnWidth {
                sheet,
                column,
                width: WidthValue::Explicit(w),
            } => write!(f, "[{}] Set column {} width to {}", sheet, column, w),
            Hint::SetColumnWidth { sheet, column, .. } => {
                write!(f, "[{}] Reset column {} to the default width", sheet, column)
            }
            Hint::MatchMergedRegions {
                sheet,
                expected,
                found,
                regions,
            } => {
                write!(
                    f,
                    "[{}] Expected {} merged regions, found {}",
                    sheet, expected, found
                )?;
                if !regions.is_empty() {
                    write!(f, " (original starts with {})", regions.join(", "))?;
                }
                Ok(())
            }
            Hint::SetFacet {
                sheet,
                cell,
                facet,
                value,
            } => {
                write!(f, "[{}] ", sheet)?;
                match (facet, value) {
                    (StyleFacet::Bold, Some(FacetValue::Flag(true))) => {
                        write!(f, "Make {} bold", cell)
                    }
                    (StyleFacet::Bold, Some(FacetValue::Flag(false))) => {
                        write!(f, "Make {} not bold", cell)
                    }
                    (StyleFacet::WrapText, Some(FacetValue::Flag(true))) => {
                        write!(f, "Enable wrap text on {}", cell)
                    }
                    (StyleFacet::WrapText, Some(FacetValue::Flag(false))) => {
                        write!(f, "Disable wrap text on {}", cell)
                    }
                    (StyleFacet::FillColor, Some(color)) => {
                        write!(f, "Set fill of {} to {}", cell, color)
                    }
                    (StyleFacet::HorizontalAlignment, Some(align)) => {
                        write!(f, "Align {} {}", cell, align)
                    }
                    (_, Some(v)) => write!(f, "Set {} of {} to {}", facet.label(), cell, v),
                    (_, None) => write!(f, "Clear {} on {}", facet.label(), cell),
                }
            }
        }
    }
}

/// Hints for every finding of a report, in report order
pub fn remediation_hints(report: &DifferenceReport) -> Vec<Hint> {
    let mut hints = Vec::new();
    for entry in &report.entries {
        match entry {
            SheetEntry::Missing { index, name } => hints.push(Hint::AddSheet {
                index: *index,
                name: name.clone(),
            }),
            SheetEntry::Compared(cmp) => {
                let sheet = &cmp.generated_name;
                hints.extend(frozen_pane_hint(sheet, &cmp.frozen_panes));
                hints.extend(width_hints(sheet, &cmp.column_widths));
                let merged = &cmp.merged_cells;
                if !merged.counts_match {
                    hints.push(Hint::MatchMergedRegions {
                        sheet: sheet.clone(),
                        expected: merged.original_count,
                        found: merged.generated_count,
                        regions: merged.original_regions.clone(),
                    });
                }
                hints.extend(cell_hints(sheet, &cmp.cells));
            }
        }
    }
    hints
}

pub(crate) fn frozen_pane_hint(sheet: &str, panes: &FrozenPaneComparison) -> Option<Hint> {
    if panes.matches {
        return None;
    }
    Some(match &panes.original {
        Some(anchor) => Hint::SetFrozenPane {
            sheet: sheet.to_string(),
            anchor: anchor.clone(),
        },
        None => Hint::RemoveFrozenPane {
            sheet: sheet.to_string(),
        },
    })
}

pub(crate) fn width_hints<'a>(
    sheet: &'a str,
    widths: &'a [WidthComparison],
) -> impl Iterator<Item = Hint> + 'a {
    widths
        .iter()
        .filter(|w| !w.matches)
        .map(move |w| Hint::SetColumnWidth {
            sheet: sheet.to_string(),
            column: w.column,
            width: w.original,
        })
}

pub(crate) fn cell_hints<'a>(
    sheet: &'a str,
    cells: &'a [CellComparison],
) -> impl Iterator<Item = Hint> + 'a {
    cells.iter().flat_map(move |cell| {
        cell.facets
            .iter()
            .filter(|f| !f.matches)
            .map(move |f| Hint::SetFacet {
                sheet: sheet.to_string(),
                cell: cell.reference,
                facet: f.facet,
                value: f.original.clone(),
            })
    })
}
