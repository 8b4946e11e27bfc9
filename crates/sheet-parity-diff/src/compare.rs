//! Snapshot comparison
//!
//! Every comparison runs to completion. Mismatches and missing sheets are
//! recorded in the [`DifferenceReport`]; nothing here returns an error.

use serde::{Deserialize, Serialize};
use sheet_parity_core::CellAddress;

use crate::align::align_sheets;
use crate::facet::{FacetValue, StyleFacet};
use crate::snapshot::{CellStyleSample, Dimensions, SheetSnapshot, WorkbookSnapshot};
use crate::truncate_chars;
use crate::width::{compare_width_maps, WidthComparison, WidthPolicyKind};

/// Options for [`compare_snapshots`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Width rows kept from the sorted column union
    pub width_columns: usize,
    /// Merged regions listed per side
    pub merged_listing: usize,
    /// Characters of the original value used as a cell label
    pub label_chars: usize,
    pub width_policy: WidthPolicyKind,
    /// Facets checked on each sampled cell
    pub facets: Vec<StyleFacet>,
    /// Compare only the first N sampled cells; `None` compares all
    pub max_style_cells: Option<usize>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            width_columns: 10,
            merged_listing: 5,
            label_chars: 30,
            width_policy: WidthPolicyKind::Symbolic,
            facets: StyleFacet::REPORT_DEFAULT.to_vec(),
            max_style_cells: None,
        }
    }
}

/// Which facets of a cell take part in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetPolicy {
    /// Only facets the original sets to a truthy value; extra styling on the
    /// generated side is never flagged
    #[default]
    OriginalTruthy,
    /// Every requested facet, unset included
    Exact,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetComparison {
    pub facet: StyleFacet,
    pub original: Option<FacetValue>,
    pub generated: Option<FacetValue>,
    pub matches: bool,
}

/// Facet comparisons for one cell reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellComparison {
    pub reference: CellAddress,
    /// Original value, truncated
    pub label: String,
    /// Whether the generated sample has this cell at all
    pub generated_present: bool,
    pub facets: Vec<FacetComparison>,
}

impl CellComparison {
    pub fn mismatch_count(&self) -> usize {
        self.facets.iter().filter(|f| !f.matches).count()
    }

    pub fn has_mismatch(&self) -> bool {
        self.mismatch_count() > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrozenPaneComparison {
    pub original: Option<String>,
    pub generated: Option<String>,
    pub matches: bool,
}

impl FrozenPaneComparison {
    /// Exact comparison; two absent anchors are equal
    pub fn new(original: Option<&str>, generated: Option<&str>) -> Self {
        Self {
            matches: original == generated,
            original: original.map(str::to_string),
            generated: generated.map(str::to_string),
        }
    }
}

/// Both extents side by side; informational only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DimensionComparison {
    pub original: Dimensions,
    pub generated: Dimensions,
}

impl DimensionComparison {
    pub fn same(&self) -> bool {
        self.original == self.generated
    }
}

/// Merged regions compared by count, with a short listing per side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedComparison {
    pub original_count: usize,
    pub generated_count: usize,
    pub original_regions: Vec<String>,
    pub generated_regions: Vec<String>,
    pub counts_match: bool,
}

/// Comparison of one positional sheet pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetComparison {
    pub index: usize,
    pub original_name: String,
    pub generated_name: String,
    pub dimensions: DimensionComparison,
    pub frozen_panes: FrozenPaneComparison,
    pub column_widths: Vec<WidthComparison>,
    pub merged_cells: MergedComparison,
    pub cells: Vec<CellComparison>,
}

impl SheetComparison {
    /// "Original vs Generated"
    pub fn label(&self) -> String {
        format!("{} vs {}", self.original_name, self.generated_name)
    }

    /// Flagged differences; dimensions never count
    pub fn mismatch_count(&self) -> usize {
        usize::from(!self.frozen_panes.matches)
            + self.column_widths.iter().filter(|w| !w.matches).count()
            + usize::from(!self.merged_cells.counts_match)
            + self.cells.iter().map(CellComparison::mismatch_count).sum::<usize>()
    }
}

/// One entry per original sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SheetEntry {
    Compared(SheetComparison),
    /// The generated document has no sheet at this position
    Missing { index: usize, name: String },
}

/// Result of comparing two documents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferenceReport {
    pub original: String,
    pub generated: String,
    pub original_sheets: Vec<String>,
    pub generated_sheets: Vec<String>,
    pub entries: Vec<SheetEntry>,
}

impl DifferenceReport {
    /// Iterate compared sheet pairs
    pub fn compared(&self) -> impl Iterator<Item = &SheetComparison> {
        self.entries.iter().filter_map(|e| match e {
            SheetEntry::Compared(cmp) => Some(cmp),
            SheetEntry::Missing { .. } => None,
        })
    }

    pub fn mismatch_count(&self) -> usize {
        self.compared().map(SheetComparison::mismatch_count).sum()
    }

    pub fn missing_sheet_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, SheetEntry::Missing { .. }))
            .count()
    }

    /// Any mismatch or missing sheet
    pub fn has_findings(&self) -> bool {
        self.mismatch_count() > 0 || self.missing_sheet_count() > 0
    }
}

/// Compare two workbook snapshots, pairing sheets by position
pub fn compare_snapshots(
    original: &WorkbookSnapshot,
    generated: &WorkbookSnapshot,
    options: &CompareOptions,
) -> DifferenceReport {
    let pairings = align_sheets(original.sheets.len(), generated.sheets.len());
    tracing::debug!(
        original = original.sheets.len(),
        generated = generated.sheets.len(),
        "aligned sheets by position"
    );

    let entries = pairings
        .iter()
        .filter_map(|pair| {
            let orig = original.sheets.get(pair.original_index)?;
            Some(match pair.generated_index.and_then(|i| generated.sheets.get(i)) {
                Some(gen) => {
                    let mut cmp = compare_sheets(orig, gen, options);
                    cmp.index = pair.original_index;
                    SheetEntry::Compared(cmp)
                }
                None => {
                    tracing::warn!(
                        index = pair.original_index,
                        sheet = %orig.name,
                        "sheet missing in generated document"
                    );
                    SheetEntry::Missing {
                        index: pair.original_index,
                        name: orig.name.clone(),
                    }
                }
            })
        })
        .collect();

    DifferenceReport {
        original: original.source.clone(),
        generated: generated.source.clone(),
        original_sheets: original.sheet_names(),
        generated_sheets: generated.sheet_names(),
        entries,
    }
}

/// Compare one pair of sheets, whatever their names
pub fn compare_sheets(
    original: &SheetSnapshot,
    generated: &SheetSnapshot,
    options: &CompareOptions,
) -> SheetComparison {
    let cell_limit = options.max_style_cells.unwrap_or(usize::MAX);
    let cells = original
        .sample_cells
        .iter()
        .take(cell_limit)
        .map(|(reference, sample)| {
            compare_cells(
                *reference,
                sample,
                generated.sample_cells.get(reference),
                &options.facets,
                FacetPolicy::OriginalTruthy,
                options.label_chars,
            )
        })
        .collect();

    let cmp = SheetComparison {
        index: 0,
        original_name: original.name.clone(),
        generated_name: generated.name.clone(),
        dimensions: DimensionComparison {
            original: original.dimensions,
            generated: generated.dimensions,
        },
        frozen_panes: FrozenPaneComparison::new(
            original.frozen_panes.as_deref(),
            generated.frozen_panes.as_deref(),
        ),
        column_widths: compare_width_maps(
            &original.column_widths,
            &generated.column_widths,
            options.width_columns,
            &options.width_policy,
        ),
        merged_cells: MergedComparison {
            original_count: original.merged_cells.len(),
            generated_count: generated.merged_cells.len(),
            original_regions: listing(&original.merged_cells, options.merged_listing),
            generated_regions: listing(&generated.merged_cells, options.merged_listing),
            counts_match: original.merged_cells.len() == generated.merged_cells.len(),
        },
        cells,
    };

    tracing::debug!(
        sheet = %cmp.label(),
        mismatches = cmp.mismatch_count(),
        "compared sheet pair"
    );
    cmp
}

/// Compare the requested facets of one cell
///
/// A missing generated sample reads as "no style information": every facet
/// is `None` and `generated_present` is false.
pub fn compare_cells(
    reference: CellAddress,
    original: &CellStyleSample,
    generated: Option<&CellStyleSample>,
    facets: &[StyleFacet],
    policy: FacetPolicy,
    label_chars: usize,
) -> CellComparison {
    let facets = facets
        .iter()
        .filter_map(|&facet| {
            let orig = original.facet(facet);
            if policy == FacetPolicy::OriginalTruthy
                && !orig.as_ref().map_or(false, FacetValue::is_truthy)
            {
                return None;
            }
            let gen = generated.and_then(|g| g.facet(facet));
            Some(FacetComparison {
                facet,
                matches: orig == gen,
                original: orig,
                generated: gen,
            })
        })
        .collect();

    CellComparison {
        reference,
        label: truncate_chars(&original.value, label_chars),
        generated_present: generated.is_some(),
        facets,
    }
}

fn listing(regions: &[String], limit: usize) -> Vec<String> {
    regions.iter().take(limit).cloned().collect()
}
