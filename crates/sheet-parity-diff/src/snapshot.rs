//! Snapshot extraction
//!
//! A snapshot is the bounded, immutable record of one worksheet's layout and
//! sampled cell styles. Everything in it is derived from the worksheet at
//! extraction time; comparisons only read it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sheet_parity_core::{
    Cell, CellAddress, ColumnRef, HorizontalAlignment, VerticalAlignment, Workbook, Worksheet,
};

use crate::facet::{FacetValue, StyleFacet};
use crate::limits::SamplingLimits;
use crate::truncate_chars;

/// Snapshots of every worksheet of one document, in document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookSnapshot {
    /// Where the document came from (usually its path)
    pub source: String,
    pub sheets: Vec<SheetSnapshot>,
}

impl WorkbookSnapshot {
    /// Extract a snapshot of every worksheet
    pub fn extract<S: Into<String>>(
        source: S,
        workbook: &Workbook,
        limits: &SamplingLimits,
    ) -> Self {
        let source = source.into();
        let sheets: Vec<SheetSnapshot> = workbook
            .worksheets()
            .map(|ws| SheetSnapshot::extract(ws, limits))
            .collect();
        tracing::debug!(source = %source, sheets = sheets.len(), "extracted workbook snapshot");
        Self { source, sheets }
    }

    /// Sheet names in document order
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }
}

/// Used extent of a sheet (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub max_row: u32,
    pub max_column: u32,
}

/// Bounded structural record of one worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSnapshot {
    pub name: String,
    pub dimensions: Dimensions,
    /// Raw frozen-pane anchor, e.g. "B5"
    pub frozen_panes: Option<String>,
    /// Explicit widths only; columns without one are absent
    pub column_widths: BTreeMap<ColumnRef, f64>,
    /// Explicit heights keyed by 1-based row
    pub row_heights: BTreeMap<u32, f64>,
    pub merged_cells: Vec<String>,
    /// Non-empty cells of the style window, row-major
    pub sample_cells: BTreeMap<CellAddress, CellStyleSample>,
}

impl SheetSnapshot {
    /// Extract a snapshot from a worksheet
    pub fn extract(sheet: &Worksheet, limits: &SamplingLimits) -> Self {
        let max_row = sheet.max_row();
        let max_column = sheet.max_column();

        let mut column_widths = BTreeMap::new();
        for index in 0..limits.width_column_count(max_column) {
            let Ok(column) = ColumnRef::new(index) else {
                break;
            };
            if let Some(width) = sheet.column_width(index) {
                column_widths.insert(column, width);
            }
        }

        let row_heights = (1..=limits.height_row_count(max_row))
            .filter_map(|row| sheet.row_height(row - 1).map(|h| (row, h)))
            .collect();

        let (style_rows, style_columns) = limits.style_window(max_row, max_column);
        let mut sample_cells = BTreeMap::new();
        for row in 0..style_rows {
            for col in 0..style_columns {
                if let Some(cell) = sheet.cell_at(row, col).filter(|c| c.has_content()) {
                    sample_cells.insert(
                        CellAddress::new(row, col),
                        CellStyleSample::from_cell(cell, limits.value_chars),
                    );
                }
            }
        }

        tracing::debug!(
            sheet = sheet.name(),
            widths = column_widths.len(),
            cells = sample_cells.len(),
            "extracted sheet snapshot"
        );

        Self {
            name: sheet.name().to_string(),
            dimensions: Dimensions {
                max_row,
                max_column,
            },
            frozen_panes: sheet.frozen_pane().map(str::to_string),
            column_widths,
            row_heights,
            merged_cells: sheet
                .merged_regions()
                .iter()
                .map(|range| range.to_string())
                .collect(),
            sample_cells,
        }
    }
}

/// Style facets of one sampled cell; unset facets stay `None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellStyleSample {
    /// Display value, truncated
    pub value: String,
    pub font_bold: Option<bool>,
    pub font_size: Option<f64>,
    pub alignment_horizontal: Option<HorizontalAlignment>,
    pub alignment_vertical: Option<VerticalAlignment>,
    pub alignment_wrap_text: Option<bool>,
    pub fill_color: Option<String>,
    /// Any of the four edges carries a line
    pub border: bool,
}

impl CellStyleSample {
    /// Sample a cell, keeping at most `value_chars` characters of its value
    pub fn from_cell(cell: &Cell, value_chars: usize) -> Self {
        let style = cell.style.as_ref();
        Self {
            value: truncate_chars(&cell.value.to_string(), value_chars),
            font_bold: style.and_then(|s| s.bold()),
            font_size: style.and_then(|s| s.font_size()),
            alignment_horizontal: style.and_then(|s| s.horizontal()),
            alignment_vertical: style.and_then(|s| s.vertical()),
            alignment_wrap_text: style.and_then(|s| s.wrap_text()),
            fill_color: style.and_then(|s| s.fill_color()),
            border: style.map_or(false, |s| s.border.has_any()),
        }
    }

    /// A sample with only a value
    pub fn unstyled<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
            font_bold: None,
            font_size: None,
            alignment_horizontal: None,
            alignment_vertical: None,
            alignment_wrap_text: None,
            fill_color: None,
            border: false,
        }
    }

    /// Value of one facet
    pub fn facet(&self, facet: StyleFacet) -> Option<FacetValue> {
        match facet {
            StyleFacet::Bold => self.font_bold.map(FacetValue::Flag),
            StyleFacet::FontSize => self.font_size.map(FacetValue::Size),
            StyleFacet::HorizontalAlignment => self.alignment_horizontal.map(FacetValue::Horizontal),
            StyleFacet::VerticalAlignment => self.alignment_vertical.map(FacetValue::Vertical),
            StyleFacet::WrapText => self.alignment_wrap_text.map(FacetValue::Flag),
            StyleFacet::FillColor => self.fill_color.clone().map(FacetValue::Color),
            StyleFacet::Border => Some(FacetValue::Flag(self.border)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheet_parity_core::{
        Alignment, BorderLineStyle, BorderStyle, CellRange, CellStyle, Color, FillStyle,
        FontStyle,
    };

    fn header_style() -> CellStyle {
        CellStyle::new()
            .with_font(FontStyle::new().with_bold(true).with_size(12.0))
            .with_alignment(
                Alignment::new()
                    .with_horizontal(HorizontalAlignment::Center)
                    .with_wrap(true),
            )
            .with_fill(FillStyle::solid(Color::from_hex("FFD9E1F2").unwrap()))
            .with_border(BorderStyle::all(BorderLineStyle::Thin))
    }

    #[test]
    fn test_extracts_layout() {
        let mut sheet = Worksheet::new("Roster");
        sheet.set_value("A1", "Title").unwrap();
        sheet.set_value("M40", 1.0).unwrap();
        sheet.set_column_width(0, 25.75);
        sheet.set_column_width(1, 4.88);
        sheet.set_row_height(0, 30.0);
        sheet.merge_cells(CellRange::parse("A1:D1").unwrap());
        sheet.set_frozen_pane(Some("B5".into()));

        let snap = SheetSnapshot::extract(&sheet, &SamplingLimits::default());
        assert_eq!(snap.name, "Roster");
        assert_eq!(
            snap.dimensions,
            Dimensions {
                max_row: 40,
                max_column: 13
            }
        );
        assert_eq!(snap.frozen_panes.as_deref(), Some("B5"));
        assert_eq!(snap.column_widths.len(), 2);
        assert_eq!(snap.column_widths[&ColumnRef::parse("A").unwrap()], 25.75);
        assert_eq!(snap.row_heights.get(&1), Some(&30.0));
        assert_eq!(snap.merged_cells, vec!["A1:D1".to_string()]);
        assert_eq!(snap.sample_cells.len(), 1);
    }

    #[test]
    fn test_widths_stop_at_extent_and_cap() {
        let mut sheet = Worksheet::new("Data");
        sheet.set_value("C1", "x").unwrap();
        for col in 0..30 {
            sheet.set_column_width(col, 10.0);
        }
        let snap = SheetSnapshot::extract(&sheet, &SamplingLimits::default());
        // max column is C
        assert_eq!(snap.column_widths.len(), 3);

        sheet.set_value("AD1", "y").unwrap();
        let snap = SheetSnapshot::extract(&sheet, &SamplingLimits::default());
        assert_eq!(snap.column_widths.len(), 19);
        assert_eq!(snap.column_widths.keys().last().unwrap().letters(), "S");
    }

    #[test]
    fn test_style_window_skips_blank_and_outside_cells() {
        let mut sheet = Worksheet::new("Data");
        sheet.set_value("A1", "in").unwrap();
        sheet.set_value("I5", "corner").unwrap();
        sheet.set_value("J1", "right of window").unwrap();
        sheet.set_value("A6", "below window").unwrap();
        sheet.set_style("B1", header_style()).unwrap();
        sheet.set_value("C1", "").unwrap();

        let snap = SheetSnapshot::extract(&sheet, &SamplingLimits::default());
        let refs: Vec<String> = snap.sample_cells.keys().map(|a| a.to_string()).collect();
        assert_eq!(refs, vec!["A1", "I5"]);
    }

    #[test]
    fn test_zero_and_false_are_content() {
        let mut sheet = Worksheet::new("Data");
        sheet.set_value("A1", 0.0).unwrap();
        sheet.set_value("B1", false).unwrap();
        let snap = SheetSnapshot::extract(&sheet, &SamplingLimits::default());
        assert_eq!(snap.sample_cells.len(), 2);
        assert_eq!(snap.sample_cells[&CellAddress::new(0, 1)].value, "FALSE");
    }

    #[test]
    fn test_sample_records_every_facet() {
        let mut sheet = Worksheet::new("Data");
        sheet.set_value("A1", "Observation").unwrap();
        sheet.set_style("A1", header_style()).unwrap();

        let snap = SheetSnapshot::extract(&sheet, &SamplingLimits::default());
        let sample = &snap.sample_cells[&CellAddress::new(0, 0)];
        assert_eq!(
            sample,
            &CellStyleSample {
                value: "Observation".into(),
                font_bold: Some(true),
                font_size: Some(12.0),
                alignment_horizontal: Some(HorizontalAlignment::Center),
                alignment_vertical: None,
                alignment_wrap_text: Some(true),
                fill_color: Some("FFD9E1F2".into()),
                border: true,
            }
        );
    }

    #[test]
    fn test_unstyled_cell_has_unset_facets() {
        let cell = Cell::new("plain".into());
        let sample = CellStyleSample::from_cell(&cell, 50);
        assert_eq!(sample, CellStyleSample::unstyled("plain"));
        assert_eq!(sample.facet(StyleFacet::Bold), None);
        assert_eq!(sample.facet(StyleFacet::Border), Some(FacetValue::Flag(false)));
    }

    #[test]
    fn test_explicit_off_is_not_unset() {
        let cell = Cell::new("x".into()).with_style(
            CellStyle::new()
                .with_font(FontStyle::new().with_bold(false))
                .with_alignment(Alignment::new().with_wrap(false)),
        );
        let sample = CellStyleSample::from_cell(&cell, 50);
        assert_eq!(sample.font_bold, Some(false));
        assert_eq!(sample.alignment_wrap_text, Some(false));
        assert_eq!(sample.alignment_horizontal, None);
    }

    #[test]
    fn test_value_truncated() {
        let long = "x".repeat(80);
        let cell = Cell::new(long.as_str().into());
        assert_eq!(CellStyleSample::from_cell(&cell, 50).value.len(), 50);
    }

    #[test]
    fn test_workbook_snapshot_keeps_order_and_serializes() {
        let mut wb = Workbook::new();
        wb.add_worksheet(Worksheet::new("Zeta")).unwrap();
        wb.add_worksheet(Worksheet::new("Alpha")).unwrap();
        let snap = WorkbookSnapshot::extract("book.xlsx", &wb, &SamplingLimits::default());
        assert_eq!(snap.sheet_names(), vec!["Zeta", "Alpha"]);

        let json = serde_json::to_value(&snap.sheets[0]).unwrap();
        assert_eq!(json["frozen_panes"], serde_json::Value::Null);
        assert_eq!(json["dimensions"]["max_row"], 1);

        let back: WorkbookSnapshot =
            serde_json::from_str(&serde_json::to_string(&snap).unwrap()).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn test_snapshot_json_keys() {
        let mut sheet = Worksheet::new("Data");
        sheet.set_value("B2", "x").unwrap();
        sheet.set_column_width(1, 13.0);
        let snap = SheetSnapshot::extract(&sheet, &SamplingLimits::default());
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["column_widths"]["B"], 13.0);
        assert_eq!(json["sample_cells"]["B2"]["value"], "x");
        assert_eq!(json["sample_cells"]["B2"]["font_bold"], serde_json::Value::Null);
    }
}
