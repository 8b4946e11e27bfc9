//! Style facets compared between cells

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sheet_parity_core::{HorizontalAlignment, VerticalAlignment};

use crate::display_float;

/// One attribute of a cell's presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleFacet {
    Bold,
    FontSize,
    HorizontalAlignment,
    VerticalAlignment,
    WrapText,
    FillColor,
    Border,
}

impl StyleFacet {
    /// Every facet, in report order
    pub const ALL: [StyleFacet; 7] = [
        StyleFacet::Bold,
        StyleFacet::FontSize,
        StyleFacet::HorizontalAlignment,
        StyleFacet::VerticalAlignment,
        StyleFacet::WrapText,
        StyleFacet::FillColor,
        StyleFacet::Border,
    ];

    /// Facets checked by the main report
    pub const REPORT_DEFAULT: [StyleFacet; 3] =
        [StyleFacet::Bold, StyleFacet::WrapText, StyleFacet::FillColor];

    /// Label used in text reports
    pub fn label(&self) -> &'static str {
        match self {
            StyleFacet::Bold => "Bold",
            StyleFacet::FontSize => "Font size",
            StyleFacet::HorizontalAlignment => "Align",
            StyleFacet::VerticalAlignment => "Vertical align",
            StyleFacet::WrapText => "Wrap text",
            StyleFacet::FillColor => "Fill",
            StyleFacet::Border => "Border",
        }
    }

    /// Name accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            StyleFacet::Bold => "bold",
            StyleFacet::FontSize => "font-size",
            StyleFacet::HorizontalAlignment => "horizontal",
            StyleFacet::VerticalAlignment => "vertical",
            StyleFacet::WrapText => "wrap",
            StyleFacet::FillColor => "fill",
            StyleFacet::Border => "border",
        }
    }
}

impl fmt::Display for StyleFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StyleFacet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Ok(match normalized.as_str() {
            "bold" => StyleFacet::Bold,
            "font-size" | "size" => StyleFacet::FontSize,
            "horizontal" | "align" | "alignment-horizontal" => StyleFacet::HorizontalAlignment,
            "vertical" | "alignment-vertical" => StyleFacet::VerticalAlignment,
            "wrap" | "wrap-text" | "alignment-wrap-text" => StyleFacet::WrapText,
            "fill" | "fill-color" => StyleFacet::FillColor,
            "border" => StyleFacet::Border,
            _ => {
                let known: Vec<&str> = StyleFacet::ALL.iter().map(StyleFacet::name).collect();
                return Err(format!(
                    "unknown style facet '{}' (expected one of: {})",
                    s,
                    known.join(", ")
                ));
            }
        })
    }
}

/// The value of one facet on one cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FacetValue {
    Flag(bool),
    Size(f64),
    Horizontal(HorizontalAlignment),
    Vertical(VerticalAlignment),
    Color(String),
}

impl FacetValue {
    /// Whether the value counts as intentional styling
    ///
    /// Flags count when set, sizes when non-zero, colors when non-empty and
    /// alignments always.
    pub fn is_truthy(&self) -> bool {
        match self {
            FacetValue::Flag(b) => *b,
            FacetValue::Size(size) => *size != 0.0,
            FacetValue::Horizontal(_) | FacetValue::Vertical(_) => true,
            FacetValue::Color(code) => !code.is_empty(),
        }
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetValue::Flag(true) => f.pad("True"),
            FacetValue::Flag(false) => f.pad("False"),
            FacetValue::Size(size) => f.pad(&display_float(*size)),
            FacetValue::Horizontal(h) => f.pad(h.as_str()),
            FacetValue::Vertical(v) => f.pad(v.as_str()),
            FacetValue::Color(code) => f.pad(code),
        }
    }
}
