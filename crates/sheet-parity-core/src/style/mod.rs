//! Cell styling types
//!
//! Every facet a formatting comparison looks at is optional. `None` means the
//! file says nothing about the facet, which is different from an explicit
//! "off" (`Some(false)`).

mod alignment;
mod border;
mod color;
mod fill;
mod font;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{BorderLineStyle, BorderStyle};
pub use color::Color;
pub use fill::FillStyle;
pub use font::FontStyle;

/// Style resolved for a single cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellStyle {
    /// Font settings, if the style record references a font
    pub font: Option<FontStyle>,
    /// Alignment, if the style record carries one
    pub alignment: Option<Alignment>,
    /// Background fill
    pub fill: FillStyle,
    /// Cell borders
    pub border: BorderStyle,
}

impl CellStyle {
    /// Create an empty style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font
    pub fn with_font(mut self, font: FontStyle) -> Self {
        self.font = Some(font);
        self
    }

    /// Set the alignment
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Set the fill
    pub fn with_fill(mut self, fill: FillStyle) -> Self {
        self.fill = fill;
        self
    }

    /// Set the borders
    pub fn with_border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Bold flag (tri-state)
    pub fn bold(&self) -> Option<bool> {
        self.font.as_ref().and_then(|f| f.bold)
    }

    /// Font size in points
    pub fn font_size(&self) -> Option<f64> {
        self.font.as_ref().and_then(|f| f.size)
    }

    /// Horizontal alignment
    pub fn horizontal(&self) -> Option<HorizontalAlignment> {
        self.alignment.as_ref().and_then(|a| a.horizontal)
    }

    /// Vertical alignment
    pub fn vertical(&self) -> Option<VerticalAlignment> {
        self.alignment.as_ref().and_then(|a| a.vertical)
    }

    /// Wrap-text flag (tri-state)
    pub fn wrap_text(&self) -> Option<bool> {
        self.alignment.as_ref().and_then(|a| a.wrap_text)
    }

    /// Fill color code, if the fill paints a color
    pub fn fill_color(&self) -> Option<String> {
        self.fill.color().map(|c| c.code())
    }
}
