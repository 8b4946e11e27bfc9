//! Font style types

/// Font settings as read from a style record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontStyle {
    /// Font family name (e.g., "Calibri", "Arial")
    pub name: Option<String>,
    /// Font size in points
    pub size: Option<f64>,
    /// Bold; `None` when the font record has no bold element
    pub bold: Option<bool>,
}

impl FontStyle {
    /// Create a font with no facets set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set font size
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }
}
