//! Border style types

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderLineStyle {
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

impl BorderLineStyle {
    /// Parse the OOXML `style` attribute; "none" and unknown values yield `None`
    pub fn from_xlsx(s: &str) -> Option<Self> {
        Some(match s {
            "thin" => Self::Thin,
            "medium" => Self::Medium,
            "thick" => Self::Thick,
            "dashed" => Self::Dashed,
            "dotted" => Self::Dotted,
            "double" => Self::Double,
            "hair" => Self::Hair,
            "mediumDashed" => Self::MediumDashed,
            "dashDot" => Self::DashDot,
            "mediumDashDot" => Self::MediumDashDot,
            "dashDotDot" => Self::DashDotDot,
            "mediumDashDotDot" => Self::MediumDashDotDot,
            "slantDashDot" => Self::SlantDashDot,
            _ => return None,
        })
    }
}

/// The four outer edges of a cell. Diagonals are not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderStyle {
    pub left: Option<BorderLineStyle>,
    pub right: Option<BorderLineStyle>,
    pub top: Option<BorderLineStyle>,
    pub bottom: Option<BorderLineStyle>,
}

impl BorderStyle {
    /// Create a border style with no edges
    pub fn new() -> Self {
        Self::default()
    }

    /// Same line on all four edges
    pub fn all(style: BorderLineStyle) -> Self {
        Self {
            left: Some(style),
            right: Some(style),
            top: Some(style),
            bottom: Some(style),
        }
    }

    /// Set one edge by its OOXML element name (`left`, `right`, `top`, `bottom`)
    ///
    /// Returns `false` for element names that are not tracked edges.
    pub fn set_edge(&mut self, edge: &str, style: Option<BorderLineStyle>) -> bool {
        match edge {
            "left" => self.left = style,
            "right" => self.right = style,
            "top" => self.top = style,
            "bottom" => self.bottom = style,
            _ => return false,
        }
        true
    }

    /// True when any outer edge is drawn
    pub fn has_any(&self) -> bool {
        self.left.is_some() || self.right.is_some() || self.top.is_some() || self.bottom.is_some()
    }
}
