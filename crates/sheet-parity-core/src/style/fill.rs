//! Fill/background style types

use super::Color;

/// Fill style for cell background
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FillStyle {
    /// No fill (transparent)
    #[default]
    None,

    /// Solid fill; the color is absent when the record names none
    Solid { color: Option<Color> },

    /// Any other pattern fill, keyed by its OOXML pattern name
    Pattern {
        pattern: String,
        foreground: Option<Color>,
        background: Option<Color>,
    },

    /// Gradient fill (stops are not tracked)
    Gradient,
}

impl FillStyle {
    /// Create a solid fill with the given color
    pub fn solid(color: Color) -> Self {
        FillStyle::Solid { color: Some(color) }
    }

    /// Check if this is a "no fill"
    pub fn is_none(&self) -> bool {
        matches!(self, FillStyle::None)
    }

    /// The color a formatting review reports for this fill: the pattern's
    /// foreground (start) color
    pub fn color(&self) -> Option<Color> {
        match self {
            FillStyle::Solid { color } => *color,
            FillStyle::Pattern { foreground, .. } => *foreground,
            FillStyle::None | FillStyle::Gradient => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reported_color() {
        assert_eq!(FillStyle::None.color(), None);
        assert_eq!(FillStyle::Gradient.color(), None);
        assert_eq!(
            FillStyle::solid(Color::Indexed(5)).color(),
            Some(Color::Indexed(5))
        );
        let gray = FillStyle::Pattern {
            pattern: "gray125".into(),
            foreground: None,
            background: None,
        };
        assert_eq!(gray.color(), None);
    }
}
