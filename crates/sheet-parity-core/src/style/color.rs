//! Color representation

use std::fmt;

/// Color as referenced by a style record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Automatic/default color
    #[default]
    Auto,

    /// ARGB color. Six-digit values are read with a zero alpha channel.
    Argb { a: u8, r: u8, g: u8, b: u8 },

    /// Theme color with tint
    Theme {
        /// Theme color index (0-9)
        index: u8,
        /// Tint value (-1.0 to 1.0, stored as i8 percentage)
        tint: i8,
    },

    /// Indexed color (legacy palette)
    Indexed(u8),
}

impl Color {
    /// Create an ARGB color
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a, r, g, b }
    }

    /// Create a theme color
    pub const fn theme(index: u8, tint: i8) -> Self {
        Color::Theme { index, tint }
    }

    /// Parse an `rgb` attribute ("FFFF0000" or "FF0000", optional '#')
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

        match hex.len() {
            6 => Some(Color::Argb {
                a: 0,
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
            }),
            8 => Some(Color::Argb {
                a: byte(0)?,
                r: byte(2)?,
                g: byte(4)?,
                b: byte(6)?,
            }),
            _ => None,
        }
    }

    /// Stable text code used in snapshots and reports
    ///
    /// ARGB colors render as 8 hex digits (`FFD9E1F2`); palette references keep
    /// their kind (`theme:4`, `theme:4:-25`, `indexed:64`, `auto`).
    pub fn code(&self) -> String {
        match self {
            Color::Auto => "auto".to_string(),
            Color::Argb { a, r, g, b } => format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
            Color::Theme { index, tint: 0 } => format!("theme:{}", index),
            Color::Theme { index, tint } => format!("theme:{}:{:+}", index, tint),
            Color::Indexed(i) => format!("indexed:{}", i),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}
