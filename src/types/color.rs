//! Entity color with ByLayer/ByBlock indirection

use std::fmt;

/// Stored color of an entity or layer
///
/// The stored value may be an indirection that is only turned into a
/// concrete RGB value at resolution time (see [`crate::style`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Use the owning layer's color
    #[default]
    ByLayer,
    /// Use the owning block reference's color
    ByBlock,
    /// Explicit true color
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub const RED: Color = Color::from_rgb(255, 0, 0);
    pub const YELLOW: Color = Color::from_rgb(255, 255, 0);
    pub const GREEN: Color = Color::from_rgb(0, 255, 0);
    pub const CYAN: Color = Color::from_rgb(0, 255, 255);
    pub const BLUE: Color = Color::from_rgb(0, 0, 255);
    pub const MAGENTA: Color = Color::from_rgb(255, 0, 255);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value (high byte ignored)
    pub const fn from_rgb_value(value: u32) -> Self {
        Color::Rgb {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Packed `0xRRGGBB`, `None` for the indirections
    pub fn rgb_value(&self) -> Option<u32> {
        match self {
            Color::Rgb { r, g, b } => Some(((*r as u32) << 16) | ((*g as u32) << 8) | *b as u32),
            _ => None,
        }
    }

    pub fn is_by_layer(&self) -> bool {
        matches!(self, Color::ByLayer)
    }

    pub fn is_by_block(&self) -> bool {
        matches!(self, Color::ByBlock)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => write!(f, "ByLayer"),
            Color::ByBlock => write!(f, "ByBlock"),
            Color::Rgb { r, g, b } => write!(f, "RGB({}, {}, {})", r, g, b),
        }
    }
}
