//! Entity transparency

use std::fmt;

/// Transparency of an entity
///
/// Explicit values are alpha bytes where 0 is fully opaque and 255 fully
/// transparent. The default is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transparency {
    /// Use the layer's transparency
    ByLayer,
    /// Use the block's transparency
    ByBlock,
    /// Explicit alpha (0 = opaque, 255 = transparent)
    Alpha(u8),
}

impl Transparency {
    pub const OPAQUE: Transparency = Transparency::Alpha(0);
    pub const TRANSPARENT: Transparency = Transparency::Alpha(255);

    /// Build from a 0..1 fraction (clamped), 0 = opaque
    pub fn from_percent(percent: f64) -> Self {
        Transparency::Alpha((percent.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Fraction 0..1 for explicit values, `None` for the indirections
    pub fn as_percent(&self) -> Option<f64> {
        match self {
            Transparency::Alpha(alpha) => Some(*alpha as f64 / 255.0),
            _ => None,
        }
    }

    /// Decode the DWG 32-bit form (type byte 0 ByLayer, 1 ByBlock, 3 explicit)
    pub fn from_alpha_value(value: u32) -> Self {
        match (value >> 24) as u8 {
            0 => Transparency::ByLayer,
            1 => Transparency::ByBlock,
            3 => Transparency::Alpha((value & 0xFF) as u8),
            _ => Transparency::OPAQUE,
        }
    }

    /// Encode into the DWG 32-bit form
    pub fn to_alpha_value(&self) -> u32 {
        match self {
            Transparency::ByLayer => 0,
            Transparency::ByBlock => 1 << 24,
            Transparency::Alpha(alpha) => (3 << 24) | *alpha as u32,
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, Transparency::Alpha(0))
    }
}

impl Default for Transparency {
    fn default() -> Self {
        Transparency::OPAQUE
    }
}

impl fmt::Display for Transparency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transparency::ByLayer => write!(f, "ByLayer"),
            Transparency::ByBlock => write!(f, "ByBlock"),
            Transparency::Alpha(alpha) => write!(f, "{:.1}%", *alpha as f64 / 255.0 * 100.0),
        }
    }
}
