//! Line weight representation for entities

use std::fmt;

/// Line weight of an entity
///
/// Explicit weights are stored in 1/100 mm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LineWeight {
    /// Use the layer's line weight
    #[default]
    ByLayer,
    /// Use the block's line weight
    ByBlock,
    /// Drawing default line weight
    Default,
    /// Specific line weight in 1/100 mm (0..=211)
    Value(i16),
}

impl LineWeight {
    /// Decode the raw DXF/DWG value (-1 ByLayer, -2 ByBlock, -3 Default)
    pub fn from_value(value: i16) -> Self {
        match value {
            -1 => LineWeight::ByLayer,
            -2 => LineWeight::ByBlock,
            -3 => LineWeight::Default,
            v => LineWeight::Value(v.clamp(0, 211)),
        }
    }

    /// Raw value as stored in drawing files
    pub fn value(&self) -> i16 {
        match self {
            LineWeight::ByLayer => -1,
            LineWeight::ByBlock => -2,
            LineWeight::Default => -3,
            LineWeight::Value(v) => *v,
        }
    }

    /// Weight in millimeters, `None` for the indirections
    pub fn millimeters(&self) -> Option<f64> {
        match self {
            LineWeight::Value(v) => Some(*v as f64 / 100.0),
            _ => None,
        }
    }

    pub const W0_00: LineWeight = LineWeight::Value(0);
    pub const W0_25: LineWeight = LineWeight::Value(25);
    pub const W0_50: LineWeight = LineWeight::Value(50);
    pub const W1_00: LineWeight = LineWeight::Value(100);
    pub const W2_11: LineWeight = LineWeight::Value(211);
}

impl fmt::Display for LineWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineWeight::ByLayer => write!(f, "ByLayer"),
            LineWeight::ByBlock => write!(f, "ByBlock"),
            LineWeight::Default => write!(f, "Default"),
            LineWeight::Value(v) => write!(f, "{:.2}mm", *v as f64 / 100.0),
        }
    }
}
