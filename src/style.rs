//! Style resolution
//!
//! Entities store color and linetype as possibly-indirect values
//! ([`Color::ByLayer`], [`LineTypeRef::ByBlock`], ...). The functions here
//! turn them into concrete values at draw time. They are pure: everything
//! they need comes from the [`DrawingContext`] and the optional
//! [`BlockStyleContext`], so they can be tested without an entity.
//!
//! Missing table entries never fail resolution. They are logged and a
//! fallback is returned.

use crate::database::DrawingContext;
use crate::tables::LineTypeElement;
use crate::types::{Color, LineTypeRef};
use tracing::{debug, warn};

/// Color returned when no resolution path yields a value
pub const FALLBACK_RGB: u32 = 0xFF_FF_FF;

/// Linetype name used when nothing more specific applies
pub const CONTINUOUS: &str = "Continuous";

/// Where a resolved linetype came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyleKind {
    #[default]
    ByLayer,
    ByBlock,
    UserSpecified,
}

impl LineStyleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineStyleKind::ByLayer => "ByLayer",
            LineStyleKind::ByBlock => "ByBlock",
            LineStyleKind::UserSpecified => "UserSpecified",
        }
    }
}

/// Resolved linetype handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub kind: LineStyleKind,
    pub name: String,
    pub description: String,
    /// Dash pattern, empty for a solid line or a placeholder record
    pub pattern: Vec<LineTypeElement>,
}

impl LineStyle {
    /// Record carrying only a name, used when the table has no entry
    pub fn placeholder(kind: LineStyleKind, name: impl Into<String>) -> Self {
        LineStyle {
            kind,
            name: name.into(),
            description: String::new(),
            pattern: Vec::new(),
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle::placeholder(LineStyleKind::ByLayer, CONTINUOUS)
    }
}

/// Style of the block reference an entity is drawn through
///
/// ByBlock values are only meaningful inside a block reference. Callers
/// drawing block contents supply this so ByBlock entities pick up the
/// reference's resolved style; without it ByBlock falls back to the
/// drawing defaults.
pub trait BlockStyleContext {
    /// Resolved color of the block reference, if it has one
    fn block_rgb_color(&self) -> Option<u32>;

    /// Resolved linetype of the block reference, if it has one
    fn block_line_style(&self) -> Option<LineStyle>;
}

/// Resolve a stored color to `0xRRGGBB`
///
/// - explicit colors are returned as-is
/// - ByLayer uses the layer's concrete color, else the CECOLOR default
/// - ByBlock uses the block context when given, else the CECOLOR default
///
/// The CECOLOR default is itself usually ByLayer; in that case the
/// result is [`FALLBACK_RGB`].
pub fn resolve_color(
    color: Color,
    layer_name: &str,
    ctx: &dyn DrawingContext,
    block: Option<&dyn BlockStyleContext>,
) -> u32 {
    let default_rgb = || ctx.defaults().current_color.rgb_value().unwrap_or(FALLBACK_RGB);
    match color {
        Color::Rgb { .. } => color.rgb_value().unwrap_or(FALLBACK_RGB),
        Color::ByLayer => match ctx.layer(layer_name) {
            Some(layer) => layer.color.rgb_value().unwrap_or_else(default_rgb),
            None => {
                warn!(layer = layer_name, "layer not found, using default color");
                default_rgb()
            }
        },
        Color::ByBlock => block
            .and_then(|b| b.block_rgb_color())
            .unwrap_or_else(default_rgb),
    }
}

/// Resolve a stored linetype reference
///
/// The result always carries a name. When that name is missing from the
/// linetype table a placeholder record is returned.
pub fn resolve_line_style(
    line_type: &LineTypeRef,
    layer_name: &str,
    ctx: &dyn DrawingContext,
    block: Option<&dyn BlockStyleContext>,
) -> LineStyle {
    let (kind, name) = match line_type {
        LineTypeRef::ByLayer => {
            let name = match ctx.layer(layer_name) {
                Some(layer) if !layer.line_type.is_empty() => layer.line_type.clone(),
                Some(_) => CONTINUOUS.to_string(),
                None => {
                    warn!(layer = layer_name, "layer not found, using continuous linetype");
                    CONTINUOUS.to_string()
                }
            };
            (LineStyleKind::ByLayer, name)
        }
        LineTypeRef::ByBlock => {
            if let Some(mut style) = block.and_then(|b| b.block_line_style()) {
                style.kind = LineStyleKind::ByBlock;
                return style;
            }
            (LineStyleKind::ByBlock, CONTINUOUS.to_string())
        }
        LineTypeRef::Named(name) => (LineStyleKind::UserSpecified, name.clone()),
    };

    match ctx.line_type(&name) {
        Some(record) => LineStyle {
            kind,
            name: record.name.clone(),
            description: record.description.clone(),
            pattern: record.elements.clone(),
        },
        None => {
            debug!(line_type = %name, "linetype not in table, using placeholder");
            LineStyle::placeholder(kind, name)
        }
    }
}
