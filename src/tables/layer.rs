//! Layer table entry

use super::TableEntry;
use crate::types::{Color, Handle, LineWeight};

/// Layer state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerFlags {
    /// Layer is frozen
    pub frozen: bool,
    /// Layer is locked
    pub locked: bool,
    /// Layer is off (invisible)
    pub off: bool,
}

/// A layer table entry
///
/// `color` is normally a concrete RGB value. A layer holding an
/// indirection has no color of its own and ByLayer resolution falls
/// through to the drawing default.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Unique handle
    pub handle: Handle,
    /// Layer name
    pub name: String,
    pub flags: LayerFlags,
    /// Layer color
    pub color: Color,
    /// Line type name
    pub line_type: String,
    pub line_weight: LineWeight,
}

impl Layer {
    /// Create a white, continuous layer
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            handle: Handle::NULL,
            name: name.into(),
            flags: LayerFlags::default(),
            color: Color::WHITE,
            line_type: "Continuous".to_string(),
            line_weight: LineWeight::Default,
        }
    }

    /// Create the standard "0" layer
    pub fn layer_0() -> Self {
        Self::new("0")
    }

    /// Create a layer with a specific color
    pub fn with_color(name: impl Into<String>, color: Color) -> Self {
        Layer {
            color,
            ..Self::new(name)
        }
    }

    /// Create a layer with a specific line type
    pub fn with_line_type(name: impl Into<String>, line_type: impl Into<String>) -> Self {
        Layer {
            line_type: line_type.into(),
            ..Self::new(name)
        }
    }

    pub fn freeze(&mut self) {
        self.flags.frozen = true;
    }

    pub fn thaw(&mut self) {
        self.flags.frozen = false;
    }

    pub fn is_frozen(&self) -> bool {
        self.flags.frozen
    }

    pub fn turn_off(&mut self) {
        self.flags.off = true;
    }

    pub fn turn_on(&mut self) {
        self.flags.off = false;
    }

    /// Check if the layer is visible (not off and not frozen)
    pub fn is_visible(&self) -> bool {
        !self.flags.off && !self.flags.frozen
    }
}

impl TableEntry for Layer {
    fn handle(&self) -> Handle {
        self.handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_standard(&self) -> bool {
        self.name == "0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_defaults() {
        let layer = Layer::layer_0();
        assert!(layer.is_standard());
        assert_eq!(layer.color, Color::WHITE);
        assert_eq!(layer.line_type, "Continuous");
    }

    #[test]
    fn test_layer_visibility() {
        let mut layer = Layer::new("Dims");
        assert!(layer.is_visible());
        layer.freeze();
        assert!(!layer.is_visible());
        layer.thaw();
        layer.turn_off();
        assert!(!layer.is_visible());
        layer.turn_on();
        assert!(layer.is_visible());
    }
}
