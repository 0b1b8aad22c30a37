//! Line type table entry

use super::TableEntry;
use crate::types::Handle;

/// Line type element (dash, dot, space)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineTypeElement {
    /// Length of the element (positive = dash, negative = space, 0 = dot)
    pub length: f64,
}

impl LineTypeElement {
    pub fn dash(length: f64) -> Self {
        LineTypeElement { length: length.abs() }
    }

    pub fn space(length: f64) -> Self {
        LineTypeElement { length: -length.abs() }
    }

    pub fn dot() -> Self {
        LineTypeElement { length: 0.0 }
    }
}

/// A line type table entry
#[derive(Debug, Clone, PartialEq)]
pub struct LineType {
    pub handle: Handle,
    pub name: String,
    pub description: String,
    /// Pattern elements, empty for a solid line
    pub elements: Vec<LineTypeElement>,
}

impl LineType {
    pub fn new(name: impl Into<String>) -> Self {
        LineType {
            handle: Handle::NULL,
            name: name.into(),
            description: String::new(),
            elements: Vec::new(),
        }
    }

    /// Create the standard "Continuous" line type
    pub fn continuous() -> Self {
        LineType {
            description: "Solid line".to_string(),
            ..Self::new("Continuous")
        }
    }

    /// Create a dashed line type
    pub fn dashed() -> Self {
        let mut lt = LineType::new("Dashed");
        lt.description = "__ __ __ __ __ __".to_string();
        lt.elements = vec![LineTypeElement::dash(0.5), LineTypeElement::space(0.25)];
        lt
    }

    /// Sum of absolute element lengths
    pub fn pattern_length(&self) -> f64 {
        self.elements.iter().map(|e| e.length.abs()).sum()
    }

    pub fn is_continuous(&self) -> bool {
        self.elements.is_empty()
    }
}

impl TableEntry for LineType {
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
        matches!(self.name.as_str(), "Continuous" | "ByLayer" | "ByBlock")
    }
}
