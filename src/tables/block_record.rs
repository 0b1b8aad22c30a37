//! Block record table entry

use super::TableEntry;
use crate::types::Handle;

pub const MODEL_SPACE: &str = "*Model_Space";
pub const PAPER_SPACE: &str = "*Paper_Space";

/// A block record table entry
///
/// Entities refer to their block record through `owner_id`, so only
/// identity is kept here.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRecord {
    /// Unique handle for the block record table entry
    pub handle: Handle,
    /// Block name
    pub name: String,
    /// Layout handle (if this block is a layout)
    pub layout: Handle,
}

impl BlockRecord {
    pub fn new(name: impl Into<String>) -> Self {
        BlockRecord {
            handle: Handle::NULL,
            name: name.into(),
            layout: Handle::NULL,
        }
    }

    pub fn model_space() -> Self {
        Self::new(MODEL_SPACE)
    }

    pub fn paper_space() -> Self {
        Self::new(PAPER_SPACE)
    }

    pub fn is_model_space(&self) -> bool {
        self.name.eq_ignore_ascii_case(MODEL_SPACE)
    }

    /// Paper space layouts are numbered, e.g. `*Paper_Space0`
    pub fn is_paper_space(&self) -> bool {
        self.name.to_ascii_lowercase().starts_with("*paper_space")
    }
}

impl TableEntry for BlockRecord {
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
        self.is_model_space() || self.is_paper_space()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_space() {
        let block = BlockRecord::model_space();
        assert!(block.is_model_space());
        assert!(block.is_standard());
        assert!(!block.is_paper_space());
    }

    #[test]
    fn test_numbered_paper_space() {
        let block = BlockRecord::new("*Paper_Space1");
        assert!(block.is_paper_space());
        assert!(!block.is_model_space());
    }
}
