//! Linetype reference stored on an entity

use std::fmt;

/// Name of the linetype applied to an entity, or an indirection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LineTypeRef {
    /// Use the owning layer's linetype
    #[default]
    ByLayer,
    /// Use the owning block reference's linetype
    ByBlock,
    /// Explicit linetype table record name
    Named(String),
}

impl LineTypeRef {
    /// Parse the stored name form; `ByLayer`/`ByBlock` match case-insensitively
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("ByLayer") {
            LineTypeRef::ByLayer
        } else if name.eq_ignore_ascii_case("ByBlock") {
            LineTypeRef::ByBlock
        } else {
            LineTypeRef::Named(name.to_string())
        }
    }

    /// Stored name form
    pub fn name(&self) -> &str {
        match self {
            LineTypeRef::ByLayer => "ByLayer",
            LineTypeRef::ByBlock => "ByBlock",
            LineTypeRef::Named(name) => name,
        }
    }
}

impl fmt::Display for LineTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(LineTypeRef::from_name("BYLAYER"), LineTypeRef::ByLayer);
        assert_eq!(LineTypeRef::from_name("byblock"), LineTypeRef::ByBlock);
        assert_eq!(
            LineTypeRef::from_name("DASHED"),
            LineTypeRef::Named("DASHED".to_string())
        );
    }

    #[test]
    fn test_name_roundtrip() {
        let named = LineTypeRef::Named("Center".to_string());
        assert_eq!(LineTypeRef::from_name(named.name()), named);
    }
}
