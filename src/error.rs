//! Error types for the entity model

use thiserror::Error;

/// Main error type for entity operations
///
/// Only caller mistakes surface here. Missing table records and other
/// recoverable lookups are resolved with a fallback value and logged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntityError {
    /// Index outside the valid range of a vertex or edge list
    #[error("Index {index} out of range (valid: 0..{len})")]
    InvalidIndex { index: usize, len: usize },

    /// Constructor or setter arguments that cannot describe valid geometry
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Property lookup by group/name failed
    #[error("Property not found: {group}.{name}")]
    PropertyNotFound { group: String, name: String },

    /// Attempt to write a property without a setter
    #[error("Property is read-only: {0}")]
    ReadOnlyProperty(String),

    /// Property value of the wrong kind passed to a setter
    #[error("Property {name} expects a {expected} value")]
    PropertyTypeMismatch { name: String, expected: &'static str },

    /// Table already holds an entry with the same (case-insensitive) name
    #[error("Entry '{0}' already exists in table")]
    DuplicateTableEntry(String),

    /// Entity registry has no variant with this type name
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for entity operations
pub type Result<T> = std::result::Result<T, EntityError>;

impl From<String> for EntityError {
    fn from(s: String) -> Self {
        EntityError::Custom(s)
    }
}

impl From<&str> for EntityError {
    fn from(s: &str) -> Self {
        EntityError::Custom(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EntityError::InvalidIndex { index: 4, len: 4 };
        assert_eq!(err.to_string(), "Index 4 out of range (valid: 0..4)");
    }

    #[test]
    fn test_property_error_display() {
        let err = EntityError::PropertyNotFound {
            group: "geometry".to_string(),
            name: "radius".to_string(),
        };
        assert!(err.to_string().contains("geometry.radius"));
    }

    #[test]
    fn test_string_conversion() {
        let err: EntityError = "boom".into();
        assert!(matches!(err, EntityError::Custom(_)));
    }
}
