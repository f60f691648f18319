//! Error types for schema derivation.
//!
//! Declaring metadata never fails on its own. The only failure path is the
//! schema generator, whose errors are passed back to the caller unchanged.

use thiserror::Error;

/// Errors raised while deriving a schema fragment from a type.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The generator could not express the type as a schema.
    #[error("failed to generate schema for `{type_name}`: {reason}")]
    Generation {
        /// Rust type name the schema was requested for.
        type_name: String,
        /// Why generation failed.
        reason: String,
    },

    /// The generated schema could not be converted to JSON.
    #[error("failed to serialize schema: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SchemaError {
    /// Create a new generation error.
    pub fn generation(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Generation {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for operations that derive a schema.
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error() {
        let err = SchemaError::generation("my_app::Node", "recursive type");
        assert!(err.to_string().contains("my_app::Node"));
        assert!(err.to_string().contains("recursive type"));
    }

    #[test]
    fn test_serialization_error() {
        let err: SchemaError = serde_json::from_str::<String>("invalid")
            .unwrap_err()
            .into();
        assert!(matches!(err, SchemaError::Serialization(_)));
        assert!(err.to_string().contains("serialize"));
    }
}
