//! Error types for schema conversion.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, machine-readable error codes.
///
/// Variant names and their serialized `snake_case` strings are part of the
/// public API and must not change across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorCode {
    /// The node's variant has no Convex representation.
    UnsupportedVariant,
    /// A record's key type does not lower to strings or ids.
    InvalidRecordKey,
    /// A literal node declares no values.
    MalformedLiteral,
    /// An enum, union or tuple would lower to a union with no members.
    EmptyUnion,
    /// A lazy node re-entered itself while being converted.
    CyclicSchema,
    /// Maximum traversal depth exceeded.
    RecursionDepthExceeded,
    /// A table definition did not lower to an object validator.
    NotAnObject,
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Unsupported Zod type \"{tag}\" for conversion to Convex")]
    UnsupportedVariant { tag: String },

    #[error("Record keys must be strings or ids: {kind}")]
    InvalidRecordKey { kind: String },

    #[error("ZodLiteral must have at least one value")]
    MalformedLiteral,

    #[error("Cannot convert an empty Zod {tag} to a Convex union")]
    EmptyUnion { tag: String },

    #[error("Cyclic lazy schema at {path}")]
    CyclicSchema { path: String },

    #[error("Recursion depth exceeded at {path} (max: {max_depth})")]
    RecursionDepthExceeded { path: String, max_depth: usize },

    #[error("Table definitions must be objects: {kind}")]
    NotAnObject { kind: String },
}

impl ConvertError {
    /// The stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConvertError::UnsupportedVariant { .. } => ErrorCode::UnsupportedVariant,
            ConvertError::InvalidRecordKey { .. } => ErrorCode::InvalidRecordKey,
            ConvertError::MalformedLiteral => ErrorCode::MalformedLiteral,
            ConvertError::EmptyUnion { .. } => ErrorCode::EmptyUnion,
            ConvertError::CyclicSchema { .. } => ErrorCode::CyclicSchema,
            ConvertError::RecursionDepthExceeded { .. } => ErrorCode::RecursionDepthExceeded,
            ConvertError::NotAnObject { .. } => ErrorCode::NotAnObject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_messages_match_reference_text() {
        let err = ConvertError::UnsupportedVariant {
            tag: "date".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported Zod type \"date\" for conversion to Convex"
        );

        let err = ConvertError::InvalidRecordKey {
            kind: "float64".to_string(),
        };
        assert_eq!(err.to_string(), "Record keys must be strings or ids: float64");

        assert_eq!(
            ConvertError::MalformedLiteral.to_string(),
            "ZodLiteral must have at least one value"
        );
    }

    #[test]
    fn test_error_code_serializes_snake_case() {
        let err = ConvertError::RecursionDepthExceeded {
            path: "#/innerType".to_string(),
            max_depth: 4,
        };
        assert_eq!(err.code(), ErrorCode::RecursionDepthExceeded);
        let json = serde_json::to_string(&err.code()).unwrap();
        assert_eq!(json, "\"recursion_depth_exceeded\"");
    }
}
