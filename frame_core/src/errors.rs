//! # Error Types
//!
//! Structured error types for frame_core. The layout and optimization
//! functions never fail: bad geometry degrades into odd-looking output
//! instead. Errors only come from the validation boundary, where callers
//! check a wall or project before handing it to the engine.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::errors::{FrameError, FrameResult};
//!
//! fn validate_length(length_in: f64) -> FrameResult<()> {
//!     if length_in <= 0.0 {
//!         return Err(FrameError::InvalidInput {
//!             field: "length_in".to_string(),
//!             value: length_in.to_string(),
//!             reason: "Wall length must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for frame_core operations
pub type FrameResult<T> = Result<T, FrameError>;

/// Structured error type for validation and project handling.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum FrameError {
    /// An input value is invalid (out of range, inconsistent, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A wall points at a floor (or similar) that does not exist
    #[error("Unknown {kind} reference: {id}")]
    UnknownReference { kind: String, id: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl FrameError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        FrameError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownReference error
    pub fn unknown_reference(kind: impl Into<String>, id: impl Into<String>) -> Self {
        FrameError::UnknownReference {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            FrameError::InvalidInput { .. } => "INVALID_INPUT",
            FrameError::UnknownReference { .. } => "UNKNOWN_REFERENCE",
            FrameError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for FrameError {
    fn from(err: serde_json::Error) -> Self {
        FrameError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = FrameError::invalid_input("length_in", "-5.0", "Wall length must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: FrameError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            FrameError::invalid_input("height_in", "NaN", "Wall height must be a positive number").error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(
            FrameError::unknown_reference("floor", "abc").error_code(),
            "UNKNOWN_REFERENCE"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let frame_err: FrameError = err.into();
        assert_eq!(frame_err.error_code(), "SERIALIZATION_ERROR");
    }
}
