//! # Error Types
//!
//! Structured error types for autocrate_core. Validation failures carry every
//! offending field at once so a caller can report the whole form in one pass.
//!
//! ## Example
//!
//! ```rust
//! use autocrate_core::errors::{CalcError, FieldViolation};
//!
//! let error = CalcError::validation_failed(vec![
//!     FieldViolation::out_of_range("product_weight", 20.0, 50.0, 10_000.0),
//! ]);
//! assert_eq!(error.error_code(), "VALIDATION_FAILED");
//! assert_eq!(error.violations().len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for autocrate_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// One out-of-range input field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldViolation {
    /// Input field name (snake_case, as serialized)
    pub field: String,
    /// The rejected value, formatted for display
    pub value: String,
    /// Inclusive lower bound
    pub min: f64,
    /// Inclusive upper bound
    pub max: f64,
    /// Human-readable message
    pub message: String,
}

impl FieldViolation {
    /// Build a violation for a value outside `[min, max]`.
    pub fn out_of_range(field: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        let field = field.into();
        let message = format!("{} must be between {} and {} (got {})", field, min, max, value);
        FieldViolation {
            field,
            value: value.to_string(),
            min,
            max,
            message,
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Structured error type for design operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// One or more inputs are outside their allowed range
    #[error("Input validation failed: {}", format_violations(.violations))]
    ValidationFailed { violations: Vec<FieldViolation> },

    /// A single input value is unusable (unparseable, wrong unit, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Job file schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl CalcError {
    /// Create a ValidationFailed error
    pub fn validation_failed(violations: Vec<FieldViolation>) -> Self {
        CalcError::ValidationFailed { violations }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Field violations carried by this error (empty for non-validation errors)
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            CalcError::ValidationFailed { violations } => violations,
            _ => &[],
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::ValidationFailed { .. } => "VALIDATION_FAILED",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
