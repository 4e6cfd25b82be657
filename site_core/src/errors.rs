//! # Error Types
//!
//! Structured error types for site_core. Analyzers themselves are total over
//! validated input; every error here is raised either while validating facts,
//! while looking up a subject, or when a stage is run before its prerequisites.
//!
//! ## Example
//!
//! ```rust
//! use site_core::errors::{AnalysisError, AnalysisResult};
//!
//! fn validate_area(area_m2: f64) -> AnalysisResult<()> {
//!     if area_m2 <= 0.0 {
//!         return Err(AnalysisError::InvalidInput {
//!             field: "built_up_area_m2".to_string(),
//!             value: area_m2.to_string(),
//!             reason: "Built-up area must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for site_core operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Structured error type for analysis operations.
///
/// `NotFound` and `PreconditionFailed` are deliberately separate so a caller
/// can decide whether to run the missing stage or surface it to the user.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum AnalysisError {
    /// Caller-supplied facts violate a documented constraint
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The referenced building subject does not exist
    #[error("Subject not found: {subject}")]
    NotFound { subject: String },

    /// A stage was invoked before the composite it depends on exists
    #[error("Precondition failed for {stage}: {missing} has not been run")]
    PreconditionFailed { stage: String, missing: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AnalysisError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        AnalysisError::MissingField {
            field: field.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(subject: impl Into<String>) -> Self {
        AnalysisError::NotFound {
            subject: subject.into(),
        }
    }

    /// Create a PreconditionFailed error
    pub fn precondition_failed(stage: impl Into<String>, missing: impl Into<String>) -> Self {
        AnalysisError::PreconditionFailed {
            stage: stage.into(),
            missing: missing.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error means a prerequisite stage is missing
    pub fn is_precondition(&self) -> bool {
        matches!(self, AnalysisError::PreconditionFailed { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AnalysisError::InvalidInput { .. } => "INVALID_INPUT",
            AnalysisError::MissingField { .. } => "MISSING_FIELD",
            AnalysisError::NotFound { .. } => "NOT_FOUND",
            AnalysisError::PreconditionFailed { .. } => "PRECONDITION_FAILED",
            AnalysisError::FileError { .. } => "FILE_ERROR",
            AnalysisError::SerializationError { .. } => "SERIALIZATION_ERROR",
            AnalysisError::VersionMismatch { .. } => "VERSION_MISMATCH",
            AnalysisError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(e: serde_json::Error) -> Self {
        AnalysisError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = AnalysisError::invalid_input("built_up_area_m2", "-5", "Built-up area must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: AnalysisError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AnalysisError::missing_field("wind").error_code(), "MISSING_FIELD");
        assert_eq!(AnalysisError::not_found("abc").error_code(), "NOT_FOUND");
        assert_eq!(
            AnalysisError::precondition_failed("final report", "disaster analysis").error_code(),
            "PRECONDITION_FAILED"
        );
    }

    #[test]
    fn test_precondition_is_distinct_from_not_found() {
        assert!(AnalysisError::precondition_failed("final report", "orientation analysis").is_precondition());
        assert!(!AnalysisError::not_found("abc").is_precondition());
    }

    #[test]
    fn test_error_display() {
        let error = AnalysisError::precondition_failed("final report", "disaster analysis");
        assert_eq!(
            error.to_string(),
            "Precondition failed for final report: disaster analysis has not been run"
        );
    }
}
