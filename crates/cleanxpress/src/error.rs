//! Custom error types for the cleaning pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Errors are
//! serializable so a shell can forward them as `{code, message}` pairs.

use crate::config::ConfigValidationError;
use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for profiling and cleaning.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Two columns ended up with the same name after formatting.
    #[error("Columns '{first}' and '{second}' both normalize to '{normalized}'")]
    DuplicateColumn {
        first: String,
        second: String,
        normalized: String,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// Type conversion failed.
    #[error("Failed to convert column '{column}' to {target_type}: {reason}")]
    TypeConversionFailed {
        column: String,
        target_type: String,
        reason: String,
    },

    /// Artifact writing failed.
    #[error("Failed to write report: {0}")]
    ReportGenerationFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for callers that branch on the failure kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::DuplicateColumn { .. } => "DUPLICATE_COLUMN",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::TypeConversionFailed { .. } => "TYPE_CONVERSION_FAILED",
            Self::ReportGenerationFailed(_) => "REPORT_GENERATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            CleaningError::ColumnNotFound("age".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
        let dup = CleaningError::DuplicateColumn {
            first: "Age".to_string(),
            second: " age".to_string(),
            normalized: "age".to_string(),
        };
        assert_eq!(dup.error_code(), "DUPLICATE_COLUMN");
    }

    #[test]
    fn test_polars_result_context() {
        let result: std::result::Result<(), polars::error::PolarsError> = Err(
            polars::error::PolarsError::ComputeError("bad row".into()),
        );

        let error = result.context("Reading input").unwrap_err();

        assert_eq!(error.error_code(), "POLARS_ERROR");
        assert!(error.to_string().starts_with("Reading input: "));
    }

    #[test]
    fn test_error_serialization() {
        let error = CleaningError::ColumnNotFound("Age".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_with_context() {
        let error =
            CleaningError::ColumnNotFound("test".to_string()).with_context("During formatting");
        assert!(error.to_string().contains("During formatting"));
        assert_eq!(error.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_config_error_converts() {
        let error: CleaningError =
            ConfigValidationError::EmptyConversionColumn.into();
        assert_eq!(error.error_code(), "INVALID_CONFIG");
    }
}
