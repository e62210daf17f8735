//! Error types for Lexis.
//!
//! This module defines a unified error enum covering configuration, I/O,
//! document processing, snapshot restore and serialization failures.

use thiserror::Error;

/// Unified error type for Lexis.
///
/// All fallible functions return `Result<T, AppError>`.
/// A query that matches nothing is not an error: it yields an empty result.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raw text was empty or produced nothing indexable
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Chunking was requested with a size/overlap pair that cannot advance
    #[error("Invalid chunk configuration: {0}")]
    InvalidChunkConfig(String),

    /// A snapshot could not be restored; the active corpus is unchanged
    #[error("Snapshot import rejected: {0}")]
    ImportValidation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Short, stable name of the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::EmptyInput(_) => "empty_input",
            AppError::InvalidChunkConfig(_) => "unsupported_operation",
            AppError::ImportValidation(_) => "import_validation",
            AppError::Serialization(_) => "serialization",
            AppError::Other(_) => "other",
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AppError::EmptyInput("x".into()).kind(), "empty_input");
        assert_eq!(
            AppError::InvalidChunkConfig("x".into()).kind(),
            "unsupported_operation"
        );
        assert_eq!(
            AppError::ImportValidation("x".into()).kind(),
            "import_validation"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Serialization(_)));
    }
}
