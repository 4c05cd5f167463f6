//! Configuration validation errors.

use thiserror::Error;

/// Result alias for loading and validating configuration.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reasons a configuration could not be loaded or accepted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// True when the file existed but its contents were rejected.
    pub fn is_semantic(&self) -> bool {
        matches!(self, ValidationError::InvalidValue { .. })
    }
}
