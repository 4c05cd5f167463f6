//! Error types for Bayesian A/B evaluation.

use thiserror::Error;

/// Result type alias for evaluation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the evaluation engine and its hosts.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // Input errors (20-29)
    #[error("invalid observation for variant '{variant}': {reason}")]
    InvalidObservation { variant: String, reason: String },

    #[error("unsupported model: '{0}' (expected \"conversion\", \"numeric, continuous\" or \"numeric, discrete\")")]
    UnsupportedModel(String),

    #[error("invalid input document: {0}")]
    InvalidInput(String),

    // Evaluation errors (30-39)
    #[error("uninitialized state: {0}")]
    UninitializedState(String),

    #[error("posterior sampling failed: {0}")]
    Sampling(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an [`Error::InvalidObservation`].
    pub fn invalid_observation(variant: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidObservation {
            variant: variant.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidConfig(_) => 11,
            Error::InvalidObservation { .. } => 20,
            Error::UnsupportedModel(_) => 21,
            Error::InvalidInput(_) => 22,
            Error::UninitializedState(_) => 30,
            Error::Sampling(_) => 31,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }
}
