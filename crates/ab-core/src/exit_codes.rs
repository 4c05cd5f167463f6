//! Exit codes for the ab-core CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.

use ab_common::Error;

/// Exit codes for ab-core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Evaluation finished and a leader was found (or command succeeded)
    Clean = 0,

    /// Evaluation finished but no variant exceeded the threshold
    NoLeader = 1,

    /// Configuration error
    ConfigError = 10,

    /// Invalid observations or unsupported model
    InputError = 12,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config(_) | Error::InvalidConfig(_) => ExitCode::ConfigError,
            Error::InvalidObservation { .. }
            | Error::UnsupportedModel(_)
            | Error::InvalidInput(_) => ExitCode::InputError,
            Error::Io(_) | Error::Json(_) => ExitCode::IoError,
            Error::UninitializedState(_) | Error::Sampling(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_outcomes_are_below_error_range() {
        assert_eq!(ExitCode::Clean.as_i32(), 0);
        assert_eq!(ExitCode::NoLeader.as_i32(), 1);
    }

    #[test]
    fn errors_map_to_codes() {
        let code = ExitCode::from(&Error::UnsupportedModel("x".into()));
        assert_eq!(code.as_i32(), 12);
        let code = ExitCode::from(&Error::InvalidConfig("x".into()));
        assert_eq!(i32::from(code), 10);
        let code = ExitCode::from(&Error::InvalidInput("x".into()));
        assert_eq!(code, ExitCode::InputError);
    }
}
