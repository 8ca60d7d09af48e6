//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Command line usage error.
    #[error("Usage error: {0}")]
    Usage(String),

    /// Input file could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// Input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input was parsed but violates the data contract.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Configuration(_) => 3,
            Self::Io(_) => 4,
            Self::Parse(_) | Self::Validation(_) => 5,
            Self::NotFound(_) => 6,
        }
    }

    /// Returns a stable error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Usage(_) => "USAGE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Parse(_) => "PARSE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::Usage(String::new()).exit_code(), 2);
        assert_eq!(AppError::Configuration(String::new()).exit_code(), 3);
        assert_eq!(AppError::Io(String::new()).exit_code(), 4);
        assert_eq!(AppError::Parse(String::new()).exit_code(), 5);
        assert_eq!(AppError::Validation(String::new()).exit_code(), 5);
        assert_eq!(AppError::NotFound(String::new()).exit_code(), 6);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Configuration(String::new()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(AppError::Usage(String::new()).error_code(), "USAGE_ERROR");
        assert_eq!(AppError::Io(String::new()).error_code(), "IO_ERROR");
        assert_eq!(AppError::Parse(String::new()).error_code(), "PARSE_ERROR");
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Configuration("msg".into()).to_string(),
            "Configuration error: msg"
        );
        assert_eq!(AppError::Usage("msg".into()).to_string(), "Usage error: msg");
        assert_eq!(AppError::Io("msg".into()).to_string(), "I/O error: msg");
        assert_eq!(AppError::Parse("msg".into()).to_string(), "Parse error: msg");
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(AppError::NotFound("msg".into()).to_string(), "Not found: msg");
    }

    #[test]
    fn test_from_io_error() {
        let err: AppError = std::io::Error::other("disk gone").into();
        assert!(matches!(err, AppError::Io(ref msg) if msg == "disk gone"));
    }
}
