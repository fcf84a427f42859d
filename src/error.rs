//! Error types for mp3snip.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnipError {
    // Argument errors
    #[error("Missing {what}")]
    MissingArgument { what: String },

    #[error("Invalid duration for {flag}: {message}")]
    InvalidDuration { flag: String, message: String },

    // Configuration errors
    #[error("Cannot read configuration {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // File errors
    #[error("Cannot open input {}: {source}", path.display())]
    OpenInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot create output {}: {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    // Stream errors
    #[error("Read failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("Write failed: {0}")]
    Write(#[source] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

impl SnipError {
    pub(crate) fn missing(what: &str) -> Self {
        Self::MissingArgument {
            what: what.to_string(),
        }
    }

    /// True for failures that happen before any file is touched.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument { .. } | Self::InvalidDuration { .. }
        )
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SnipError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_missing_argument_display() {
        let error = SnipError::missing("start time flag");
        assert_eq!(error.to_string(), "Missing start time flag");
    }

    #[test]
    fn test_invalid_duration_display() {
        let error = SnipError::InvalidDuration {
            flag: "--start".to_string(),
            message: "unknown time unit \"q\"".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid duration for --start: unknown time unit \"q\""
        );
    }

    #[test]
    fn test_config_invalid_value_display() {
        let error = SnipError::ConfigInvalidValue {
            key: "prediction".to_string(),
            message: "unknown policy".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for prediction: unknown policy"
        );
    }

    #[test]
    fn test_open_input_display_includes_path() {
        let error = SnipError::OpenInput {
            path: PathBuf::from("/music/missing.mp3"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file"),
        };
        let msg = error.to_string();
        assert!(msg.contains("/music/missing.mp3"), "got: {}", msg);
        assert!(msg.contains("No such file"), "got: {}", msg);
    }

    #[test]
    fn test_config_read_is_not_a_parse_error() {
        let error = SnipError::ConfigRead {
            path: PathBuf::from("/etc/mp3snip.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = error.to_string();
        assert_eq!(msg, "Cannot read configuration /etc/mp3snip.toml: denied");
        assert!(!msg.contains("parse"));
    }

    #[test]
    fn test_write_error_has_source() {
        let error = SnipError::Write(io::Error::new(io::ErrorKind::WriteZero, "disk full"));
        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
        assert_eq!(error.to_string(), "Write failed: disk full");
    }

    #[test]
    fn test_from_toml_error() {
        let toml_error = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let error: SnipError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_argument_errors_are_classified() {
        assert!(SnipError::missing("input file path").is_argument_error());
        assert!(!SnipError::Read(io::Error::other("boom")).is_argument_error());
        assert!(!SnipError::Other("x".to_string()).is_argument_error());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<SnipError>();
        assert_sync::<SnipError>();
    }
}
