//! Error types for wca-export
//!
//! This module provides the error taxonomy for the export adapter:
//! - Invalid arguments handed to the request builder
//! - Malformed job completion parameters (see [`ResponseError`])
//! - File transfer failures, propagated unchanged from the collaborator
//! - Configuration and serialization problems in the ambient layers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wca-export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wca-export
#[derive(Debug, Error)]
pub enum Error {
    /// The caller supplied an unusable argument (e.g. no options at all)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The job completion record could not be turned into a typed response
    #[error("malformed response: {0}")]
    Response(#[from] ResponseError),

    /// The file-transfer collaborator failed to fetch the exported file
    #[error("failed to transfer {remote} to {}: {reason}", .local.display())]
    Transfer {
        /// Remote file name as reported by the job
        remote: String,
        /// Local destination path
        local: PathBuf,
        /// The reason the transfer failed
        reason: String,
    },

    /// The XML writer failed while serializing a request
    #[error("XML error: {0}")]
    Xml(String),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "request.indent")
        key: Option<String>,
    },

    /// The job submission/polling collaborator reported a failure
    #[error("job error: {0}")]
    Job(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operation not supported (no transfer backend configured, etc.)
    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Errors raised while materializing a job completion record
///
/// A completion parameter that is present but cannot be coerced is never
/// silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// A numeric parameter did not hold an integer
    #[error("parameter {key} is not an integer: {value:?}")]
    InvalidInteger {
        /// The parameter key (e.g. "EXPORTED_ROW_COUNT")
        key: String,
        /// The raw value received
        value: String,
    },

    /// FILE_ENCODING held a token no [`FileEncoding`](crate::FileEncoding) maps to
    #[error("unknown file encoding: {0:?}")]
    UnknownEncoding(String),

    /// Token no [`ExportFormat`](crate::ExportFormat) maps to
    #[error("unknown export format: {0:?}")]
    UnknownFormat(String),

    /// Token no [`Visibility`](crate::Visibility) maps to
    #[error("unknown visibility: {0:?}")]
    UnknownVisibility(String),
}

impl Error {
    /// Build a configuration error tied to a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Machine-readable error code, stable across releases
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidArgument(_) => "invalid_argument",
            Error::Response(_) => "malformed_response",
            Error::Transfer { .. } => "transfer_failed",
            Error::Xml(_) => "xml_error",
            Error::Config { .. } => "config_error",
            Error::Job(_) => "job_failed",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::NotSupported(_) => "not_supported",
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_error_converts_into_malformed_response() {
        let err: Error = ResponseError::UnknownEncoding("ebcdic".to_string()).into();
        assert!(matches!(err, Error::Response(ResponseError::UnknownEncoding(_))));
        assert_eq!(err.code(), "malformed_response");
        assert_eq!(
            err.to_string(),
            "malformed response: unknown file encoding: \"ebcdic\""
        );
    }

    #[test]
    fn transfer_error_names_both_paths() {
        let err = Error::Transfer {
            remote: "/download/export.csv".to_string(),
            local: PathBuf::from("/tmp/export.csv"),
            reason: "connection reset".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("/download/export.csv"));
        assert!(message.contains("/tmp/export.csv"));
        assert!(message.contains("connection reset"));
        assert_eq!(err.code(), "transfer_failed");
    }

    #[test]
    fn config_helper_records_key() {
        match Error::config("request.indent", "must be positive") {
            Error::Config { key, message } => {
                assert_eq!(key.as_deref(), Some("request.indent"));
                assert_eq!(message, "must be positive");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
