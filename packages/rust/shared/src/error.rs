//! Error types for the campaign workspace.
//!
//! Library crates use [`CampaignError`] via `thiserror`.
//! App crates (cli) wrap this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

use crate::types::DocumentFormat;

/// Top-level error type for all campaign operations.
#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching a source document.
    #[error("network error: {0}")]
    Network(String),

    /// A fetched document could not be decoded as its declared format.
    #[error("{format} decode error: {message}")]
    Decode {
        format: DocumentFormat,
        message: String,
    },

    /// Database or storage layer error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad URL, malformed record, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// HTTP server bind/serve failure.
    #[error("server error: {0}")]
    Server(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CampaignError>;

impl CampaignError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a decode error for the given format.
    pub fn decode(format: DocumentFormat, msg: impl Into<String>) -> Self {
        Self::Decode {
            format,
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = CampaignError::config("missing database path");
        assert_eq!(err.to_string(), "config error: missing database path");

        let err = CampaignError::decode(DocumentFormat::Csv, "invalid utf-8 sequence");
        assert_eq!(err.to_string(), "CSV decode error: invalid utf-8 sequence");

        let err = CampaignError::Network("HTTP 404 Not Found".into());
        assert!(err.to_string().starts_with("network error: HTTP 404"));
    }
}
