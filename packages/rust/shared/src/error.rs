//! Error types for the roster scraper.
//!
//! Library crates use [`RosterError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all roster scraping operations.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching a roster page.
    #[error("network error: {0}")]
    Network(String),

    /// Headless browser (`shot-scraper`) invocation failed.
    #[error("browser error: {0}")]
    Browser(String),

    /// HTML/JSON parsing or roster extraction error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// A table header has no entry in the header mapping table.
    #[error("unrecognized column header: {header:?}")]
    UnknownHeader { header: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Output sink (CSV) error.
    #[error("output error: {0}")]
    Output(String),

    /// Data validation error (bad season string, unknown team, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RosterError>;

impl RosterError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create an unknown-header error for the given raw header text.
    pub fn unknown_header(header: impl Into<String>) -> Self {
        Self::UnknownHeader {
            header: header.into(),
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
