//! Error types for Topicshelf.
//!
//! Library crates use [`TopicshelfError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics, and the HTTP
//! layer maps variants onto status codes.

use std::path::PathBuf;

/// Top-level error type for all Topicshelf operations.
#[derive(Debug, thiserror::Error)]
pub enum TopicshelfError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The requested topic resolves to neither a directory nor a markdown file.
    #[error("topic not found: {path}")]
    NotFound { path: String },

    /// A caller-supplied path escapes the content root or is otherwise unusable.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// HTTP server startup or runtime failure.
    #[error("server error: {0}")]
    Server(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TopicshelfError>;

impl TopicshelfError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
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

    /// Create a not-found error for a topic path.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an invalid-path error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error means "no such topic" rather than a server-side failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
