//! Error types for hookkit-core operations.
//!
//! Most of the library degrades silently (absent files, malformed JSON, missing
//! binaries). These variants cover the few paths that must surface a failure.

use std::path::PathBuf;

/// All errors that can occur in hookkit-core operations.
#[derive(Debug, thiserror::Error)]
pub enum HookkitError {
    // ─────────────────────────────────────────────────────────────────────
    // Request Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Unknown package manager: {0}")]
    UnknownPackageManager(String),

    // ─────────────────────────────────────────────────────────────────────
    // Environment Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Home directory not found")]
    HomeDirNotFound,

    // ─────────────────────────────────────────────────────────────────────
    // I/O Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HookkitError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        HookkitError::Io {
            context: context.into(),
            source,
        }
    }
}

/// Convenience type alias for Results using HookkitError.
pub type Result<T> = std::result::Result<T, HookkitError>;

// Conversion for string error compatibility
impl From<HookkitError> for String {
    fn from(err: HookkitError) -> String {
        err.to_string()
    }
}
