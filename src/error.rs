//! Error types for the campus directory
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using DirectoryError
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Unified error type for directory operations
#[derive(Debug, Error)]
pub enum DirectoryError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The data file could not be opened or written for an append/rewrite
    #[error("Could not write location file {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Table Errors
    // -------------------------------------------------------------------------
    #[error("Allocation failed while inserting a location")]
    AllocationFailure,

    #[error("Location with key '{0}' not found")]
    KeyNotFound(String),

    // -------------------------------------------------------------------------
    // Directory Errors
    // -------------------------------------------------------------------------
    #[error("Task key '{0}' already exists")]
    DuplicateKey(String),

    #[error("Task key cannot be empty")]
    EmptyKey,

    /// A field would break the one-entry-per-line file format
    #[error("Field '{0}' must not contain a line break")]
    InvalidField(&'static str),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DirectoryError {
    /// Wrap an I/O error raised while writing `path`
    pub(crate) fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }
}
