//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing document does not exist.
    #[error("document not found: {}", path.display())]
    NotFound {
        /// Path that was expected to hold the document.
        path: PathBuf,
    },

    /// The backing document already exists.
    #[error("document already exists: {}", path.display())]
    AlreadyExists {
        /// Path of the existing document.
        path: PathBuf,
    },

    /// A store was rejected by the backend.
    #[error("write rejected: {0}")]
    WriteRejected(String),
}

impl StorageError {
    /// Returns true if this error means the document is missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io(err) => err.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
