//! Error types for filedb core.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in filedb core operations.
///
/// A predicate that matches nothing is never an error; operations report
/// that case as `None` (or a zero count).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] filedb_storage::StorageError),

    /// JSON codec error.
    #[error("codec error: {0}")]
    Codec(#[from] filedb_codec::CodecError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A collection could not be loaded from its backing document.
    #[error("failed to open collection '{collection}': {source}")]
    Open {
        /// Name of the collection.
        collection: String,
        /// What went wrong while reading or decoding.
        source: Box<CoreError>,
    },

    /// A mutation could not be written to the backing document.
    ///
    /// The in-memory collection has already been restored to the state it
    /// had before the call.
    #[error("failed to persist collection '{collection}': {source}")]
    Persist {
        /// Name of the collection.
        collection: String,
        /// What went wrong while encoding or writing.
        source: Box<CoreError>,
    },

    /// The data directory is missing or unusable.
    #[error("invalid data directory: {message}")]
    InvalidDirectory {
        /// Description of the problem.
        message: String,
    },

    /// An entry refers to a list that does not exist.
    #[error("list not found: {id}")]
    ListNotFound {
        /// The list identifier that was referenced.
        id: String,
    },

    /// A request payload failed validation.
    #[error("invalid field '{field}': {message}")]
    Validation {
        /// JSON name of the offending field.
        field: String,
        /// Description of the failure.
        message: String,
    },
}

impl CoreError {
    /// Creates an open error for `collection`.
    pub fn open(collection: impl Into<String>, source: impl Into<CoreError>) -> Self {
        Self::Open {
            collection: collection.into(),
            source: Box::new(source.into()),
        }
    }

    /// Creates a persist error for `collection`.
    pub fn persist(collection: impl Into<String>, source: impl Into<CoreError>) -> Self {
        Self::Persist {
            collection: collection.into(),
            source: Box::new(source.into()),
        }
    }

    /// Creates an invalid directory error.
    pub fn invalid_directory(message: impl Into<String>) -> Self {
        Self::InvalidDirectory {
            message: message.into(),
        }
    }

    /// Creates a list not found error.
    pub fn list_not_found(id: impl Into<String>) -> Self {
        Self::ListNotFound { id: id.into() }
    }

    /// Creates a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error came from writing a mutation.
    #[must_use]
    pub fn is_persist(&self) -> bool {
        matches!(self, Self::Persist { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedb_storage::StorageError;
    use std::error::Error as _;

    #[test]
    fn open_error_keeps_source() {
        let err = CoreError::open(
            "list",
            StorageError::NotFound {
                path: "data/list.json".into(),
            },
        );

        assert_eq!(
            err.to_string(),
            "failed to open collection 'list': storage error: document not found: data/list.json"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn persist_is_detectable() {
        let err = CoreError::persist("entry", StorageError::WriteRejected("disk full".into()));
        assert!(err.is_persist());
        assert!(!CoreError::list_not_found("x").is_persist());
    }
}
