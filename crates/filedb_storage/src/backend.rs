//! Storage backend trait definition.

use crate::error::StorageResult;

/// A whole-document storage backend for filedb.
///
/// Storage backends are **opaque document stores**. Each backend owns a
/// single document which is always read and written in full. filedb owns
/// all format interpretation - backends do not understand JSON or records.
///
/// # Invariants
///
/// - `load` returns exactly the bytes of the last successful `store`
/// - A failed `store` leaves the previously stored document readable
/// - Backends must be `Send + Sync` for concurrent access
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend: Send + Sync {
    /// Reads the whole document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The document does not exist
    /// - An I/O error occurs
    fn load(&self) -> StorageResult<Vec<u8>>;

    /// Replaces the whole document with `data`.
    ///
    /// After this returns successfully, a subsequent `load` observes
    /// exactly `data`. On failure the previous document is left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn store(&mut self, data: &[u8]) -> StorageResult<()>;

    /// Returns the current size of the document in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;

    /// Returns a human-readable description of where the document lives.
    fn location(&self) -> String;
}
