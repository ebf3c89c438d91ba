//! In-memory storage backend for testing.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// An in-memory storage backend.
///
/// This backend stores its document in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral databases that don't need persistence
///
/// Clones share the same document, so a test can keep a handle and
/// inspect exactly what a collection persisted.
///
/// # Example
///
/// ```rust
/// use filedb_storage::{StorageBackend, InMemoryBackend};
///
/// let mut backend = InMemoryBackend::with_data(b"old".to_vec());
/// let observer = backend.clone();
/// backend.store(b"new").unwrap();
/// assert_eq!(observer.data(), Some(b"new".to_vec()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    data: Arc<RwLock<Option<Vec<u8>>>>,
    fail_stores: Arc<AtomicBool>,
}

impl InMemoryBackend {
    /// Creates a backend with no document; `load` reports `NotFound`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend holding an existing document.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data: Arc::new(RwLock::new(Some(data))),
            fail_stores: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns a copy of the stored document, if any.
    #[must_use]
    pub fn data(&self) -> Option<Vec<u8>> {
        self.data.read().clone()
    }

    /// Makes every subsequent `store` fail until reset.
    ///
    /// Used to exercise persistence failure handling.
    pub fn fail_stores(&self, fail: bool) {
        self.fail_stores.store(fail, Ordering::SeqCst);
    }
}

impl StorageBackend for InMemoryBackend {
    fn load(&self) -> StorageResult<Vec<u8>> {
        self.data.read().clone().ok_or_else(|| StorageError::NotFound {
            path: "<memory>".into(),
        })
    }

    fn store(&mut self, new_data: &[u8]) -> StorageResult<()> {
        if self.fail_stores.load(Ordering::SeqCst) {
            return Err(StorageError::WriteRejected(
                "in-memory backend configured to fail".to_string(),
            ));
        }
        *self.data.write() = Some(new_data.to_vec());
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.data.read().as_ref().map_or(0, |d| d.len() as u64))
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_backend_is_not_found() {
        let backend = InMemoryBackend::new();
        assert!(backend.load().unwrap_err().is_not_found());
        assert_eq!(backend.size().unwrap(), 0);
    }

    #[test]
    fn store_and_load() {
        let mut backend = InMemoryBackend::new();
        backend.store(b"hello").unwrap();
        assert_eq!(backend.load().unwrap(), b"hello");
        assert_eq!(backend.size().unwrap(), 5);
    }

    #[test]
    fn clones_share_document() {
        let mut backend = InMemoryBackend::with_data(b"a".to_vec());
        let other = backend.clone();

        backend.store(b"b").unwrap();
        assert_eq!(other.load().unwrap(), b"b");
    }

    #[test]
    fn failing_store_keeps_document() {
        let mut backend = InMemoryBackend::with_data(b"kept".to_vec());
        backend.fail_stores(true);

        let result = backend.store(b"lost");
        assert!(matches!(result, Err(StorageError::WriteRejected(_))));
        assert_eq!(backend.data(), Some(b"kept".to_vec()));

        backend.fail_stores(false);
        backend.store(b"stored").unwrap();
        assert_eq!(backend.data(), Some(b"stored".to_vec()));
    }
}
