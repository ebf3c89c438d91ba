//! The in-memory image of a collection document.

use serde::{Deserialize, Serialize};

/// Ordered records plus the redundant `count` field persisted next to them.
///
/// `count` mirrors `data.len()`. It may lag behind while a caller mutates
/// `data` directly; [`DataContainer::sync_count`] restores it, and the
/// encoder never writes a stale value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataContainer<T> {
    /// Number of records, as persisted.
    pub count: u64,
    /// Records in stored order.
    pub data: Vec<T>,
}

impl<T> DataContainer<T> {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: 0,
            data: Vec::new(),
        }
    }

    /// Creates a container holding `records` with a matching count.
    #[must_use]
    pub fn from_records(records: Vec<T>) -> Self {
        Self {
            count: records.len() as u64,
            data: records,
        }
    }

    /// Returns the live number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the container holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Recomputes `count` from the record sequence.
    pub fn sync_count(&mut self) {
        self.count = self.data.len() as u64;
    }

    /// Returns true if `count` agrees with the record sequence.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.count == self.data.len() as u64
    }

    /// Returns the records in stored order.
    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.data
    }

    /// Consumes the container and returns its records.
    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        self.data
    }
}

impl<T> Default for DataContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}
