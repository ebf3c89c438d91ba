//! # filedb Storage
//!
//! Storage backend trait and implementations for filedb.
//!
//! This crate provides the lowest-level storage abstraction for filedb.
//! Storage backends are **opaque document stores** - each backend holds
//! exactly one document and does not interpret its bytes.
//!
//! ## Design Principles
//!
//! - Backends load and replace a whole document at once
//! - No knowledge of the JSON envelope or record shapes
//! - Must be `Send + Sync` so collections can be shared across threads
//! - A replace either fully succeeds or leaves the previous document intact
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral storage
//! - [`FileBackend`] - For persistent storage using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use filedb_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::with_data(b"{}".to_vec());
//! backend.store(b"hello world").unwrap();
//! assert_eq!(backend.load().unwrap(), b"hello world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
