//! Data directory management.
//!
//! This module handles the file system layout for filedb:
//!
//! ```text
//! <data_dir>/
//! ├─ list.json         # List collection
//! └─ entry.json        # Entry collection
//! ```
//!
//! Opening never creates anything. The directory and its seed documents
//! are produced by [`DataDir::init`], which is a setup step run before the
//! database is first opened.

use crate::error::{CoreError, CoreResult};
use filedb_codec::{empty_document, JsonStyle};
use filedb_storage::{FileBackend, StorageError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Extension used by every collection document.
const DOCUMENT_EXTENSION: &str = "json";

/// Returns the backing file of collection `name` inside `directory`.
#[must_use]
pub fn collection_file(directory: &Path, name: &str) -> PathBuf {
    directory.join(format!("{name}.{DOCUMENT_EXTENSION}"))
}

/// A validated data directory.
#[derive(Debug, Clone)]
pub struct DataDir {
    /// Root directory path.
    path: PathBuf,
}

impl DataDir {
    /// Opens an existing data directory.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDirectory` if the path does not exist or is not a
    /// directory.
    pub fn open(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::invalid_directory(format!(
                "data directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(CoreError::invalid_directory(format!(
                "path is not a directory: {}",
                path.display()
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Creates the directory and a zero-record document for every name in
    /// `collections` that does not have one yet.
    ///
    /// Existing documents are left untouched. Returns the paths that were
    /// created.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or a seed file cannot be created.
    pub fn init(path: &Path, collections: &[&str], style: JsonStyle) -> CoreResult<Vec<PathBuf>> {
        fs::create_dir_all(path)?;
        let dir = Self::open(path)?;
        let seed = empty_document(style)?;

        let mut created = Vec::new();
        for name in collections {
            let file = dir.collection_path(name);
            match FileBackend::create(&file, &seed) {
                Ok(_) => {
                    info!(path = %file.display(), "seeded empty collection");
                    created.push(file);
                }
                Err(StorageError::AlreadyExists { .. }) => {}
                Err(err) => return Err(err.into()),
            }
        }

        Ok(created)
    }

    /// Returns the path to the data directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the backing file of collection `name`.
    #[must_use]
    pub fn collection_path(&self, name: &str) -> PathBuf {
        collection_file(&self.path, name)
    }
}
