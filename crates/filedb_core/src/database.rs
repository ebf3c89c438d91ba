//! Database facade.

use crate::collection::Collection;
use crate::config::Config;
use crate::dir::DataDir;
use crate::error::CoreResult;
use crate::model::{Entry, List};
use filedb_codec::empty_document;
use filedb_storage::{InMemoryBackend, StorageBackend};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Name of the list collection (`list.json`).
pub const LIST_COLLECTION: &str = "list";

/// Name of the entry collection (`entry.json`).
pub const ENTRY_COLLECTION: &str = "entry";

/// Every collection a database owns, in open order.
pub const COLLECTIONS: [&str; 2] = [LIST_COLLECTION, ENTRY_COLLECTION];

/// The main database handle.
///
/// `Database` owns exactly two collections, lists and entries, and hands
/// out shared references to them. It holds no relational logic: entries
/// refer to lists through `listId`, and keeping those references valid
/// (including deleting a list's entries before the list) is up to the
/// caller. See [`crate::TodoService`] for the standard policy.
///
/// # Opening a Database
///
/// ```rust,ignore
/// use filedb_core::Database;
/// use std::path::Path;
///
/// let db = Database::open(Path::new("data"))?;
/// let lists = db.lists().get_all();
/// ```
///
/// # In-Memory Databases
///
/// For testing, use `Database::open_in_memory()`:
///
/// ```rust,ignore
/// let db = Database::open_in_memory()?;
/// ```
#[derive(Debug)]
pub struct Database {
    /// Configuration.
    config: Config,
    /// Data directory. None for in-memory databases.
    dir: Option<DataDir>,
    /// List collection.
    lists: Arc<Collection<List>>,
    /// Entry collection.
    entries: Arc<Collection<Entry>>,
}

impl Database {
    /// Opens the database stored in `path`.
    ///
    /// Both `list.json` and `entry.json` must already exist in `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is invalid or either collection
    /// fails to open. No partially opened database is ever returned.
    pub fn open(path: &Path) -> CoreResult<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Opens the database stored in `path` with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use filedb_core::{Config, Database};
    /// use std::path::Path;
    ///
    /// let config = Config::default().pretty_json(true);
    /// let db = Database::open_with_config(Path::new("data"), config)?;
    /// ```
    pub fn open_with_config(path: &Path, config: Config) -> CoreResult<Self> {
        let dir = DataDir::open(path)?;

        let lists = Collection::open(LIST_COLLECTION, dir.path(), &config)?;
        let entries = Collection::open(ENTRY_COLLECTION, dir.path(), &config)?;

        info!(
            path = %dir.path().display(),
            lists = lists.len(),
            entries = entries.len(),
            "database opened"
        );

        Ok(Self {
            config,
            dir: Some(dir),
            lists: Arc::new(lists),
            entries: Arc::new(entries),
        })
    }

    /// Opens a database over caller-supplied backends.
    ///
    /// # Errors
    ///
    /// Returns an error if either backend does not hold a valid document.
    pub fn open_with_backends(
        config: Config,
        list_backend: Box<dyn StorageBackend>,
        entry_backend: Box<dyn StorageBackend>,
    ) -> CoreResult<Self> {
        let lists = Collection::with_backend(LIST_COLLECTION, list_backend, &config)?;
        let entries = Collection::with_backend(ENTRY_COLLECTION, entry_backend, &config)?;

        Ok(Self {
            config,
            dir: None,
            lists: Arc::new(lists),
            entries: Arc::new(entries),
        })
    }

    /// Opens an empty database that lives only in memory.
    ///
    /// # Errors
    ///
    /// Returns an error only if the empty seed document cannot be encoded.
    pub fn open_in_memory() -> CoreResult<Self> {
        let config = Config::default();
        let seed = empty_document(config.json_style)?;

        Self::open_with_backends(
            config,
            Box::new(InMemoryBackend::with_data(seed.clone())),
            Box::new(InMemoryBackend::with_data(seed)),
        )
    }

    /// Returns the list collection.
    pub fn lists(&self) -> Arc<Collection<List>> {
        Arc::clone(&self.lists)
    }

    /// Returns the entry collection.
    pub fn entries(&self) -> Arc<Collection<Entry>> {
        Arc::clone(&self.entries)
    }

    /// Returns the configuration the database was opened with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the data directory, or `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.dir.as_ref().map(DataDir::path)
    }
}
