//! Test fixtures and database helpers.
//!
//! Provides seeded data directories and common list/entry scenarios.

use filedb_codec::JsonStyle;
use filedb_core::{Config, DataDir, Database, TodoService, COLLECTIONS};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// A test database with automatic cleanup.
pub struct TestDatabase {
    /// The database instance.
    pub db: Arc<Database>,
    /// The temporary directory (kept alive to prevent cleanup).
    temp_dir: Option<TempDir>,
}

impl TestDatabase {
    /// Creates a new in-memory test database.
    pub fn memory() -> Self {
        Self {
            db: Arc::new(Database::open_in_memory().expect("Failed to open in-memory database")),
            temp_dir: None,
        }
    }

    /// Creates a database over a freshly seeded temporary directory.
    pub fn file() -> Self {
        Self::file_with_config(Config::default())
    }

    /// Like [`TestDatabase::file`], with custom configuration.
    pub fn file_with_config(config: Config) -> Self {
        let temp_dir = seeded_dir(config.json_style);
        let db = Database::open_with_config(temp_dir.path(), config)
            .expect("Failed to open file database");

        Self {
            db: Arc::new(db),
            temp_dir: Some(temp_dir),
        }
    }

    /// Returns the data directory if file-based, None if in-memory.
    pub fn path(&self) -> Option<&Path> {
        self.temp_dir.as_ref().map(TempDir::path)
    }

    /// Opens a second, independent database over the same directory.
    ///
    /// Panics for in-memory databases.
    pub fn reopen(&self) -> Database {
        let path = self.path().expect("Only file databases can be reopened");
        Database::open_with_config(path, self.db.config().clone())
            .expect("Failed to reopen database")
    }

    /// Returns a service over this database.
    pub fn service(&self) -> TodoService {
        TodoService::new(Arc::clone(&self.db))
    }
}

impl std::ops::Deref for TestDatabase {
    type Target = Database;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

/// Creates a temporary directory holding empty `list` and `entry`
/// documents.
pub fn seeded_dir(style: JsonStyle) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    DataDir::init(temp_dir.path(), &COLLECTIONS, style).expect("Failed to seed data directory");
    temp_dir
}

/// Runs a test with a temporary in-memory database.
pub fn with_temp_db<F, R>(f: F) -> R
where
    F: FnOnce(Arc<Database>) -> R,
{
    let test_db = TestDatabase::memory();
    f(Arc::clone(&test_db.db))
}

/// Runs a test with a database over a seeded temporary directory.
pub fn with_file_db<F, R>(f: F) -> R
where
    F: FnOnce(Arc<Database>, &Path) -> R,
{
    let test_db = TestDatabase::file();
    let path = test_db.path().expect("File database should have a path");
    f(Arc::clone(&test_db.db), path)
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;
    use filedb_core::{List, NewEntry, NewList};

    /// Creates `lists` lists with `entries_per_list` entries each.
    ///
    /// Every other entry is marked done.
    pub fn populate(todos: &TodoService, lists: usize, entries_per_list: usize) -> Vec<List> {
        let mut created = Vec::with_capacity(lists);

        for i in 0..lists {
            let list = todos
                .create_list(NewList {
                    name: format!("list {i}"),
                })
                .expect("Failed to create list");

            for j in 0..entries_per_list {
                todos
                    .create_entry(NewEntry {
                        list_id: list.id.clone(),
                        name: format!("entry {i}.{j}"),
                        done: j % 2 == 1,
                    })
                    .expect("Failed to create entry");
            }

            created.push(list);
        }

        created
    }

    /// Creates a file database pre-populated via [`populate`].
    pub fn populated_database(lists: usize, entries_per_list: usize) -> (TestDatabase, Vec<List>) {
        let test_db = TestDatabase::file();
        let created = populate(&test_db.service(), lists, entries_per_list);
        (test_db, created)
    }
}
