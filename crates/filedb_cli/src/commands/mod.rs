//! CLI command implementations.

pub mod entries;
pub mod init;
pub mod inspect;
pub mod lists;
pub mod verify;

use filedb_core::{Config, Database, TodoService};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Options {
    /// Data directory.
    pub path: PathBuf,
    /// Whether rewritten documents are indented.
    pub pretty: bool,
}

impl Options {
    /// Database configuration derived from the flags.
    pub fn config(&self) -> Config {
        Config::new().pretty_json(self.pretty)
    }

    /// Opens the database and wraps it in a service.
    pub fn service(&self) -> Result<TodoService, Box<dyn std::error::Error>> {
        let db = Database::open_with_config(&self.path, self.config())?;
        Ok(TodoService::new(Arc::new(db)))
    }
}

/// Prints `value` as indented JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Builds the error reported for a missing record.
pub fn not_found(kind: &str, id: &str) -> Box<dyn std::error::Error> {
    format!("{kind} not found: {id}").into()
}
