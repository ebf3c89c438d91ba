//! # filedb Core
//!
//! Core persistence engine for filedb.
//!
//! This crate provides:
//! - `Collection<T>`: records of one type held in memory and mirrored to a
//!   JSON document after every mutation
//! - `Database`: the list and entry collections opened from one directory
//! - `TodoService`: list/entry operations with referential rules and
//!   cascading deletes
//!
//! ## Example
//!
//! ```rust
//! use filedb_core::{Database, NewEntry, NewList, TodoService};
//! use std::sync::Arc;
//!
//! let db = Arc::new(Database::open_in_memory().unwrap());
//! let todos = TodoService::new(Arc::clone(&db));
//!
//! let list = todos.create_list(NewList { name: "Groceries".into() }).unwrap();
//! todos
//!     .create_entry(NewEntry { list_id: list.id.clone(), name: "Milk".into(), done: false })
//!     .unwrap();
//!
//! let open = db.entries().find(|entry| !entry.done);
//! assert_eq!(open.len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
mod database;
mod dir;
mod error;
mod model;
mod request;
mod service;

pub use collection::{Collection, Record};
pub use config::Config;
pub use database::{Database, COLLECTIONS, ENTRY_COLLECTION, LIST_COLLECTION};
pub use dir::{collection_file, DataDir};
pub use error::{CoreError, CoreResult};
pub use model::{new_record_id, Entry, List, ParentAndChildren};
pub use request::{EntryPatch, ListPatch, NewEntry, NewList};
pub use service::{CascadeDelete, ListWithEntries, TodoService};

pub use filedb_codec::JsonStyle;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
