//! # filedb Testkit
//!
//! Test utilities for filedb.
//!
//! This crate provides:
//! - Seeded temporary data directories and database helpers
//! - Property-based test generators using proptest
//! - Concurrent stress helpers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use filedb_testkit::prelude::*;
//!
//! #[test]
//! fn creates_list() {
//!     with_temp_db(|db| {
//!         let todos = TodoService::new(db);
//!         // ... test operations
//!     });
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::stress::*;
}

pub use fixtures::*;
pub use generators::*;
pub use stress::*;
