//! Shared helpers for the filedb benchmarks.

#![warn(missing_docs)]

pub mod utils;
