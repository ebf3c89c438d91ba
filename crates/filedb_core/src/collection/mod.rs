//! Typed collection API.
//!
//! Provides `Collection<T>` for storing records of one type in memory while
//! mirroring every mutation to a JSON document via the `Record` trait.

mod record;
mod typed;

pub use record::Record;
pub use typed::Collection;
