//! # filedb Codec
//!
//! JSON encoding/decoding for filedb collection documents.
//!
//! Every collection is persisted as one document:
//!
//! ```text
//! { "count": <non-negative integer>, "data": [ <record>, ... ] }
//! ```
//!
//! ## Rules
//!
//! - `count` always equals the length of `data` in anything this crate
//!   writes, and anything it reads must satisfy the same rule
//! - Records are encoded with their own `serde` representation; the codec
//!   never inspects their fields
//! - Record order is preserved exactly
//!
//! ## Usage
//!
//! ```
//! use filedb_codec::{decode_container, encode_container, DataContainer, JsonStyle};
//!
//! let container = DataContainer::from_records(vec!["a".to_string(), "b".to_string()]);
//! let bytes = encode_container(&container, JsonStyle::Compact).unwrap();
//! assert_eq!(bytes, br#"{"count":2,"data":["a","b"]}"#);
//!
//! let decoded: DataContainer<String> = decode_container(&bytes).unwrap();
//! assert_eq!(decoded, container);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod container;
mod error;
mod json;

pub use container::DataContainer;
pub use error::{CodecError, CodecResult};
pub use json::{decode_container, empty_document, encode_container, encode_records, JsonStyle};
