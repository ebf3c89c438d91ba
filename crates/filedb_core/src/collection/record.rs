//! Record trait for typed collections.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Trait for types that can be stored in a [`super::Collection`].
///
/// A record is any value with a `serde` representation and a stable
/// identifier. The collection never looks inside a record beyond
/// `record_id`; everything else is up to the caller's predicates.
///
/// # Example
///
/// ```rust
/// use filedb_core::Record;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Serialize, Deserialize)]
/// struct Tag {
///     #[serde(rename = "_id")]
///     id: String,
///     label: String,
/// }
///
/// impl Record for Tag {
///     fn record_id(&self) -> &str {
///         &self.id
///     }
/// }
/// ```
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Returns the record's stable identifier.
    fn record_id(&self) -> &str;
}
