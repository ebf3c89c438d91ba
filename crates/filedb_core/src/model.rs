//! Record types stored by the database.

use crate::collection::Record;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a fresh record identifier (a random UUID string).
#[must_use]
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// A named list owning zero or more entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Stable identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
}

impl List {
    /// Creates a list with a freshly generated identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
        }
    }
}

impl Record for List {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// One item of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Stable identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Identifier of the owning [`List`].
    #[serde(rename = "listId")]
    pub list_id: String,
    /// Display name.
    pub name: String,
    /// Completion flag.
    pub done: bool,
}

impl Entry {
    /// Creates an entry with a freshly generated identifier.
    pub fn new(list_id: impl Into<String>, name: impl Into<String>, done: bool) -> Self {
        Self {
            id: new_record_id(),
            list_id: list_id.into(),
            name: name.into(),
            done,
        }
    }

    /// Returns true if this entry belongs to list `list_id`.
    #[must_use]
    pub fn belongs_to(&self, list_id: &str) -> bool {
        self.list_id == list_id
    }
}

impl Record for Entry {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// A parent record together with the records that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentAndChildren<P, C> {
    /// The owning record.
    pub parent: P,
    /// Records owned by `parent`, in stored order.
    pub children: Vec<C>,
}

impl<P, C> ParentAndChildren<P, C> {
    /// Pairs a parent with its children.
    pub fn new(parent: P, children: Vec<C>) -> Self {
        Self { parent, children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_wire_shape() {
        let list = List {
            id: "l1".to_string(),
            name: "Groceries".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&list).unwrap(),
            json!({ "_id": "l1", "name": "Groceries" })
        );
    }

    #[test]
    fn entry_wire_shape() {
        let entry = Entry {
            id: "e1".to_string(),
            list_id: "l1".to_string(),
            name: "Milk".to_string(),
            done: false,
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({ "_id": "e1", "listId": "l1", "name": "Milk", "done": false })
        );
    }

    #[test]
    fn new_records_get_distinct_uuid_ids() {
        let a = List::new("a");
        let b = List::new("a");
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());

        let entry = Entry::new(&a.id, "x", true);
        assert!(entry.belongs_to(&a.id));
        assert!(!entry.belongs_to(&b.id));
        assert_eq!(entry.record_id(), entry.id);
    }

    #[test]
    fn parent_and_children_shape() {
        let list = List {
            id: "l1".to_string(),
            name: "Work".to_string(),
        };
        let body = ParentAndChildren::new(list, Vec::<Entry>::new());
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "parent": { "_id": "l1", "name": "Work" }, "children": [] })
        );
    }
}
