//! Request payloads accepted by [`crate::TodoService`].
//!
//! These mirror the JSON bodies a transport layer receives. Field names on
//! the wire match the stored records (`listId`, `name`, `done`).

use crate::error::{CoreError, CoreResult};
use crate::model::{Entry, List};
use serde::{Deserialize, Serialize};

fn require(field: &str, value: &str) -> CoreResult<()> {
    if value.is_empty() {
        return Err(CoreError::validation(field, "is required"));
    }
    Ok(())
}

/// Body for creating a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewList {
    /// Name of the new list. Required.
    pub name: String,
}

impl NewList {
    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `name` is empty.
    pub fn validate(&self) -> CoreResult<()> {
        require("name", &self.name)
    }
}

/// Partial update of a list; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPatch {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ListPatch {
    /// Applies the present fields to `list`.
    pub fn apply(&self, list: &mut List) {
        if let Some(name) = &self.name {
            list.name.clone_from(name);
        }
    }
}

/// Body for creating an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    /// Owning list. Required.
    #[serde(rename = "listId")]
    pub list_id: String,
    /// Name of the entry. Required.
    pub name: String,
    /// Initial completion flag.
    #[serde(default)]
    pub done: bool,
}

impl NewEntry {
    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the first empty required field.
    pub fn validate(&self) -> CoreResult<()> {
        require("listId", &self.list_id)?;
        require("name", &self.name)
    }
}

/// Partial update of an entry; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPatch {
    /// Move the entry to another list.
    #[serde(rename = "listId", default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl EntryPatch {
    /// Applies the present fields to `entry`.
    pub fn apply(&self, entry: &mut Entry) {
        if let Some(list_id) = &self.list_id {
            entry.list_id.clone_from(list_id);
        }
        if let Some(name) = &self.name {
            entry.name.clone_from(name);
        }
        if let Some(done) = self.done {
            entry.done = done;
        }
    }

    /// Returns true if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list_id.is_none() && self.name.is_none() && self.done.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_list_requires_name() {
        assert!(NewList { name: "a".into() }.validate().is_ok());

        let err = NewList { name: String::new() }.validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn new_entry_reports_first_missing_field() {
        let body: NewEntry = serde_json::from_str(r#"{"listId":"","name":""}"#).unwrap();
        let err = body.validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid field 'listId': is required");
        assert!(!body.done);
    }

    #[test]
    fn entry_patch_applies_only_present_fields() {
        let mut entry = Entry {
            id: "e".into(),
            list_id: "l1".into(),
            name: "old".into(),
            done: false,
        };
        let patch: EntryPatch = serde_json::from_str(r#"{"done":true}"#).unwrap();
        patch.apply(&mut entry);

        assert!(entry.done);
        assert_eq!(entry.name, "old");
        assert_eq!(entry.list_id, "l1");
        assert!(!patch.is_empty());
        assert!(EntryPatch::default().is_empty());
    }

    #[test]
    fn list_patch_renames() {
        let mut list = List {
            id: "l".into(),
            name: "before".into(),
        };
        ListPatch::default().apply(&mut list);
        assert_eq!(list.name, "before");

        ListPatch {
            name: Some("after".into()),
        }
        .apply(&mut list);
        assert_eq!(list.name, "after");
    }
}
