//! List/entry operations with referential rules.
//!
//! [`TodoService`] is what a transport layer calls. It builds the
//! predicates, generates identifiers, validates payloads and enforces the
//! list/entry relationship on top of the two plain collections owned by
//! [`Database`]:
//!
//! - an entry may only be created for, or moved to, an existing list
//! - deleting a list first deletes its entries, then the list
//!
//! Both rules are checked and written under a relation lock shared by
//! every clone of a service: entry creation and moves hold it shared,
//! list deletion holds it exclusively across the whole cascade. An entry
//! can therefore never be attached to a list that is being deleted.
//!
//! The cascade is two independently committed writes. If the second one
//! fails, the entries are already gone while the list remains; no
//! compensating action is taken.

use crate::database::Database;
use crate::error::{CoreError, CoreResult};
use crate::model::{Entry, List, ParentAndChildren};
use crate::request::{EntryPatch, ListPatch, NewEntry, NewList};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A list together with its entries.
pub type ListWithEntries = ParentAndChildren<List, Entry>;

/// Outcome of a cascading list delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeDelete {
    /// The list that was removed.
    pub list: List,
    /// How many entries were removed along with it.
    pub entries_removed: u64,
}

/// Application-level operations over a [`Database`].
///
/// Clones share the database and the relation lock. Separately
/// constructed services over the same database do not share the lock.
#[derive(Debug, Clone)]
pub struct TodoService {
    db: Arc<Database>,
    relations: Arc<RwLock<()>>,
}

impl TodoService {
    /// Wraps a shared database.
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            relations: Arc::new(RwLock::new(())),
        }
    }

    /// Returns the underlying database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Returns every list.
    pub fn all_lists(&self) -> Vec<List> {
        self.db.lists().get_all()
    }

    /// Returns the list with identifier `id`.
    pub fn list(&self, id: &str) -> Option<List> {
        self.db.lists().find_one(|list| list.id == id)
    }

    /// Returns true if a list with identifier `id` exists.
    pub fn list_exists(&self, id: &str) -> bool {
        self.db.lists().exists(|list| list.id == id)
    }

    /// Returns the list with identifier `id` and all of its entries.
    pub fn list_with_entries(&self, id: &str) -> Option<ListWithEntries> {
        let list = self.list(id)?;
        let entries = self.entries_of_list(id);
        Some(ParentAndChildren::new(list, entries))
    }

    /// Creates a list.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an invalid body, or a persist error.
    pub fn create_list(&self, body: NewList) -> CoreResult<List> {
        body.validate()?;

        let list = List::new(body.name);
        self.db.lists().append(list.clone())?;

        info!(list_id = %list.id, "list created");
        Ok(list)
    }

    /// Applies `patch` to the list with identifier `id`.
    ///
    /// Returns `None` if there is no such list.
    ///
    /// # Errors
    ///
    /// Returns a persist error if the change cannot be written.
    pub fn patch_list(&self, id: &str, patch: ListPatch) -> CoreResult<Option<List>> {
        self.db
            .lists()
            .patch_one(|list| list.id == id, |list| patch.apply(list))
    }

    /// Deletes the list with identifier `id` and every entry referencing it.
    ///
    /// Entries are removed first, then the list. Returns `None` if there
    /// is no such list.
    ///
    /// # Errors
    ///
    /// Returns a persist error from whichever step failed. When the list
    /// delete fails after entries were removed, those entries stay deleted.
    pub fn delete_list(&self, id: &str) -> CoreResult<Option<CascadeDelete>> {
        let _relations = self.relations.write();
        let entries_removed = self.db.entries().delete_many(|entry| entry.belongs_to(id))?;

        let list = match self.db.lists().delete_one(|list| list.id == id) {
            Ok(list) => list,
            Err(err) => {
                if entries_removed > 0 {
                    warn!(
                        list_id = %id,
                        entries_removed,
                        error = %err,
                        "list delete failed after its entries were removed"
                    );
                }
                return Err(err);
            }
        };

        match list {
            Some(list) => {
                info!(list_id = %id, entries_removed, "list deleted");
                Ok(Some(CascadeDelete {
                    list,
                    entries_removed,
                }))
            }
            None => {
                if entries_removed > 0 {
                    debug!(list_id = %id, entries_removed, "removed orphaned entries");
                }
                Ok(None)
            }
        }
    }

    /// Returns every entry.
    pub fn all_entries(&self) -> Vec<Entry> {
        self.db.entries().get_all()
    }

    /// Returns the entry with identifier `id`.
    pub fn entry(&self, id: &str) -> Option<Entry> {
        self.db.entries().find_one(|entry| entry.id == id)
    }

    /// Returns the entries of list `list_id`, in stored order.
    pub fn entries_of_list(&self, list_id: &str) -> Vec<Entry> {
        self.db.entries().find(|entry| entry.belongs_to(list_id))
    }

    /// Creates an entry in an existing list.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an invalid body, `ListNotFound` if the
    /// referenced list does not exist, or a persist error.
    pub fn create_entry(&self, body: NewEntry) -> CoreResult<Entry> {
        body.validate()?;

        let _relations = self.relations.read();
        if !self.list_exists(&body.list_id) {
            return Err(CoreError::list_not_found(body.list_id));
        }

        let entry = Entry::new(body.list_id, body.name, body.done);
        self.db.entries().append(entry.clone())?;

        info!(entry_id = %entry.id, list_id = %entry.list_id, "entry created");
        Ok(entry)
    }

    /// Applies `patch` to the entry with identifier `id`.
    ///
    /// Returns `None` if there is no such entry. A patch that moves the
    /// entry to a missing list is rejected before anything is changed.
    ///
    /// # Errors
    ///
    /// Returns `ListNotFound` for a bad `listId`, or a persist error.
    pub fn patch_entry(&self, id: &str, patch: EntryPatch) -> CoreResult<Option<Entry>> {
        let _relations = self.relations.read();
        let entries = self.db.entries();
        if !entries.exists(|entry| entry.id == id) {
            return Ok(None);
        }

        if let Some(list_id) = &patch.list_id {
            if !self.list_exists(list_id) {
                return Err(CoreError::list_not_found(list_id.clone()));
            }
        }

        entries.patch_one(|entry| entry.id == id, |entry| patch.apply(entry))
    }

    /// Deletes the entry with identifier `id`.
    ///
    /// Returns the removed entry, or `None` if there was none.
    ///
    /// # Errors
    ///
    /// Returns a persist error if the change cannot be written.
    pub fn delete_entry(&self, id: &str) -> CoreResult<Option<Entry>> {
        self.db.entries().delete_one(|entry| entry.id == id)
    }
}
