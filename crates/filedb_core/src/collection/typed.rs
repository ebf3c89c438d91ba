//! Typed collection implementation.

use crate::collection::record::Record;
use crate::config::Config;
use crate::dir::collection_file;
use crate::error::{CoreError, CoreResult};
use filedb_codec::{decode_container, encode_container, DataContainer};
use filedb_storage::{FileBackend, StorageBackend};
use parking_lot::RwLock;
use std::path::Path;
use tracing::{debug, warn};

/// State guarded by the collection lock.
///
/// The container and the backend live under one lock so that a mutation
/// and the rewrite of its document can never interleave with another
/// mutation.
struct CollectionState<T> {
    container: DataContainer<T>,
    backend: Box<dyn StorageBackend>,
}

/// A typed, file-mirrored collection of records.
///
/// `Collection<T>` holds every record of type `T` in memory, in insertion
/// order, and rewrites its backing document after each successful
/// mutation.
///
/// # Language-Native Querying
///
/// There is no query language. Selection is done with plain closures,
/// and every call is a linear scan:
///
/// ```rust,ignore
/// let open = entries.find(|e| !e.done);
/// let renamed = lists.patch_one(|l| l.id == id, |l| l.name = "Groceries".into())?;
/// ```
///
/// # Concurrency
///
/// A reader/writer lock guards the collection. Reads share it; each
/// mutation holds it exclusively from the change through the document
/// rewrite. Predicates and mutators run under the lock and must not call
/// back into the same collection.
///
/// # Failure Handling
///
/// If the rewrite fails, the in-memory change is undone before the error
/// is returned, so memory and disk never disagree after a call.
///
/// # Copies
///
/// Every record handed out is a clone. Mutating it has no effect on the
/// collection.
pub struct Collection<T: Record> {
    /// Collection name, also the stem of its document file.
    name: String,
    /// Where the backing document lives, for diagnostics.
    location: String,
    /// Encoding and durability settings.
    config: Config,
    /// Records plus backend.
    state: RwLock<CollectionState<T>>,
}

impl<T: Record> Collection<T> {
    /// Opens the collection stored at `<directory>/<name>.json`.
    ///
    /// The file must already exist and decode as a document of `T`
    /// records; nothing is created here.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Open` if the file is missing, unreadable or
    /// not a valid document.
    pub fn open(name: &str, directory: &Path, config: &Config) -> CoreResult<Self> {
        let path = collection_file(directory, name);
        let backend = FileBackend::open(&path)
            .map_err(|e| CoreError::open(name, e))?
            .sync_on_write(config.sync_on_write);

        Self::with_backend(name, Box::new(backend), config)
    }

    /// Loads a collection from an arbitrary backend.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Open` if the backend cannot be read or its
    /// document does not decode.
    pub fn with_backend(
        name: impl Into<String>,
        backend: Box<dyn StorageBackend>,
        config: &Config,
    ) -> CoreResult<Self> {
        let name = name.into();
        let bytes = backend.load().map_err(|e| CoreError::open(&name, e))?;
        let container: DataContainer<T> =
            decode_container(&bytes).map_err(|e| CoreError::open(&name, e))?;

        debug!(
            collection = %name,
            location = %backend.location(),
            records = container.len(),
            "collection opened"
        );

        Ok(Self {
            location: backend.location(),
            name,
            config: config.clone(),
            state: RwLock::new(CollectionState { container, backend }),
        })
    }

    /// Returns the collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns where the backing document lives.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the first record matching `predicate`, in stored order.
    pub fn find_one<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        let state = self.state.read();
        state
            .container
            .data
            .iter()
            .find(|record| predicate(record))
            .cloned()
    }

    /// Returns every record matching `predicate`, in stored order.
    ///
    /// Yields an empty vector when nothing matches.
    pub fn find<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        let state = self.state.read();
        state
            .container
            .data
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Returns the record whose identifier is `id`.
    pub fn find_by_id(&self, id: &str) -> Option<T> {
        self.find_one(|record| record.record_id() == id)
    }

    /// Returns a snapshot of all records in stored order.
    pub fn get_all(&self) -> Vec<T> {
        self.state.read().container.data.clone()
    }

    /// Returns true if any record matches `predicate`.
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.state.read().container.data.iter().any(|r| predicate(r))
    }

    /// Returns the persisted `count` field.
    pub fn count(&self) -> u64 {
        self.state.read().container.count
    }

    /// Returns the live number of records.
    pub fn len(&self) -> usize {
        self.state.read().container.len()
    }

    /// Returns true if the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.state.read().container.is_empty()
    }

    /// Adds `record` at the end and rewrites the document.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Persist` if the document cannot be written; the
    /// record is not kept in that case.
    pub fn append(&self, record: T) -> CoreResult<()> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        state.container.data.push(record);
        if let Err(err) = self.persist(state) {
            state.container.data.pop();
            self.log_rollback("append", &err);
            return Err(err);
        }

        Ok(())
    }

    /// Removes the first record matching `predicate`.
    ///
    /// Returns the removed record, or `None` without touching the document
    /// if nothing matched. Remaining records keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Persist` if the document cannot be written; the
    /// record is put back at its original position.
    pub fn delete_one<P>(&self, predicate: P) -> CoreResult<Option<T>>
    where
        P: Fn(&T) -> bool,
    {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let Some(index) = state.container.data.iter().position(|r| predicate(r)) else {
            return Ok(None);
        };

        let removed = state.container.data.remove(index);
        if let Err(err) = self.persist(state) {
            state.container.data.insert(index, removed);
            self.log_rollback("delete_one", &err);
            return Err(err);
        }

        Ok(Some(removed))
    }

    /// Removes every record matching `predicate` and rewrites the document
    /// once.
    ///
    /// The predicate is evaluated exactly once per record against the
    /// original sequence, so adjacent matches are never skipped. Returns
    /// the number of records removed; when that is zero the document is
    /// not rewritten.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Persist` if the document cannot be written; the
    /// original sequence is restored.
    pub fn delete_many<P>(&self, predicate: P) -> CoreResult<u64>
    where
        P: Fn(&T) -> bool,
    {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let matches: Vec<bool> = state.container.data.iter().map(|r| predicate(r)).collect();
        let removed_count = matches.iter().filter(|m| **m).count();
        if removed_count == 0 {
            return Ok(0);
        }

        let previous = std::mem::take(&mut state.container.data);
        let mut kept = Vec::with_capacity(previous.len() - removed_count);
        let mut removed = Vec::with_capacity(removed_count);
        for (record, matched) in previous.into_iter().zip(&matches) {
            if *matched {
                removed.push(record);
            } else {
                kept.push(record);
            }
        }
        state.container.data = kept;

        if let Err(err) = self.persist(state) {
            let kept = std::mem::take(&mut state.container.data);
            state.container.data = restore_order(kept, removed, &matches);
            self.log_rollback("delete_many", &err);
            return Err(err);
        }

        Ok(removed_count as u64)
    }

    /// Applies `mutator` to the stored record that first matches
    /// `predicate`, rewrites the document and returns a copy of the
    /// updated record.
    ///
    /// The mutation happens on the stored element itself, so later reads
    /// observe it. Returns `None` without touching the document if nothing
    /// matched.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Persist` if the document cannot be written; the
    /// record is restored to its value before the mutation.
    pub fn patch_one<P, F>(&self, predicate: P, mutator: F) -> CoreResult<Option<T>>
    where
        P: Fn(&T) -> bool,
        F: FnOnce(&mut T),
    {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let Some(index) = state.container.data.iter().position(|r| predicate(r)) else {
            return Ok(None);
        };

        let original = state.container.data[index].clone();
        mutator(&mut state.container.data[index]);

        if let Err(err) = self.persist(state) {
            state.container.data[index] = original;
            self.log_rollback("patch_one", &err);
            return Err(err);
        }

        Ok(Some(state.container.data[index].clone()))
    }

    /// Replaces the first record matching `predicate` with `record`.
    ///
    /// Returns `false` without touching the document if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Persist` if the document cannot be written; the
    /// previous record is put back.
    pub fn put_one<P>(&self, predicate: P, record: T) -> CoreResult<bool>
    where
        P: Fn(&T) -> bool,
    {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let Some(index) = state.container.data.iter().position(|r| predicate(r)) else {
            return Ok(false);
        };

        let previous = std::mem::replace(&mut state.container.data[index], record);
        if let Err(err) = self.persist(state) {
            state.container.data[index] = previous;
            self.log_rollback("put_one", &err);
            return Err(err);
        }

        Ok(true)
    }

    /// Encodes the container and replaces the backing document.
    ///
    /// `count` is only brought up to date once the write has succeeded.
    fn persist(&self, state: &mut CollectionState<T>) -> CoreResult<()> {
        let bytes = encode_container(&state.container, self.config.json_style)
            .map_err(|e| CoreError::persist(&self.name, e))?;
        state
            .backend
            .store(&bytes)
            .map_err(|e| CoreError::persist(&self.name, e))?;
        state.container.sync_count();

        debug!(
            collection = %self.name,
            records = state.container.len(),
            bytes = bytes.len(),
            "collection persisted"
        );
        Ok(())
    }

    fn log_rollback(&self, operation: &str, err: &CoreError) {
        warn!(
            collection = %self.name,
            operation,
            error = %err,
            "persist failed, in-memory change rolled back"
        );
    }
}

impl<T: Record> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("count", &self.count())
            .finish()
    }
}

/// Re-interleaves records split by `delete_many` into their original order.
fn restore_order<T>(kept: Vec<T>, removed: Vec<T>, matches: &[bool]) -> Vec<T> {
    let mut kept = kept.into_iter();
    let mut removed = removed.into_iter();
    matches
        .iter()
        .filter_map(|matched| {
            if *matched {
                removed.next()
            } else {
                kept.next()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedb_codec::{encode_records, JsonStyle};
    use filedb_storage::InMemoryBackend;
    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        #[serde(rename = "_id")]
        id: String,
        x: u32,
    }

    impl Record for Item {
        fn record_id(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, x: u32) -> Item {
        Item {
            id: id.to_string(),
            x,
        }
    }

    fn seeded(records: &[Item]) -> (Collection<Item>, InMemoryBackend) {
        let bytes = encode_records(records, JsonStyle::Compact).unwrap();
        let backend = InMemoryBackend::with_data(bytes);
        let collection =
            Collection::with_backend("items", Box::new(backend.clone()), &Config::default())
                .unwrap();
        (collection, backend)
    }

    fn stored(backend: &InMemoryBackend) -> DataContainer<Item> {
        decode_container(&backend.data().unwrap()).unwrap()
    }

    #[test]
    fn open_reads_existing_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("items.json"),
            br#"{"count":2,"data":[{"_id":"a","x":1},{"_id":"b","x":2}]}"#,
        )
        .unwrap();

        let collection: Collection<Item> =
            Collection::open("items", dir.path(), &Config::default()).unwrap();

        assert_eq!(collection.name(), "items");
        assert_eq!(collection.count(), 2);
        assert_eq!(collection.get_all(), vec![item("a", 1), item("b", 2)]);
        assert!(collection.location().ends_with("items.json"));
    }

    #[test]
    fn open_missing_file_fails_without_creating_it() {
        let dir = tempdir().unwrap();

        let result = Collection::<Item>::open("items", dir.path(), &Config::default());
        assert!(matches!(result, Err(CoreError::Open { .. })));
        assert!(!dir.path().join("items.json").exists());
    }

    #[test]
    fn open_rejects_wrong_shape() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("items.json"),
            br#"{"count":1,"data":[{"_id":"a","x":"nope"}]}"#,
        )
        .unwrap();

        let result = Collection::<Item>::open("items", dir.path(), &Config::default());
        assert!(matches!(result, Err(CoreError::Open { .. })));
    }

    #[test]
    fn reopen_round_trip() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("items.json"), br#"{"count":0,"data":[]}"#).unwrap();

        {
            let collection: Collection<Item> =
                Collection::open("items", dir.path(), &Config::default()).unwrap();
            collection.append(item("a", 1)).unwrap();
            collection.append(item("b", 2)).unwrap();
            collection.append(item("c", 3)).unwrap();
            collection.delete_one(|i| i.id == "b").unwrap();
        }

        let reopened: Collection<Item> =
            Collection::open("items", dir.path(), &Config::default()).unwrap();
        assert_eq!(reopened.get_all(), vec![item("a", 1), item("c", 3)]);
        assert_eq!(reopened.count(), 2);
    }

    #[test]
    fn append_preserves_order() {
        let (collection, backend) = seeded(&[]);

        collection.append(item("r1", 1)).unwrap();
        collection.append(item("r2", 2)).unwrap();
        collection.append(item("r3", 3)).unwrap();

        let expected = vec![item("r1", 1), item("r2", 2), item("r3", 3)];
        assert_eq!(collection.get_all(), expected);
        assert_eq!(collection.count(), 3);
        assert_eq!(stored(&backend).into_records(), expected);
    }

    #[test]
    fn find_one_returns_first_match() {
        let (collection, _) = seeded(&[item("a", 1), item("b", 2), item("c", 2)]);

        assert_eq!(collection.find_one(|i| i.x == 2), Some(item("b", 2)));
        assert_eq!(collection.find_one(|i| i.x == 9), None);
        assert_eq!(collection.find_by_id("c"), Some(item("c", 2)));
    }

    #[test]
    fn find_returns_empty_vec_on_no_match() {
        let (collection, _) = seeded(&[item("a", 1), item("b", 2), item("c", 2)]);

        assert_eq!(collection.find(|i| i.x == 2), vec![item("b", 2), item("c", 2)]);
        assert!(collection.find(|i| i.x == 7).is_empty());
        assert!(collection.exists(|i| i.id == "a"));
        assert!(!collection.exists(|i| i.id == "z"));
    }

    #[test]
    fn delete_one_removes_first_match_in_order() {
        let (collection, backend) = seeded(&[item("a", 1), item("b", 2), item("c", 1)]);

        let removed = collection.delete_one(|i| i.x == 1).unwrap();
        assert_eq!(removed, Some(item("a", 1)));
        assert_eq!(collection.get_all(), vec![item("b", 2), item("c", 1)]);
        assert_eq!(collection.count(), 2);
        assert_eq!(stored(&backend).count, 2);
    }

    #[test]
    fn delete_many_removes_every_match() {
        let (collection, backend) =
            seeded(&[item("A", 1), item("B", 2), item("C", 1), item("D", 1)]);

        let removed = collection.delete_many(|i| i.x == 1).unwrap();

        assert_eq!(removed, 3);
        assert_eq!(collection.get_all(), vec![item("B", 2)]);
        assert_eq!(collection.count(), 1);
        assert_eq!(stored(&backend).into_records(), vec![item("B", 2)]);
    }

    #[test]
    fn delete_many_without_match_skips_write() {
        let (collection, backend) = seeded(&[item("a", 1)]);
        let before = backend.data();
        backend.fail_stores(true);

        assert_eq!(collection.delete_many(|i| i.x == 5).unwrap(), 0);
        assert_eq!(backend.data(), before);
    }

    #[test]
    fn patch_one_mutates_stored_record() {
        let (collection, backend) = seeded(&[item("a", 1), item("b", 2)]);

        let patched = collection.patch_one(|i| i.x == 1, |i| i.x = 10).unwrap();
        assert_eq!(patched, Some(item("a", 10)));

        // the old key no longer matches, the identifier does
        assert_eq!(collection.find_one(|i| i.x == 1), None);
        assert_eq!(collection.find_by_id("a"), Some(item("a", 10)));
        assert_eq!(stored(&backend).records()[0], item("a", 10));
    }

    #[test]
    fn put_one_replaces_whole_record() {
        let (collection, backend) = seeded(&[item("a", 1), item("b", 2)]);

        assert!(collection.put_one(|i| i.id == "b", item("b", 20)).unwrap());
        assert_eq!(collection.get_all(), vec![item("a", 1), item("b", 20)]);
        assert_eq!(stored(&backend).records()[1], item("b", 20));
    }

    #[test]
    fn absence_is_not_failure_and_writes_nothing() {
        let (collection, backend) = seeded(&[item("a", 1)]);
        let before = backend.data();
        // any write would now fail, so Ok results prove nothing was written
        backend.fail_stores(true);

        assert_eq!(collection.find_one(|i| i.id == "zz"), None);
        assert_eq!(collection.delete_one(|i| i.id == "zz").unwrap(), None);
        assert_eq!(collection.patch_one(|i| i.id == "zz", |i| i.x = 0).unwrap(), None);
        assert!(!collection.put_one(|i| i.id == "zz", item("zz", 0)).unwrap());
        assert_eq!(backend.data(), before);
    }

    #[test]
    fn returned_records_are_copies() {
        let (collection, _) = seeded(&[item("a", 1)]);

        let mut all = collection.get_all();
        all[0].x = 99;
        let mut one = collection.find_one(|i| i.id == "a").unwrap();
        one.x = 98;
        let mut patched = collection.patch_one(|i| i.id == "a", |i| i.x = 2).unwrap().unwrap();
        patched.x = 97;

        assert_eq!(collection.find_one(|i| i.id == "a"), Some(item("a", 2)));
        assert_eq!(collection.find(|i| i.id == "a"), vec![item("a", 2)]);
    }

    #[test]
    fn failed_append_rolls_back() {
        let (collection, backend) = seeded(&[item("a", 1)]);
        backend.fail_stores(true);

        let err = collection.append(item("b", 2)).unwrap_err();
        assert!(err.is_persist());
        assert_eq!(collection.get_all(), vec![item("a", 1)]);
        assert_eq!(collection.count(), 1);
    }

    #[test]
    fn failed_delete_one_restores_position() {
        let (collection, backend) = seeded(&[item("a", 1), item("b", 2), item("c", 3)]);
        backend.fail_stores(true);

        assert!(collection.delete_one(|i| i.id == "b").is_err());
        assert_eq!(
            collection.get_all(),
            vec![item("a", 1), item("b", 2), item("c", 3)]
        );
    }

    #[test]
    fn failed_delete_many_restores_interleaving() {
        let records = vec![item("A", 1), item("B", 2), item("C", 1), item("D", 3), item("E", 1)];
        let (collection, backend) = seeded(&records);
        backend.fail_stores(true);

        assert!(collection.delete_many(|i| i.x == 1).is_err());
        assert_eq!(collection.get_all(), records);
        assert_eq!(collection.count(), 5);
    }

    #[test]
    fn failed_patch_and_put_restore_value() {
        let (collection, backend) = seeded(&[item("a", 1)]);
        backend.fail_stores(true);

        assert!(collection.patch_one(|i| i.id == "a", |i| i.x = 5).is_err());
        assert!(collection.put_one(|i| i.id == "a", item("a", 6)).is_err());
        assert_eq!(collection.find_by_id("a"), Some(item("a", 1)));

        backend.fail_stores(false);
        collection.append(item("b", 2)).unwrap();
        assert_eq!(stored(&backend).into_records(), vec![item("a", 1), item("b", 2)]);
    }

    #[test]
    fn pretty_config_writes_indented_document() {
        let backend = InMemoryBackend::with_data(br#"{"count":0,"data":[]}"#.to_vec());
        let collection: Collection<Item> = Collection::with_backend(
            "items",
            Box::new(backend.clone()),
            &Config::new().pretty_json(true),
        )
        .unwrap();

        collection.append(item("a", 1)).unwrap();
        assert!(backend.data().unwrap().contains(&b'\n'));
    }

    proptest! {
        #[test]
        fn delete_many_matches_filter(xs in prop::collection::vec(0u32..4, 0..40), target in 0u32..4) {
            let records: Vec<Item> = xs
                .iter()
                .enumerate()
                .map(|(n, x)| item(&n.to_string(), *x))
                .collect();
            let (collection, backend) = seeded(&records);

            let removed = collection.delete_many(|i| i.x == target).unwrap();
            let expected: Vec<Item> = records.iter().filter(|i| i.x != target).cloned().collect();

            prop_assert_eq!(removed as usize, records.len() - expected.len());
            prop_assert_eq!(collection.get_all(), expected.clone());
            prop_assert_eq!(collection.count(), expected.len() as u64);
            if removed > 0 {
                prop_assert_eq!(stored(&backend).into_records(), expected);
            }
        }
    }
}
