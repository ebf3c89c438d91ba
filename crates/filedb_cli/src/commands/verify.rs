//! Verify command implementation.
//!
//! Reads every collection document directly through the storage layer,
//! without opening a [`filedb_core::Database`], so a damaged document is
//! reported instead of aborting the run.

use super::Options;
use filedb_codec::{decode_container, CodecError, DataContainer};
use filedb_core::{DataDir, Entry, List, Record, ENTRY_COLLECTION, LIST_COLLECTION};
use filedb_storage::{FileBackend, StorageBackend};
use std::collections::HashSet;
use std::path::Path;

/// Verification result.
#[derive(Debug, Default)]
pub struct VerifyResult {
    /// Documents checked.
    pub documents: Vec<DocumentCheck>,
    /// Entries whose `listId` names no stored list.
    pub orphaned_entries: Vec<String>,
    /// Problems found.
    pub errors: Vec<String>,
}

/// Outcome of checking one document.
#[derive(Debug)]
pub struct DocumentCheck {
    /// Collection name.
    pub collection: String,
    /// Records decoded, if the document was readable.
    pub records: Option<u64>,
    /// Whether the document passed.
    pub ok: bool,
}

impl VerifyResult {
    fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the verify command.
pub fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let dir = DataDir::open(&options.path)?;

    println!("Verifying {}...", options.path.display());
    let result = verify_dir(&dir);

    for doc in &result.documents {
        let records = doc
            .records
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        let status = if doc.ok { "OK" } else { "FAILED" };
        println!("  {:<8} records={:<8} {}", doc.collection, records, status);
    }
    println!("  orphaned entries: {}", result.orphaned_entries.len());
    for error in &result.errors {
        println!("  error: {error}");
    }

    if result.is_valid() {
        println!("Verification passed");
        Ok(())
    } else {
        Err(format!("verification failed with {} problem(s)", result.errors.len()).into())
    }
}

/// Checks both documents of `dir` and the references between them.
fn verify_dir(dir: &DataDir) -> VerifyResult {
    let mut result = VerifyResult::default();

    let lists: Option<DataContainer<List>> =
        check_document(&dir.collection_path(LIST_COLLECTION), LIST_COLLECTION, &mut result);
    let entries: Option<DataContainer<Entry>> =
        check_document(&dir.collection_path(ENTRY_COLLECTION), ENTRY_COLLECTION, &mut result);

    if let (Some(lists), Some(entries)) = (&lists, &entries) {
        let list_ids: HashSet<&str> = lists.records().iter().map(Record::record_id).collect();
        for entry in entries.records() {
            if !list_ids.contains(entry.list_id.as_str()) {
                result.orphaned_entries.push(entry.id.clone());
                result.errors.push(format!(
                    "entry {} references missing list {}",
                    entry.id, entry.list_id
                ));
            }
        }
    }

    result
}

fn check_document<T: Record>(
    path: &Path,
    name: &str,
    result: &mut VerifyResult,
) -> Option<DataContainer<T>> {
    let bytes = match FileBackend::open(path).and_then(|backend| backend.load()) {
        Ok(bytes) => bytes,
        Err(e) => {
            result.errors.push(format!("{name}: {e}"));
            result.documents.push(DocumentCheck {
                collection: name.to_string(),
                records: None,
                ok: false,
            });
            return None;
        }
    };

    let container = match decode_container::<T>(&bytes) {
        Ok(container) => container,
        Err(CodecError::CountMismatch { declared, actual }) => {
            result.errors.push(format!(
                "{name}: count is {declared} but data holds {actual} record(s)"
            ));
            result.documents.push(DocumentCheck {
                collection: name.to_string(),
                records: Some(actual),
                ok: false,
            });
            return None;
        }
        Err(e) => {
            result.errors.push(format!("{name}: {e}"));
            result.documents.push(DocumentCheck {
                collection: name.to_string(),
                records: None,
                ok: false,
            });
            return None;
        }
    };

    let mut seen = HashSet::new();
    let mut ok = true;
    for record in container.records() {
        if !seen.insert(record.record_id()) {
            ok = false;
            result
                .errors
                .push(format!("{name}: duplicate id {}", record.record_id()));
        }
    }

    result.documents.push(DocumentCheck {
        collection: name.to_string(),
        records: Some(container.len() as u64),
        ok,
    });
    Some(container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedb_codec::JsonStyle;
    use filedb_core::COLLECTIONS;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn data_dir(lists: &str, entries: &str) -> (TempDir, DataDir) {
        let temp = tempdir().unwrap();
        DataDir::init(temp.path(), &COLLECTIONS, JsonStyle::Compact).unwrap();
        fs::write(temp.path().join("list.json"), lists).unwrap();
        fs::write(temp.path().join("entry.json"), entries).unwrap();
        let dir = DataDir::open(temp.path()).unwrap();
        (temp, dir)
    }

    #[test]
    fn consistent_directory_passes() {
        let (_temp, dir) = data_dir(
            r#"{"count":1,"data":[{"_id":"l1","name":"Home"}]}"#,
            r#"{"count":1,"data":[{"_id":"e1","listId":"l1","name":"Dishes","done":false}]}"#,
        );

        let result = verify_dir(&dir);

        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(result.documents.iter().all(|d| d.ok));
        assert_eq!(result.documents[1].records, Some(1));
    }

    #[test]
    fn reports_orphaned_entries() {
        let (_temp, dir) = data_dir(
            r#"{"count":1,"data":[{"_id":"l1","name":"Home"}]}"#,
            r#"{"count":2,"data":[
                {"_id":"e1","listId":"l1","name":"Dishes","done":false},
                {"_id":"e2","listId":"gone","name":"Mail","done":true}
            ]}"#,
        );

        let result = verify_dir(&dir);

        assert_eq!(result.orphaned_entries, vec!["e2".to_string()]);
        assert!(!result.is_valid());
    }

    #[test]
    fn reports_duplicate_ids() {
        let (_temp, dir) = data_dir(
            r#"{"count":2,"data":[{"_id":"l1","name":"A"},{"_id":"l1","name":"B"}]}"#,
            r#"{"count":0,"data":[]}"#,
        );

        let result = verify_dir(&dir);

        assert!(!result.documents[0].ok);
        assert_eq!(result.errors, vec!["list: duplicate id l1".to_string()]);
    }

    #[test]
    fn reports_count_mismatch_and_skips_references() {
        let (_temp, dir) = data_dir(
            r#"{"count":0,"data":[]}"#,
            r#"{"count":3,"data":[{"_id":"e1","listId":"l1","name":"x","done":false}]}"#,
        );

        let result = verify_dir(&dir);

        assert_eq!(result.documents[1].records, Some(1));
        assert!(!result.documents[1].ok);
        assert!(result.orphaned_entries.is_empty());
        assert_eq!(result.errors.len(), 1);
    }
}
