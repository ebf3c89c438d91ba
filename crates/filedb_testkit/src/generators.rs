//! Property-based test generators using proptest.
//!
//! Strategies here produce records that satisfy the list/entry model:
//! non-empty names, unique ids and entries that point at generated lists.

use filedb_core::{Entry, List};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Strategy for record names (never empty).
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9][A-Za-z0-9 _-]{0,23}").expect("Invalid regex")
}

/// Strategy for a single list with a fresh id.
pub fn list_strategy() -> impl Strategy<Value = List> {
    name_strategy().prop_map(List::new)
}

/// Strategy for up to `max` lists.
pub fn lists_strategy(max: usize) -> impl Strategy<Value = Vec<List>> {
    prop::collection::vec(list_strategy(), 0..=max)
}

/// Strategy for lists plus entries that each reference one of them.
///
/// At least one list is always generated.
pub fn lists_with_entries_strategy(
    max_lists: usize,
    max_entries: usize,
) -> impl Strategy<Value = (Vec<List>, Vec<Entry>)> {
    prop::collection::vec(list_strategy(), 1..=max_lists.max(1)).prop_flat_map(move |lists| {
        let count = lists.len();
        let entries = prop::collection::vec(
            (0..count, name_strategy(), any::<bool>()),
            0..=max_entries,
        );
        (Just(lists), entries).prop_map(|(lists, raw)| {
            let entries = raw
                .into_iter()
                .map(|(owner, name, done)| Entry::new(lists[owner].id.clone(), name, done))
                .collect();
            (lists, entries)
        })
    })
}

/// Strategy for raw JSON documents whose `count` may disagree with `data`.
///
/// Yields the document bytes and whether `count` matches.
pub fn list_document_strategy() -> impl Strategy<Value = (Vec<u8>, bool)> {
    (lists_strategy(8), 0u64..10).prop_map(|(lists, declared)| {
        let data: Vec<Value> = lists
            .iter()
            .map(|list| json!({ "_id": list.id, "name": list.name }))
            .collect();
        let consistent = declared == data.len() as u64;
        let document = json!({ "count": declared, "data": data });
        let bytes = serde_json::to_vec(&document).expect("Failed to encode document");
        (bytes, consistent)
    })
}
