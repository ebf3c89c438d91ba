//! Benchmark utilities.

use filedb_core::{Entry, List};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random alphanumeric name of `len` characters.
pub fn random_name(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate `count` lists with random names.
pub fn generate_lists(count: usize) -> Vec<List> {
    (0..count).map(|_| List::new(random_name(16))).collect()
}

/// Generate `count` entries spread randomly over `lists`.
///
/// Roughly half of them are done.
pub fn generate_entries(lists: &[List], count: usize) -> Vec<Entry> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let owner = &lists[rng.gen_range(0..lists.len())];
            Entry::new(owner.id.clone(), random_name(24), rng.gen())
        })
        .collect()
}
