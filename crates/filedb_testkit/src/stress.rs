//! Stress helpers for concurrent access.
//!
//! Each helper drives a [`Database`] from several threads and reports how
//! many operations went through. Callers assert on the resulting record
//! counts to detect lost updates.

use filedb_core::{Database, Entry, List, NewEntry, TodoService};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Successful operations.
    pub successful_ops: usize,
    /// Failed operations.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }

    fn merge(results: impl IntoIterator<Item = (usize, usize)>, duration: Duration) -> Self {
        let (successful, failed) = results
            .into_iter()
            .fold((0, 0), |(s, f), (ds, df)| (s + ds, f + df));
        Self::new(successful, failed, duration)
    }

    /// Prints a summary of the test.
    pub fn print_summary(&self, name: &str) {
        println!("\n=== {name} ===");
        println!("Total operations: {}", self.total_ops);
        println!("Successful: {}", self.successful_ops);
        println!("Failed: {}", self.failed_ops);
        println!("Duration: {:?}", self.duration);
        println!("Throughput: {:.2} ops/sec", self.ops_per_second);
    }
}

/// Configuration for stress runs.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Operations per thread.
    pub operations: usize,
    /// Number of concurrent threads.
    pub threads: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            operations: 100,
            threads: 4,
        }
    }
}

/// Appends lists from every thread at once.
pub fn stress_concurrent_list_appends(db: &Arc<Database>, config: &StressConfig) -> StressTestResult {
    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let lists = db.lists();
            let operations = config.operations;
            thread::spawn(move || {
                let mut outcome = (0, 0);
                for i in 0..operations {
                    match lists.append(List::new(format!("t{t}-{i}"))) {
                        Ok(()) => outcome.0 += 1,
                        Err(_) => outcome.1 += 1,
                    }
                }
                outcome
            })
        })
        .collect();

    let results = handles
        .into_iter()
        .map(|h| h.join().expect("Stress thread panicked"));
    StressTestResult::merge(results, start.elapsed())
}

/// Mixes entry creation with cascading deletes of other lists.
///
/// `keep` must already exist; each thread creates entries in it while also
/// creating and deleting a scratch list of its own. Afterwards `keep` must
/// own exactly the successful entry creations.
pub fn stress_mixed_entries(
    todos: &TodoService,
    keep: &List,
    config: &StressConfig,
) -> StressTestResult {
    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let todos = todos.clone();
            let keep_id = keep.id.clone();
            let operations = config.operations;
            thread::spawn(move || {
                let mut outcome = (0, 0);
                for i in 0..operations {
                    let created = todos.create_entry(NewEntry {
                        list_id: keep_id.clone(),
                        name: format!("t{t}-{i}"),
                        done: false,
                    });
                    match created {
                        Ok(_) => outcome.0 += 1,
                        Err(_) => outcome.1 += 1,
                    }

                    let scratch = List::new(format!("scratch t{t}-{i}"));
                    let scratch_id = scratch.id.clone();
                    if todos.database().lists().append(scratch).is_ok() {
                        let _ = todos
                            .database()
                            .entries()
                            .append(Entry::new(scratch_id.clone(), "doomed", false));
                        let _ = todos.delete_list(&scratch_id);
                    }
                }
                outcome
            })
        })
        .collect();

    let results = handles
        .into_iter()
        .map(|h| h.join().expect("Stress thread panicked"));
    StressTestResult::merge(results, start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_throughput() {
        let result = StressTestResult::new(90, 10, Duration::from_secs(2));
        assert_eq!(result.total_ops, 100);
        assert!((result.ops_per_second - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn concurrent_appends_in_memory() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let config = StressConfig {
            operations: 50,
            threads: 4,
        };

        let result = stress_concurrent_list_appends(&db, &config);

        assert_eq!(result.failed_ops, 0);
        assert_eq!(db.lists().count(), 200);
    }
}
