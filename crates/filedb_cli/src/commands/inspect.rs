//! Inspect command implementation.

use super::{print_json, Options};
use filedb_core::{DataDir, Database};
use serde::Serialize;

/// Per-collection details.
#[derive(Debug, Serialize)]
pub struct CollectionInfo {
    /// Collection name.
    pub name: String,
    /// Backing document.
    pub path: String,
    /// Document size in bytes.
    pub size_bytes: u64,
    /// Stored record count.
    pub count: u64,
}

/// Inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Data directory.
    pub path: String,
    /// Collections in the directory.
    pub collections: Vec<CollectionInfo>,
}

/// Runs the inspect command.
pub fn run(options: &Options, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let dir = DataDir::open(&options.path)?;
    let db = Database::open_with_config(&options.path, options.config())?;

    let lists = db.lists();
    let entries = db.entries();
    let mut collections = Vec::new();
    for (name, count) in [
        (lists.name().to_string(), lists.count()),
        (entries.name().to_string(), entries.count()),
    ] {
        let path = dir.collection_path(&name);
        let size_bytes = std::fs::metadata(&path)?.len();
        collections.push(CollectionInfo {
            name,
            path: path.display().to_string(),
            size_bytes,
            count,
        });
    }

    let result = InspectResult {
        path: options.path.display().to_string(),
        collections,
    };

    match format {
        "json" => print_json(&result)?,
        _ => {
            println!("Data directory: {}", result.path);
            println!();
            for info in &result.collections {
                println!("Collection: {}", info.name);
                println!("  File:    {}", info.path);
                println!("  Size:    {}", format_bytes(info.size_bytes));
                println!("  Records: {}", info.count);
            }
        }
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_units() {
        assert_eq!(format_bytes(12), "12 bytes");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MB");
    }
}
