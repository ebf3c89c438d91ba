//! Init command implementation.

use super::Options;
use filedb_core::{DataDir, COLLECTIONS};
use tracing::info;

/// Runs the init command.
pub fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let created = DataDir::init(&options.path, &COLLECTIONS, options.config().json_style)?;

    if created.is_empty() {
        info!(path = %options.path.display(), "data directory already initialized");
        println!("Nothing to do: {} is already initialized", options.path.display());
    } else {
        for path in &created {
            println!("Created {}", path.display());
        }
    }

    Ok(())
}
