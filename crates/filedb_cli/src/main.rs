//! filedb CLI
//!
//! Command-line shell over a filedb data directory.
//!
//! # Commands
//!
//! - `init` - Create the data directory and empty collection files
//! - `inspect` - Display collection counts and file sizes
//! - `verify` - Check documents and list/entry references
//! - `list` - Create, show, rename and delete lists
//! - `entry` - Create, show, update and delete entries

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// filedb command-line tools.
#[derive(Parser)]
#[command(name = "filedb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the data directory
    #[arg(global = true, short, long, env = "FILEDB_DATA_DIR", default_value = "data")]
    path: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Write indented JSON documents
    #[arg(global = true, long)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and seed missing collection files
    Init,

    /// Display collection counts and file sizes
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Verify documents and list/entry references
    Verify,

    /// Manage lists
    #[command(subcommand)]
    List(commands::lists::ListCommand),

    /// Manage entries
    #[command(subcommand)]
    Entry(commands::entries::EntryCommand),

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let options = commands::Options {
        path: cli.path,
        pretty: cli.pretty,
    };

    match cli.command {
        Commands::Init => commands::init::run(&options)?,
        Commands::Inspect { format } => commands::inspect::run(&options, &format)?,
        Commands::Verify => commands::verify::run(&options)?,
        Commands::List(command) => commands::lists::run(&options, command)?,
        Commands::Entry(command) => commands::entries::run(&options, command)?,
        Commands::Version => {
            println!("filedb CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("filedb core v{}", filedb_core::VERSION);
        }
    }

    Ok(())
}
