//! Entry subcommands.

use super::{not_found, print_json, Options};
use clap::Subcommand;
use filedb_core::{EntryPatch, NewEntry};

/// Operations on entries.
#[derive(Debug, Subcommand)]
pub enum EntryCommand {
    /// Print entries
    Ls {
        /// Only entries of this list
        #[arg(long)]
        list: Option<String>,
    },

    /// Print one entry
    Show {
        /// Entry id
        id: String,
    },

    /// Create an entry in an existing list
    Add {
        /// Owning list id
        list_id: String,

        /// Entry name
        name: String,

        /// Mark the entry as done
        #[arg(long)]
        done: bool,
    },

    /// Change fields of an entry
    Update {
        /// Entry id
        id: String,

        /// Move the entry to this list
        #[arg(long)]
        list: Option<String>,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New completion state
        #[arg(long)]
        done: Option<bool>,
    },

    /// Delete an entry
    Rm {
        /// Entry id
        id: String,
    },
}

/// Runs an entry subcommand.
pub fn run(options: &Options, command: EntryCommand) -> Result<(), Box<dyn std::error::Error>> {
    let todos = options.service()?;

    match command {
        EntryCommand::Ls { list: Some(list_id) } => {
            if !todos.list_exists(&list_id) {
                return Err(not_found("list", &list_id));
            }
            print_json(&todos.entries_of_list(&list_id))?;
        }
        EntryCommand::Ls { list: None } => print_json(&todos.all_entries())?,
        EntryCommand::Show { id } => {
            let entry = todos.entry(&id).ok_or_else(|| not_found("entry", &id))?;
            print_json(&entry)?;
        }
        EntryCommand::Add {
            list_id,
            name,
            done,
        } => {
            let entry = todos.create_entry(NewEntry {
                list_id,
                name,
                done,
            })?;
            print_json(&entry)?;
        }
        EntryCommand::Update {
            id,
            list,
            name,
            done,
        } => {
            let patch = EntryPatch {
                list_id: list,
                name,
                done,
            };
            if patch.is_empty() {
                return Err("nothing to update: pass --list, --name or --done".into());
            }
            let entry = todos.patch_entry(&id, patch)?.ok_or_else(|| not_found("entry", &id))?;
            print_json(&entry)?;
        }
        EntryCommand::Rm { id } => {
            let entry = todos.delete_entry(&id)?.ok_or_else(|| not_found("entry", &id))?;
            println!("Deleted entry {}", entry.id);
        }
    }

    Ok(())
}
