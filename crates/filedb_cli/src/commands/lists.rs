//! List subcommands.

use super::{not_found, print_json, Options};
use clap::Subcommand;
use filedb_core::{ListPatch, NewList};

/// Operations on lists.
#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// Print every list
    Ls,

    /// Print one list
    Show {
        /// List id
        id: String,

        /// Include the list's entries
        #[arg(long)]
        entries: bool,
    },

    /// Create a list
    Add {
        /// List name
        name: String,
    },

    /// Rename a list
    Rename {
        /// List id
        id: String,

        /// New name
        name: String,
    },

    /// Delete a list and all of its entries
    Rm {
        /// List id
        id: String,
    },
}

/// Runs a list subcommand.
pub fn run(options: &Options, command: ListCommand) -> Result<(), Box<dyn std::error::Error>> {
    let todos = options.service()?;

    match command {
        ListCommand::Ls => print_json(&todos.all_lists())?,
        ListCommand::Show { id, entries: true } => {
            let found = todos.list_with_entries(&id).ok_or_else(|| not_found("list", &id))?;
            print_json(&found)?;
        }
        ListCommand::Show { id, entries: false } => {
            let found = todos.list(&id).ok_or_else(|| not_found("list", &id))?;
            print_json(&found)?;
        }
        ListCommand::Add { name } => {
            let list = todos.create_list(NewList { name })?;
            print_json(&list)?;
        }
        ListCommand::Rename { id, name } => {
            let patch = ListPatch { name: Some(name) };
            let list = todos.patch_list(&id, patch)?.ok_or_else(|| not_found("list", &id))?;
            print_json(&list)?;
        }
        ListCommand::Rm { id } => {
            let removed = todos.delete_list(&id)?.ok_or_else(|| not_found("list", &id))?;
            println!(
                "Deleted list {} and {} entr{}",
                removed.list.id,
                removed.entries_removed,
                if removed.entries_removed == 1 { "y" } else { "ies" }
            );
        }
    }

    Ok(())
}
