//! # List Command Implementation
//!
//! Prints the names of all shelved patches, one per line and sorted. With
//! `--json` the output is an array of objects carrying the name and the size
//! of each patch in bytes.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::GlobalOptions;

/// List all shelved patches
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the list as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct PatchEntry {
    name: String,
    size: u64,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, globals: &GlobalOptions) -> Result<()> {
    let store = globals.store()?;
    let names = store.list()?;

    if args.json {
        let entries = names
            .into_iter()
            .map(|name| -> Result<PatchEntry> {
                let size = std::fs::metadata(store.path_for(&name)?)?.len();
                Ok(PatchEntry { name, size })
            })
            .collect::<Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for name in names {
        println!("{}", name);
    }
    Ok(())
}
