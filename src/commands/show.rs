//! # Show Command Implementation
//!
//! Writes the raw contents of a shelved patch to stdout, byte for byte, so
//! the output can be piped into other tools.

use anyhow::Result;
use clap::Args;
use std::io::{self, Write};

use super::GlobalOptions;

/// Print the contents of a shelved patch
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Name of the patch to show
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Execute the `show` command.
pub fn execute(args: ShowArgs, globals: &GlobalOptions) -> Result<()> {
    let store = globals.store()?;
    let content = store
        .read(&args.name)
        .map_err(|e| super::explain(e, &store))?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&content)?;
    stdout.flush()?;
    Ok(())
}
