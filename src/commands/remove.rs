//! # Remove Command Implementation
//!
//! Deletes a shelved patch without applying it.

use anyhow::Result;
use clap::Args;

use shelve::output::emoji;

use super::GlobalOptions;

/// Remove a shelved patch
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Name of the patch to remove
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Execute the `remove` command.
pub fn execute(args: RemoveArgs, globals: &GlobalOptions) -> Result<()> {
    let store = globals.store()?;
    let output = &globals.output;

    store
        .remove(&args.name)
        .map_err(|e| super::explain(e, &store))?;

    println!(
        "{} Patch {} successfully removed.",
        emoji(output, "🗑️ ", "[OK]"),
        output.name(&args.name)
    );
    Ok(())
}
