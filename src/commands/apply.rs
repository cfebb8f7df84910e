//! # Apply Command Implementation
//!
//! Merges a shelved patch back into the working tree. Hunks that do not apply
//! are merged with conflict markers, and the patch stays on the shelf so it
//! can be applied again or inspected. A clean apply drops the patch.
//!
//! A conflicting apply is reported but is not a failure: the exit status is
//! zero either way.

use anyhow::Result;
use clap::Args;

use shelve::output::emoji;

use super::GlobalOptions;

/// Apply a shelved patch to the working tree
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Name of the patch to apply
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Execute the `apply` command.
pub fn execute(args: ApplyArgs, globals: &GlobalOptions) -> Result<()> {
    let shelf = globals.shelf()?;
    let output = &globals.output;

    let outcome = shelf
        .apply_patch(&args.name)
        .map_err(|e| super::explain(e, shelf.store()))?;

    for file_name in &outcome.added {
        println!("  {} {}", emoji(output, "➕", "added"), file_name);
    }
    for file_name in &outcome.removed {
        println!("  {} {}", emoji(output, "➖", "removed"), file_name);
    }

    if outcome.is_clean() {
        println!(
            "{} Applying patch {} succeeded, shelved patch has been removed.",
            emoji(output, "✅", "[OK]"),
            output.name(&args.name)
        );
    } else {
        println!(
            "{} Patch {} did not apply cleanly, shelved patch was kept.",
            emoji(output, "⚠️ ", "[WARN]"),
            output.name(&args.name)
        );
    }
    Ok(())
}
