//! # Create Command Implementation
//!
//! This module implements the `create` subcommand, which is also what runs
//! when `shelve` is given a bare patch name.
//!
//! ## Functionality
//!
//! - **Shelving**: Stores the working tree diff as a new patch and reverts the
//!   working tree, deleting files the change added.
//! - **Overwrite Prompt**: When the name is taken, asks whether to overwrite the
//!   existing patch or to pick a different name. `--force` overwrites without
//!   asking; without a terminal the command fails instead of prompting.

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::io::IsTerminal;

use shelve::output::emoji;
use shelve::repository::Repository;
use shelve::shelf::{CreateOutcome, Shelf};
use shelve::store::validate_name;
use shelve::suggestions;

use super::GlobalOptions;

/// Shelve all uncommitted changes as a new patch
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name of the patch to create
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Overwrite an existing patch with the same name without asking
    #[arg(short, long)]
    pub force: bool,
}

/// Execute the `create` command.
pub fn execute(args: CreateArgs, globals: &GlobalOptions) -> Result<()> {
    let shelf = globals.shelf()?;
    let output = &globals.output;

    let name = choose_name(&shelf, args.name, args.force)?;

    match shelf.create_patch(&name) {
        Ok(CreateOutcome::Created { removed_files }) => {
            for file_name in &removed_files {
                println!("  {} {}", emoji(output, "🗑️ ", "removed"), file_name);
            }
            println!(
                "{} Done shelving changes for patch {}.",
                emoji(output, "📦", "[OK]"),
                output.name(&name)
            );
            Ok(())
        }
        Ok(CreateOutcome::NothingToShelve) => {
            println!(
                "No changes in repository, patch {} not created.",
                output.name(&name)
            );
            Ok(())
        }
        Err(e) => Err(suggestions::explain(e, &[])),
    }
}

/// Resolves a name collision, by overwriting or by asking for another name.
fn choose_name(shelf: &Shelf<Repository>, mut name: String, force: bool) -> Result<String> {
    while shelf.store().contains(&name)? {
        if force {
            shelf.remove_patch(&name)?;
            break;
        }

        if !std::io::stdin().is_terminal() || !console::Term::stderr().is_term() {
            return Err(suggestions::patch_already_exists(&name));
        }

        let theme = ColorfulTheme::default();
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(format!("Patch '{}' already exists, overwrite?", name))
            .default(true)
            .interact()?;

        if overwrite {
            shelf.remove_patch(&name)?;
        } else {
            name = Input::with_theme(&theme)
                .with_prompt("Please provide a different patch name")
                .validate_with(|input: &String| validate_name(input).map_err(|e| e.to_string()))
                .interact_text()?;
        }
    }
    Ok(name)
}
