//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use shelve::defaults::SHELF_DIR_ENV;

use crate::commands;

/// Shelve uncommitted changes as named patches, similar to `git stash`
#[derive(Parser, Debug)]
#[command(name = "shelve")]
#[command(version, about, long_about = None)]
#[command(after_help = "Running `shelve <NAME>` without a subcommand is the same as `shelve create <NAME>`.")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,

    /// Name of the patch to create when no subcommand is given
    #[arg(value_name = "NAME")]
    name: Option<String>,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Options shared by all subcommands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Directory holding the shelved patches.
    ///
    /// Defaults to `~/.shelf`.
    #[arg(long, global = true, value_name = "DIR", env = SHELF_DIR_ENV)]
    pub shelf_dir: Option<PathBuf>,

    /// Path inside the working tree to operate on (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub repository: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Shelve all uncommitted changes as a new patch and revert the working tree
    Create(commands::create::CreateArgs),

    /// Apply a shelved patch, removing it from the shelf if it applies cleanly
    Apply(commands::apply::ApplyArgs),

    /// List all shelved patches
    #[command(visible_alias = "ls")]
    List(commands::list::ListArgs),

    /// Show the contents of a shelved patch
    Show(commands::show::ShowArgs),

    /// Remove a patch from the shelf
    #[command(visible_alias = "rm")]
    Remove(commands::remove::RemoveArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(self.global.log_level.as_str()),
        )
        .format_timestamp(None)
        .init();

        let globals = commands::GlobalOptions::from(self.global);

        match (self.command, self.name) {
            (Some(_), Some(name)) => anyhow::bail!(
                "Unexpected patch name '{}' before the subcommand",
                name
            ),
            (Some(Commands::Create(args)), None) => commands::create::execute(args, &globals),
            (Some(Commands::Apply(args)), None) => commands::apply::execute(args, &globals),
            (Some(Commands::List(args)), None) => commands::list::execute(args, &globals),
            (Some(Commands::Show(args)), None) => commands::show::execute(args, &globals),
            (Some(Commands::Remove(args)), None) => commands::remove::execute(args, &globals),
            (Some(Commands::Completions(args)), None) => commands::completions::execute(args),
            (None, Some(name)) => commands::create::execute(
                commands::create::CreateArgs { name, force: false },
                &globals,
            ),
            (None, None) => {
                Cli::command().print_help()?;
                Ok(())
            }
        }
    }
}
