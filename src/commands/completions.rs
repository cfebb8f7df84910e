//! # Completions Command Implementation
//!
//! Generates shell completion scripts with `clap_complete`. The script covers
//! every subcommand and global option of `shelve`. Patch names are not
//! completed: they live in the shelf directory, which the script cannot see
//! without running `shelve list`.
//!
//! ## Example
//!
//! ```bash
//! shelve completions bash > ~/.local/share/bash-completion/completions/shelve
//! shelve completions zsh > ~/.zfunc/_shelve
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::Cli;

/// Shell types for completion generation
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Fish Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish Shell
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::PowerShell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

/// Execute the `completions` command, writing the script to stdout.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut stdout = io::stdout().lock();
    render(args.shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}

fn render(shell: CompletionShell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(Shell::from(shell), &mut cmd, bin_name, out);
}
