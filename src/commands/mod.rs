//! # CLI Command Implementations
//!
//! Each subcommand of `shelve` lives in its own file and follows the same
//! shape:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` together with the
//!   [`GlobalOptions`] and calls into the `shelve` library.
//!
//! Commands that only touch the patch store (`list`, `show`, `remove`) never
//! look for a repository, so they also work outside a working tree.

pub mod apply;
pub mod completions;
pub mod create;
pub mod list;
pub mod remove;
pub mod show;

use anyhow::Result;
use std::path::PathBuf;

use shelve::defaults::default_shelf_dir;
use shelve::output::OutputConfig;
use shelve::repository::Repository;
use shelve::shelf::Shelf;
use shelve::store::PatchStore;
use shelve::suggestions;

use crate::cli::GlobalArgs;

/// Resolved global options shared by all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub shelf_dir: PathBuf,
    pub repository: PathBuf,
    pub output: OutputConfig,
}

impl From<GlobalArgs> for GlobalOptions {
    fn from(args: GlobalArgs) -> Self {
        Self {
            shelf_dir: args.shelf_dir.unwrap_or_else(default_shelf_dir),
            repository: args.repository.unwrap_or_else(|| PathBuf::from(".")),
            output: OutputConfig::from_env_and_flag(&args.color),
        }
    }
}

impl GlobalOptions {
    /// Opens the patch store, creating its directory if needed.
    pub fn store(&self) -> Result<PatchStore> {
        Ok(PatchStore::open(&self.shelf_dir)?)
    }

    /// Binds the patch store to the repository containing `self.repository`.
    pub fn shelf(&self) -> Result<Shelf<Repository>> {
        let repository =
            Repository::discover(&self.repository).map_err(|e| suggestions::explain(e, &[]))?;
        Ok(Shelf::new(repository, self.store()?))
    }
}

/// Maps a library error to a hinted error, suggesting similar patch names.
pub fn explain(error: shelve::Error, store: &PatchStore) -> anyhow::Error {
    let known = store.list().unwrap_or_default();
    suggestions::explain(error, &known)
}
