//! # Repository Adapter
//!
//! This module provides a uniform interface over the version control systems
//! shelve supports. The shelf engine never spawns backend processes itself; it
//! only talks to the [`VersionControl`] trait.
//!
//! ## Design
//!
//! - **`VersionControl`**: the capability set the engine needs (add, remove,
//!   diff, revert, status, apply a patch, commit, init). Keeping this a trait
//!   lets the engine be tested against a mock without any backend installed.
//!
//! - **`Repository`**: the production implementation. It pairs a root path
//!   with a closed [`Backend`] variant, and every operation runs the backend's
//!   command with the root as working directory.
//!
//! - **Discovery**: [`Repository::discover`] tries each backend's resolver in
//!   [`Backend::ALL`] order and returns the first match.
//!
//! ## Failure semantics
//!
//! `add` and `remove` are best effort: a nonzero exit is logged and otherwise
//! ignored. `diff`, `status`, `revert_all`, `init` and `commit` report a
//! nonzero exit as [`Error::BackendCommand`]. The exit code of
//! `apply_patch` is returned to the caller, since conflicts are expected.

pub mod backend;
pub mod command;

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::defaults::{PATCH_ARGS, PATCH_PROGRAM};
use crate::error::{Error, Result};
use crate::status::StatusSnapshot;

pub use backend::Backend;
use command::Invocation;

/// Exit code reported for a patch process that was terminated by a signal.
const PATCH_KILLED_EXIT_CODE: i32 = -1;

/// Operations the shelf engine requires from a version control system.
pub trait VersionControl {
    /// Absolute path of the working tree root.
    fn root_path(&self) -> &Path;

    /// Registers the given paths, relative to the root, with the backend.
    fn add(&self, file_names: &[String]) -> Result<()>;

    /// Unregisters the given paths, relative to the root, from the backend.
    fn remove(&self, file_names: &[String]) -> Result<()>;

    /// Returns the unified diff of all pending changes.
    fn diff(&self) -> Result<Vec<u8>>;

    /// Reverts all changes to tracked files without creating backup files.
    fn revert_all(&self) -> Result<()>;

    /// Returns the current added/removed entries of the working tree.
    fn status(&self) -> Result<StatusSnapshot>;

    /// Applies the patch at `patch_path`, merging conflicting hunks in place.
    ///
    /// Returns the exit code of the patch program; 0 means it applied cleanly.
    fn apply_patch(&self, patch_path: &Path) -> Result<i32>;

    /// Commits all changes with the given message.
    fn commit(&self, message: &str) -> Result<()>;

    /// Creates a new repository at the root path.
    fn init(&self) -> Result<()>;
}

/// A working tree managed by one of the supported backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    root_path: PathBuf,
    backend: Backend,
}

impl Repository {
    /// Finds the repository containing `path`.
    ///
    /// Returns [`Error::RepositoryNotFound`] if no backend claims the path.
    pub fn discover(path: &Path) -> Result<Self> {
        let absolute = absolute_path(path)?;
        for backend in Backend::ALL {
            if let Some(root_path) = backend.resolve_root(&absolute) {
                debug!("{} repository found at {}", backend, root_path.display());
                return Ok(Self { root_path, backend });
            }
        }
        Err(Error::RepositoryNotFound {
            path: path.to_path_buf(),
        })
    }

    /// Finds the `backend` repository containing `path`, creating one at
    /// `path` when there is none.
    ///
    /// The directory is created first if it does not exist yet.
    pub fn open_or_create(path: &Path, backend: Backend) -> Result<Self> {
        if path.exists() {
            if let Some(root_path) = backend.resolve_root(&absolute_path(path)?) {
                return Ok(Self { root_path, backend });
            }
        } else {
            fs::create_dir_all(path)?;
        }

        let repository = Self {
            root_path: absolute_path(path)?,
            backend,
        };
        info!(
            "Creating {} repository at {}",
            backend,
            repository.root_path.display()
        );
        repository.init()?;
        Ok(repository)
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    fn run_checked(&self, invocation: &Invocation) -> Result<Vec<u8>> {
        command::run_checked(&self.root_path, invocation).map(|output| output.stdout)
    }
}

impl VersionControl for Repository {
    fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn add(&self, file_names: &[String]) -> Result<()> {
        if file_names.is_empty() {
            return Ok(());
        }
        command::run_logged(&self.root_path, &self.backend.add(file_names))
    }

    fn remove(&self, file_names: &[String]) -> Result<()> {
        if file_names.is_empty() {
            return Ok(());
        }
        command::run_logged(&self.root_path, &self.backend.remove(file_names))
    }

    fn diff(&self) -> Result<Vec<u8>> {
        self.run_checked(&self.backend.diff())
    }

    fn revert_all(&self) -> Result<()> {
        self.run_checked(&self.backend.revert_all()).map(drop)
    }

    fn status(&self) -> Result<StatusSnapshot> {
        let stdout = self.run_checked(&self.backend.status())?;
        Ok(StatusSnapshot::parse(&String::from_utf8_lossy(&stdout)))
    }

    fn apply_patch(&self, patch_path: &Path) -> Result<i32> {
        let invocation = Invocation::new(PATCH_PROGRAM, PATCH_ARGS.iter().copied());
        let patch = File::open(patch_path)?;
        let output = command::run(&self.root_path, &invocation, Some(patch))?;
        if !output.success() {
            debug!(
                "`{}` reported: {}{}",
                invocation,
                output.stdout_lossy().trim(),
                output.stderr_lossy().trim()
            );
        }
        Ok(output.code.unwrap_or(PATCH_KILLED_EXIT_CODE))
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run_checked(&self.backend.commit(message)).map(drop)
    }

    fn init(&self) -> Result<()> {
        for invocation in self.backend.init(&self.root_path) {
            self.run_checked(&invocation)?;
        }
        Ok(())
    }
}

/// Makes `path` absolute and resolves symlinks when the path exists.
fn absolute_path(path: &Path) -> Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(canonical) => Ok(canonical),
        Err(_) if path.is_absolute() => Ok(path.to_path_buf()),
        Err(_) => Ok(std::env::current_dir()?.join(path)),
    }
}
