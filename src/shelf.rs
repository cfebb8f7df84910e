//! # Shelf Engine
//!
//! The `Shelf` ties one working tree to the patch store and implements the two
//! halves of the shelve lifecycle:
//!
//! - [`Shelf::create_patch`] captures the pending diff as a new record and
//!   restores the working tree to its committed state.
//! - [`Shelf::apply_patch`] merges a record back into the working tree and
//!   reconciles the backend's view of which files exist.
//!
//! ## Status reconciliation
//!
//! Reverting or patching changes which files exist on disk, but neither the
//! backend's revert nor the external patch program updates the backend's
//! index for those files. Both operations are therefore bracketed by status
//! snapshots, and the entries that appear in between are fixed up:
//!
//! - After a revert, a file reported as unknown (`?`) was newly added by the
//!   shelved change. The revert unregistered it but left it on disk, so it is
//!   deleted.
//! - After applying a patch, a new unknown file was created by the patch and
//!   is registered with the backend. A newly missing file was deleted by the
//!   patch and is unregistered.
//!
//! ## Record lifecycle
//!
//! ```text
//! absent --create_patch--> stored --apply (clean)--> absent
//!                            |  ^
//!                            +--+ apply (conflicts)
//! ```

use std::fs;
use std::io;
use std::path::Path;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::repository::VersionControl;
use crate::store::PatchStore;

/// Result of [`Shelf::create_patch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The patch was stored and the working tree reverted.
    Created {
        /// Newly added files that were deleted from the working tree.
        removed_files: Vec<String>,
    },
    /// The working tree had no changes; no patch was stored.
    NothingToShelve,
}

impl CreateOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created { .. })
    }
}

/// Result of [`Shelf::apply_patch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Exit code of the patch program.
    pub exit_code: i32,
    /// Files created by the patch and registered with the backend.
    pub added: Vec<String>,
    /// Files deleted by the patch and unregistered from the backend.
    pub removed: Vec<String>,
}

impl ApplyOutcome {
    /// Whether the patch applied without conflicts.
    ///
    /// Only a clean application removes the record from the store.
    pub fn is_clean(&self) -> bool {
        self.exit_code == 0
    }
}

/// Shelves and restores changes of one working tree.
pub struct Shelf<R: VersionControl> {
    repository: R,
    store: PatchStore,
}

impl<R: VersionControl> Shelf<R> {
    pub fn new(repository: R, store: PatchStore) -> Self {
        Self { repository, store }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn store(&self) -> &PatchStore {
        &self.store
    }

    /// Names of all shelved patches, sorted.
    pub fn patches(&self) -> Result<Vec<String>> {
        self.store.list()
    }

    /// Contents of the shelved patch `name`.
    pub fn patch(&self, name: &str) -> Result<Vec<u8>> {
        self.store.read(name)
    }

    pub fn remove_patch(&self, name: &str) -> Result<()> {
        self.store.remove(name)
    }

    /// Shelves all pending changes of the working tree as patch `name`.
    ///
    /// On success the working tree is back at its committed state: tracked
    /// files are reverted and files the change added are deleted. The
    /// backend's index is not modified.
    ///
    /// Fails with [`Error::PatchAlreadyExists`] if `name` is taken. If a step
    /// after writing the patch fails, the patch stays in the store and the
    /// working tree may be only partially reverted.
    pub fn create_patch(&self, name: &str) -> Result<CreateOutcome> {
        if self.store.contains(name)? {
            return Err(Error::PatchAlreadyExists {
                name: name.to_string(),
            });
        }

        let diff = self.repository.diff()?;
        if diff.is_empty() {
            info!("No changes in repository, patch '{}' not created", name);
            return Ok(CreateOutcome::NothingToShelve);
        }

        self.store.write(name, &diff)?;

        let pre = self.repository.status()?;
        self.repository.revert_all()?;
        let changed = self.repository.status()?.changed_since(&pre);

        let removed_files = changed.added();
        for file_name in &removed_files {
            self.delete_from_working_tree(file_name)?;
        }

        info!(
            "Shelved changes as patch '{}' ({} new file(s) removed)",
            name,
            removed_files.len()
        );
        Ok(CreateOutcome::Created { removed_files })
    }

    /// Applies the shelved patch `name` to the working tree.
    ///
    /// Conflicting hunks are merged in place with conflict markers. Files the
    /// patch creates are added to the backend and files it deletes are
    /// removed. The patch is dropped from the store only if it applied
    /// cleanly.
    ///
    /// Fails with [`Error::PatchNotFound`] if `name` is not shelved.
    pub fn apply_patch(&self, name: &str) -> Result<ApplyOutcome> {
        if !self.store.contains(name)? {
            return Err(Error::PatchNotFound {
                name: name.to_string(),
            });
        }
        let patch_path = self.store.path_for(name)?;

        let pre = self.repository.status()?;
        let exit_code = self.repository.apply_patch(&patch_path)?;
        let changed = self.repository.status()?.changed_since(&pre);

        let added = changed.added();
        for file_name in &added {
            self.repository.add(std::slice::from_ref(file_name))?;
        }
        let removed = changed.removed();
        for file_name in &removed {
            self.repository.remove(std::slice::from_ref(file_name))?;
        }

        let outcome = ApplyOutcome {
            exit_code,
            added,
            removed,
        };
        if outcome.is_clean() {
            self.store.remove(name)?;
            info!("Applied patch '{}' cleanly, removed it from the shelf", name);
        } else {
            warn!(
                "Patch '{}' did not apply cleanly (exit code {}), keeping it",
                name, exit_code
            );
        }
        Ok(outcome)
    }

    fn delete_from_working_tree(&self, file_name: &str) -> Result<()> {
        let path = self.repository.root_path().join(file_name);
        match remove_path(&path) {
            Ok(()) => Ok(()),
            // Already gone
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

/// Removes a file, or a directory tree when the backend reported an added
/// directory as a single unknown entry.
fn remove_path(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
