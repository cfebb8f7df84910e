//! # Error Handling
//!
//! This module defines the error type shared by the repository adapter, the
//! patch store and the shelf engine. It uses `thiserror` to derive a single
//! `Error` enum whose variants map one-to-one onto the failure modes a caller
//! has to distinguish:
//!
//! - **`RepositoryNotFound`**: no supported backend claims the given path.
//! - **`PatchAlreadyExists`** / **`PatchNotFound`**: name-uniqueness and
//!   lookup failures in the patch store.
//! - **`InvalidPatchName`**: a name that cannot be used as a single file name
//!   inside the store directory.
//! - **`BackendCommand`**: a backend command whose failure cannot be ignored
//!   exited unsuccessfully.
//! - **`CommandSpawn`**: an external program could not be started at all.
//! - **`Io`**: any other filesystem failure.
//!
//! A patch that does not apply cleanly is reported through
//! [`ApplyOutcome`](crate::shelf::ApplyOutcome) and has no variant here.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for shelve operations
#[derive(Error, Debug)]
pub enum Error {
    /// No backend marker directory was found at or above the given path.
    #[error("No valid repository found at '{}'", path.display())]
    RepositoryNotFound { path: PathBuf },

    /// A patch with this name is already stored.
    #[error("Patch '{name}' already exists")]
    PatchAlreadyExists { name: String },

    /// No patch with this name is stored.
    #[error("Patch '{name}' does not exist")]
    PatchNotFound { name: String },

    /// The name cannot be used as a patch file name.
    #[error("Invalid patch name '{name}': {reason}")]
    InvalidPatchName { name: String, reason: String },

    /// A backend command exited with a nonzero status.
    ///
    /// `code` is `None` when the process was terminated by a signal.
    #[error(
        "Backend command failed: {command} ({}){}",
        code.map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {c}")),
        if stderr.trim().is_empty() { String::new() } else { format!(" - {}", stderr.trim()) }
    )]
    BackendCommand {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// An external program could not be started.
    #[error("Failed to run '{program}': {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
