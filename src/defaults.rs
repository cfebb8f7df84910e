//! Default values for shelve configuration.
//!
//! This module provides centralized default values used across the library
//! and the commands, ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Name of the patch store directory inside the user's home directory.
pub const SHELF_DIR_NAME: &str = ".shelf";

/// Environment variable overriding the patch store directory.
pub const SHELF_DIR_ENV: &str = "SHELVE_DIR";

/// External program used to apply stored patches.
pub const PATCH_PROGRAM: &str = "patch";

/// Arguments passed to [`PATCH_PROGRAM`].
///
/// `-p1` strips the `a/` and `b/` prefixes written by `hg diff` and
/// `svn diff --git`. `--merge` leaves conflict markers in place of rejected
/// hunks, and no `.orig` files are written.
pub const PATCH_ARGS: &[&str] = &["-p1", "--no-backup-if-mismatch", "--merge"];

/// Returns the default patch store directory.
///
/// This is `~/.shelf`. Falls back to `.shelf` in the current directory if
/// the home directory cannot be determined.
///
/// This can be overridden by the `--shelf-dir` CLI flag or the
/// `SHELVE_DIR` environment variable.
pub fn default_shelf_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(SHELF_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(SHELF_DIR_NAME))
}
