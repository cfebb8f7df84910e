//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_patch("wip", "--- a/a\n+++ b/a\n");
//!     fixture.command().arg("list").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

pub mod scenarios;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::programs_available;
    pub use super::TestFixture;
}

/// A small unified diff against a file `a` containing `123`.
#[allow(dead_code)]
pub const SAMPLE_PATCH: &str = "\
--- a/a
+++ b/a
@@ -1 +1 @@
-123
+321
";

/// Check whether every program in `programs` can be started.
///
/// Integration tests drive the real `hg`, `svn` and `patch` binaries and
/// return early when one is missing.
#[allow(dead_code)]
pub fn programs_available(programs: &[&str]) -> bool {
    programs.iter().all(|program| {
        Command::new(program)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    })
}

/// A temporary directory holding a patch store and a working tree.
///
/// The working tree carries an empty `.hg` marker so repository discovery
/// succeeds. Commands that only touch the store never start `hg`.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new().with_patch("wip", SAMPLE_PATCH);
///
/// fixture.command()
///     .args(["show", "wip"])
///     .assert()
///     .success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a fixture with an empty shelf and a marked working tree.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("shelf")
            .create_dir_all()
            .expect("Failed to create shelf directory");
        temp_dir
            .child("work/.hg")
            .create_dir_all()
            .expect("Failed to create working tree marker");
        Self { temp_dir }
    }

    /// Store a patch record directly in the shelf.
    pub fn with_patch(self, name: &str, content: &str) -> Self {
        self.temp_dir
            .child("shelf")
            .child(name)
            .write_str(content)
            .expect("Failed to write patch");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the patch store.
    pub fn shelf_dir(&self) -> PathBuf {
        self.temp_dir.path().join("shelf")
    }

    /// Get the path to the working tree.
    pub fn work_dir(&self) -> PathBuf {
        self.temp_dir.path().join("work")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command running in the working tree against this shelf.
    pub fn command(&self) -> assert_cmd::Command {
        self.command_in(&self.work_dir())
    }

    /// Create a command running in `dir` against this shelf.
    pub fn command_in(&self, dir: &Path) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("shelve");
        cmd.current_dir(dir)
            .env("SHELVE_DIR", self.shelf_dir())
            .env("NO_COLOR", "1")
            .env_remove("CLICOLOR_FORCE");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let fixture = TestFixture::new();
        assert!(fixture.shelf_dir().is_dir());
        assert!(fixture.work_dir().join(".hg").is_dir());
    }

    #[test]
    fn test_fixture_with_patch() {
        let fixture = TestFixture::new().with_patch("wip", SAMPLE_PATCH);
        assert!(fixture.shelf_dir().join("wip").is_file());
    }
}
