//! Supported version control backends.
//!
//! Each backend is identified by the metadata directory it keeps at the root
//! of a working tree and knows how to spell the adapter operations as
//! command-line invocations. Discovery walks [`Backend::ALL`] in order and
//! the first backend that finds its marker claims the path.

use std::fmt;
use std::path::{Path, PathBuf};

use super::command::Invocation;

/// A version control system the adapter can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Mercurial,
    Subversion,
}

impl Backend {
    /// All backends, in the order they are tried during discovery.
    pub const ALL: [Backend; 2] = [Backend::Mercurial, Backend::Subversion];

    pub fn name(self) -> &'static str {
        match self {
            Backend::Mercurial => "Mercurial",
            Backend::Subversion => "Subversion",
        }
    }

    /// Client executable.
    pub fn program(self) -> &'static str {
        match self {
            Backend::Mercurial => "hg",
            Backend::Subversion => "svn",
        }
    }

    /// Metadata directory marking the root of a working tree.
    pub fn marker(self) -> &'static str {
        match self {
            Backend::Mercurial => ".hg",
            Backend::Subversion => ".svn",
        }
    }

    /// Finds the root of a working tree of this backend containing `path`.
    ///
    /// Walks from `path` up through its ancestors and returns the first
    /// directory holding the marker, or `None` once the filesystem root has
    /// been checked.
    pub fn resolve_root(self, path: &Path) -> Option<PathBuf> {
        path.ancestors()
            .find(|dir| dir.join(self.marker()).is_dir())
            .map(Path::to_path_buf)
    }

    fn invocation<I, S>(self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let invocation = Invocation::new(self.program(), args);
        match self {
            // Keep user configuration (aliases, i18n, color) out of parsed output
            Backend::Mercurial => invocation.with_env("HGPLAIN", "1"),
            Backend::Subversion => invocation,
        }
    }

    pub fn add(self, file_names: &[String]) -> Invocation {
        let args: &[&str] = match self {
            Backend::Mercurial => &["add", "--"],
            Backend::Subversion => &["add", "--parents", "--"],
        };
        self.invocation(args.iter().copied())
            .with_args(file_names.iter().cloned())
    }

    pub fn remove(self, file_names: &[String]) -> Invocation {
        let args: &[&str] = match self {
            Backend::Mercurial => &["remove", "--"],
            Backend::Subversion => &["rm", "--"],
        };
        self.invocation(args.iter().copied())
            .with_args(file_names.iter().cloned())
    }

    /// Full diff of pending changes in git format.
    ///
    /// Plain unified diffs cannot carry empty files or mode changes, and
    /// `HGPLAIN` turns Mercurial's git format off unless it is requested.
    pub fn diff(self) -> Invocation {
        match self {
            Backend::Mercurial => self.invocation(["diff", "-a", "--git"]),
            Backend::Subversion => self.invocation(["diff", "--git"]),
        }
    }

    /// Discards every local modification without leaving backup files.
    pub fn revert_all(self) -> Invocation {
        match self {
            Backend::Mercurial => self.invocation(["revert", "--quiet", "--no-backup", "--all"]),
            Backend::Subversion => self.invocation(["revert", "-R", "-q", "."]),
        }
    }

    pub fn status(self) -> Invocation {
        self.invocation(["status"])
    }

    pub fn commit(self, message: &str) -> Invocation {
        match self {
            Backend::Mercurial => {
                self.invocation(["commit", "-m", message, "-u", "anonymous"])
            }
            Backend::Subversion => {
                self.invocation(["commit", "-m", message, "--username", "anonymous"])
            }
        }
    }

    /// Commands creating a fresh repository rooted at `root`.
    ///
    /// Subversion has no standalone working copies, so a local fsfs
    /// repository is created in `.svn-db` and checked out into the root.
    pub fn init(self, root: &Path) -> Vec<Invocation> {
        match self {
            Backend::Mercurial => vec![self.invocation(["init"])],
            Backend::Subversion => vec![
                Invocation::new("svnadmin", ["create", "--fs-type", "fsfs", SVN_DB_DIR]),
                self.invocation([
                    "checkout".to_string(),
                    format!("file://{}/{}", root.display(), SVN_DB_DIR),
                    ".".to_string(),
                ]),
            ],
        }
    }
}

/// Directory holding the repository created by [`Backend::init`] for Subversion.
pub const SVN_DB_DIR: &str = ".svn-db";

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
