//! Normalized working tree status.
//!
//! Backends report file status in their own formats. The shelf engine only
//! cares about two things: files the backend does not know about, and files
//! the backend expects but cannot find on disk. Both `hg status` and
//! `svn status` mark these with a single leading character (`?` and `!`),
//! followed by whitespace and a path relative to the repository root, so a
//! single parser covers every backend.
//!
//! A [`StatusSnapshot`] is taken before and after a mutating operation. The
//! entries present afterwards but not before are the side effects of that
//! operation; see [`StatusSnapshot::changed_since`].

use std::collections::BTreeSet;

/// File state handled by the shelf engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileStatus {
    /// Present on disk but unknown to the backend (`?`).
    Added,
    /// Tracked by the backend but missing on disk (`!`).
    Removed,
}

impl FileStatus {
    /// Maps a status marker character to a file status.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '?' => Some(Self::Added),
            '!' => Some(Self::Removed),
            _ => None,
        }
    }
}

/// A single status line: the file state and the path relative to the root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatusEntry {
    pub status: FileStatus,
    pub path: String,
}

impl StatusEntry {
    pub fn new(status: FileStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }

    /// Parses one status line, ignoring markers the engine does not handle.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut chars = line.chars();
        let status = FileStatus::from_marker(chars.next()?)?;
        let path = chars.as_str().trim();
        if path.is_empty() {
            return None;
        }
        Some(Self::new(status, path))
    }
}

/// The set of added and removed entries of a working tree at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    entries: BTreeSet<StatusEntry>,
}

impl StatusSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the complete output of a backend status command.
    pub fn parse(output: &str) -> Self {
        output.lines().filter_map(StatusEntry::parse_line).collect()
    }

    pub fn insert(&mut self, entry: StatusEntry) -> bool {
        self.entries.insert(entry)
    }

    pub fn contains(&self, entry: &StatusEntry) -> bool {
        self.entries.contains(entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEntry> {
        self.entries.iter()
    }

    /// Returns the entries of `self` that are not present in `earlier`.
    ///
    /// Entries that disappeared between the two snapshots are not reported.
    pub fn changed_since(&self, earlier: &StatusSnapshot) -> StatusSnapshot {
        self.entries
            .difference(&earlier.entries)
            .cloned()
            .collect()
    }

    /// Paths of all entries with the given status, in sorted order.
    pub fn paths_with(&self, status: FileStatus) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.status == status)
            .map(|entry| entry.path.clone())
            .collect()
    }

    pub fn added(&self) -> Vec<String> {
        self.paths_with(FileStatus::Added)
    }

    pub fn removed(&self) -> Vec<String> {
        self.paths_with(FileStatus::Removed)
    }
}

impl FromIterator<StatusEntry> for StatusSnapshot {
    fn from_iter<I: IntoIterator<Item = StatusEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a StatusSnapshot {
    type Item = &'a StatusEntry;
    type IntoIter = std::collections::btree_set::Iter<'a, StatusEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
