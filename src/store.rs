//! On-disk patch store.
//!
//! Every shelved patch is a regular file inside one directory (by default
//! `~/.shelf`). The file name is the patch name and the content is the raw
//! diff exactly as the backend produced it. Records are written once and never
//! modified; they are only ever created or deleted.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Directory of named patch records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchStore {
    dir: PathBuf,
}

impl PatchStore {
    /// Opens the store at `dir`, creating the directory if it is missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            debug!("Creating patch store at {}", dir.display());
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path of the record `name`.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(name))
    }

    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.path_for(name)?.is_file())
    }

    /// Names of all stored patches, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.path_for(name)?;
        fs::read(&path).map_err(|e| not_found_or_io(e, name))
    }

    /// Stores `content` as the new record `name`.
    ///
    /// The file is created exclusively, so an existing record is never
    /// overwritten.
    pub fn write(&self, name: &str, content: &[u8]) -> Result<()> {
        let path = self.path_for(name)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == io::ErrorKind::AlreadyExists {
                    Error::PatchAlreadyExists {
                        name: name.to_string(),
                    }
                } else {
                    Error::Io(e)
                }
            })?;
        file.write_all(content)?;
        debug!("Stored patch '{}' ({} bytes)", name, content.len());
        Ok(())
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(Error::PatchNotFound {
                name: name.to_string(),
            });
        }
        fs::remove_file(&path).map_err(|e| not_found_or_io(e, name))?;
        debug!("Removed patch '{}'", name);
        Ok(())
    }
}

fn not_found_or_io(error: io::Error, name: &str) -> Error {
    if error.kind() == io::ErrorKind::NotFound {
        Error::PatchNotFound {
            name: name.to_string(),
        }
    } else {
        Error::Io(error)
    }
}

/// Checks that `name` can be used as a single file name inside the store.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name == "." || name == ".." {
        Some("must not be '.' or '..'")
    } else if name.contains(['/', '\\']) {
        Some("must not contain path separators")
    } else if name.contains('\0') {
        Some("must not contain NUL characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidPatchName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
