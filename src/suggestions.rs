//! # Error Suggestions
//!
//! Library errors say what went wrong. This module turns the ones a user can
//! act on into messages that also say how to fix it, as `hint:` lines below
//! the error.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shelve::suggestions;
//!
//! shelf.apply_patch(name).map_err(|e| suggestions::explain(e, &known_patches))?;
//! ```

use std::path::Path;

use crate::error::Error;
use crate::repository::Backend;

/// Converts a library error into a user-facing error with hints.
///
/// `known_patches` is used to suggest a similar name when a patch is missing.
/// Errors without useful hints are passed through unchanged.
pub fn explain(error: Error, known_patches: &[String]) -> anyhow::Error {
    match error {
        Error::RepositoryNotFound { path } => repository_not_found(&path),
        Error::PatchAlreadyExists { name } => patch_already_exists(&name),
        Error::PatchNotFound { name } => patch_not_found(&name, known_patches),
        Error::CommandSpawn { program, source } => program_not_available(&program, &source),
        other => other.into(),
    }
}

/// Generate an error for when no repository contains the given path.
///
/// Includes the list of supported backends and their marker directories.
pub fn repository_not_found(path: &Path) -> anyhow::Error {
    let supported = Backend::ALL
        .iter()
        .map(|backend| format!("{} ({})", backend.name(), backend.marker()))
        .collect::<Vec<_>>()
        .join(", ");

    anyhow::anyhow!(
        "No valid repository found at '{path}'\n\n\
         hint: Run shelve from inside a working tree, or use -C/--repository <DIR>\n\
         hint: Supported backends are: {supported}",
        path = path.display()
    )
}

/// Generate an error for creating a patch under a name that is taken.
pub fn patch_already_exists(name: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Patch '{name}' already exists\n\n\
         hint: Use --force to overwrite it\n\
         hint: Run 'shelve remove {name}' to discard it, or pick another name"
    )
}

/// Generate an error for a missing patch, suggesting a similar name.
pub fn patch_not_found(name: &str, known_patches: &[String]) -> anyhow::Error {
    let did_you_mean = find_similar(name, known_patches)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Patch '{name}' does not exist{did_you_mean}\n\n\
         hint: Run 'shelve list' to see all shelved patches"
    )
}

/// Generate an error for a backend or patch program that cannot be started.
pub fn program_not_available(program: &str, source: &std::io::Error) -> anyhow::Error {
    anyhow::anyhow!(
        "Failed to run '{program}': {source}\n\n\
         hint: Make sure '{program}' is installed and on your PATH"
    )
}

/// Find the closest candidate within an edit distance of 2.
fn find_similar<'a>(input: &str, candidates: &'a [String]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|candidate| (candidate, edit_distance(input, candidate)))
        .filter(|(_, distance)| *distance <= 2 && *distance < input.chars().count())
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate.as_str())
}

/// Levenshtein edit distance, computed one row at a time.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, a_char) in a.chars().enumerate() {
        let mut current = Vec::with_capacity(previous.len());
        current.push(i + 1);
        for (j, b_char) in b_chars.iter().enumerate() {
            let substitution = previous[j] + usize::from(a_char != *b_char);
            let insertion = current[j] + 1;
            let deletion = previous[j + 1] + 1;
            current.push(substitution.min(insertion).min(deletion));
        }
        previous = current;
    }

    previous[b_chars.len()]
}
