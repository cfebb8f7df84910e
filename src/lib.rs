//! # Shelve Library
//!
//! This library implements the engine behind the `shelve` command-line tool:
//! set aside the uncommitted changes of a Mercurial or Subversion working
//! tree as a named patch, and reapply it later.
//!
//! ## Quick Example
//!
//! ```no_run
//! use shelve::repository::Repository;
//! use shelve::shelf::Shelf;
//! use shelve::store::PatchStore;
//!
//! let repository = Repository::discover(std::path::Path::new(".")).unwrap();
//! let store = PatchStore::open(shelve::defaults::default_shelf_dir()).unwrap();
//! let shelf = Shelf::new(repository, store);
//!
//! if shelf.create_patch("wip").unwrap().is_created() {
//!     // ... work on something else, then bring the changes back
//!     let outcome = shelf.apply_patch("wip").unwrap();
//!     assert!(outcome.is_clean());
//! }
//! ```
//!
//! ## Core Concepts
//!
//! - **Repository adapter (`repository`)**: a `VersionControl` trait over the
//!   supported backends, with discovery of the working tree root.
//! - **Status (`status`)**: normalized snapshots of added and removed files,
//!   compared before and after every mutating step.
//! - **Patch store (`store`)**: the directory of named patch records.
//! - **Shelf (`shelf`)**: the create/apply lifecycle built on the three above.
//!
//! Supporting modules hold defaults (`defaults`), the error type (`error`),
//! user-facing hints (`suggestions`) and terminal output settings (`output`).

pub mod defaults;
pub mod error;
pub mod output;
pub mod repository;
pub mod shelf;
pub mod status;
pub mod store;
pub mod suggestions;

pub use error::{Error, Result};
