//! Shelve scenarios run against a real backend.
//!
//! Every scenario starts from a fresh repository with committed files `a`,
//! `b` and `c`, each containing `123`. The Mercurial and Subversion test files call the same
//! scenarios with their backend.

use std::fs;
use std::path::PathBuf;

use assert_fs::TempDir;
use shelve::repository::{Backend, Repository, VersionControl};
use shelve::shelf::{CreateOutcome, Shelf};
use shelve::store::PatchStore;
use shelve::Error;

const TRACKED: [&str; 3] = ["a", "b", "c"];

/// A committed repository next to an empty patch store.
pub struct BackendFixture {
    _temp_dir: TempDir,
    pub root: PathBuf,
    pub shelf_dir: PathBuf,
    pub shelf: Shelf<Repository>,
}

impl BackendFixture {
    pub fn new(backend: Backend) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let repository = Repository::open_or_create(&temp_dir.path().join("repo"), backend)
            .expect("Failed to create repository");
        let root = repository.root_path().to_path_buf();

        let tracked = TRACKED.map(String::from);
        for file_name in &tracked {
            fs::write(root.join(file_name), "123\n").unwrap();
        }
        repository.add(&tracked).unwrap();
        repository.commit("initial").unwrap();

        let shelf_dir = temp_dir.path().join("shelf");
        let store = PatchStore::open(&shelf_dir).unwrap();
        Self {
            _temp_dir: temp_dir,
            root,
            shelf_dir,
            shelf: Shelf::new(repository, store),
        }
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    pub fn read(&self, file_name: &str) -> String {
        fs::read_to_string(self.path(file_name)).unwrap()
    }

    pub fn write(&self, file_name: &str, content: &str) {
        fs::write(self.path(file_name), content).unwrap();
    }

    /// Asserts that the files no scenario edits still hold their committed content.
    pub fn assert_untouched(&self) {
        assert_eq!(self.read("b"), "123\n");
        assert_eq!(self.read("c"), "123\n");
    }
}

/// Shelving reverts the change and applying brings it back.
pub fn round_trip(backend: Backend) {
    let fixture = BackendFixture::new(backend);
    fixture.write("a", "321\n");

    let outcome = fixture.shelf.create_patch("p").unwrap();
    assert_eq!(
        outcome,
        CreateOutcome::Created {
            removed_files: vec![]
        }
    );
    assert_eq!(fixture.read("a"), "123\n");
    fixture.assert_untouched();
    assert_eq!(fixture.shelf.patches().unwrap(), vec!["p".to_string()]);

    let outcome = fixture.shelf.apply_patch("p").unwrap();
    assert!(outcome.is_clean());
    assert_eq!(fixture.read("a"), "321\n");
    fixture.assert_untouched();
    assert!(fixture.shelf.patches().unwrap().is_empty());
}

/// Applying over an uncommitted local edit leaves conflict markers in the
/// file and keeps the patch.
pub fn conflict_keeps_patch(backend: Backend) {
    let fixture = BackendFixture::new(backend);
    fixture.write("a", "321\n");
    fixture.shelf.create_patch("p").unwrap();

    fixture.write("a", "456\n");

    let outcome = fixture.shelf.apply_patch("p").unwrap();
    assert!(!outcome.is_clean());

    let merged = fixture.read("a");
    assert!(merged.contains("<<<<<<<"), "no conflict markers in {merged:?}");
    assert!(merged.contains("321"));
    assert!(merged.contains("456"));
    fixture.assert_untouched();
    assert!(fixture.shelf.store().contains("p").unwrap());
}

/// A newly added empty file survives the round trip next to a regular edit.
pub fn added_empty_file(backend: Backend) {
    let fixture = BackendFixture::new(backend);
    fixture.write("a", "321\n");
    fixture.write("empty", "");
    fixture
        .shelf
        .repository()
        .add(&["empty".to_string()])
        .unwrap();

    let outcome = fixture.shelf.create_patch("p").unwrap();
    assert_eq!(
        outcome,
        CreateOutcome::Created {
            removed_files: vec!["empty".to_string()]
        }
    );
    assert!(!fixture.path("empty").exists());

    let outcome = fixture.shelf.apply_patch("p").unwrap();
    assert!(outcome.is_clean());
    assert_eq!(outcome.added, vec!["empty".to_string()]);
    assert!(fixture.path("empty").is_file());
    assert_eq!(fixture.read("empty"), "");
    assert_eq!(fixture.read("a"), "321\n");
}

/// A newly added file is deleted on shelve and re-added on apply.
pub fn added_file(backend: Backend) {
    let fixture = BackendFixture::new(backend);
    fixture.write("b", "new\n");
    fixture
        .shelf
        .repository()
        .add(&["b".to_string()])
        .unwrap();

    let outcome = fixture.shelf.create_patch("p").unwrap();
    assert_eq!(
        outcome,
        CreateOutcome::Created {
            removed_files: vec!["b".to_string()]
        }
    );
    assert!(!fixture.path("b").exists());

    let outcome = fixture.shelf.apply_patch("p").unwrap();
    assert!(outcome.is_clean());
    assert_eq!(outcome.added, vec!["b".to_string()]);
    assert_eq!(fixture.read("b"), "new\n");

    let status = fixture.shelf.repository().status().unwrap();
    assert!(status.added().is_empty(), "b is still unknown: {status:?}");
}

/// A removed file comes back on shelve and is removed again on apply.
pub fn removed_file(backend: Backend) {
    let fixture = BackendFixture::new(backend);
    fixture
        .shelf
        .repository()
        .remove(&["a".to_string()])
        .unwrap();
    assert!(!fixture.path("a").exists());

    assert!(fixture.shelf.create_patch("p").unwrap().is_created());
    assert_eq!(fixture.read("a"), "123\n");

    let outcome = fixture.shelf.apply_patch("p").unwrap();
    assert!(outcome.is_clean());
    assert_eq!(outcome.removed, vec!["a".to_string()]);
    assert!(!fixture.path("a").exists());
}

/// Shelving under a taken name fails and leaves the tree alone.
pub fn existing_name(backend: Backend) {
    let fixture = BackendFixture::new(backend);
    fixture.write("a", "321\n");
    fixture.shelf.create_patch("p").unwrap();

    fixture.write("a", "999\n");
    let err = fixture.shelf.create_patch("p").unwrap_err();
    assert!(matches!(err, Error::PatchAlreadyExists { .. }));
    assert_eq!(fixture.read("a"), "999\n");
}

/// A clean working tree produces no patch.
pub fn nothing_to_shelve(backend: Backend) {
    let fixture = BackendFixture::new(backend);
    let outcome = fixture.shelf.create_patch("p").unwrap();
    assert_eq!(outcome, CreateOutcome::NothingToShelve);
    assert!(!fixture.shelf_dir.join("p").exists());
}

/// Discovery from a subdirectory finds the working tree root.
pub fn discover_from_subdirectory(backend: Backend) {
    let fixture = BackendFixture::new(backend);
    let sub = fixture.path("sub").join("dir");
    fs::create_dir_all(&sub).unwrap();

    let repository = Repository::discover(&sub).unwrap();
    assert_eq!(repository.backend(), backend);
    assert_eq!(repository.root_path(), fixture.root.as_path());
}
