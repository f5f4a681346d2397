use std::{fs, path::PathBuf};

use tempfile::TempDir;

use crate::NrmContext;

/// A context whose stores live in a temporary directory.
pub struct Fixture {
    pub dir: TempDir,
    pub ctx: NrmContext,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let ctx = NrmContext::with_paths(
            dir.path().join(".npmrc"),
            dir.path().join(".nrmrc"),
            dir.path().join("project").join(".npmrc"),
        );
        Self { dir, ctx }
    }

    pub fn with_files(npmrc: &str, nrmrc: &str) -> Self {
        let fixture = Self::new();
        fs::write(fixture.npmrc_path(), npmrc).unwrap();
        fs::write(fixture.nrmrc_path(), nrmrc).unwrap();
        fixture
    }

    pub fn npmrc_path(&self) -> PathBuf {
        self.dir.path().join(".npmrc")
    }

    pub fn nrmrc_path(&self) -> PathBuf {
        self.dir.path().join(".nrmrc")
    }

    pub fn npmrc(&self) -> String {
        fs::read_to_string(self.npmrc_path()).unwrap_or_default()
    }

    pub fn nrmrc(&self) -> String {
        fs::read_to_string(self.nrmrc_path()).unwrap_or_default()
    }

    /// Makes the user profile unwritable by replacing it with a directory.
    pub fn break_npmrc(&self) {
        let path = self.npmrc_path();
        let _ = fs::remove_file(&path);
        fs::create_dir(&path).unwrap();
    }
}
