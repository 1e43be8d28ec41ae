#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use population_reconciler::dataset::CountryRecord;
use tempfile::{TempDir, tempdir};

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Scratch directory holding working copies of the dataset fixtures.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file");
        path
    }

    /// Copies a fixture from `tests/data` into the workspace.
    pub fn copy_fixture(&self, name: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::copy(fixture_path(name), &path).expect("copy fixture");
        path
    }

    pub fn read_records(&self, path: &Path) -> Vec<CountryRecord> {
        let raw = fs::read_to_string(path).expect("read dataset");
        serde_json::from_str(&raw).expect("parse dataset")
    }
}

pub fn population_of(records: &[CountryRecord], name: &str) -> Option<u64> {
    records
        .iter()
        .find(|record| record.common_name() == Some(name))
        .and_then(CountryRecord::population)
}
