#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use quick_eda::{
    frame::Table,
    ingest::{self, IngestOptions},
};
use tempfile::{TempDir, tempdir};

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
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
        self.write_bytes(name, contents.as_bytes())
    }

    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file contents");
        path
    }
}

/// Parses in-memory CSV text as if it had been uploaded as `data.csv`.
pub fn parse_csv(contents: &str) -> Table {
    ingest::parse("data.csv", contents.as_bytes(), &IngestOptions::default())
        .expect("csv parses")
}

/// A small mixed table: an id, a categorical status, two numeric measures and
/// a 0/1 target.
pub const ORDERS_CSV: &str = "\
id,status,amount,quantity,returned
1,shipped,42.5,3,0
2,processing,13.37,1,0
3,shipped,99.0,7,1
4,cancelled,,2,0
5,shipped,42.5,3,0
6,NA,7.25,1,1
";
