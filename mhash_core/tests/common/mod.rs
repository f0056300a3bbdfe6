//! Shared fixtures for the integration tests

#![allow(dead_code)]

use mhash_core::{FileHasher, HasherConfig, ProgressUpdate};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Deterministic, non-repeating-looking content of `len` bytes
pub fn pattern_data(len: usize) -> Vec<u8> {
    (0..len).map(|i| ((i * 31 + i / 251) % 256) as u8).collect()
}

/// Write `data` to `name` inside `dir` and return the path
pub fn write_file(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, data).unwrap();
    path
}

/// Hasher with 4KB blocks
pub fn test_hasher() -> FileHasher {
    FileHasher::from_config(HasherConfig::test()).unwrap()
}

/// Hasher with the production 1 MiB blocks
pub fn default_hasher() -> FileHasher {
    FileHasher::from_config(HasherConfig::default()).unwrap()
}

/// Progress sink that records every update it receives
#[derive(Default)]
pub struct RecordingSink {
    updates: Mutex<Vec<ProgressUpdate>>,
}

impl RecordingSink {
    pub fn record(&self, update: ProgressUpdate) {
        self.updates.lock().unwrap().push(update);
    }

    pub fn percents(&self) -> Vec<u8> {
        self.updates.lock().unwrap().iter().map(|u| u.percent).collect()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .map(|u| u.path.clone())
            .collect()
    }

    pub fn all_for(&self, path: &Path) -> bool {
        self.paths().iter().all(|p| p == path)
    }
}

impl mhash_core::ProgressProvider for RecordingSink {
    fn report(&self, update: ProgressUpdate) {
        self.record(update);
    }
}
