//! Hashing several files with bounded concurrency
//!
//! Each file gets an independent [`FileHasher::hash`] call with its own
//! buffer lease and digests; nothing is shared between calls except the pool
//! and the progress sink.

use crate::cancellation::CancellationToken;
use crate::file_hasher::FileHasher;
use crate::hashing::HashResult;
use crate::progress::ProgressProvider;
use crate::Result;
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Outcome of hashing a list of files
#[derive(Debug)]
pub struct BatchResult {
    /// One entry per input path, in input order
    pub results: Vec<(PathBuf, Result<HashResult>)>,
    pub total_time: Duration,
}

impl BatchResult {
    pub fn successful(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.successful()
    }

    /// Total bytes hashed by the successful runs
    pub fn total_bytes(&self) -> u64 {
        self.results
            .iter()
            .filter_map(|(_, r)| r.as_ref().ok())
            .map(|r| r.file_size)
            .sum()
    }
}

/// Hash `paths` with at most `max_concurrent_files` runs in flight
///
/// Cancelling `cancel` aborts the runs in flight; runs not yet started
/// observe the token after their first block.
pub async fn hash_files(
    hasher: &FileHasher,
    paths: &[PathBuf],
    progress: Option<&dyn ProgressProvider>,
    cancel: Option<&CancellationToken>,
) -> BatchResult {
    let start_time = Instant::now();
    let concurrency = hasher.config().max_concurrent_files.max(1);
    log::debug!("Hashing {} file(s), {concurrency} at a time", paths.len());

    let results = stream::iter(paths.iter().map(|path| async move {
        let result = hasher.hash(path, progress, cancel).await;
        (path.clone(), result)
    }))
    .buffered(concurrency)
    .collect::<Vec<_>>()
    .await;

    BatchResult {
        results,
        total_time: start_time.elapsed(),
    }
}
