//! Streaming multi-hash orchestrator
//!
//! Reads a file once, block by block, and feeds every block to MD5, SHA-1,
//! CRC-32 and eD2K before reading the next one. The read is the only
//! suspension point of the loop.

use crate::cancellation::CancellationToken;
use crate::hashing::{HashResult, MultiHasher};
use crate::memory::BufferPool;
use crate::progress::{ProgressProvider, ProgressUpdate};
use crate::error::{IoError, IoErrorKind};
use crate::{Error, HasherConfig, Result};
use log::{debug, trace, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Hashes files with all four algorithms in a single sequential pass
///
/// A `FileHasher` holds no per-file state, so one instance can serve many
/// concurrent calls; each call rents its own buffer and owns its own digests.
#[derive(Debug, Clone)]
pub struct FileHasher {
    config: HasherConfig,
    pool: Arc<BufferPool>,
}

impl FileHasher {
    /// Create a hasher reading through buffers rented from `pool`
    ///
    /// Blocks are as large as the pool's buffers; a differing
    /// `config.buffer_size` is replaced by the pool's.
    pub fn new(mut config: HasherConfig, pool: Arc<BufferPool>) -> Self {
        if config.buffer_size != pool.buffer_size() {
            debug!(
                "Configured {} byte blocks, using the pool's {} bytes",
                config.buffer_size,
                pool.buffer_size()
            );
            config.buffer_size = pool.buffer_size();
        }
        Self { config, pool }
    }

    /// Validate `config` and build a dedicated pool for it
    pub fn from_config(config: HasherConfig) -> Result<Self> {
        config.validate()?;
        let pool = Arc::new(BufferPool::new(
            config.buffer_size,
            config.max_pooled_buffers,
        )?);
        Ok(Self::new(config, pool))
    }

    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    pub fn pool(&self) -> &Arc<BufferPool> {
        &self.pool
    }

    /// Hash a file without progress reporting or cancellation
    pub async fn hash_file(&self, path: &Path) -> Result<HashResult> {
        self.hash(path, None, None).await
    }

    /// Hash a file, reporting progress after every block and polling `cancel`
    ///
    /// Fails with a file-not-found [`IoError`] before any I/O if `path` is not
    /// an existing regular file, with [`Error::Cancelled`] if cancellation is
    /// observed, and with [`Error::HashingFailed`] wrapping the cause for
    /// anything else.
    pub async fn hash(
        &self,
        path: &Path,
        progress: Option<&dyn ProgressProvider>,
        cancel: Option<&CancellationToken>,
    ) -> Result<HashResult> {
        let start_time = Instant::now();

        let file_size = match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => metadata.len(),
            Ok(_) => return Err(Error::Io(IoError::file_not_found(path))),
            Err(e) => {
                let cause = IoError::from_std(e).with_path(path);
                if cause.kind == IoErrorKind::FileNotFound {
                    return Err(Error::Io(cause));
                }
                return Err(failed(path, Error::Io(cause)));
            }
        };

        debug!(
            "Hashing {} ({file_size} bytes, {} byte blocks)",
            path.display(),
            self.pool.buffer_size()
        );

        // A file removed after the stat is a failure, not a missing file
        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) => return Err(failed(path, IoError::from_std(e).with_path(path).into())),
        };

        self.hash_reader(file, path, file_size, start_time, progress, cancel)
            .await
    }

    /// Hash everything `reader` yields as the contents of `path`
    pub(crate) async fn hash_reader<R>(
        &self,
        reader: R,
        path: &Path,
        file_size: u64,
        start_time: Instant,
        progress: Option<&dyn ProgressProvider>,
        cancel: Option<&CancellationToken>,
    ) -> Result<HashResult>
    where
        R: AsyncRead + Unpin,
    {
        match self
            .read_blocks(reader, path, file_size, progress, cancel)
            .await
        {
            Ok(hasher) => {
                let result = hasher.finish(file_size, start_time.elapsed());
                debug!(
                    "Hashed {} in {:?} ({:.1} MB/s)",
                    path.display(),
                    result.processing_time,
                    result.throughput_mbps()
                );
                Ok(result)
            }
            Err(Error::Cancelled) => {
                debug!("Hashing of {} cancelled", path.display());
                Err(Error::Cancelled)
            }
            Err(e) => Err(failed(path, e)),
        }
    }

    /// The read loop; returns the accumulators unfinalized
    async fn read_blocks<R>(
        &self,
        mut reader: R,
        path: &Path,
        file_size: u64,
        progress: Option<&dyn ProgressProvider>,
        cancel: Option<&CancellationToken>,
    ) -> Result<MultiHasher>
    where
        R: AsyncRead + Unpin,
    {
        // Returned to the pool when dropped, on every exit path
        let mut buffer = self.pool.rent();
        let mut hasher = MultiHasher::new();
        let mut bytes_processed = 0u64;

        loop {
            let n = reader
                .read(&mut buffer[..])
                .await
                .map_err(|e| IoError::from_std(e).with_path(path))?;

            if n == 0 {
                break;
            }

            hasher.update(&buffer[..n]);
            bytes_processed += n as u64;
            trace!("{}: {bytes_processed}/{file_size} bytes", path.display());

            if let Some(progress) = progress {
                progress.report(ProgressUpdate::new(
                    path.to_path_buf(),
                    bytes_processed,
                    file_size,
                ));
            }

            if cancel.is_some_and(CancellationToken::is_cancelled) {
                return Err(Error::Cancelled);
            }
        }

        Ok(hasher)
    }
}

fn failed(path: &Path, cause: Error) -> Error {
    warn!("Hashing of {} failed: {cause}", path.display());
    Error::hashing_failed(path, cause)
}
