//! mhash Core Library
//!
//! Streaming multi-algorithm file hashing: MD5, SHA-1, CRC-32 and the
//! chunked-MD4 eD2K digest computed in one sequential pass over a file, with
//! progress reporting and cooperative cancellation.

pub mod batch;
pub mod cancellation;
pub mod error;
pub mod file_hasher;
pub mod hashing;
pub mod memory;
pub mod progress;

// Re-export main types
pub use batch::{BatchResult, hash_files};
pub use cancellation::CancellationToken;
pub use error::{Error, Result};
pub use file_hasher::FileHasher;
pub use hashing::{HashAlgorithm, HashResult, hash_bytes};
pub use memory::{BufferPool, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_POOLED_BUFFERS};
pub use progress::{ChannelProvider, NullProvider, ProgressProvider, ProgressUpdate};

use error::ValidationError;

/// Core hasher configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    /// Bytes read per block
    pub buffer_size: usize,
    /// Idle buffers kept by the pool between runs
    pub max_pooled_buffers: usize,
    /// Files hashed at the same time by the batch driver
    pub max_concurrent_files: usize,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_pooled_buffers: DEFAULT_MAX_POOLED_BUFFERS,
            max_concurrent_files: 2,
        }
    }
}

impl HasherConfig {
    /// Create a test configuration
    pub fn test() -> Self {
        Self {
            buffer_size: 4096, // 4KB blocks so small fixtures span several reads
            max_pooled_buffers: 2,
            max_concurrent_files: 2,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(Error::Validation(ValidationError::invalid_configuration(
                "buffer_size must be greater than zero",
            )));
        }
        if self.max_concurrent_files == 0 {
            return Err(Error::Validation(ValidationError::invalid_configuration(
                "max_concurrent_files must be greater than zero",
            )));
        }
        Ok(())
    }
}
