//! Buffer management for streaming reads

mod pool;

pub use pool::{BufferLease, BufferPool, PoolInfo};

/// Default read buffer size (1 MiB)
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Default number of idle buffers a pool keeps around
pub const DEFAULT_MAX_POOLED_BUFFERS: usize = 4;
