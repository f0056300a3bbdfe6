//! Reusable read buffers shared by hashing calls
//!
//! The pool is an explicit object: the caller sizes it, hands it to the
//! [`FileHasher`](crate::FileHasher) behind an `Arc`, and drops it when done.
//! A rented buffer belongs to exactly one in-flight call and goes back to the
//! free list when its [`BufferLease`] is dropped, whichever way the call ends.

use crate::{Result, error::InternalError};
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Snapshot of pool usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolInfo {
    /// Size of every buffer handed out
    pub buffer_size: usize,
    /// Buffers currently idle in the free list
    pub pooled: usize,
    /// Buffers currently rented out
    pub in_use: usize,
    /// Rents served from the free list instead of a fresh allocation
    pub total_reuses: usize,
}

/// A free list of equally sized byte buffers
pub struct BufferPool {
    buffer_size: usize,
    max_pooled: usize,
    buffers: Mutex<Vec<Vec<u8>>>,
    in_use: AtomicUsize,
    total_reuses: AtomicUsize,
}

impl BufferPool {
    /// Create a pool of `buffer_size`-byte buffers keeping at most `max_pooled` idle
    pub fn new(buffer_size: usize, max_pooled: usize) -> Result<Self> {
        if buffer_size == 0 {
            return Err(
                InternalError::buffer_pool("buffer size must be greater than zero").into(),
            );
        }

        Ok(Self {
            buffer_size,
            max_pooled,
            buffers: Mutex::new(Vec::with_capacity(max_pooled)),
            in_use: AtomicUsize::new(0),
            total_reuses: AtomicUsize::new(0),
        })
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Rent a buffer; it returns to the pool when the lease is dropped
    pub fn rent(self: &Arc<Self>) -> BufferLease {
        let reused = match self.buffers.lock() {
            Ok(mut buffers) => buffers.pop(),
            Err(_) => None,
        };

        let buffer = match reused {
            Some(buffer) => {
                self.total_reuses.fetch_add(1, Ordering::Relaxed);
                buffer
            }
            None => {
                log::trace!("Allocating new {} byte read buffer", self.buffer_size);
                vec![0u8; self.buffer_size]
            }
        };
        self.in_use.fetch_add(1, Ordering::Relaxed);

        BufferLease {
            buffer: Some(buffer),
            pool: Arc::clone(self),
        }
    }

    fn give_back(&self, buffer: Vec<u8>) {
        self.in_use.fetch_sub(1, Ordering::Relaxed);

        if let Ok(mut buffers) = self.buffers.lock()
            && buffers.len() < self.max_pooled
        {
            buffers.push(buffer);
        }
        // Otherwise the buffer is simply dropped
    }

    /// Drop every idle buffer
    pub fn clear(&self) {
        if let Ok(mut buffers) = self.buffers.lock() {
            buffers.clear();
        }
    }

    pub fn info(&self) -> PoolInfo {
        let pooled = self.buffers.lock().map(|b| b.len()).unwrap_or(0);

        PoolInfo {
            buffer_size: self.buffer_size,
            pooled,
            in_use: self.in_use.load(Ordering::Relaxed),
            total_reuses: self.total_reuses.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info = self.info();
        f.debug_struct("BufferPool")
            .field("buffer_size", &self.buffer_size)
            .field("max_pooled", &self.max_pooled)
            .field("pooled", &info.pooled)
            .field("in_use", &info.in_use)
            .finish()
    }
}

/// A rented buffer, always `buffer_size` bytes long
pub struct BufferLease {
    buffer: Option<Vec<u8>>,
    pool: Arc<BufferPool>,
}

impl std::fmt::Debug for BufferLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferLease")
            .field("len", &self.len())
            .finish()
    }
}

impl Deref for BufferLease {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.buffer.as_deref().unwrap_or_default()
    }
}

impl DerefMut for BufferLease {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.buffer.as_deref_mut().unwrap_or_default()
    }
}

impl Drop for BufferLease {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.pool.give_back(buffer);
        }
    }
}
