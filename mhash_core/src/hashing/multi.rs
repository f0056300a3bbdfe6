//! Fan-out of one byte stream to all four digests

use super::HashResult;
use super::algorithms::{Crc32, Ed2k, Md5Hasher, Sha1Hasher};
use super::traits::Accumulator;
use std::time::Duration;

/// Feeds every slice to MD5, SHA-1, CRC-32 and eD2K, in that order
///
/// One instance belongs to one hashing run; it is consumed by
/// [`MultiHasher::finish`], so nothing can be fed after finalization.
#[derive(Clone, Default)]
pub struct MultiHasher {
    md5: Md5Hasher,
    sha1: Sha1Hasher,
    crc32: Crc32,
    ed2k: Ed2k,
    bytes_processed: u64,
}

impl MultiHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, data: &[u8]) {
        Accumulator::update(&mut self.md5, data);
        Accumulator::update(&mut self.sha1, data);
        Accumulator::update(&mut self.crc32, data);
        Accumulator::update(&mut self.ed2k, data);
        self.bytes_processed += data.len() as u64;
    }

    pub fn bytes_processed(&self) -> u64 {
        self.bytes_processed
    }

    /// Finalize every digest and assemble the result record
    pub fn finish(self, file_size: u64, processing_time: Duration) -> HashResult {
        HashResult {
            md5: self.md5.finalize_hex(),
            sha1: self.sha1.finalize_hex(),
            crc32: self.crc32.finalize_hex(),
            ed2k: self.ed2k.finalize_hex(),
            file_size,
            processing_time,
        }
    }
}
