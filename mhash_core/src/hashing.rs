//! Hash calculation functionality for the mhash core library
//!
//! This module contains the digest implementations and the result record
//! produced by a hashing run.

use crate::{Error, Result, error::ValidationError};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub mod algorithms;
mod multi;
mod traits;

pub use algorithms::{Crc32, Ed2k, Md4, Md5Hasher, Sha1Hasher};
pub use multi::MultiHasher;
pub use traits::Accumulator;

/// Hash algorithms computed for every file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// MD5 hash algorithm
    MD5,
    /// SHA1 hash algorithm
    SHA1,
    /// CRC32 hash algorithm
    CRC32,
    /// ED2K hash algorithm
    ED2K,
}

impl HashAlgorithm {
    /// All algorithms, in the order the hasher feeds them
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::MD5,
        HashAlgorithm::SHA1,
        HashAlgorithm::CRC32,
        HashAlgorithm::ED2K,
    ];

    /// Display name for user interfaces
    pub fn display_name(&self) -> &'static str {
        match self {
            HashAlgorithm::MD5 => "MD5",
            HashAlgorithm::SHA1 => "SHA1",
            HashAlgorithm::CRC32 => "CRC32",
            HashAlgorithm::ED2K => "ED2K",
        }
    }

    /// Length of the lowercase hex digest
    pub fn hex_len(&self) -> usize {
        match self {
            HashAlgorithm::MD5 | HashAlgorithm::ED2K => 32,
            HashAlgorithm::SHA1 => 40,
            HashAlgorithm::CRC32 => 8,
        }
    }

    /// Hash in-memory data with this algorithm alone
    pub fn digest_bytes(&self, data: &[u8]) -> String {
        match self {
            HashAlgorithm::MD5 => one_shot(Md5Hasher::new(), data),
            HashAlgorithm::SHA1 => one_shot(Sha1Hasher::new(), data),
            HashAlgorithm::CRC32 => one_shot(Crc32::new(), data),
            HashAlgorithm::ED2K => one_shot(Ed2k::new(), data),
        }
    }
}

fn one_shot<A: Accumulator>(mut accumulator: A, data: &[u8]) -> String {
    accumulator.update(data);
    accumulator.finalize_hex()
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithm::MD5 => write!(f, "md5"),
            HashAlgorithm::SHA1 => write!(f, "sha1"),
            HashAlgorithm::CRC32 => write!(f, "crc32"),
            HashAlgorithm::ED2K => write!(f, "ed2k"),
        }
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::MD5),
            "sha1" => Ok(HashAlgorithm::SHA1),
            "crc32" => Ok(HashAlgorithm::CRC32),
            "ed2k" => Ok(HashAlgorithm::ED2K),
            _ => Err(Error::Validation(ValidationError::unknown_algorithm(s))),
        }
    }
}

/// Digests of one file, produced once at the end of a successful run
///
/// All digests are lowercase, fixed-width hex without a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashResult {
    pub md5: String,
    pub sha1: String,
    pub crc32: String,
    pub ed2k: String,
    /// File length captured when the run started
    pub file_size: u64,
    /// Wall-clock time from call entry to finalization
    pub processing_time: Duration,
}

impl HashResult {
    /// Digest for a single algorithm
    pub fn digest(&self, algorithm: HashAlgorithm) -> &str {
        match algorithm {
            HashAlgorithm::MD5 => &self.md5,
            HashAlgorithm::SHA1 => &self.sha1,
            HashAlgorithm::CRC32 => &self.crc32,
            HashAlgorithm::ED2K => &self.ed2k,
        }
    }

    /// Compare digests and size, ignoring timing
    pub fn same_digests(&self, other: &HashResult) -> bool {
        HashAlgorithm::ALL
            .iter()
            .all(|&algorithm| self.digest(algorithm) == other.digest(algorithm))
            && self.file_size == other.file_size
    }

    /// Average throughput of the run in MiB/s
    pub fn throughput_mbps(&self) -> f64 {
        let secs = self.processing_time.as_secs_f64();
        if secs > 0.0 {
            (self.file_size as f64 / 1_048_576.0) / secs
        } else {
            0.0
        }
    }
}

/// Hash in-memory data with all four algorithms in one pass
pub fn hash_bytes(data: &[u8]) -> HashResult {
    let start_time = Instant::now();
    let mut hasher = MultiHasher::new();
    hasher.update(data);
    hasher.finish(data.len() as u64, start_time.elapsed())
}
