//! eD2K chunked MD4 digest

use super::md4::{DIGEST_SIZE, Md4};
use crate::hashing::traits::Accumulator;

/// eD2K streaming hasher
///
/// The stream is cut into consecutive chunks of [`Ed2k::CHUNK_SIZE`] bytes.
/// Chunk bytes are streamed straight into a running MD4, so the current chunk
/// is never buffered; `chunk_len` tracks how much of it has been seen and
/// never exceeds the chunk size.
#[derive(Clone, Debug)]
pub struct Ed2k {
    // Running MD4 over the current chunk
    chunk_hasher: Md4,
    chunk_len: usize,

    // Completed chunk digests, in chunk order
    chunk_hashes: Vec<[u8; DIGEST_SIZE]>,

    bytes_processed: u64,
}

impl Default for Ed2k {
    fn default() -> Self {
        Self::new()
    }
}

impl Ed2k {
    /// 9.5 MiB (9,728,000 bytes), the eD2K convention
    pub const CHUNK_SIZE: usize = 9_728_000;

    pub fn new() -> Self {
        Self {
            chunk_hasher: Md4::new(),
            chunk_len: 0,
            chunk_hashes: Vec::new(),
            bytes_processed: 0,
        }
    }

    /// Number of chunks hashed so far
    pub fn chunk_count(&self) -> usize {
        self.chunk_hashes.len()
    }

    pub fn bytes_processed(&self) -> u64 {
        self.bytes_processed
    }

    fn finish_chunk(&mut self) {
        let digest = self.chunk_hasher.finalize_reset();
        self.chunk_hashes.push(digest);
        self.chunk_len = 0;
    }

    pub fn update(&mut self, data: &[u8]) {
        let mut remaining = data;

        while !remaining.is_empty() {
            let space_in_chunk = Self::CHUNK_SIZE - self.chunk_len;
            let to_take = remaining.len().min(space_in_chunk);

            self.chunk_hasher.update(&remaining[..to_take]);
            self.chunk_len += to_take;
            remaining = &remaining[to_take..];

            if self.chunk_len == Self::CHUNK_SIZE {
                self.finish_chunk();
            }
        }

        self.bytes_processed += data.len() as u64;
    }

    pub fn finalize(mut self) -> [u8; DIGEST_SIZE] {
        // A trailing short chunk counts like any other
        if self.chunk_len > 0 {
            self.finish_chunk();
        }

        match self.chunk_hashes.as_slice() {
            [] => Md4::digest(&[]),
            [single] => *single,
            chunks => {
                // Exact multiples of CHUNK_SIZE get no extra empty-chunk digest
                let mut root = Md4::new();
                for digest in chunks {
                    root.update(digest);
                }
                root.finalize()
            }
        }
    }
}

impl Accumulator for Ed2k {
    type Digest = [u8; DIGEST_SIZE];

    fn update(&mut self, data: &[u8]) {
        Ed2k::update(self, data);
    }

    fn finalize(self) -> Self::Digest {
        Ed2k::finalize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ed2k_hex(data: &[u8]) -> String {
        let mut hasher = Ed2k::new();
        hasher.update(data);
        hasher.finalize_hex()
    }

    #[test]
    fn test_empty_input_is_md4_of_nothing() {
        assert_eq!(ed2k_hex(b""), "31d6cfe0d16ae931b73c59d7e0c089c0");
        assert_eq!(Ed2k::new().finalize(), Md4::digest(b""));
    }

    #[test]
    fn test_short_input_is_plain_md4() {
        assert_eq!(ed2k_hex(b"Hello, World!"), "94e3cb0fa9aa7a5ee3db74b79e915989");
        assert_eq!(ed2k_hex(b"abc"), hex::encode(Md4::digest(b"abc")));
    }

    #[test]
    fn test_exactly_one_chunk_is_not_rehashed() {
        let data = vec![0u8; Ed2k::CHUNK_SIZE];
        let mut hasher = Ed2k::new();
        hasher.update(&data);
        assert_eq!(hasher.chunk_count(), 1);
        assert_eq!(hasher.finalize_hex(), "d7def262a127cd79096a108e7a9fc138");
    }

    #[test]
    fn test_two_full_chunks() {
        let data = vec![0u8; 2 * Ed2k::CHUNK_SIZE];
        let first = Md4::digest(&data[..Ed2k::CHUNK_SIZE]);
        let second = Md4::digest(&data[Ed2k::CHUNK_SIZE..]);
        let mut joined = first.to_vec();
        joined.extend_from_slice(&second);

        let hash = ed2k_hex(&data);
        assert_eq!(hash, hex::encode(Md4::digest(&joined)));
        assert_eq!(hash, "194ee9e4fa79b2ee9f8829284c466051");
    }

    #[test]
    fn test_one_chunk_plus_one_byte() {
        let data = vec![0u8; Ed2k::CHUNK_SIZE + 1];
        assert_eq!(ed2k_hex(&data), "06329e9dba1373512c06386fe29e3c65");
    }

    #[test]
    fn test_update_spanning_chunk_boundaries() {
        // One slice crossing two boundaries, fed in odd-sized pieces
        let data: Vec<u8> = (0..2 * Ed2k::CHUNK_SIZE + 12_345)
            .map(|i| (i % 251) as u8)
            .collect();

        let mut streamed = Ed2k::new();
        for piece in data.chunks(3_333_333) {
            streamed.update(piece);
        }
        assert_eq!(streamed.chunk_count(), 2);
        assert_eq!(streamed.bytes_processed(), data.len() as u64);

        let mut whole = Ed2k::new();
        whole.update(&data);

        assert_eq!(streamed.finalize(), whole.finalize());
    }

    proptest! {
        #[test]
        fn prop_small_inputs_match_md4(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
            prop_assert_eq!(ed2k_hex(&data), hex::encode(Md4::digest(&data)));
        }
    }
}
