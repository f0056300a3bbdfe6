//! MD4 message digest (RFC 1320)
//!
//! A from-scratch implementation of the MD4 compression function. It is the
//! building block of the eD2K digest, which hashes many independent chunks
//! and then, for multi-chunk inputs, the concatenation of the chunk digests.
//! [`Md4::finalize_reset`] supports that reuse without reallocating.

use crate::hashing::traits::Accumulator;

/// Size of an MD4 digest in bytes
pub const DIGEST_SIZE: usize = 16;

const BLOCK_SIZE: usize = 64;
/// Offset inside the last block where the 64-bit length field starts
const LENGTH_OFFSET: usize = 56;

const INITIAL_STATE: [u32; 4] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476];

const ROUND2_CONSTANT: u32 = 0x5A82_7999;
const ROUND3_CONSTANT: u32 = 0x6ED9_EBA1;

/// Incremental MD4 hasher
#[derive(Clone, Debug)]
pub struct Md4 {
    state: [u32; 4],
    block: [u8; BLOCK_SIZE],
    block_len: usize,
    total_len: u64,
}

impl Default for Md4 {
    fn default() -> Self {
        Self::new()
    }
}

impl Md4 {
    pub fn new() -> Self {
        Self {
            state: INITIAL_STATE,
            block: [0u8; BLOCK_SIZE],
            block_len: 0,
            total_len: 0,
        }
    }

    /// One-shot digest of `data`
    pub fn digest(data: &[u8]) -> [u8; DIGEST_SIZE] {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }

    /// Number of message bytes consumed since the last reset
    pub fn len(&self) -> u64 {
        self.total_len
    }

    pub fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    pub fn update(&mut self, data: &[u8]) {
        self.total_len = self.total_len.wrapping_add(data.len() as u64);
        let mut data = data;

        // Top up a partially filled block first
        if self.block_len > 0 {
            let take = (BLOCK_SIZE - self.block_len).min(data.len());
            self.block[self.block_len..self.block_len + take].copy_from_slice(&data[..take]);
            self.block_len += take;
            data = &data[take..];

            if self.block_len < BLOCK_SIZE {
                return;
            }
            let block = self.block;
            compress(&mut self.state, &block);
            self.block_len = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }

        let rest = blocks.remainder();
        self.block[..rest.len()].copy_from_slice(rest);
        self.block_len = rest.len();
    }

    pub fn finalize(mut self) -> [u8; DIGEST_SIZE] {
        self.finalize_reset()
    }

    /// Produce the digest and return the hasher to its initial state
    pub fn finalize_reset(&mut self) -> [u8; DIGEST_SIZE] {
        let bit_len = self.total_len.wrapping_mul(8);

        // 0x80, zeros up to 56 mod 64, then the 64-bit little-endian bit length
        let pad_len = if self.block_len < LENGTH_OFFSET {
            LENGTH_OFFSET - self.block_len
        } else {
            BLOCK_SIZE + LENGTH_OFFSET - self.block_len
        };
        let mut trailer = [0u8; BLOCK_SIZE + 8];
        trailer[0] = 0x80;
        trailer[pad_len..pad_len + 8].copy_from_slice(&bit_len.to_le_bytes());
        self.update(&trailer[..pad_len + 8]);
        debug_assert_eq!(self.block_len, 0);

        let mut digest = [0u8; DIGEST_SIZE];
        for (out, word) in digest.chunks_exact_mut(4).zip(self.state) {
            out.copy_from_slice(&word.to_le_bytes());
        }

        self.reset();
        digest
    }

    pub fn reset(&mut self) {
        self.state = INITIAL_STATE;
        self.block_len = 0;
        self.total_len = 0;
    }
}

impl Accumulator for Md4 {
    type Digest = [u8; DIGEST_SIZE];

    fn update(&mut self, data: &[u8]) {
        Md4::update(self, data);
    }

    fn finalize(self) -> Self::Digest {
        Md4::finalize(self)
    }
}

/// Run the three MD4 rounds over one 64-byte block
fn compress(state: &mut [u32; 4], block: &[u8]) {
    let mut x = [0u32; 16];
    for (word, bytes) in x.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    let [mut a, mut b, mut c, mut d] = *state;

    for i in [0, 4, 8, 12] {
        a = ff(a, b, c, d, x[i], 3);
        d = ff(d, a, b, c, x[i + 1], 7);
        c = ff(c, d, a, b, x[i + 2], 11);
        b = ff(b, c, d, a, x[i + 3], 19);
    }

    for i in 0..4 {
        a = gg(a, b, c, d, x[i], 3);
        d = gg(d, a, b, c, x[i + 4], 5);
        c = gg(c, d, a, b, x[i + 8], 9);
        b = gg(b, c, d, a, x[i + 12], 13);
    }

    for i in [0, 2, 1, 3] {
        a = hh(a, b, c, d, x[i], 3);
        d = hh(d, a, b, c, x[i + 8], 9);
        c = hh(c, d, a, b, x[i + 4], 11);
        b = hh(b, c, d, a, x[i + 12], 15);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}

#[inline(always)]
fn ff(a: u32, b: u32, c: u32, d: u32, x: u32, s: u32) -> u32 {
    a.wrapping_add((b & c) | (!b & d))
        .wrapping_add(x)
        .rotate_left(s)
}

#[inline(always)]
fn gg(a: u32, b: u32, c: u32, d: u32, x: u32, s: u32) -> u32 {
    a.wrapping_add((b & c) | (b & d) | (c & d))
        .wrapping_add(x)
        .wrapping_add(ROUND2_CONSTANT)
        .rotate_left(s)
}

#[inline(always)]
fn hh(a: u32, b: u32, c: u32, d: u32, x: u32, s: u32) -> u32 {
    a.wrapping_add(b ^ c ^ d)
        .wrapping_add(x)
        .wrapping_add(ROUND3_CONSTANT)
        .rotate_left(s)
}
