//! CRC-32 (IEEE 802.3, reflected) checksum

use crate::hashing::traits::Accumulator;

/// Reflected form of the IEEE 802.3 polynomial 0x04C11DB7
const POLYNOMIAL: u32 = 0xEDB8_8320;

static TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Incremental CRC-32 accumulator
#[derive(Clone, Debug)]
pub struct Crc32 {
    register: u32,
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc32 {
    pub fn new() -> Self {
        Self {
            register: 0xFFFF_FFFF,
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        let mut crc = self.register;
        for &byte in data {
            crc = (crc >> 8) ^ TABLE[((crc ^ byte as u32) & 0xFF) as usize];
        }
        self.register = crc;
    }

    /// Checksum of everything fed so far
    pub fn value(&self) -> u32 {
        !self.register
    }

    /// Checksum bytes, most significant first
    ///
    /// This is the byte-reversed form of the little-endian register, which
    /// hex-encodes to the usual presentation (`cbf43926` for "123456789").
    pub fn finalize(self) -> [u8; 4] {
        self.value().to_be_bytes()
    }
}

impl Accumulator for Crc32 {
    type Digest = [u8; 4];

    fn update(&mut self, data: &[u8]) {
        Crc32::update(self, data);
    }

    fn finalize(self) -> Self::Digest {
        Crc32::finalize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(Crc32::new().finalize_hex(), "00000000");
    }

    #[test]
    fn test_check_value() {
        let mut crc = Crc32::new();
        crc.update(b"123456789");
        assert_eq!(crc.value(), 0xCBF4_3926);
        assert_eq!(crc.finalize_hex(), "cbf43926");
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut crc = Crc32::new();
        crc.update(b"Hello, ");
        crc.update(&[]);
        crc.update(b"World!");
        assert_eq!(crc.finalize_hex(), "ec4ac3d0");
    }

    #[test]
    fn test_table_entries() {
        assert_eq!(TABLE[0], 0);
        assert_eq!(TABLE[1], 0x7707_3096);
        assert_eq!(TABLE[255], 0x2D02_EF8D);
    }

    proptest! {
        #[test]
        fn prop_matches_crc32fast(
            data in proptest::collection::vec(any::<u8>(), 0..4096),
            split in 0usize..4096,
        ) {
            let split = split.min(data.len());
            let mut crc = Crc32::new();
            crc.update(&data[..split]);
            crc.update(&data[split..]);

            prop_assert_eq!(crc.value(), crc32fast::hash(&data));
        }
    }
}
