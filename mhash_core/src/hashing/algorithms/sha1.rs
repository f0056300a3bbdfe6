//! SHA-1 adapter over the `sha1` crate

use crate::hashing::traits::Accumulator;
use sha1::{Digest as Sha1Digest, Sha1};

/// SHA-1 streaming hasher
#[derive(Clone, Default)]
pub struct Sha1Hasher {
    hasher: Sha1,
}

impl Sha1Hasher {
    pub fn new() -> Self {
        Self {
            hasher: Sha1::new(),
        }
    }
}

impl Accumulator for Sha1Hasher {
    type Digest = sha1::digest::Output<Sha1>;

    fn update(&mut self, data: &[u8]) {
        Sha1Digest::update(&mut self.hasher, data);
    }

    fn finalize(self) -> Self::Digest {
        Sha1Digest::finalize(self.hasher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        assert_eq!(
            Sha1Hasher::new().finalize_hex(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );

        let mut hasher = Sha1Hasher::new();
        hasher.update(b"Hello, World!");
        assert_eq!(
            hasher.finalize_hex(),
            "0a0a9f2a6772942557ab5355d76af442f8f65e01"
        );
    }
}
