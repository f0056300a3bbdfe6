//! MD5 adapter over the `md-5` crate

use crate::hashing::traits::Accumulator;
use md5::{Digest as Md5Digest, Md5};

/// MD5 streaming hasher
#[derive(Clone, Default)]
pub struct Md5Hasher {
    hasher: Md5,
}

impl Md5Hasher {
    pub fn new() -> Self {
        Self { hasher: Md5::new() }
    }
}

impl Accumulator for Md5Hasher {
    type Digest = md5::digest::Output<Md5>;

    fn update(&mut self, data: &[u8]) {
        Md5Digest::update(&mut self.hasher, data);
    }

    fn finalize(self) -> Self::Digest {
        Md5Digest::finalize(self.hasher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        assert_eq!(
            Md5Hasher::new().finalize_hex(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );

        let mut hasher = Md5Hasher::new();
        hasher.update(b"Hello, ");
        hasher.update(b"World!");
        assert_eq!(hasher.finalize_hex(), "65a8e27d8879283831b664bd8b7f0ad4");
    }
}
