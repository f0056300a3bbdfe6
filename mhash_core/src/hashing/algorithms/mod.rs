//! Digest implementations fed by the streaming hasher

pub mod crc32;
pub mod ed2k;
pub mod md4;
pub mod md5;
pub mod sha1;

pub use self::crc32::Crc32;
pub use self::ed2k::Ed2k;
pub use self::md4::Md4;
pub use self::md5::Md5Hasher;
pub use self::sha1::Sha1Hasher;
