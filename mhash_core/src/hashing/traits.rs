//! Capability trait shared by every digest the hasher fans bytes out to

/// A stateful digest that consumes a byte stream incrementally
///
/// Implementors are plain value types owned by a single hashing run. Feeding
/// the same bytes in any slicing must produce the same digest.
pub trait Accumulator: Send + Sized {
    /// Raw digest bytes
    type Digest: AsRef<[u8]>;

    /// Consume the next slice of the stream; an empty slice is a no-op
    fn update(&mut self, data: &[u8]);

    /// Finish the stream and produce the digest
    fn finalize(self) -> Self::Digest;

    /// Finish the stream and produce the digest as lowercase hex
    fn finalize_hex(self) -> String {
        hex::encode(self.finalize())
    }
}
