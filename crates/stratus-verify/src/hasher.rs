//! Incremental hashers fed by the transfer pipeline.

use digest::Digest;

/// Incremental hash state.
///
/// Implementations must be sendable across worker tasks; the transfer
/// engine moves hashers into spawned downloads.
pub trait Hasher: Send {
    /// Feed a chunk of content.
    fn update(&mut self, data: &[u8]);

    /// Consume the hasher and return the raw digest bytes.
    fn finalize(self) -> Vec<u8>;
}

/// SHA-1, the digest the storage protocol verifies content with.
pub struct Sha1Hasher(sha1::Sha1);

impl Sha1Hasher {
    /// Raw digest length in bytes.
    pub const OUTPUT_LEN: usize = 20;

    pub fn new() -> Self {
        Self(sha1::Sha1::new())
    }

    /// One-shot digest of a complete buffer.
    pub fn digest(data: &[u8]) -> Vec<u8> {
        sha1::Sha1::digest(data).to_vec()
    }
}

impl Default for Sha1Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Sha1Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self) -> Vec<u8> {
        self.0.finalize().to_vec()
    }
}

/// Hasher used when verification is disabled.
///
/// Accepts any amount of input and produces an empty digest, so callers
/// keep a single code path whether or not they verify.
pub struct EmptyHasher;

impl Hasher for EmptyHasher {
    fn update(&mut self, _data: &[u8]) {}

    fn finalize(self) -> Vec<u8> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_empty_input() {
        let hasher = Sha1Hasher::new();
        assert_eq!(
            hex::encode(hasher.finalize()),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn test_sha1_known_vector() {
        let mut hasher = Sha1Hasher::new();
        hasher.update(b"hello world");
        assert_eq!(
            hex::encode(hasher.finalize()),
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        );
    }

    #[test]
    fn test_sha1_incremental_matches_one_shot() {
        let data = b"dummy".repeat(20);
        let mut hasher = Sha1Hasher::new();
        for chunk in data.chunks(7) {
            hasher.update(chunk);
        }
        assert_eq!(hasher.finalize(), Sha1Hasher::digest(&data));
    }

    #[test]
    fn test_sha1_output_len() {
        assert_eq!(Sha1Hasher::digest(b"x").len(), Sha1Hasher::OUTPUT_LEN);
    }

    #[test]
    fn test_empty_hasher_produces_nothing() {
        let mut hasher = EmptyHasher;
        hasher.update(b"ignored");
        assert!(hasher.finalize().is_empty());
    }
}
