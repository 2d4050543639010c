//! Utilities for cryptographic algorithms
use ring::digest;

/// Trait for generating a digest for SHA
pub trait GenerateDigest {
    /// takes a message and creates a digest for it
    fn generate_digest(&self, message: &[u8]) -> Vec<u8>;
}

/// Secure Hash Algorithm 1
///
/// Only for protocols that still sign with it; do not pick this for anything new.
#[derive(Debug, Clone, Copy)]
pub struct Sha1;

impl GenerateDigest for Sha1 {
    fn generate_digest(&self, message: &[u8]) -> Vec<u8> {
        digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, message)
            .as_ref()
            .to_vec()
    }
}

/// Digest of `message` rendered as lowercase hex
pub fn hex_digest(algorithm: &impl GenerateDigest, message: &[u8]) -> String {
    hex::encode(algorithm.generate_digest(message))
}
