//! SHA-256 digests.
//!
//! `hash` is the hex-string entry point used for fingerprints and for
//! callers that want a printable digest; `sha256` returns raw bytes for
//! signing and associated-data binding.

use sha2::{Digest, Sha256};

/// Length of a SHA-256 digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute SHA-256 over the exact input bytes and return it as lowercase hex.
///
/// The result is always 64 characters. Text normalization is the caller's
/// concern; see [`hash_str`] for UTF-8 strings.
pub fn hash(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Hash the UTF-8 bytes of a string. Equivalent to `hash(data.as_bytes())`.
pub fn hash_str(data: &str) -> String {
    hash(data.as_bytes())
}
