//! Authenticated encryption with AES-256-GCM.
//!
//! Every call to [`encrypt`] draws a fresh 12-byte nonce. The output layout is
//! `nonce (12) || ciphertext || tag (16)`; [`decrypt`] reads it back at fixed
//! offsets. The tag is verified before any plaintext is returned, so a
//! modified nonce, body, tag, or associated data surfaces only as
//! `AuthenticationFailed`.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ec::SharedSecret;
use crate::{PrimitivesError, Result};

/// AES-256 key length.
pub const KEY_LEN: usize = 32;

/// GCM nonce length.
pub const NONCE_LEN: usize = 12;

/// GCM authentication tag length.
pub const TAG_LEN: usize = 16;

/// A 32-byte AES-256-GCM key. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    key: [u8; KEY_LEN],
}

impl SymmetricKey {
    /// Use an ECDH-derived secret directly as the key.
    pub fn from_shared(shared: &SharedSecret) -> Self {
        SymmetricKey {
            key: *shared.as_bytes(),
        }
    }

    /// Create a key from exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEY_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: KEY_LEN,
                got: bytes.len(),
            });
        }
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(bytes);
        Ok(SymmetricKey { key })
    }

    /// Generate a random key from the operating system RNG.
    pub fn generate() -> Result<Self> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a random key from a caller-supplied CSPRNG.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut key = [0u8; KEY_LEN];
        rng.try_fill_bytes(&mut key)?;
        Ok(SymmetricKey { key })
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// Encrypt with a fresh random nonce. See [`encrypt`].
    pub fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_with_rng(plaintext, associated_data, &mut OsRng)
    }

    /// Encrypt, drawing the nonce from `rng`.
    pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
        &self,
        plaintext: &[u8],
        associated_data: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let mut nonce = [0u8; NONCE_LEN];
        rng.try_fill_bytes(&mut nonce)?;

        let sealed = self
            .cipher()
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: plaintext,
                    aad: associated_data,
                },
            )
            .map_err(|e| PrimitivesError::EncryptionError(e.to_string()))?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);

        debug!(
            plaintext_len = plaintext.len(),
            ad_len = associated_data.len(),
            "AES-256-GCM encrypt"
        );
        Ok(out)
    }

    /// Decrypt `nonce || ciphertext || tag`. See [`decrypt`].
    pub fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        let min = NONCE_LEN + TAG_LEN;
        if ciphertext.len() < min {
            return Err(PrimitivesError::CiphertextTooShort {
                expected: min,
                got: ciphertext.len(),
            });
        }

        let (nonce, sealed) = ciphertext.split_at(NONCE_LEN);
        let plaintext = self
            .cipher()
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: sealed,
                    aad: associated_data,
                },
            )
            .map_err(|_| {
                debug!(ciphertext_len = ciphertext.len(), "AES-256-GCM tag mismatch");
                PrimitivesError::AuthenticationFailed
            })?;

        trace!(plaintext_len = plaintext.len(), "AES-256-GCM decrypt");
        Ok(plaintext)
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(&self.key.into())
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// Encrypt `plaintext` under `key`, authenticating `associated_data`.
///
/// # Returns
/// `nonce || ciphertext || tag`, or `RandomSourceUnavailable` if no nonce
/// could be drawn.
pub fn encrypt(plaintext: &[u8], key: &SymmetricKey, associated_data: &[u8]) -> Result<Vec<u8>> {
    key.encrypt(plaintext, associated_data)
}

/// Same as [`encrypt`] with an explicit nonce source.
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    key: &SymmetricKey,
    associated_data: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    key.encrypt_with_rng(plaintext, associated_data, rng)
}

/// Decrypt the output of [`encrypt`].
///
/// # Returns
/// `CiphertextTooShort` if the input cannot hold a nonce and a tag, and
/// `AuthenticationFailed` if the tag does not verify. No partial plaintext
/// is ever returned.
pub fn decrypt(ciphertext: &[u8], key: &SymmetricKey, associated_data: &[u8]) -> Result<Vec<u8>> {
    key.decrypt(ciphertext, associated_data)
}
