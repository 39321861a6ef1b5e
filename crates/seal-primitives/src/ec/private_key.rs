//! secp256k1 private key.
//!
//! Wraps a k256 signing key. Generation uses rejection sampling over a
//! CSPRNG; import accepts big-endian hex or raw bytes and rejects scalars
//! outside `[1, n-1]`. The scalar is zeroized when the key is dropped.

use std::fmt;

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::subtle::ConstantTimeEq;
use k256::{FieldBytes, NonZeroScalar};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::ec::public_key::PublicKey;
use crate::ec::shared_secret::{derive_shared, SharedSecret};
use crate::ec::signature::Signature;
use crate::hash::DIGEST_LEN;
use crate::{PrimitivesError, Result};

/// Length of a serialized private key in bytes.
pub const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// A secp256k1 private key for signing and key agreement.
///
/// Immutable once constructed. It is only serialized through the explicit
/// [`PrivateKey::to_hex`] and [`PrivateKey::to_bytes`] exports; `Debug`
/// prints the public key instead of the scalar.
#[derive(Clone)]
pub struct PrivateKey {
    /// The underlying k256 signing key. Zeroizes itself on drop.
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random private key from the OS random source.
    ///
    /// # Returns
    /// `Ok(PrivateKey)`, or `RandomSourceUnavailable` if the OS cannot
    /// supply entropy.
    pub fn generate() -> Result<Self> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a private key from the given CSPRNG.
    ///
    /// Draws 32 bytes at a time and redraws until they encode a scalar in
    /// `[1, n-1]`. RNG errors are returned as-is, never retried.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut candidate = Zeroizing::new([0u8; PRIVATE_KEY_BYTES_LEN]);
        let mut draws = 0u32;
        loop {
            rng.try_fill_bytes(&mut *candidate)?;
            draws += 1;
            if let Ok(inner) = SigningKey::from_bytes(FieldBytes::from_slice(&*candidate)) {
                let key = PrivateKey { inner };
                debug!(draws, public = %key.pub_key().fingerprint(), "generated private key");
                return Ok(key);
            }
            trace!("rejected out-of-range scalar candidate");
        }
    }

    /// Create a private key from a raw 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `InvalidKeyEncoding` if the length is wrong, the scalar is zero, or
    /// it is not below the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidKeyEncoding(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let inner = SigningKey::from_bytes(FieldBytes::from_slice(bytes)).map_err(|_| {
            PrimitivesError::InvalidKeyEncoding("scalar is zero or not below the curve order".to_string())
        })?;
        Ok(PrivateKey { inner })
    }

    /// Create a private key from a big-endian hex scalar.
    ///
    /// Up to 64 hex digits are accepted. Shorter values, including odd
    /// lengths, are left-padded with zeros.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidKeyEncoding(
                "private key hex is empty".to_string(),
            ));
        }
        if hex_str.len() > PRIVATE_KEY_BYTES_LEN * 2 {
            return Err(PrimitivesError::InvalidKeyEncoding(format!(
                "private key hex is {} digits, at most {} allowed",
                hex_str.len(),
                PRIVATE_KEY_BYTES_LEN * 2
            )));
        }
        let padded = Zeroizing::new(format!("{:0>64}", hex_str));
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_BYTES_LEN]);
        hex::decode_to_slice(padded.as_str(), &mut *bytes)?;
        Self::from_bytes(&*bytes)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_BYTES_LEN] {
        self.inner.to_bytes().into()
    }

    /// Serialize the private key as a 64-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.inner.to_bytes())
    }

    /// Derive the corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key())
    }

    /// Sign a 32-byte digest with a deterministic RFC 6979 nonce.
    ///
    /// Shorthand for [`Signature::sign`].
    pub fn sign(&self, digest: &[u8; DIGEST_LEN]) -> Signature {
        Signature::sign(digest, self)
    }

    /// Derive the KDF-processed ECDH secret shared with `pub_key`.
    ///
    /// Shorthand for [`derive_shared`].
    pub fn derive_shared(&self, pub_key: &PublicKey) -> Result<SharedSecret> {
        derive_shared(self, pub_key)
    }

    /// Access the underlying k256 `SigningKey`.
    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }

    /// The non-zero scalar backing this key.
    pub(crate) fn as_nonzero_scalar(&self) -> &NonZeroScalar {
        self.inner.as_nonzero_scalar()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_nonzero_scalar()
            .ct_eq(other.as_nonzero_scalar())
            .into()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.pub_key().to_hex())
            .finish_non_exhaustive()
    }
}
