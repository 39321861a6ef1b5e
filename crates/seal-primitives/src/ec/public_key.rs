//! secp256k1 public key.
//!
//! Supports compressed/uncompressed SEC1 import and export, hex encoding,
//! SHA-256 fingerprints, signature verification, and the symmetric
//! associated-data value two parties bind into their AEAD tags.

use std::fmt;
use std::hash::{Hash, Hasher};

use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{AffinePoint, EncodedPoint};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ec::signature::Signature;
use crate::hash::{self, DIGEST_LEN};
use crate::{PrimitivesError, Result};

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
pub const UNCOMPRESSED_LEN: usize = 65;

/// A validated secp256k1 public key.
///
/// Construction guarantees the point is on the curve and is not the
/// identity, so every `PublicKey` value is usable.
#[derive(Clone, Debug)]
pub struct PublicKey {
    /// The underlying k256 verifying key.
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a PublicKey from raw SEC1 encoded bytes.
    ///
    /// Accepts compressed (33-byte, `02`/`03`) and uncompressed (65-byte,
    /// `04`) encodings.
    ///
    /// # Returns
    /// `InvalidKeyEncoding` for an empty input, an unknown prefix, or a
    /// length that does not match the prefix. `PointNotOnCurve` when the
    /// coordinates decode but are not a curve point, or encode the identity.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.first() {
            None => {
                return Err(PrimitivesError::InvalidKeyEncoding(
                    "public key is empty".to_string(),
                ))
            }
            Some(0x00) if bytes.len() == 1 => return Err(PrimitivesError::PointNotOnCurve),
            Some(0x02) | Some(0x03) | Some(0x04) => {}
            Some(tag) => {
                return Err(PrimitivesError::InvalidKeyEncoding(format!(
                    "unsupported point prefix 0x{:02x}",
                    tag
                )))
            }
        }

        let encoded = EncodedPoint::from_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidKeyEncoding(e.to_string()))?;
        let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
        let affine = affine.ok_or(PrimitivesError::PointNotOnCurve)?;
        let inner =
            VerifyingKey::from_affine(affine).map_err(|_| PrimitivesError::PointNotOnCurve)?;
        Ok(PublicKey { inner })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of a compressed (66 chars) or uncompressed (130 chars) key.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    ///
    /// The first byte is 0x02 (even Y) or 0x03 (odd Y), followed by the 32-byte X coordinate.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key in uncompressed SEC1 format (65 bytes).
    ///
    /// The first byte is 0x04, followed by 32-byte X and 32-byte Y coordinates.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Lowercase hex of the compressed encoding (66 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Lowercase hex of the uncompressed encoding (130 characters).
    pub fn to_hex_uncompressed(&self) -> String {
        hex::encode(self.to_uncompressed())
    }

    /// Hex SHA-256 of the compressed encoding. Stable across encodings.
    pub fn fingerprint(&self) -> String {
        hash::hash(&self.to_compressed())
    }

    /// Verify an ECDSA signature over a 32-byte digest with this key.
    ///
    /// # Returns
    /// `true` if the signature is valid for this digest and key, `false` otherwise.
    pub fn verify(&self, digest: &[u8; DIGEST_LEN], sig: &Signature) -> bool {
        sig.verify(digest, self)
    }

    /// Construct a PublicKey from a k256 `VerifyingKey`.
    pub(crate) fn from_k256_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey { inner: vk.clone() }
    }

    /// Re-derive the affine point from this key's encoding and check it again.
    ///
    /// Every `PublicKey` is built from a validated point, so this cannot fail
    /// for keys produced by this crate; the `InvalidPublicKey` branch only
    /// guards the ECDH input against a broken invariant.
    pub(crate) fn revalidated_point(&self) -> Result<AffinePoint> {
        let encoded = self.inner.to_encoded_point(false);
        let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
        let affine = affine.ok_or_else(|| {
            PrimitivesError::InvalidPublicKey("point does not satisfy the curve equation".to_string())
        })?;
        if affine.to_encoded_point(true).is_identity() {
            return Err(PrimitivesError::InvalidPublicKey(
                "point at infinity".to_string(),
            ));
        }
        Ok(affine)
    }

    /// Access the underlying k256 `VerifyingKey`.
    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

/// Associated data binding both parties' public keys.
///
/// SHA-256 over the two compressed encodings in lexicographic order, so the
/// sender and the recipient compute the same value.
pub fn associated_data(a: &PublicKey, b: &PublicKey) -> [u8; DIGEST_LEN] {
    let (a, b) = (a.to_compressed(), b.to_compressed());
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; COMPRESSED_LEN * 2];
    buf[..COMPRESSED_LEN].copy_from_slice(&first);
    buf[COMPRESSED_LEN..].copy_from_slice(&second);
    hash::sha256(&buf)
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_compressed().hash(state);
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for PublicKey {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_hex(&s).map_err(D::Error::custom)
    }
}
