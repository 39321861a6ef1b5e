//! ECDSA signature with DER serialization and RFC6979 deterministic nonces.
//!
//! Supports DER encoding/decoding, fixed 64-byte `r || s` form, compact
//! (recoverable) signatures, low-S normalization, and verification.
//!
//! Verification never errors: a well-formed signature that does not check
//! out is `false`. Only bytes that cannot be parsed as a signature at all
//! produce `MalformedSignature`.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{self, RecoveryId, VerifyingKey};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::ec::{CURVE_ORDER, HALF_ORDER};
use crate::hash::DIGEST_LEN;
use crate::{PrimitivesError, Result};

/// Length of the fixed `r || s` encoding.
pub const SIGNATURE_BYTES_LEN: usize = 64;

/// Length of a compact recoverable signature (header + r + s).
pub const COMPACT_LEN: usize = 65;

/// Header base for compact signatures: 27 + recovery id, +4 for compressed keys.
const COMPACT_HEADER_BASE: u8 = 27 + 4;

/// Smallest possible DER signature: 0x30 len 0x02 1 r 0x02 1 s.
const MIN_DER_LEN: usize = 8;

/// An ECDSA signature with R and S components.
///
/// A plain value: it carries no key or message and is bound to them only
/// by verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian).
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S 32-byte arrays.
    ///
    /// No range check is made here; out-of-range values simply fail
    /// verification.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// Access the R component of the signature.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// Access the S component of the signature.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Sign a 32-byte digest using RFC6979 deterministic nonces.
    ///
    /// Produces a low-S normalized signature. The same key and digest
    /// always yield the same signature.
    pub fn sign(digest: &[u8; DIGEST_LEN], priv_key: &PrivateKey) -> Self {
        Self::sign_recoverable(digest, priv_key).0
    }

    /// Sign and also return the recovery id matching the normalized S.
    fn sign_recoverable(digest: &[u8; DIGEST_LEN], priv_key: &PrivateKey) -> (Self, RecoveryId) {
        // Fails only if k or s is zero, with negligible probability.
        let (k256_sig, recovery_id) = priv_key
            .signing_key()
            .sign_prehash_recoverable(digest)
            .expect("RFC 6979 signing of a 32-byte digest");

        let (r_bytes, s_bytes) = k256_sig.split_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&r_bytes);
        s.copy_from_slice(&s_bytes);
        debug_assert!(!is_greater_than(&s, &HALF_ORDER), "k256 signs with low S");

        trace!("produced deterministic ECDSA signature");
        (Signature { r, s }, recovery_id)
    }

    /// Verify this signature against a 32-byte digest and public key.
    ///
    /// Both S forms are accepted: `(r, s)` and `(r, n - s)` verify alike.
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise. Never errors.
    pub fn verify(&self, digest: &[u8; DIGEST_LEN], pub_key: &PublicKey) -> bool {
        let k256_sig = match ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(self.r),
            k256::FieldBytes::from(self.s),
        ) {
            Ok(sig) => sig.normalize_s().unwrap_or(sig),
            Err(_) => {
                debug!("signature scalars out of range");
                return false;
            }
        };

        let ok = pub_key
            .verifying_key()
            .verify_prehash(digest, &k256_sig)
            .is_ok();
        debug!(signer = %pub_key.fingerprint(), valid = ok, "verified ECDSA signature");
        ok
    }

    /// Parse a DER-encoded ECDSA signature.
    ///
    /// Expected format: 0x30 <len> 0x02 <r_len> <r> 0x02 <s_len> <s>
    ///
    /// # Returns
    /// `MalformedSignature` if the structure cannot be read. Scalars that
    /// parse but lie outside `[1, n-1]` are accepted here and rejected by
    /// [`Signature::verify`].
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_DER_LEN {
            return Err(malformed("too short"));
        }
        if bytes[0] != 0x30 {
            return Err(malformed("no header magic"));
        }
        if bytes[1] as usize + 2 != bytes.len() {
            return Err(malformed("bad length"));
        }

        let (r, rest) = read_der_int(&bytes[2..], "R")?;
        let (s, rest) = read_der_int(rest, "S")?;
        if !rest.is_empty() {
            return Err(malformed("trailing bytes after S"));
        }

        Ok(Signature { r, s })
    }

    /// Serialize the signature in DER format with low-S normalization.
    ///
    /// Canonicalizing: a high-S signature is written as `(r, n - s)`, so
    /// `from_der(x).to_der()` differs from `x` for high-S input. An S at or
    /// above the curve order is written unchanged.
    ///
    /// Output format: 0x30 <len> 0x02 <r_len> <r_bytes> 0x02 <s_len> <s_bytes>
    pub fn to_der(&self) -> Vec<u8> {
        let s = if is_greater_than(&self.s, &HALF_ORDER) && self.s < CURVE_ORDER {
            subtract_from_order(&self.s)
        } else {
            self.s
        };

        let rb = canonicalize_int(&self.r);
        let sb = canonicalize_int(&s);

        let total_len = 6 + rb.len() + sb.len();
        let mut out = Vec::with_capacity(total_len);
        out.push(0x30);
        out.push((total_len - 2) as u8);
        out.push(0x02);
        out.push(rb.len() as u8);
        out.extend_from_slice(&rb);
        out.push(0x02);
        out.push(sb.len() as u8);
        out.extend_from_slice(&sb);
        out
    }

    /// Parse a hex-encoded DER signature.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str).map_err(|e| malformed(&e.to_string()))?;
        Self::from_der(&bytes)
    }

    /// Lowercase hex of the DER encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_der())
    }

    /// Parse the fixed 64-byte `r || s` encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SIGNATURE_BYTES_LEN {
            return Err(malformed(&format!(
                "expected {} bytes, got {}",
                SIGNATURE_BYTES_LEN,
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(Signature { r, s })
    }

    /// Serialize as fixed 64-byte `r || s`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_BYTES_LEN] {
        let mut out = [0u8; SIGNATURE_BYTES_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }

    /// Sign a digest and serialize in 65-byte compact format with recovery id.
    ///
    /// Format: <header> <32-byte R> <32-byte S>, header = 27 + recovery id + 4.
    pub fn sign_compact(digest: &[u8; DIGEST_LEN], priv_key: &PrivateKey) -> [u8; COMPACT_LEN] {
        let (sig, recovery_id) = Self::sign_recoverable(digest, priv_key);
        let mut out = [0u8; COMPACT_LEN];
        out[0] = COMPACT_HEADER_BASE + recovery_id.to_byte();
        out[1..33].copy_from_slice(&sig.r);
        out[33..].copy_from_slice(&sig.s);
        out
    }

    /// Parse the R and S parts of a 65-byte compact signature.
    pub fn from_compact(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COMPACT_LEN {
            return Err(malformed("invalid compact signature size"));
        }
        Self::from_bytes(&bytes[1..])
    }

    /// Recover the signer's public key from a compact signature and digest.
    ///
    /// # Returns
    /// `MalformedSignature` for a bad size or header; an error if no key
    /// can be recovered for this digest.
    pub fn recover_public_key(compact_sig: &[u8], digest: &[u8; DIGEST_LEN]) -> Result<PublicKey> {
        if compact_sig.len() != COMPACT_LEN {
            return Err(malformed("invalid compact signature size"));
        }

        let header = compact_sig[0];
        if !(27..=34).contains(&header) {
            return Err(malformed("invalid compact header"));
        }
        let recovery_id = RecoveryId::from_byte((header - 27) & !4u8)
            .ok_or_else(|| malformed("invalid recovery id"))?;

        let k256_sig = ecdsa::Signature::from_scalars(
            *k256::FieldBytes::from_slice(&compact_sig[1..33]),
            *k256::FieldBytes::from_slice(&compact_sig[33..65]),
        )
        .map_err(|e| malformed(&e.to_string()))?;

        let recovered = VerifyingKey::recover_from_prehash(digest, &k256_sig, recovery_id)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;

        Ok(PublicKey::from_k256_verifying_key(&recovered))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Signature::from_hex(&s).map_err(D::Error::custom)
    }
}

/// Sign a 32-byte digest. Hash the message first with [`crate::hash::sha256`].
pub fn sign(digest: &[u8; DIGEST_LEN], priv_key: &PrivateKey) -> Signature {
    Signature::sign(digest, priv_key)
}

/// Verify a parsed signature. Returns `false` for any invalid signature.
pub fn verify(digest: &[u8; DIGEST_LEN], sig: &Signature, pub_key: &PublicKey) -> bool {
    sig.verify(digest, pub_key)
}

/// Verify a DER-encoded signature.
///
/// # Returns
/// `Ok(false)` for a parseable but invalid signature, `MalformedSignature`
/// if the bytes are not a DER signature.
pub fn verify_der(digest: &[u8; DIGEST_LEN], der: &[u8], pub_key: &PublicKey) -> Result<bool> {
    let sig = Signature::from_der(der)?;
    Ok(sig.verify(digest, pub_key))
}

/// Verify a hex-encoded DER signature. See [`verify_der`].
pub fn verify_hex(digest: &[u8; DIGEST_LEN], sig_hex: &str, pub_key: &PublicKey) -> Result<bool> {
    let sig = Signature::from_hex(sig_hex)?;
    Ok(sig.verify(digest, pub_key))
}

fn malformed(why: &str) -> PrimitivesError {
    PrimitivesError::MalformedSignature(why.to_string())
}

/// Read one DER INTEGER, returning it left-padded to 32 bytes and the rest.
fn read_der_int<'a>(data: &'a [u8], name: &str) -> Result<([u8; 32], &'a [u8])> {
    if data.len() < 2 || data[0] != 0x02 {
        return Err(malformed(&format!("no int marker for {}", name)));
    }
    let len = data[1] as usize;
    if len == 0 || data.len() < 2 + len {
        return Err(malformed(&format!("bogus {} length", name)));
    }
    let value = to_32_bytes(&data[2..2 + len])?;
    Ok((value, &data[2 + len..]))
}

/// Canonicalize an integer for DER encoding.
///
/// Strips leading zeros from the big-endian representation and adds
/// a 0x00 padding byte if the high bit is set.
fn canonicalize_int(val: &[u8; 32]) -> Vec<u8> {
    let mut start = 0;
    while start < 31 && val[start] == 0 {
        start += 1;
    }
    let trimmed = &val[start..];

    if trimmed[0] & 0x80 != 0 {
        let mut out = Vec::with_capacity(trimmed.len() + 1);
        out.push(0x00);
        out.extend_from_slice(trimmed);
        out
    } else {
        trimmed.to_vec()
    }
}

/// Convert a variable-length big-endian byte slice to a fixed 32-byte array.
fn to_32_bytes(bytes: &[u8]) -> Result<[u8; 32]> {
    let mut trimmed = bytes;
    while trimmed.len() > 1 && trimmed[0] == 0 {
        trimmed = &trimmed[1..];
    }
    if trimmed.len() > 32 {
        return Err(malformed("integer value too large for 32 bytes"));
    }
    let mut out = [0u8; 32];
    out[32 - trimmed.len()..].copy_from_slice(trimmed);
    Ok(out)
}

/// Compare two 32-byte big-endian integers: a > b.
fn is_greater_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a > b
}

/// Compute N - val where N is the secp256k1 curve order.
fn subtract_from_order(val: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;
    for i in (0..32).rev() {
        let diff = CURVE_ORDER[i] as i32 - val[i] as i32 - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }
    result
}
