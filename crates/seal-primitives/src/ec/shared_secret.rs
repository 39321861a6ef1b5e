//! ECDH key agreement.
//!
//! The raw x-coordinate of `priv * pub` is never handed out. It is fed
//! through HKDF-SHA256 with the process-wide label and salt from
//! [`crate::config`], and the 32-byte output is what callers receive.

use std::fmt;

use hkdf::Hkdf;
use k256::elliptic_curve::subtle::ConstantTimeEq;
use sha2::Sha256;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::{self, Config};
use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::Result;

/// Length of a derived shared secret in bytes.
pub const SHARED_SECRET_LEN: usize = 32;

/// KDF output of an ECDH exchange. Suitable as an AES-256 key.
///
/// Zeroized on drop and compared in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_LEN]);

impl SharedSecret {
    /// The derived key bytes.
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_LEN] {
        &self.0
    }

    /// Lowercase hex of the derived key bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for SharedSecret {}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

/// Derive the secret shared between `priv_key` and `pub_key` using the
/// active process configuration.
///
/// `pub_key` is re-checked on the curve before use. Since construction
/// already validates it, the `InvalidPublicKey` error is not expected in
/// practice.
pub fn derive_shared(priv_key: &PrivateKey, pub_key: &PublicKey) -> Result<SharedSecret> {
    derive_shared_with(priv_key, pub_key, config::get())
}

/// Derive a shared secret with an explicit KDF configuration.
pub fn derive_shared_with(
    priv_key: &PrivateKey,
    pub_key: &PublicKey,
    cfg: &Config,
) -> Result<SharedSecret> {
    let their_point = pub_key.revalidated_point()?;
    let raw = k256::ecdh::diffie_hellman(priv_key.as_nonzero_scalar(), their_point);

    let hk = Hkdf::<Sha256>::new(cfg.kdf_salt.as_deref(), raw.raw_secret_bytes());
    let mut okm = [0u8; SHARED_SECRET_LEN];
    hk.expand(cfg.kdf_info.as_bytes(), &mut okm)
        .expect("32 bytes is a valid HKDF-SHA256 output length");

    debug!(peer = %pub_key.fingerprint(), "derived ECDH shared secret");
    Ok(SharedSecret(okm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;

    fn key(byte: u8) -> PrivateKey {
        let mut b = [0u8; 32];
        b[31] = byte;
        PrivateKey::from_bytes(&b).unwrap()
    }

    #[test]
    fn test_shared_secret_is_symmetric() {
        let alice = PrivateKey::generate().unwrap();
        let bob = PrivateKey::generate().unwrap();

        let ab = derive_shared(&alice, &bob.pub_key()).unwrap();
        let ba = derive_shared(&bob, &alice.pub_key()).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.to_hex(), ba.to_hex());
    }

    #[test]
    fn test_shared_secret_is_not_raw_x_coordinate() {
        // 1 * B = B, so the raw ECDH output would be B's x-coordinate.
        let bob = PrivateKey::generate().unwrap();
        let shared = derive_shared(&key(1), &bob.pub_key()).unwrap();
        let x = &bob.pub_key().to_compressed()[1..];
        assert_ne!(&shared.as_bytes()[..], x);
    }

    #[test]
    fn test_different_peers_give_different_secrets() {
        let alice = key(15);
        let s1 = derive_shared(&alice, &key(21).pub_key()).unwrap();
        let s2 = derive_shared(&alice, &key(22).pub_key()).unwrap();
        assert_ne!(s1, s2);
    }

    #[test]
    fn test_kdf_label_and_salt_separate_domains() {
        let alice = key(15);
        let bob = key(21).pub_key();
        let base = derive_shared_with(&alice, &bob, &Config::default()).unwrap();

        let relabeled = Config {
            kdf_info: "other-app/v1".to_string(),
            kdf_salt: None,
        };
        let salted = Config {
            kdf_salt: Some(sha256(b"salt").to_vec()),
            ..Config::default()
        };
        assert_ne!(base, derive_shared_with(&alice, &bob, &relabeled).unwrap());
        assert_ne!(base, derive_shared_with(&alice, &bob, &salted).unwrap());
    }

    #[test]
    fn test_default_config_is_used_by_derive_shared() {
        let alice = key(15);
        let bob = key(21).pub_key();
        assert_eq!(
            derive_shared(&alice, &bob).unwrap(),
            derive_shared_with(&alice, &bob, config::get()).unwrap()
        );
    }

    #[test]
    fn test_debug_is_redacted() {
        let s = derive_shared(&key(3), &key(4).pub_key()).unwrap();
        assert_eq!(format!("{:?}", s), "SharedSecret(..)");
    }
}
