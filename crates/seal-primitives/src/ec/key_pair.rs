//! A private key bundled with its public key.

use rand::{CryptoRng, RngCore};

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::Result;

/// A secp256k1 key pair. The public half is derived once at construction.
#[derive(Clone, Debug)]
pub struct KeyPair {
    private: PrivateKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generate a fresh key pair from the operating system RNG.
    pub fn generate() -> Result<Self> {
        Ok(Self::from_private(PrivateKey::generate()?))
    }

    /// Generate a key pair from a caller-supplied CSPRNG.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        Ok(Self::from_private(PrivateKey::generate_with(rng)?))
    }

    /// Build a key pair around an existing private key.
    pub fn from_private(private: PrivateKey) -> Self {
        let public = private.pub_key();
        KeyPair { private, public }
    }

    /// Import a key pair from a hex-encoded private scalar.
    pub fn from_private_hex(hex_str: &str) -> Result<Self> {
        Ok(Self::from_private(PrivateKey::from_hex(hex_str)?))
    }

    /// The private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    /// The public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Split into the private and public halves.
    pub fn into_parts(self) -> (PrivateKey, PublicKey) {
        (self.private, self.public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{BrokenRng, FixedRng};
    use crate::PrimitivesError;

    #[test]
    fn test_public_matches_private() {
        let pair = KeyPair::generate().unwrap();
        assert_eq!(pair.public_key(), &pair.private_key().pub_key());
    }

    #[test]
    fn test_from_private_hex() {
        let pair = KeyPair::from_private_hex("1").unwrap();
        // 1 * G
        assert_eq!(
            pair.public_key().to_hex(),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert!(KeyPair::from_private_hex("0").is_err());
    }

    #[test]
    fn test_generate_with_rng() {
        let a = KeyPair::generate_with(&mut FixedRng(0x42)).unwrap();
        let b = KeyPair::generate_with(&mut FixedRng(0x42)).unwrap();
        assert_eq!(a.private_key(), b.private_key());

        assert!(matches!(
            KeyPair::generate_with(&mut BrokenRng),
            Err(PrimitivesError::RandomSourceUnavailable(_))
        ));
    }

    #[test]
    fn test_debug_does_not_leak_private_scalar() {
        let pair = KeyPair::generate().unwrap();
        let printed = format!("{:?}", pair);
        assert!(!printed.contains(&pair.private_key().to_hex()));
    }

    #[test]
    fn test_into_parts() {
        let pair = KeyPair::generate().unwrap();
        let expected = pair.public_key().clone();
        let (private, public) = pair.into_parts();
        assert_eq!(public, expected);
        assert_eq!(private.pub_key(), public);
    }
}
