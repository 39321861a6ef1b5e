//! Elliptic curve cryptography on secp256k1.
//!
//! Provides private and public keys, key pairs, ECDH shared secrets,
//! ECDSA signatures, and associated-data binding for two-party sealing.

pub mod key_pair;
pub mod private_key;
pub mod public_key;
pub mod shared_secret;
pub mod signature;

pub use key_pair::KeyPair;
pub use private_key::PrivateKey;
pub use public_key::{associated_data, PublicKey};
pub use shared_secret::{derive_shared, derive_shared_with, SharedSecret};
pub use signature::{sign, verify, verify_der, verify_hex, Signature};

/// The secp256k1 curve order N.
/// N = FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
pub const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// Half of the secp256k1 curve order (N/2), used for low-S normalization.
pub const HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];
