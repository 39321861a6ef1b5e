#![deny(missing_docs)]

//! Cryptographic primitives for two-party message sealing on secp256k1.
//!
//! This crate provides:
//! - SHA-256 hashing with hex output
//! - secp256k1 key pairs with hex import/export and curve validation
//! - ECDH shared secrets passed through HKDF-SHA256
//! - Deterministic (RFC 6979) ECDSA signing and verification
//! - AES-256-GCM authenticated encryption with per-message random nonces

pub mod aead;
pub mod config;
pub mod ec;
pub mod hash;

mod error;
pub use error::{PrimitivesError, Result};

#[cfg(test)]
mod testutil;

pub use aead::SymmetricKey;
pub use ec::{KeyPair, PrivateKey, PublicKey, SharedSecret, Signature};
