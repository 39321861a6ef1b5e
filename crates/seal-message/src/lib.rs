#![deny(missing_docs)]

//! Sealed (encrypted) and signed message envelopes between two secp256k1 parties.
//!
//! A sealed envelope is readable only by its recipient and authenticated to
//! its sender through ECDH. A signed envelope carries the signer's public key
//! and can be checked by anyone.

mod error;
pub mod sealed;
pub mod signed;

pub use error::MessageError;
pub use sealed::{open, seal};
pub use signed::{sign, verify};
