//! Sealed messages: ECDH-keyed AES-256-GCM between a sender and a recipient.
//!
//! The envelope carries both public keys so the recipient can derive the
//! same shared secret. Both keys and the version tag are bound into the
//! AEAD associated data, so swapping either key in transit fails
//! authentication.

use seal_primitives::aead::{SymmetricKey, NONCE_LEN, TAG_LEN};
use seal_primitives::ec::public_key::COMPRESSED_LEN;
use seal_primitives::ec::{associated_data, derive_shared, PrivateKey, PublicKey};
use tracing::debug;

use crate::MessageError;

/// Sealed message version tag.
const VERSION: [u8; 4] = [0x5e, 0xa1, 0xec, 0x01];

const HEADER_LEN: usize = VERSION.len() + COMPRESSED_LEN + COMPRESSED_LEN;

/// Seal a message from `sender` to `recipient`.
///
/// The output format is:
/// `version (4 bytes) || sender_pubkey (33 bytes) || recipient_pubkey (33 bytes) || nonce || ciphertext || tag`
pub fn seal(
    message: &[u8],
    sender: &PrivateKey,
    recipient: &PublicKey,
) -> Result<Vec<u8>, MessageError> {
    let sender_pub = sender.pub_key();
    let key = SymmetricKey::from_shared(&derive_shared(sender, recipient)?);
    let ad = envelope_ad(&sender_pub, recipient);
    let ciphertext = key.encrypt(message, &ad)?;

    let mut result = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    result.extend_from_slice(&VERSION);
    result.extend_from_slice(&sender_pub.to_compressed());
    result.extend_from_slice(&recipient.to_compressed());
    result.extend_from_slice(&ciphertext);

    debug!(sender = %sender_pub.fingerprint(), recipient = %recipient.fingerprint(), "sealed message");
    Ok(result)
}

/// Open a sealed message with the recipient's private key.
pub fn open(envelope: &[u8], recipient: &PrivateKey) -> Result<Vec<u8>, MessageError> {
    let min_length = HEADER_LEN + NONCE_LEN + TAG_LEN;
    if envelope.len() < min_length {
        return Err(MessageError::MessageTooShort {
            expected: min_length,
            actual: envelope.len(),
        });
    }

    let (version, rest) = envelope.split_at(VERSION.len());
    if version != VERSION {
        return Err(MessageError::VersionMismatch {
            expected: hex::encode(VERSION),
            received: hex::encode(version),
        });
    }

    let (sender_bytes, rest) = rest.split_at(COMPRESSED_LEN);
    let sender = PublicKey::from_bytes(sender_bytes)?;

    let (expected_recipient, ciphertext) = rest.split_at(COMPRESSED_LEN);
    let recipient_pub = recipient.pub_key();
    let actual_recipient = recipient_pub.to_compressed();
    if expected_recipient != actual_recipient.as_slice() {
        return Err(MessageError::RecipientMismatch {
            expected: hex::encode(expected_recipient),
            actual: hex::encode(actual_recipient),
        });
    }

    let key = SymmetricKey::from_shared(&derive_shared(recipient, &sender)?);
    let ad = envelope_ad(&sender, &recipient_pub);
    let plaintext = key.decrypt(ciphertext, &ad)?;

    debug!(sender = %sender.fingerprint(), "opened sealed message");
    Ok(plaintext)
}

fn envelope_ad(sender: &PublicKey, recipient: &PublicKey) -> Vec<u8> {
    let mut ad = Vec::with_capacity(VERSION.len() + 32);
    ad.extend_from_slice(&VERSION);
    ad.extend_from_slice(&associated_data(sender, recipient));
    ad
}
