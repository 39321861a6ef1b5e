//! Signed messages that anyone holding the envelope can verify.

use seal_primitives::ec::public_key::COMPRESSED_LEN;
use seal_primitives::ec::{PrivateKey, PublicKey, Signature};
use seal_primitives::hash::sha256;
use tracing::debug;

use crate::MessageError;

/// Signed message version bytes.
const VERSION_BYTES: [u8; 4] = [0x5e, 0xa1, 0x51, 0x01];

/// Sign a message.
///
/// The output format is:
/// `version (4 bytes) || signer_pubkey (33 bytes) || DER signature over sha256(message)`
pub fn sign(message: &[u8], signer: &PrivateKey) -> Vec<u8> {
    let signature = signer.sign(&sha256(message));
    let der = signature.to_der();

    let mut sig_bytes = Vec::with_capacity(VERSION_BYTES.len() + COMPRESSED_LEN + der.len());
    sig_bytes.extend_from_slice(&VERSION_BYTES);
    sig_bytes.extend_from_slice(&signer.pub_key().to_compressed());
    sig_bytes.extend_from_slice(&der);
    sig_bytes
}

/// Verify a signed message envelope.
///
/// Returns `Ok(false)` when the envelope is well formed but the signature
/// does not match the message, and an error when the envelope itself
/// cannot be parsed.
pub fn verify(message: &[u8], sig: &[u8]) -> Result<bool, MessageError> {
    let (signer, signature) = parse(sig)?;
    let ok = signature.verify(&sha256(message), &signer);
    debug!(signer = %signer.fingerprint(), valid = ok, "verified signed message");
    Ok(ok)
}

/// Read the signer's public key out of an envelope without verifying it.
pub fn signer(sig: &[u8]) -> Result<PublicKey, MessageError> {
    parse(sig).map(|(signer, _)| signer)
}

fn parse(sig: &[u8]) -> Result<(PublicKey, Signature), MessageError> {
    let min_length = VERSION_BYTES.len() + COMPRESSED_LEN + 1;
    if sig.len() < min_length {
        return Err(MessageError::MessageTooShort {
            expected: min_length,
            actual: sig.len(),
        });
    }

    let (version, rest) = sig.split_at(VERSION_BYTES.len());
    if version != VERSION_BYTES {
        return Err(MessageError::VersionMismatch {
            expected: hex::encode(VERSION_BYTES),
            received: hex::encode(version),
        });
    }

    let (signer_bytes, der) = rest.split_at(COMPRESSED_LEN);
    let signer = PublicKey::from_bytes(signer_bytes)?;
    let signature = Signature::from_der(der)?;
    Ok((signer, signature))
}
