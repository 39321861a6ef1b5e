/// Error types for envelope operations.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// A failure from the underlying primitives, including AEAD
    /// authentication failure.
    #[error("{0}")]
    Primitives(#[from] seal_primitives::PrimitivesError),

    /// The envelope's version tag is not the one this crate writes.
    #[error("message version mismatch: expected {expected}, received {received}")]
    VersionMismatch {
        /// Version this crate understands, as hex.
        expected: String,
        /// Version found in the envelope, as hex.
        received: String,
    },

    /// The envelope was sealed for a different recipient.
    #[error("the sealed message expects a recipient public key of {expected}, but the provided key is {actual}")]
    RecipientMismatch {
        /// Recipient key embedded in the envelope.
        expected: String,
        /// Public key of the private key supplied to open it.
        actual: String,
    },

    /// The envelope cannot hold its fixed-size header.
    #[error("message too short: expected at least {expected} bytes, got {actual} bytes")]
    MessageTooShort {
        /// Minimum length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        actual: usize,
    },
}
