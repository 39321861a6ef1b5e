/// Unified error type for all primitives operations.
///
/// Parsing and validation failures surface immediately; none of them are
/// retried. A failed signature check is not an error and is reported as
/// `false` by the verify functions.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    /// Hex or byte encoding of a key is malformed, or a scalar is out of range.
    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// A decodable point that does not satisfy the curve equation, or the identity.
    #[error("point not on curve")]
    PointNotOnCurve,

    /// A public key failed re-validation at the point of use.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Signature bytes could not be parsed at all.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// AEAD tag verification failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The secure random source could not produce bytes.
    #[error("random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    /// A symmetric key of the wrong size.
    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength {
        /// Required length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        got: usize,
    },

    /// Sealed data shorter than nonce plus tag.
    #[error("ciphertext too short: expected at least {expected} bytes, got {got}")]
    CiphertextTooShort {
        /// Minimum length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        got: usize,
    },

    /// The cipher refused to encrypt (plaintext too large for GCM).
    #[error("encryption error: {0}")]
    EncryptionError(String),

    /// Process configuration could not be loaded or set.
    #[error("config error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PrimitivesError>;

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidKeyEncoding(e.to_string())
    }
}

impl From<rand::Error> for PrimitivesError {
    fn from(e: rand::Error) -> Self {
        PrimitivesError::RandomSourceUnavailable(e.to_string())
    }
}
