//! Process-wide, immutable crypto configuration.
//!
//! The curve and cipher are fixed at compile time. The only tunables are the
//! HKDF domain-separation label and salt applied to ECDH output. They are set
//! at most once, before first use, and never change afterwards.

use std::sync::OnceLock;

use tracing::debug;

use crate::{PrimitivesError, Result};

/// Name of the only supported curve.
pub const CURVE_NAME: &str = "secp256k1";

/// Name of the only supported AEAD.
pub const AEAD_NAME: &str = "AES-256-GCM";

/// Default HKDF info label for ECDH key derivation.
pub const DEFAULT_KDF_INFO: &str = "seal-primitives/ecdh/v1";

/// Environment variable overriding the HKDF info label.
pub const ENV_KDF_INFO: &str = "SEAL_KDF_INFO";

/// Environment variable carrying a hex-encoded HKDF salt.
pub const ENV_KDF_SALT: &str = "SEAL_KDF_SALT";

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Key-derivation settings shared by every ECDH derivation in the process.
///
/// Both parties of an exchange must use the same values or they will derive
/// different keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// HKDF `info` input.
    pub kdf_info: String,
    /// Optional HKDF salt. `None` means the RFC 5869 all-zero salt.
    pub kdf_salt: Option<Vec<u8>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            kdf_info: DEFAULT_KDF_INFO.to_string(),
            kdf_salt: None,
        }
    }
}

impl Config {
    /// Build a config from `SEAL_KDF_INFO` and `SEAL_KDF_SALT`.
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_parts(
            std::env::var(ENV_KDF_INFO).ok(),
            std::env::var(ENV_KDF_SALT).ok(),
        )
    }

    /// Build a config from optional raw values as they would appear in the
    /// environment. The salt is hex.
    pub fn from_parts(info: Option<String>, salt_hex: Option<String>) -> Result<Self> {
        let kdf_info = match info {
            Some(s) if s.is_empty() => {
                return Err(PrimitivesError::Config("KDF info label is empty".to_string()))
            }
            Some(s) => s,
            None => DEFAULT_KDF_INFO.to_string(),
        };
        let kdf_salt = match salt_hex {
            Some(h) => Some(
                hex::decode(h.trim())
                    .map_err(|e| PrimitivesError::Config(format!("KDF salt: {}", e)))?,
            ),
            None => None,
        };
        Ok(Config { kdf_info, kdf_salt })
    }
}

/// Install the process configuration.
///
/// Fails if a configuration is already in place, including the default one
/// fixed by an earlier call to [`get`].
pub fn init(config: Config) -> Result<()> {
    debug!(kdf_info = %config.kdf_info, salted = config.kdf_salt.is_some(), "installing crypto config");
    CONFIG
        .set(config)
        .map_err(|_| PrimitivesError::Config("configuration already initialized".to_string()))
}

/// The active configuration. Fixes the default if nothing was installed.
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
