//! Configuration constants and types for the envelope cipher.

use crate::encoding::TextEncoding;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Initialization vector length in bytes.
pub const IV_LENGTH: usize = 16;

/// Authentication tag length in bytes (128 bits).
pub const TAG_LENGTH: usize = 16;

/// Derived key length in bytes (AES-256).
pub const KEY_LENGTH: usize = 32;

/// Default envelope text encoding.
pub const DEFAULT_ENCODING: TextEncoding = TextEncoding::Hex;

/// Default random salt length in bytes.
pub const DEFAULT_SALT_LENGTH: usize = 64;

/// Default PBKDF2 iteration count.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 100_000;

/// Iteration count below which brute-force resistance of the secret is considered weak.
///
/// Not enforced. Building a cipher below it only logs a warning.
pub const RECOMMENDED_MIN_ITERATIONS: u32 = 100_000;

/// Options for building an [`EnvelopeCipher`](crate::EnvelopeCipher).
///
/// Salt length, IV length and tag length together define the envelope layout.
/// Two parties must agree on `salt_length` out of band: envelopes carry no
/// version or length prefix, so changing it breaks every envelope produced before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherOptions {
    /// Text encoding of the envelope string.
    pub encoding: TextEncoding,

    /// Length of the random salt in bytes.
    #[serde(alias = "saltLength")]
    pub salt_length: usize,

    /// Number of PBKDF2 iterations for key derivation.
    #[serde(alias = "pbkdf2Iterations")]
    pub pbkdf2_iterations: u32,
}

impl Default for CipherOptions {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING,
            salt_length: DEFAULT_SALT_LENGTH,
            pbkdf2_iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }
}

impl CipherOptions {
    /// Set the envelope text encoding.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the salt length in bytes.
    pub fn with_salt_length(mut self, salt_length: usize) -> Self {
        self.salt_length = salt_length;
        self
    }

    /// Set the PBKDF2 iteration count.
    pub fn with_pbkdf2_iterations(mut self, iterations: u32) -> Self {
        self.pbkdf2_iterations = iterations;
        self
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<()> {
        if self.salt_length == 0 {
            return Err(Error::Configuration(
                "salt length must be a positive integer".to_string(),
            ));
        }
        if self.pbkdf2_iterations == 0 {
            return Err(Error::Configuration(
                "PBKDF2 iteration count must be a positive integer".to_string(),
            ));
        }
        Layout::new(self.salt_length)?;
        Ok(())
    }

    /// Load options from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let options: CipherOptions = serde_json::from_str(&content)?;
        Ok(options)
    }

    /// Save options to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Fixed byte offsets of the envelope fields, derived once from the salt length.
///
/// ```text
/// 0            salt_length     tag_position    ciphertext_position
/// | salt       | iv (16)       | tag (16)      | ciphertext ...
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub salt_length: usize,
    pub tag_position: usize,
    pub ciphertext_position: usize,
}

impl Layout {
    /// Compute the offsets for `salt_length`.
    ///
    /// Fails with [`Error::Configuration`] if the envelope header would not fit in memory.
    pub fn new(salt_length: usize) -> Result<Self> {
        let too_large = || {
            Error::Configuration(format!("salt length {} is too large", salt_length))
        };
        let tag_position = salt_length.checked_add(IV_LENGTH).ok_or_else(too_large)?;
        let ciphertext_position = tag_position.checked_add(TAG_LENGTH).ok_or_else(too_large)?;
        if ciphertext_position > isize::MAX as usize {
            return Err(too_large());
        }

        Ok(Self {
            salt_length,
            tag_position,
            ciphertext_position,
        })
    }

    /// Smallest valid envelope size in bytes (empty ciphertext).
    pub fn min_envelope_len(&self) -> usize {
        self.ciphertext_position
    }
}
