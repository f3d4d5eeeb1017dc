//! PBKDF2-HMAC-SHA512 key derivation for password-based encryption.

use crate::config::KEY_LENGTH;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;
use std::fmt;
use zeroize::Zeroizing;

/// A 256-bit key derived for a single encrypt or decrypt call.
///
/// Wiped from memory on drop.
pub struct DerivedKey(Zeroizing<[u8; KEY_LENGTH]>);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Key derivation using PBKDF2 with HMAC-SHA512.
#[derive(Debug, Clone)]
pub struct KeyDerivation {
    salt: Vec<u8>,
    iterations: u32,
}

impl KeyDerivation {
    /// Create a new KDF with a random salt of `salt_length` bytes.
    pub fn new(salt_length: usize, iterations: u32) -> Self {
        let mut salt = vec![0u8; salt_length];
        OsRng.fill_bytes(&mut salt);
        Self { salt, iterations }
    }

    /// Create a KDF from an existing salt (for decryption).
    pub fn from_salt(salt: &[u8], iterations: u32) -> Self {
        Self {
            salt: salt.to_vec(),
            iterations,
        }
    }

    /// Get the salt for storage.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Derive a 256-bit key from a secret.
    ///
    /// Identical secret, salt and iteration count always yield the same key.
    pub fn derive_key(&self, secret: &[u8]) -> DerivedKey {
        let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
        pbkdf2::pbkdf2_hmac::<Sha512>(secret, &self.salt, self.iterations, key.as_mut_slice());
        DerivedKey(key)
    }
}
