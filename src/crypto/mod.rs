//! Cryptographic operations for the envelope cipher.
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption (16-byte IV, 16-byte tag)
//! - PBKDF2-HMAC-SHA512 password-based key derivation

mod cipher;
mod kdf;

pub use cipher::Cipher;
pub use kdf::{DerivedKey, KeyDerivation};

use crate::config::IV_LENGTH;
use rand::rngs::OsRng;
use rand::RngCore;

/// Generate a fresh random initialization vector.
pub fn random_iv() -> [u8; IV_LENGTH] {
    let mut iv = [0u8; IV_LENGTH];
    OsRng.fill_bytes(&mut iv);
    iv
}
