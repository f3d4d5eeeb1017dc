//! Envelope Cipher
//!
//! Password-based authenticated encryption of short text values. Every value is
//! sealed into a single transportable string carrying everything except the secret.
//!
//! # Features
//!
//! - **PBKDF2-HMAC-SHA512**: A fresh key per message from the secret and a random salt
//! - **AES-256-GCM Encryption**: Authenticated encryption with a 16-byte IV and tag
//! - **Fixed Envelope Layout**: Interoperable byte layout, hex or base64 text
//! - **CLI Interface**: Encrypt and decrypt values from the command line
//!
//! # Envelope
//!
//! ```text
//! salt (salt_length) || iv (16) || tag (16) || ciphertext (= plaintext length)
//! ```
//!
//! # Example
//!
//! ```rust
//! use envelope_cipher::{CipherOptions, EnvelopeCipher, TextEncoding};
//!
//! let cipher = EnvelopeCipher::with_options(
//!     "s3cr3t",
//!     CipherOptions::default().with_encoding(TextEncoding::Base64),
//! )
//! .unwrap();
//!
//! let envelope = cipher.encrypt("hello").unwrap();
//! assert_eq!(cipher.decrypt(&envelope).unwrap(), "hello");
//! ```

pub mod config;
pub mod crypto;
pub mod encoding;
pub mod envelope_cipher;
pub mod error;

pub use config::CipherOptions;
pub use encoding::TextEncoding;
pub use envelope_cipher::EnvelopeCipher;
pub use error::{Error, ErrorKind, Result};
