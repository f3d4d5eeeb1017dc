//! The envelope cipher: password-derived key, AES-256-GCM, fixed-layout text envelope.

use crate::config::{CipherOptions, Layout, RECOMMENDED_MIN_ITERATIONS};
use crate::crypto::{random_iv, Cipher, KeyDerivation};
use crate::encoding::{Envelope, TextEncoding};
use crate::error::{Error, Result};
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Encrypts values into self-contained envelope strings and back.
///
/// Each call draws a fresh salt and IV and derives its own key, so the cipher
/// holds no mutable state and can be shared freely between threads.
#[derive(Clone)]
pub struct EnvelopeCipher {
    secret: Zeroizing<Vec<u8>>,
    encoding: TextEncoding,
    iterations: u32,
    layout: Layout,
}

impl EnvelopeCipher {
    /// Create a cipher with default options.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self> {
        Self::with_options(secret, CipherOptions::default())
    }

    /// Create a cipher with custom options.
    ///
    /// Fails with [`Error::Configuration`] if the secret is empty or the options are invalid.
    /// Iteration counts below [`RECOMMENDED_MIN_ITERATIONS`] are accepted but weaken
    /// brute-force resistance of the secret.
    pub fn with_options(secret: impl AsRef<[u8]>, options: CipherOptions) -> Result<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(Error::Configuration(
                "secret key must be provided".to_string(),
            ));
        }
        options.validate()?;

        if options.pbkdf2_iterations < RECOMMENDED_MIN_ITERATIONS {
            warn!(
                iterations = options.pbkdf2_iterations,
                recommended = RECOMMENDED_MIN_ITERATIONS,
                "PBKDF2 iteration count is below the recommended minimum"
            );
        }

        let layout = Layout::new(options.salt_length)?;
        debug!(
            encoding = %options.encoding,
            salt_length = layout.salt_length,
            iterations = options.pbkdf2_iterations,
            "envelope cipher configured"
        );

        Ok(Self {
            secret: Zeroizing::new(secret.to_vec()),
            encoding: options.encoding,
            iterations: options.pbkdf2_iterations,
            layout,
        })
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The options this cipher was built with.
    pub fn options(&self) -> CipherOptions {
        CipherOptions {
            encoding: self.encoding,
            salt_length: self.layout.salt_length,
            pbkdf2_iterations: self.iterations,
        }
    }

    /// Encrypt the string form of `value`.
    ///
    /// Numbers and other `Display` types are encrypted as their text, so
    /// `decrypt(&encrypt(&42)?)` yields `"42"`.
    pub fn encrypt<V: fmt::Display + ?Sized>(&self, value: &V) -> Result<String> {
        self.encrypt_bytes(value.to_string().as_bytes())
    }

    /// Encrypt a JSON value. `null`, arrays and objects are rejected.
    pub fn encrypt_value(&self, value: &Value) -> Result<String> {
        match value {
            Value::Null => Err(Error::Validation(
                "value must not be null".to_string(),
            )),
            Value::String(s) => self.encrypt(s.as_str()),
            Value::Number(n) => self.encrypt(n),
            Value::Bool(b) => self.encrypt(b),
            Value::Array(_) | Value::Object(_) => Err(Error::Validation(
                "value must be text or a number".to_string(),
            )),
        }
    }

    /// Encrypt raw bytes into an envelope string.
    pub fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<String> {
        let kdf = KeyDerivation::new(self.layout.salt_length, self.iterations);
        let iv = random_iv();
        let key = kdf.derive_key(&self.secret);

        let (ciphertext, tag) = Cipher::new(&key).seal(&iv, plaintext)?;
        let envelope = Envelope {
            salt: kdf.salt(),
            iv: &iv,
            tag: &tag,
            ciphertext: &ciphertext,
        };

        let bytes = envelope.to_bytes();
        debug!(
            plaintext_len = plaintext.len(),
            envelope_len = bytes.len(),
            encoding = %self.encoding,
            "encrypted value"
        );
        Ok(self.encoding.encode(&bytes))
    }

    /// Decrypt an envelope string back to text.
    ///
    /// Fails with [`Error::Format`] if the envelope is malformed or the recovered
    /// bytes are not UTF-8, and with [`Error::Authentication`] if the tag does not verify.
    pub fn decrypt(&self, envelope: &str) -> Result<String> {
        let plaintext = self.decrypt_bytes(envelope)?;
        String::from_utf8(plaintext)
            .map_err(|_| Error::Format("decrypted value is not valid UTF-8".to_string()))
    }

    /// Decrypt a JSON value holding an envelope string. `null` and non-strings are rejected.
    pub fn decrypt_value(&self, value: &Value) -> Result<String> {
        match value {
            Value::Null => Err(Error::Validation(
                "value must not be null".to_string(),
            )),
            Value::String(s) => self.decrypt(s),
            _ => Err(Error::Validation(
                "envelope must be a string".to_string(),
            )),
        }
    }

    /// Decrypt an envelope string to raw bytes.
    pub fn decrypt_bytes(&self, envelope: &str) -> Result<Vec<u8>> {
        let raw = self.encoding.decode(envelope)?;
        let envelope = Envelope::parse(&raw, &self.layout)?;

        let key = KeyDerivation::from_salt(envelope.salt, self.iterations).derive_key(&self.secret);
        let plaintext = Cipher::new(&key)
            .open(envelope.iv, envelope.tag, envelope.ciphertext)
            .map_err(|e| {
                debug!(envelope_len = raw.len(), "envelope failed authentication");
                e
            })?;

        debug!(
            envelope_len = raw.len(),
            plaintext_len = plaintext.len(),
            "decrypted value"
        );
        Ok(plaintext)
    }
}

impl fmt::Debug for EnvelopeCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvelopeCipher")
            .field("secret", &"[REDACTED]")
            .field("encoding", &self.encoding)
            .field("iterations", &self.iterations)
            .field("layout", &self.layout)
            .finish()
    }
}
