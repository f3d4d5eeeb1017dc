//! AES-256-GCM authenticated encryption with a 16-byte IV and detached tag.

use crate::config::{IV_LENGTH, TAG_LENGTH};
use crate::crypto::kdf::DerivedKey;
use crate::error::{Error, Result};
use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Key, Nonce, Tag};

/// AES-256-GCM with a 128-bit nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// AES-256-GCM cipher wrapper.
pub struct Cipher {
    cipher: Aes256Gcm16,
}

impl Cipher {
    /// Create a new cipher from a derived key.
    pub fn new(key: &DerivedKey) -> Self {
        let key = Key::<Aes256Gcm16>::from_slice(key.as_bytes());
        Self {
            cipher: Aes256Gcm16::new(key),
        }
    }

    /// Encrypt `plaintext` with no associated data.
    ///
    /// Returns the ciphertext (same length as the plaintext) and the 16-byte tag.
    pub fn seal(&self, iv: &[u8; IV_LENGTH], plaintext: &[u8]) -> Result<(Vec<u8>, [u8; TAG_LENGTH])> {
        let mut buffer = plaintext.to_vec();
        let tag = self
            .cipher
            .encrypt_in_place_detached(Nonce::<U16>::from_slice(iv), b"", &mut buffer)
            .map_err(|_| Error::Validation("value is too large to encrypt".to_string()))?;

        let mut tag_bytes = [0u8; TAG_LENGTH];
        tag_bytes.copy_from_slice(&tag);
        Ok((buffer, tag_bytes))
    }

    /// Verify `tag` and decrypt `ciphertext`.
    ///
    /// Fails with [`Error::Authentication`] on tag mismatch; no plaintext is returned in that case.
    pub fn open(
        &self,
        iv: &[u8; IV_LENGTH],
        tag: &[u8; TAG_LENGTH],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        let mut buffer = ciphertext.to_vec();
        self.cipher
            .decrypt_in_place_detached(
                Nonce::<U16>::from_slice(iv),
                b"",
                &mut buffer,
                Tag::<U16>::from_slice(tag),
            )
            .map_err(|_| Error::Authentication)?;

        Ok(buffer)
    }
}
