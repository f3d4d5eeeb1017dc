//! Fixed-offset envelope layout: `salt || iv || tag || ciphertext`.

use crate::config::{Layout, IV_LENGTH, TAG_LENGTH};
use crate::error::{Error, Result};

/// The four envelope fields, borrowed from a decoded byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    pub salt: &'a [u8],
    pub iv: &'a [u8; IV_LENGTH],
    pub tag: &'a [u8; TAG_LENGTH],
    pub ciphertext: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Split raw envelope bytes at the layout offsets.
    ///
    /// Fails with [`Error::Format`] if `bytes` cannot hold the salt, iv and tag.
    pub fn parse(bytes: &'a [u8], layout: &Layout) -> Result<Self> {
        if bytes.len() < layout.min_envelope_len() {
            return Err(Error::Format(format!(
                "envelope is {} bytes, need at least {}",
                bytes.len(),
                layout.min_envelope_len()
            )));
        }

        let (salt, rest) = bytes.split_at(layout.salt_length);
        let (iv, rest) = rest.split_at(IV_LENGTH);
        let (tag, ciphertext) = rest.split_at(TAG_LENGTH);

        Ok(Self {
            salt,
            iv: iv
                .try_into()
                .map_err(|_| Error::Format("iv field has wrong length".to_string()))?,
            tag: tag
                .try_into()
                .map_err(|_| Error::Format("tag field has wrong length".to_string()))?,
            ciphertext,
        })
    }

    fn len(&self) -> usize {
        self.salt.len() + IV_LENGTH + TAG_LENGTH + self.ciphertext.len()
    }

    /// Concatenate the fields in wire order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(self.salt);
        out.extend_from_slice(self.iv);
        out.extend_from_slice(self.tag);
        out.extend_from_slice(self.ciphertext);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(layout: &Layout, ciphertext_len: usize) -> Vec<u8> {
        let total = layout.min_envelope_len() + ciphertext_len;
        (0..total).map(|i| (i % 256) as u8).collect()
    }

    #[test]
    fn test_parse_splits_at_offsets() {
        let layout = Layout::new(64).unwrap();
        let bytes = sample(&layout, 5);

        let envelope = Envelope::parse(&bytes, &layout).unwrap();
        assert_eq!(envelope.salt, &bytes[..64]);
        assert_eq!(&envelope.iv[..], &bytes[64..80]);
        assert_eq!(&envelope.tag[..], &bytes[80..96]);
        assert_eq!(envelope.ciphertext, &bytes[96..]);
        assert_eq!(envelope.ciphertext.len(), 5);
    }

    #[test]
    fn test_to_bytes_restores_input() {
        let layout = Layout::new(12).unwrap();
        let bytes = sample(&layout, 9);
        let envelope = Envelope::parse(&bytes, &layout).unwrap();
        assert_eq!(envelope.len(), bytes.len());
        assert_eq!(envelope.to_bytes(), bytes);
    }

    #[test]
    fn test_exactly_minimum_length_has_empty_ciphertext() {
        let layout = Layout::new(64).unwrap();
        let bytes = sample(&layout, 0);
        let envelope = Envelope::parse(&bytes, &layout).unwrap();
        assert!(envelope.ciphertext.is_empty());
    }

    #[test]
    fn test_truncated_envelope_rejected() {
        let layout = Layout::new(64).unwrap();
        let bytes = sample(&layout, 0);

        let err = Envelope::parse(&bytes[..95], &layout).unwrap_err();
        assert!(matches!(err, Error::Format(_)));

        let err = Envelope::parse(&[], &layout).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }
}
