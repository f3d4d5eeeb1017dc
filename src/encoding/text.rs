//! Byte-to-text encodings for envelope strings.

use crate::error::{Error, Result};
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text encoding applied to the raw envelope bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// Lowercase hexadecimal. Decoding accepts either case.
    #[default]
    Hex,
    /// Standard base64 alphabet with padding.
    Base64,
    /// URL-safe base64 alphabet without padding.
    Base64Url,
}

impl TextEncoding {
    /// All supported encodings.
    pub const ALL: [TextEncoding; 3] = [
        TextEncoding::Hex,
        TextEncoding::Base64,
        TextEncoding::Base64Url,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Hex => "hex",
            TextEncoding::Base64 => "base64",
            TextEncoding::Base64Url => "base64url",
        }
    }

    /// Encode bytes as text.
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Hex => hex::encode(bytes),
            TextEncoding::Base64 => STANDARD.encode(bytes),
            TextEncoding::Base64Url => URL_SAFE_NO_PAD.encode(bytes),
        }
    }

    /// Decode text back to bytes.
    ///
    /// Fails with [`Error::Format`] when the text is not valid under this encoding.
    pub fn decode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Hex => hex::decode(text).map_err(|e| Error::Format(format!("hex: {}", e))),
            TextEncoding::Base64 => STANDARD
                .decode(text)
                .map_err(|e| Error::Format(format!("base64: {}", e))),
            TextEncoding::Base64Url => URL_SAFE_NO_PAD
                .decode(text)
                .map_err(|e| Error::Format(format!("base64url: {}", e))),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TextEncoding::ALL
            .into_iter()
            .find(|encoding| encoding.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "unsupported encoding '{}' (expected hex, base64 or base64url)",
                    s
                ))
            })
    }
}
