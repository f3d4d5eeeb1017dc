//! Envelope codec.
//!
//! This module provides:
//! - The fixed-offset binary envelope layout
//! - Text encodings (hex, base64, base64url) for the envelope bytes

mod envelope;
mod text;

pub use envelope::Envelope;
pub use text::TextEncoding;
