//! Error types for the envelope cipher.

use thiserror::Error;

/// Result type alias for envelope cipher operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a cipher or processing envelopes.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid cipher configuration (empty secret, zero lengths).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Absent or unsupported input value.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Envelope text that cannot be decoded or is too short to hold the fixed fields.
    #[error("Malformed envelope: {0}")]
    Format(String),

    /// Tag verification failed (wrong secret, wrong configuration or tampered data).
    #[error("Authentication failed: wrong secret or tampered envelope")]
    Authentication,

    /// I/O error while reading options files or CLI input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification of an [`Error`], for callers that only need to branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Validation,
    Format,
    Authentication,
    Io,
    Serialization,
}

impl Error {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Format(_) => ErrorKind::Format,
            Error::Authentication => ErrorKind::Authentication,
            Error::Io(_) => ErrorKind::Io,
            Error::Serialization(_) => ErrorKind::Serialization,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            Error::Configuration("x".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(Error::Authentication.kind(), ErrorKind::Authentication);
        assert_eq!(Error::Format("short".into()).kind(), ErrorKind::Format);
    }

    #[test]
    fn test_authentication_message_has_no_detail() {
        let msg = Error::Authentication.to_string();
        assert_eq!(msg, "Authentication failed: wrong secret or tampered envelope");
    }

    #[test]
    fn test_serde_json_error_converts() {
        let err: Error = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }
}
