//! Error types for LSB Vault.

use thiserror::Error;

/// Result type alias for LSB Vault operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while hiding or recovering a payload.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Carrier cannot even hold the fixed-size container header.
    #[error("Carrier too small: {pixels} pixels, at least {required} required")]
    InvalidCarrier { pixels: usize, required: usize },

    /// Pixel buffer does not match the declared geometry.
    #[error("Malformed carrier: {0}")]
    MalformedCarrier(String),

    /// Container does not fit in the carrier.
    #[error("Not enough capacity: need {needed} bytes, have {available} bytes")]
    CapacityExceeded { needed: usize, available: usize },

    /// Extracted hash does not match the extracted blob.
    #[error("Integrity check failed: image holds no valid container")]
    Integrity,

    /// Compressed stream could not be inflated.
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// Encryption error.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Decryption error (wrong password or corrupted data).
    #[error("Decryption failed: wrong password or corrupted data")]
    Decryption,

    /// Blob length cannot be described by the 32-bit length field.
    #[error("Payload too large for container: {0} bytes")]
    PayloadTooLarge(usize),

    /// Payload cannot be framed for encoding.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Decoded bytes do not follow the expected payload framing.
    #[error("Unreadable payload: {0}")]
    UnreadablePayload(String),

    /// Image decoding or encoding error.
    #[error("Image error: {0}")]
    Image(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Whether this error means "nothing decodable here".
    ///
    /// A hash mismatch and a padding failure cannot be told apart reliably:
    /// both can come from a wrong password, a foreign image or a damaged one.
    /// Reading ciphertext as text or a framed file fails the same way when
    /// the password was left out.
    pub fn is_undecodable(&self) -> bool {
        matches!(
            self,
            Error::Integrity
                | Error::Decryption
                | Error::CorruptData(_)
                | Error::UnreadablePayload(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message_reports_both_limits() {
        let err = Error::CapacityExceeded {
            needed: 57,
            available: 37,
        };
        let msg = err.to_string();
        assert!(msg.contains("57"));
        assert!(msg.contains("37"));
    }

    #[test]
    fn test_undecodable_classification() {
        assert!(Error::Integrity.is_undecodable());
        assert!(Error::Decryption.is_undecodable());
        assert!(Error::CorruptData("bad header".into()).is_undecodable());
        assert!(Error::UnreadablePayload("text is not valid UTF-8".into()).is_undecodable());
        assert!(!Error::PayloadTooLarge(1).is_undecodable());
        assert!(!Error::InvalidPayload("file name too long".into()).is_undecodable());
    }
}
