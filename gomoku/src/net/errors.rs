//! Network error types for encoding and decoding wire messages.

use thiserror::Error;

/// Errors that can occur while reading or writing a framed message
#[derive(Debug, Error)]
pub enum CodecError {
    /// The underlying stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The line was not a valid message
    #[error("Invalid message format: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    /// A single line exceeded the maximum allowed size
    #[error("Message size exceeds maximum {max}")]
    MessageTooLarge { max: usize },
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;
