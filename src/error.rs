//! Error types for qrstrip operations

use thiserror::Error;

/// Result type alias using qrstrip's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrstrip operations
#[derive(Error, Debug)]
pub enum Error {
    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in an image region
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Caption font could not be loaded
    #[error("Font error: {0}")]
    Font(String),

    /// A decoded tile did not match its configured URL
    #[error("Verification failed: {0}")]
    Verify(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

// Implement From conversions for common error types

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}
