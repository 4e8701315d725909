//! Error types for the ticket rendering library
//!
//! Generators themselves never fail (degraded rendering by design); the
//! only fallible surface is the external QR image renderer.

use thiserror::Error;

/// QR rendering error types
#[derive(Debug, Error)]
pub enum QrError {
    /// HTTP transport failure talking to the render service
    #[error("QR render request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Render service answered with a non-success status
    #[error("QR render service rejected the request: {0}")]
    Service(String),

    /// Renderer returned something that is not a PNG data URL
    #[error("QR renderer returned an invalid image payload")]
    InvalidImage,
}

/// Result type for QR rendering operations
pub type QrResult<T> = Result<T, QrError>;
