//! Error types for the Uploadcare provider

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Uploadcare provider errors
#[derive(Error, Debug)]
pub enum UploadcareError {
    /// An upload was attempted before `configure`
    #[error("Uploadcare client is not configured")]
    NotConfigured,

    /// The Upload API answered with a non-success status
    #[error("Uploadcare API error (status {status_code}): {message}")]
    Api { status_code: u16, message: String },

    /// Failed to parse API response
    #[error("Failed to parse Uploadcare response: {0}")]
    Parse(String),

    #[error("Failed to sign upload: {0}")]
    Signing(String),

    /// The resolved payload exceeds the caller's size limit
    #[error("File is too large: {size} bytes exceeds limit of {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Result type for Uploadcare operations
pub type Result<T> = std::result::Result<T, UploadcareError>;
