//! Error types for the catalog client.

use thiserror::Error;

/// Errors that can occur when talking to the remote data store.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Data store returned an error response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// API key missing, wrong, or lacking permission (401/403)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid data store URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
