// crates/network/src/error.rs
//! Error types for Plex HTTP operations

use plex_cleanup_core::CatalogError;
use thiserror::Error;

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors that can occur while talking to a Plex server
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid server URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The token cannot be sent as a header
    #[error("Invalid API key: {0}")]
    InvalidToken(String),

    /// The server rejected the token (401)
    #[error("Unauthorized: check the configured API key")]
    Unauthorized,

    /// Non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The requested library section does not exist
    #[error("Library not found: {0}")]
    LibraryNotFound(String),

    /// The response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<NetworkError> for CatalogError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Http(e) if e.is_decode() => CatalogError::UnexpectedResponse(e.to_string()),
            NetworkError::Http(e) => CatalogError::Transport(e.to_string()),
            NetworkError::InvalidUrl(url) => CatalogError::Transport(format!("invalid URL {}", url)),
            NetworkError::InvalidToken(reason) => CatalogError::Transport(reason),
            NetworkError::Unauthorized => CatalogError::Unauthorized,
            NetworkError::Status { status, message } => CatalogError::Status { status, message },
            NetworkError::LibraryNotFound(name) => CatalogError::LibraryNotFound(name),
            NetworkError::Decode(reason) => CatalogError::UnexpectedResponse(reason),
        }
    }
}
