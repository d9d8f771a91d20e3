//! Error types for catalog operations
//!
//! Every call made against the media catalog can fail. The maintenance passes
//! classify these failures by where they happen (startup, per library, per
//! item), so the error itself only needs to say what went wrong.

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors returned by a `MediaCatalog` implementation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The request never produced a response (DNS, TLS, connection reset, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server rejected the token
    #[error("Unauthorized: the catalog rejected the provided API key")]
    Unauthorized,

    /// No library with the given name exists on the server
    #[error("Library not found: {0}")]
    LibraryNotFound(String),

    /// The server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The server answered, but the body could not be understood
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The item cannot be acted upon (for example a movie without media parts)
    #[error("Invalid item '{title}': {reason}")]
    InvalidItem { title: String, reason: String },
}

impl CatalogError {
    /// Returns true if the failure means no further call can succeed
    ///
    /// A rejected token will be rejected again on the next library.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, CatalogError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::LibraryNotFound("4K Movies".to_string());
        assert_eq!(err.to_string(), "Library not found: 4K Movies");
    }

    #[test]
    fn test_status_display() {
        let err = CatalogError::Status {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_auth_failure() {
        assert!(CatalogError::Unauthorized.is_auth_failure());
        assert!(!CatalogError::Transport("reset".to_string()).is_auth_failure());
    }
}
