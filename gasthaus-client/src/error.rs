//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network transport failed
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required (401)
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected by server-side validation (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Booking conflict (409); carries the server's detail verbatim
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// True for failures resolved by navigating to the login gate rather
    /// than retrying.
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Unauthorized | ClientError::Forbidden(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
