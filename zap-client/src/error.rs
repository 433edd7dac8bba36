//! Client error types

use shared::ErrorCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection could not be established or was interrupted
    #[error("Network error: {0}")]
    Network(String),

    /// Request timed out; the server may or may not have processed it
    #[error("Request timed out")]
    Timeout,

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required (401)
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request failed validation (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request conflicts with server-side business rules (409/422)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Server-side failure (5xx)
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Structured error body returned by the Parcel API
    #[error("API error {code} ({status}): {message}")]
    Api {
        status: u16,
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Client misconfiguration (bad base URL, TLS setup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else if err.is_builder() {
            ClientError::Config(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl ClientError {
    /// HTTP status behind this error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Forbidden(_) => Some(403),
            ClientError::NotFound(_) => Some(404),
            ClientError::Validation(_) => Some(400),
            ClientError::Server { status, .. } | ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Unified error code for this failure
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ClientError::Network(_) => ErrorCode::NetworkError,
            ClientError::Timeout => ErrorCode::TimeoutError,
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                ErrorCode::UpstreamError
            }
            ClientError::Unauthorized(_) => ErrorCode::NotAuthenticated,
            ClientError::Forbidden(_) => ErrorCode::PermissionDenied,
            ClientError::NotFound(_) => ErrorCode::NotFound,
            ClientError::Validation(_) => ErrorCode::ValidationFailed,
            ClientError::Conflict(_) => ErrorCode::BookingRejected,
            ClientError::Server { .. } => ErrorCode::UpstreamError,
            ClientError::Api { code, status, .. } => ErrorCode::try_from(*code)
                .unwrap_or_else(|_| fallback_code(*status)),
            ClientError::Config(_) => ErrorCode::ConfigError,
        }
    }
}

fn fallback_code(status: u16) -> ErrorCode {
    match status {
        401 => ErrorCode::NotAuthenticated,
        403 => ErrorCode::PermissionDenied,
        404 => ErrorCode::NotFound,
        500..=599 => ErrorCode::UpstreamError,
        _ => ErrorCode::BookingRejected,
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
