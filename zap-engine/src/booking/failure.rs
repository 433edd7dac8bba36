//! Parcel API failure classification

use shared::ErrorCode;
use thiserror::Error;
use zap_client::ClientError;

/// A failed Parcel API call, classified by how the session must react
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitFailure {
    /// Network error, timeout or server-side failure; safe to retry with the
    /// same idempotency key
    #[error("Temporary failure: {0}")]
    Transient(String),

    /// Business-rule or validation rejection; the draft must be corrected
    #[error("Rejected by parcel api ({code}): {message}")]
    Rejected { code: ErrorCode, message: String },

    /// Caller must re-authenticate
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Caller is not allowed to perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Local client misconfiguration
    #[error("Client misconfigured: {0}")]
    Fatal(String),
}

impl SubmitFailure {
    /// Classify a client error
    pub fn classify(err: &ClientError) -> Self {
        match err {
            ClientError::Network(_) | ClientError::Timeout | ClientError::InvalidResponse(_) => {
                SubmitFailure::Transient(err.to_string())
            }
            ClientError::Config(msg) => SubmitFailure::Fatal(msg.clone()),
            ClientError::Serialization(e) => SubmitFailure::Fatal(e.to_string()),
            _ => match err.status() {
                Some(401) => SubmitFailure::Unauthorized(err.to_string()),
                Some(403) => SubmitFailure::Forbidden(err.to_string()),
                Some(status) if status >= 500 || status == 429 => {
                    SubmitFailure::Transient(err.to_string())
                }
                _ => SubmitFailure::Rejected {
                    code: err.error_code(),
                    message: err.to_string(),
                },
            },
        }
    }

    /// Whether a session may retry after this failure
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitFailure::Transient(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SubmitFailure::Transient(_) => ErrorCode::UpstreamError,
            SubmitFailure::Rejected { code, .. } => *code,
            SubmitFailure::Unauthorized(_) => ErrorCode::NotAuthenticated,
            SubmitFailure::Forbidden(_) => ErrorCode::PermissionDenied,
            SubmitFailure::Fatal(_) => ErrorCode::ConfigError,
        }
    }
}

impl From<ClientError> for SubmitFailure {
    fn from(err: ClientError) -> Self {
        SubmitFailure::classify(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failures_are_transient() {
        assert!(SubmitFailure::classify(&ClientError::Timeout).is_retryable());
        assert!(SubmitFailure::classify(&ClientError::Network("reset".into())).is_retryable());
        assert!(
            SubmitFailure::classify(&ClientError::Server {
                status: 503,
                message: "unavailable".into()
            })
            .is_retryable()
        );
    }

    #[test]
    fn test_client_errors_are_rejections() {
        let failure = SubmitFailure::classify(&ClientError::Validation("bad contact".into()));
        assert!(matches!(failure, SubmitFailure::Rejected { code: ErrorCode::ValidationFailed, .. }));
        assert!(!failure.is_retryable());

        let failure = SubmitFailure::classify(&ClientError::Api {
            status: 422,
            code: 4006,
            message: "receiver blocked".into(),
            details: None,
        });
        assert_eq!(failure.code(), ErrorCode::BookingRejected);
        assert!(!failure.is_retryable());

        let failure = SubmitFailure::classify(&ClientError::Conflict("duplicate".into()));
        assert!(matches!(failure, SubmitFailure::Rejected { .. }));
    }

    #[test]
    fn test_auth_failures() {
        assert!(matches!(
            SubmitFailure::classify(&ClientError::Unauthorized("expired".into())),
            SubmitFailure::Unauthorized(_)
        ));
        // Structured bodies classify by status too
        assert!(matches!(
            SubmitFailure::classify(&ClientError::Api {
                status: 403,
                code: 2004,
                message: "rider only".into(),
                details: None,
            }),
            SubmitFailure::Forbidden(_)
        ));
        assert!(!SubmitFailure::Forbidden(String::new()).is_retryable());
    }

    #[test]
    fn test_structured_server_error_is_transient() {
        let failure = SubmitFailure::classify(&ClientError::Api {
            status: 500,
            code: 9001,
            message: "db down".into(),
            details: None,
        });
        assert!(failure.is_retryable());
    }
}
