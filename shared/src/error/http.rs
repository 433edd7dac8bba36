//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::ParcelNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::InvalidTransition
            | Self::BookingNotCancellable
            | Self::BookingMismatch
            | Self::AlreadyPaid => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::PermissionDenied | Self::AdminRequired | Self::RiderRequired => {
                StatusCode::FORBIDDEN
            }

            // 422 Unprocessable (server-side business rule refusal)
            Self::BookingRejected => StatusCode::UNPROCESSABLE_ENTITY,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::NetworkError
            | Self::TimeoutError
            | Self::UpstreamError
            | Self::RetriesExhausted => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::ConfigError | Self::UnknownRegion => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Whether a failure with this code is worth retrying unchanged
    pub fn is_transient(&self) -> bool {
        self.http_status().is_server_error()
            && !matches!(self, Self::ConfigError | Self::UnknownRegion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(
            ErrorCode::ParcelNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::TokenExpired.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::AdminRequired.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::BookingRejected.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ErrorCode::AlreadyPaid.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::TimeoutError.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::InvalidDraft.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_transient_codes() {
        assert!(ErrorCode::NetworkError.is_transient());
        assert!(ErrorCode::TimeoutError.is_transient());
        assert!(ErrorCode::InternalError.is_transient());
        assert!(!ErrorCode::ConfigError.is_transient());
        assert!(!ErrorCode::BookingRejected.is_transient());
        assert!(!ErrorCode::NotAuthenticated.is_transient());
    }
}
