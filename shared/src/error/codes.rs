//! Unified error codes for the Zap booking stack
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Parcel / booking errors
//! - 5xxx: Payment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as `u16` on the wire so the Parcel API, the engine and any
/// presentation layer agree on one numeric vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,
    /// Rider role required
    RiderRequired = 2004,

    // ==================== 4xxx: Parcel ====================
    /// Draft is missing fields or violates constraints
    InvalidDraft = 4001,
    /// Region id is not in the region table
    UnknownRegion = 4002,
    /// Service center does not belong to the region
    CenterNotInRegion = 4003,
    /// Weight is missing, non-positive, or too precise
    InvalidWeight = 4004,
    /// Parcel not found
    ParcelNotFound = 4005,
    /// Parcel API refused the booking
    BookingRejected = 4006,
    /// Operation not allowed in the current state
    InvalidTransition = 4007,
    /// Submission retries exhausted
    RetriesExhausted = 4009,
    /// Submission cancelled by the caller
    SubmissionCancelled = 4010,
    /// Tracking id is malformed
    InvalidTrackingId = 4011,
    /// Booking can no longer be cancelled
    BookingNotCancellable = 4012,
    /// Stored booking disagrees with the confirmed quote
    BookingMismatch = 4013,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Booking has already been paid
    AlreadyPaid = 5002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Upstream service failed
    UpstreamError = 9006,
}

impl ErrorCode {
    /// Get the numeric value of this error code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::RiderRequired => "Rider role is required",

            // Parcel
            ErrorCode::InvalidDraft => "Parcel draft is invalid",
            ErrorCode::UnknownRegion => "Unknown region",
            ErrorCode::CenterNotInRegion => "Service center does not belong to region",
            ErrorCode::InvalidWeight => "Invalid parcel weight",
            ErrorCode::ParcelNotFound => "Parcel not found",
            ErrorCode::BookingRejected => "Booking was rejected",
            ErrorCode::InvalidTransition => "Operation not allowed in current state",
            ErrorCode::RetriesExhausted => "Booking failed after all retries, please try again",
            ErrorCode::SubmissionCancelled => "Booking submission was cancelled",
            ErrorCode::InvalidTrackingId => "Invalid tracking id",
            ErrorCode::BookingNotCancellable => "Booking can no longer be cancelled",
            ErrorCode::BookingMismatch => "Stored booking does not match the confirmed quote",

            // Payment
            ErrorCode::PaymentFailed => "Payment processing failed",
            ErrorCode::AlreadyPaid => "Booking has already been paid",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::UpstreamError => "Upstream service error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::RiderRequired),

            // Parcel
            4001 => Ok(ErrorCode::InvalidDraft),
            4002 => Ok(ErrorCode::UnknownRegion),
            4003 => Ok(ErrorCode::CenterNotInRegion),
            4004 => Ok(ErrorCode::InvalidWeight),
            4005 => Ok(ErrorCode::ParcelNotFound),
            4006 => Ok(ErrorCode::BookingRejected),
            4007 => Ok(ErrorCode::InvalidTransition),
            4009 => Ok(ErrorCode::RetriesExhausted),
            4010 => Ok(ErrorCode::SubmissionCancelled),
            4011 => Ok(ErrorCode::InvalidTrackingId),
            4012 => Ok(ErrorCode::BookingNotCancellable),
            4013 => Ok(ErrorCode::BookingMismatch),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::AlreadyPaid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::UpstreamError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::InvalidDraft.code(), 4001);
        assert_eq!(ErrorCode::BookingRejected.code(), 4006);
        assert_eq!(ErrorCode::AlreadyPaid.code(), 5002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_roundtrips_known_codes() {
        for code in [
            ErrorCode::Success,
            ErrorCode::TokenExpired,
            ErrorCode::RiderRequired,
            ErrorCode::UnknownRegion,
            ErrorCode::BookingNotCancellable,
            ErrorCode::BookingMismatch,
            ErrorCode::PaymentFailed,
            ErrorCode::UpstreamError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_unknown_value() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(
            InvalidErrorCode(4242).to_string(),
            "invalid error code: 4242"
        );
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::InvalidDraft).unwrap();
        assert_eq!(json, "4001");

        let code: ErrorCode = serde_json::from_str("4006").unwrap();
        assert_eq!(code, ErrorCode::BookingRejected);

        assert!(serde_json::from_str::<ErrorCode>("4242").is_err());
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::InvalidDraft.is_success());
    }
}
