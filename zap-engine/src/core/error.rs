//! Engine error types

use crate::booking::SubmitFailure;
use crate::region::RegionError;
use crate::session::SessionState;
use serde::Serialize;
use shared::{AppError, DeliveryStatus, ErrorCode, Money};
use std::fmt;
use thiserror::Error;

/// One violated draft constraint, reported per field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftViolation {
    /// Field name as shown to the user (`weightKg`, `originCenter`, ...)
    pub field: &'static str,
    pub message: String,
}

impl DraftViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for DraftViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn summarize(violations: &[DraftViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Draft is not priceable; lists every violated constraint
    #[error("Invalid draft: {}", summarize(.0))]
    InvalidDraft(Vec<DraftViolation>),

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error("Cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    #[error(transparent)]
    Submit(#[from] SubmitFailure),

    #[error("Submission failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: SubmitFailure },

    #[error("Submission cancelled")]
    Cancelled,

    #[error("Parcel not found: {0}")]
    ParcelNotFound(String),

    #[error("Invalid delivery transition: {} -> {}", .from.as_str(), .to.as_str())]
    InvalidTransition {
        from: DeliveryStatus,
        to: DeliveryStatus,
    },

    #[error("Booking cannot be cancelled: {0}")]
    NotCancellable(String),

    #[error("Booking {0} is already paid")]
    AlreadyPaid(String),

    #[error("Invalid parcel record: {0}")]
    InvalidRecord(AppError),

    /// The Parcel API holds a booking for this session at a different cost
    #[error("Booking {parcel_id} is stored at {stored}, but the quote was {quoted}")]
    BookingMismatch {
        parcel_id: String,
        quoted: Money,
        stored: Money,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Unified error code
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::InvalidDraft(_) => ErrorCode::InvalidDraft,
            EngineError::Region(e) => e.code(),
            EngineError::InvalidState { .. } => ErrorCode::InvalidRequest,
            EngineError::Submit(failure) => failure.code(),
            EngineError::RetriesExhausted { .. } => ErrorCode::RetriesExhausted,
            EngineError::Cancelled => ErrorCode::SubmissionCancelled,
            EngineError::ParcelNotFound(_) => ErrorCode::ParcelNotFound,
            EngineError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            EngineError::NotCancellable(_) => ErrorCode::BookingNotCancellable,
            EngineError::AlreadyPaid(_) => ErrorCode::AlreadyPaid,
            EngineError::InvalidRecord(e) => e.code,
            EngineError::BookingMismatch { .. } => ErrorCode::BookingMismatch,
            EngineError::Config(_) => ErrorCode::ConfigError,
        }
    }

    /// Draft violations, empty for every other error
    pub fn violations(&self) -> &[DraftViolation] {
        match self {
            EngineError::InvalidDraft(v) => v,
            _ => &[],
        }
    }

    pub(crate) fn invalid_state(operation: &'static str, state: SessionState) -> Self {
        EngineError::InvalidState { operation, state }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            EngineError::InvalidDraft(violations) => violations
                .into_iter()
                .fold(app, |app, v| app.with_detail(v.field, v.message)),
            EngineError::RetriesExhausted { attempts, .. } => app.with_detail("attempts", attempts),
            EngineError::InvalidTransition { from, to } => app
                .with_detail("from", from.as_str())
                .with_detail("to", to.as_str()),
            EngineError::ParcelNotFound(id) => app.with_detail("parcel_id", id),
            EngineError::InvalidRecord(inner) => inner,
            EngineError::BookingMismatch {
                parcel_id,
                quoted,
                stored,
            } => app
                .with_detail("parcel_id", parcel_id)
                .with_detail("quoted", quoted.to_string())
                .with_detail("stored", stored.to_string()),
            _ => app,
        }
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
