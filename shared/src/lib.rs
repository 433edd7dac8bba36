//! Shared types for the Zap parcel booking stack
//!
//! Domain models, Parcel API wire DTOs, and the unified error code system
//! used by both `zap-client` and `zap-engine`.

pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
pub use models::{
    Actor, Booking, BookingStatus, DeliveryStatus, IdempotencyKey, Money, ParcelDraft, ParcelKind,
    PartyDetails, PaymentStatus, Quote, Region, TrackingEvent, TrackingId, TrackingStatus, Weight,
};
