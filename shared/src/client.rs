//! Parcel API wire types
//!
//! Request/response bodies exchanged with the Parcel API. Field names follow
//! the API's JSON exactly (a mix of camelCase and snake_case).

use crate::error::{AppError, ErrorCode};
use crate::models::{
    Booking, BookingStatus, DeliveryStatus, Money, ParcelKind, PaymentStatus, TrackingId, Weight,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Header carrying the submission idempotency key
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

// =============================================================================
// POST /parcels
// =============================================================================

/// Create-booking request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParcelRequest {
    #[serde(rename = "type")]
    pub kind: ParcelKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,

    pub sender_name: String,
    pub sender_contact: String,
    pub sender_region: String,
    pub sender_service_center: String,
    pub sender_address: String,
    pub pickup_instructions: String,

    pub receiver_name: String,
    pub receiver_contact: String,
    pub receiver_region: String,
    pub receiver_service_center: String,
    pub receiver_address: String,
    pub delivery_instructions: String,

    /// Cost in major units
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    pub status: BookingStatus,
    #[serde(rename = "delivery_status")]
    pub delivery_status: DeliveryStatus,
    #[serde(rename = "payment_status")]
    pub payment_status: PaymentStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    /// Proposed tracking id; the server decides the final one
    #[serde(rename = "tracking_id", skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<TrackingId>,
    #[serde(rename = "idempotency_key")]
    pub idempotency_key: String,
}

/// Create-booking response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateParcelResponse {
    #[serde(rename = "insertedId", default)]
    pub inserted_id: Option<String>,
    #[serde(default)]
    pub tracking_id: Option<String>,
}

// =============================================================================
// GET /parcel/:id
// =============================================================================

/// Parcel record as stored by the Parcel API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "tracking_id")]
    pub tracking_id: String,
    /// Cost in major units; accepted as a JSON number or string
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub cost: Decimal,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(rename = "delivery_status", default)]
    pub delivery_status: DeliveryStatus,
    #[serde(rename = "payment_status", default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ParcelRecord> for Booking {
    type Error = AppError;

    fn try_from(record: ParcelRecord) -> Result<Self, Self::Error> {
        let tracking_id = TrackingId::parse(&record.tracking_id).map_err(|e| {
            AppError::with_message(ErrorCode::InvalidTrackingId, e.to_string())
                .with_detail("parcel_id", record.id.clone())
        })?;

        let minor = record
            .cost
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.round().to_i64())
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::InvalidFormat, "cost out of range")
                    .with_detail("parcel_id", record.id.clone())
            })?;

        Ok(Booking {
            id: record.id,
            tracking_id,
            status: record.status,
            delivery_status: record.delivery_status,
            cost: Money::from_minor(minor),
            payment_status: record.payment_status,
            created_by: record.created_by,
            created_at: record.created_at,
        })
    }
}

// =============================================================================
// PATCH /parcel/status/:id
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(rename = "newStatus")]
    pub new_status: DeliveryStatus,
}

// =============================================================================
// DELETE /parcels/:id
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteParcelRequest {
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteParcelResponse {
    #[serde(rename = "deletedCount", default)]
    pub deleted_count: u64,
}

// =============================================================================
// POST /create-payment-intent
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub amount_in_cents: i64,
    pub parcel_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

// =============================================================================
// Error body
// =============================================================================

/// Error body returned by the Parcel API on non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
