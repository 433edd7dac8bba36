//! Booking model
//!
//! A booking is owned by the Parcel API once created; the client only holds
//! a read copy.

use super::money::Money;
use super::tracking::TrackingStatus;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Tracking id prefix
pub const TRACKING_ID_PREFIX: &str = "ZAP-";

/// Number of digits after the prefix
pub const TRACKING_ID_DIGITS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tracking id must look like ZAP-123456, got {0:?}")]
pub struct TrackingIdError(pub String);

/// Tracking id in `ZAP-######` form
///
/// Uniqueness is decided by the Parcel API. The client may only propose a
/// candidate with [`TrackingId::candidate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingId(String);

impl TrackingId {
    /// Parse and validate a tracking id
    pub fn parse(value: &str) -> Result<Self, TrackingIdError> {
        let digits = value
            .strip_prefix(TRACKING_ID_PREFIX)
            .ok_or_else(|| TrackingIdError(value.to_string()))?;

        if digits.len() != TRACKING_ID_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TrackingIdError(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    /// Random candidate (6 digits, no leading zero)
    pub fn candidate() -> Self {
        let n: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
        Self(format!("{TRACKING_ID_PREFIX}{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TrackingId {
    type Error = TrackingIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TrackingId> for String {
    fn from(id: TrackingId) -> Self {
        id.0
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client-generated key that collapses duplicate submissions into one booking
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Fresh random key
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Booking status as reported by the Parcel API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Initial status on creation
    #[default]
    Pending,
    /// Any later status set by the server
    #[serde(other)]
    Processing,
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}

/// Physical delivery progress
///
/// Advances strictly forward:
/// `not_collected → rider_assigned → in_transit → delivered`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    #[default]
    NotCollected,
    RiderAssigned,
    InTransit,
    Delivered,
}

impl DeliveryStatus {
    /// The single status that may follow this one
    pub fn next(&self) -> Option<DeliveryStatus> {
        match self {
            Self::NotCollected => Some(Self::RiderAssigned),
            Self::RiderAssigned => Some(Self::InTransit),
            Self::InTransit => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    pub fn can_advance_to(&self, target: DeliveryStatus) -> bool {
        self.next() == Some(target)
    }

    /// Tracking event status recorded when entering this status
    pub fn tracking_status(&self) -> Option<TrackingStatus> {
        match self {
            Self::NotCollected => None,
            Self::RiderAssigned => Some(TrackingStatus::RiderAssigned),
            Self::InTransit => Some(TrackingStatus::InTransit),
            Self::Delivered => Some(TrackingStatus::Delivered),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotCollected => "not_collected",
            Self::RiderAssigned => "rider_assigned",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
        }
    }
}

/// Server-persisted shipment record (client read copy)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Server-assigned id (`insertedId`)
    pub id: String,
    pub tracking_id: TrackingId,
    pub status: BookingStatus,
    pub delivery_status: DeliveryStatus,
    /// Copied from the confirmed quote
    pub cost: Money,
    pub payment_status: PaymentStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}
