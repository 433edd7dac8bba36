//! Tracking event model

use super::booking::TrackingId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tracking history status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    ParcelCreated,
    RiderAssigned,
    InTransit,
    Delivered,
}

/// One entry in a parcel's tracking history
///
/// Serialized in the shape `POST /tracking` expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub tracking_id: TrackingId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parcel_id: Option<String>,
    pub status: TrackingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Actor email
    pub updated_by: String,
    pub timestamp: DateTime<Utc>,
}

impl TrackingEvent {
    pub fn new(
        tracking_id: TrackingId,
        status: TrackingStatus,
        updated_by: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            tracking_id,
            parcel_id: None,
            status,
            details: None,
            updated_by: updated_by.into(),
            timestamp,
        }
    }

    pub fn with_parcel_id(mut self, parcel_id: impl Into<String>) -> Self {
        self.parcel_id = Some(parcel_id.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
