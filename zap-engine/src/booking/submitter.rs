//! Booking Submitter
//!
//! Persists confirmed quotes through the Parcel API and drives the booking
//! lifecycle afterwards (read copy, delivery progress, cancellation,
//! payment hand-off).
//!
//! # Submission Flow
//!
//! ```text
//! submit(quote, draft, key, actor)
//!     ├─ 1. Check quote still describes the draft
//!     ├─ 2. Build CreateParcelRequest (cost from quote, idempotency key)
//!     ├─ 3. POST /parcels (failures classified into SubmitFailure)
//!     ├─ 4. GET /parcel/:id (stored record is the booking)
//!     ├─ 5. Stored cost must equal the quote
//!     ├─ 6. POST /tracking parcel_created (best-effort)
//!     └─ 7. Return SubmitReceipt
//! ```

use super::failure::SubmitFailure;
use super::payment::BookingPayment;
use crate::core::{DraftViolation, EngineError, EngineResult};
use crate::utils::validation::validate_email;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::client::CreateParcelRequest;
use shared::{
    Actor, Booking, BookingStatus, DeliveryStatus, IdempotencyKey, ParcelDraft, PaymentStatus,
    Quote, TrackingEvent, TrackingId, TrackingStatus, Weight,
};
use std::sync::Arc;
use zap_client::{ClientError, ParcelApi};

/// Outcome of a successful submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    pub booking: Booking,
    /// The `parcel_created` event handed to the tracking log
    pub tracking_event: TrackingEvent,
    /// Whether the tracking log accepted the event
    pub tracking_logged: bool,
}

/// Outcome of a delivery status change
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryUpdate {
    pub tracking_event: TrackingEvent,
    pub tracking_logged: bool,
}

/// Booking Submitter - the engine's only path to the Parcel API
#[derive(Clone)]
pub struct BookingSubmitter {
    api: Arc<dyn ParcelApi>,
    propose_tracking_id: bool,
}

impl std::fmt::Debug for BookingSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingSubmitter")
            .field("api", &"<dyn ParcelApi>")
            .field("propose_tracking_id", &self.propose_tracking_id)
            .finish()
    }
}

impl BookingSubmitter {
    pub fn new(api: Arc<dyn ParcelApi>) -> Self {
        Self {
            api,
            propose_tracking_id: true,
        }
    }

    /// Whether sessions should send a client-side tracking id candidate
    pub fn with_tracking_proposal(mut self, propose: bool) -> Self {
        self.propose_tracking_id = propose;
        self
    }

    pub fn proposes_tracking_id(&self) -> bool {
        self.propose_tracking_id
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Persist a confirmed quote as a booking
    ///
    /// Repeating the call with the same `key` never creates a second booking;
    /// the Parcel API collapses duplicates onto the first one. The returned
    /// booking is the record the server stored, and its cost must equal the
    /// quote's.
    pub async fn submit(
        &self,
        quote: &Quote,
        draft: &ParcelDraft,
        key: &IdempotencyKey,
        proposed_tracking_id: Option<&TrackingId>,
        actor: &Actor,
    ) -> EngineResult<SubmitReceipt> {
        if !quote.is_current_for(draft) {
            return Err(EngineError::InvalidDraft(vec![DraftViolation::new(
                "quote",
                "does not match the current draft",
            )]));
        }
        if let Err(v) = validate_email(&actor.email, "actor") {
            return Err(SubmitFailure::Unauthorized(v.to_string()).into());
        }

        let created_at = Utc::now();
        let request = build_request(quote, draft, key, proposed_tracking_id, actor, created_at)?;

        let response = self
            .api
            .create_parcel(actor, &request)
            .await
            .map_err(SubmitFailure::from)?;

        let parcel_id = response.inserted_id.ok_or_else(|| {
            SubmitFailure::Transient("parcel api response has no insertedId".into())
        })?;

        let booking = self.read_back(&parcel_id, actor).await?;
        if booking.cost != quote.amount() {
            tracing::error!(
                parcel_id = %booking.id,
                quoted = %quote.amount(),
                stored = %booking.cost,
                "Stored booking does not match the confirmed quote"
            );
            return Err(EngineError::BookingMismatch {
                parcel_id: booking.id,
                quoted: quote.amount(),
                stored: booking.cost,
            });
        }
        if let Some(echoed) = response.tracking_id.as_deref()
            && echoed != booking.tracking_id.as_str()
        {
            tracing::warn!(
                parcel_id = %booking.id,
                echoed,
                stored = %booking.tracking_id,
                "Echoed tracking id differs from the stored record"
            );
        }
        if let Some(proposed) = proposed_tracking_id
            && *proposed != booking.tracking_id
        {
            tracing::info!(
                parcel_id = %booking.id,
                proposed = %proposed,
                assigned = %booking.tracking_id,
                "Parcel API assigned its own tracking id"
            );
        }

        tracing::info!(
            parcel_id = %booking.id,
            tracking_id = %booking.tracking_id,
            cost = %booking.cost,
            "Booking created"
        );

        let tracking_event = TrackingEvent::new(
            booking.tracking_id.clone(),
            TrackingStatus::ParcelCreated,
            actor.email.clone(),
            Utc::now(),
        )
        .with_parcel_id(booking.id.clone())
        .with_details(format!("created by {}", actor.label()));

        let tracking_logged = self.log_tracking(&tracking_event, actor).await;

        Ok(SubmitReceipt {
            booking,
            tracking_event,
            tracking_logged,
        })
    }

    /// Stored record right after creation
    ///
    /// The booking already exists at this point, so a failed read is never a
    /// rejection of the draft; retrying with the same key reaches it again.
    async fn read_back(&self, parcel_id: &str, actor: &Actor) -> EngineResult<Booking> {
        let record = self
            .api
            .get_parcel(actor, parcel_id)
            .await
            .map_err(|e| match SubmitFailure::from(e) {
                SubmitFailure::Rejected { message, .. } => {
                    SubmitFailure::Transient(format!("reading back {parcel_id}: {message}"))
                }
                other => other,
            })?;
        Booking::try_from(record).map_err(EngineError::InvalidRecord)
    }

    /// Post a tracking event; failures are logged and swallowed
    async fn log_tracking(&self, event: &TrackingEvent, actor: &Actor) -> bool {
        match self.api.log_tracking(actor, event).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    tracking_id = %event.tracking_id,
                    status = ?event.status,
                    error = %e,
                    "Failed to log tracking event"
                );
                false
            }
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Read copy of a booking (`GET /parcel/:id`)
    pub async fn fetch(&self, parcel_id: &str, actor: &Actor) -> EngineResult<Booking> {
        let record = self
            .api
            .get_parcel(actor, parcel_id)
            .await
            .map_err(|e| not_found_or(e, parcel_id))?;
        Booking::try_from(record).map_err(EngineError::InvalidRecord)
    }

    /// Move a booking one step along its delivery lifecycle
    ///
    /// Only the immediate successor of the current status is accepted.
    pub async fn advance_delivery(
        &self,
        booking: &mut Booking,
        next: DeliveryStatus,
        actor: &Actor,
    ) -> EngineResult<DeliveryUpdate> {
        let from = booking.delivery_status;
        let status = match next.tracking_status() {
            Some(status) if from.can_advance_to(next) => status,
            _ => return Err(EngineError::InvalidTransition { from, to: next }),
        };

        self.api
            .update_delivery_status(actor, &booking.id, next)
            .await
            .map_err(|e| not_found_or(e, &booking.id))?;
        booking.delivery_status = next;

        tracing::info!(
            parcel_id = %booking.id,
            from = from.as_str(),
            to = next.as_str(),
            "Delivery status advanced"
        );

        let tracking_event = TrackingEvent::new(
            booking.tracking_id.clone(),
            status,
            actor.email.clone(),
            Utc::now(),
        )
        .with_parcel_id(booking.id.clone());
        let tracking_logged = self.log_tracking(&tracking_event, actor).await;

        Ok(DeliveryUpdate {
            tracking_event,
            tracking_logged,
        })
    }

    /// Delete a booking that is still unpaid and not collected
    pub async fn cancel(&self, booking: &Booking, actor: &Actor) -> EngineResult<()> {
        if booking.is_paid() {
            return Err(EngineError::NotCancellable(format!(
                "{} is already paid",
                booking.id
            )));
        }
        if booking.delivery_status != DeliveryStatus::NotCollected {
            return Err(EngineError::NotCancellable(format!(
                "{} is {}",
                booking.id,
                booking.delivery_status.as_str()
            )));
        }

        let response = self
            .api
            .delete_parcel(actor, &booking.id)
            .await
            .map_err(|e| not_found_or(e, &booking.id))?;

        if response.deleted_count == 0 {
            return Err(EngineError::NotCancellable(format!(
                "{} was not deleted by the parcel api",
                booking.id
            )));
        }

        tracing::info!(parcel_id = %booking.id, "Booking cancelled");
        Ok(())
    }

    /// Start payment for a booking, returning the gateway client secret
    pub async fn request_payment(&self, booking: &Booking, actor: &Actor) -> EngineResult<String> {
        let request = booking.payment_intent()?;
        let response = self
            .api
            .create_payment_intent(actor, &request)
            .await
            .map_err(SubmitFailure::from)?;
        Ok(response.client_secret)
    }
}

fn not_found_or(err: ClientError, parcel_id: &str) -> EngineError {
    if err.status() == Some(404) {
        EngineError::ParcelNotFound(parcel_id.to_string())
    } else {
        SubmitFailure::from(err).into()
    }
}

/// Wire request for `POST /parcels`
fn build_request(
    quote: &Quote,
    draft: &ParcelDraft,
    key: &IdempotencyKey,
    proposed_tracking_id: Option<&TrackingId>,
    actor: &Actor,
    created_at: DateTime<Utc>,
) -> EngineResult<CreateParcelRequest> {
    let kind = draft.kind.ok_or_else(|| {
        EngineError::InvalidDraft(vec![DraftViolation::new("kind", "must be document or non-document")])
    })?;
    let weight = draft.weight_kg.and_then(|kg| Weight::from_kg(kg).ok());
    let (sender, receiver) = (&draft.sender, &draft.receiver);

    Ok(CreateParcelRequest {
        kind,
        title: draft.title.clone(),
        weight,
        sender_name: sender.name.clone(),
        sender_contact: sender.contact.clone(),
        sender_region: sender.region.clone(),
        sender_service_center: sender.center.clone(),
        sender_address: sender.address.clone(),
        pickup_instructions: sender.instructions.clone(),
        receiver_name: receiver.name.clone(),
        receiver_contact: receiver.contact.clone(),
        receiver_region: receiver.region.clone(),
        receiver_service_center: receiver.center.clone(),
        receiver_address: receiver.address.clone(),
        delivery_instructions: receiver.instructions.clone(),
        cost: quote.amount().to_decimal(),
        status: BookingStatus::Pending,
        delivery_status: DeliveryStatus::NotCollected,
        payment_status: PaymentStatus::Unpaid,
        created_by: actor.email.clone(),
        created_at,
        tracking_id: proposed_tracking_id.cloned(),
        idempotency_key: key.as_str().to_string(),
    })
}
