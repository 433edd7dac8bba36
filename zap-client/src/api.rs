//! Parcel API contract
//!
//! The engine talks to the Parcel API only through this trait, so tests and
//! alternative transports can stand in for the network client.

use crate::ClientResult;
use async_trait::async_trait;
use shared::client::{
    CreateParcelRequest, CreateParcelResponse, DeleteParcelResponse, ParcelRecord,
    PaymentIntentRequest, PaymentIntentResponse,
};
use shared::{Actor, DeliveryStatus, TrackingEvent};

/// Parcel API operations used by the booking engine
///
/// Every call carries the caller's identity explicitly; implementations
/// attach `actor.token()` as the bearer credential.
#[async_trait]
pub trait ParcelApi: Send + Sync {
    /// `POST /parcels`
    ///
    /// Must honor `request.idempotency_key`: repeated calls with the same key
    /// return the booking created by the first call.
    async fn create_parcel(
        &self,
        actor: &Actor,
        request: &CreateParcelRequest,
    ) -> ClientResult<CreateParcelResponse>;

    /// `GET /parcel/:id`
    async fn get_parcel(&self, actor: &Actor, id: &str) -> ClientResult<ParcelRecord>;

    /// `PATCH /parcel/status/:id`
    async fn update_delivery_status(
        &self,
        actor: &Actor,
        id: &str,
        status: DeliveryStatus,
    ) -> ClientResult<()>;

    /// `DELETE /parcels/:id`
    async fn delete_parcel(&self, actor: &Actor, id: &str) -> ClientResult<DeleteParcelResponse>;

    /// `POST /tracking`
    async fn log_tracking(&self, actor: &Actor, event: &TrackingEvent) -> ClientResult<()>;

    /// `POST /create-payment-intent`
    async fn create_payment_intent(
        &self,
        actor: &Actor,
        request: &PaymentIntentRequest,
    ) -> ClientResult<PaymentIntentResponse>;
}
