//! In-memory Parcel API used by the engine integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use shared::client::{
    CreateParcelRequest, CreateParcelResponse, DeleteParcelResponse, ParcelRecord,
    PaymentIntentRequest, PaymentIntentResponse,
};
use shared::{Actor, DeliveryStatus, ParcelDraft, PartyDetails, TrackingEvent};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use zap_client::{ClientError, ClientResult, ParcelApi};
use zap_engine::{BookingSubmitter, EngineState, RegionTable, RetryPolicy};

/// Scripted outcome of one `create_parcel` call
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Succeed,
    /// Booking persisted, response lost on the way back
    LoseResponse,
    /// Request never reached the server
    Timeout,
    ServerError,
    Reject,
    Unauthorized,
    Forbidden,
}

#[derive(Default)]
struct Inner {
    parcels: HashMap<String, ParcelRecord>,
    by_key: HashMap<String, String>,
    script: VecDeque<Step>,
    create_calls: usize,
    tracking: Vec<TrackingEvent>,
    status_updates: Vec<(String, DeliveryStatus)>,
    tracking_fails: bool,
    echo_tracking_id: bool,
    ignore_proposals: bool,
    doubles_cost: bool,
}

/// Parcel API fake that honors idempotency keys
#[derive(Default, Clone)]
pub struct InMemoryParcelApi {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryParcelApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, steps: &[Step]) {
        self.inner.lock().unwrap().script.extend(steps.iter().copied());
    }

    pub fn fail_tracking(&self) {
        self.inner.lock().unwrap().tracking_fails = true;
    }

    /// Server picks its own tracking ids and echoes them
    pub fn assign_tracking_ids(&self, echo: bool) {
        let mut inner = self.inner.lock().unwrap();
        inner.ignore_proposals = true;
        inner.echo_tracking_id = echo;
    }

    /// Server stores twice the submitted cost
    pub fn double_stored_cost(&self) {
        self.inner.lock().unwrap().doubles_cost = true;
    }

    pub fn create_calls(&self) -> usize {
        self.inner.lock().unwrap().create_calls
    }

    pub fn booking_count(&self) -> usize {
        self.inner.lock().unwrap().parcels.len()
    }

    pub fn tracking_events(&self) -> Vec<TrackingEvent> {
        self.inner.lock().unwrap().tracking.clone()
    }

    pub fn status_updates(&self) -> Vec<(String, DeliveryStatus)> {
        self.inner.lock().unwrap().status_updates.clone()
    }

    pub fn record(&self, id: &str) -> Option<ParcelRecord> {
        self.inner.lock().unwrap().parcels.get(id).cloned()
    }
}

#[async_trait]
impl ParcelApi for InMemoryParcelApi {
    async fn create_parcel(
        &self,
        _actor: &Actor,
        request: &CreateParcelRequest,
    ) -> ClientResult<CreateParcelResponse> {
        let mut inner = self.inner.lock().unwrap();
        inner.create_calls += 1;

        let step = inner.script.pop_front().unwrap_or(Step::Succeed);
        match step {
            Step::Timeout => return Err(ClientError::Timeout),
            Step::ServerError => {
                return Err(ClientError::Server {
                    status: 503,
                    message: "service unavailable".into(),
                });
            }
            Step::Reject => {
                return Err(ClientError::Api {
                    status: 422,
                    code: 4006,
                    message: "receiver contact blocked".into(),
                    details: None,
                });
            }
            Step::Unauthorized => return Err(ClientError::Unauthorized("token expired".into())),
            Step::Forbidden => return Err(ClientError::Forbidden("riders cannot book".into())),
            Step::Succeed | Step::LoseResponse => {}
        }

        let existing = inner.by_key.get(&request.idempotency_key).cloned();
        let id = match existing {
            Some(id) => id,
            None => {
                let n = inner.parcels.len() + 1;
                let id = format!("parcel-{n}");
                let tracking_id = match (&request.tracking_id, inner.ignore_proposals) {
                    (Some(proposed), false) => proposed.to_string(),
                    _ => format!("ZAP-{}", 900_000 + n),
                };
                let cost = if inner.doubles_cost {
                    request.cost + request.cost
                } else {
                    request.cost
                };
                let record = ParcelRecord {
                    id: id.clone(),
                    tracking_id,
                    cost,
                    status: request.status,
                    delivery_status: request.delivery_status,
                    payment_status: request.payment_status,
                    created_by: request.created_by.clone(),
                    created_at: request.created_at,
                };
                inner.parcels.insert(id.clone(), record);
                inner.by_key.insert(request.idempotency_key.clone(), id.clone());
                id
            }
        };

        if matches!(step, Step::LoseResponse) {
            return Err(ClientError::Timeout);
        }

        let tracking_id = inner
            .echo_tracking_id
            .then(|| inner.parcels[&id].tracking_id.clone());
        Ok(CreateParcelResponse {
            inserted_id: Some(id),
            tracking_id,
        })
    }

    async fn get_parcel(&self, _actor: &Actor, id: &str) -> ClientResult<ParcelRecord> {
        self.inner
            .lock()
            .unwrap()
            .parcels
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("parcel {id}")))
    }

    async fn update_delivery_status(
        &self,
        _actor: &Actor,
        id: &str,
        status: DeliveryStatus,
    ) -> ClientResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let record = inner
            .parcels
            .get_mut(id)
            .ok_or_else(|| ClientError::NotFound(format!("parcel {id}")))?;
        record.delivery_status = status;
        inner.status_updates.push((id.to_string(), status));
        Ok(())
    }

    async fn delete_parcel(&self, actor: &Actor, id: &str) -> ClientResult<DeleteParcelResponse> {
        let mut inner = self.inner.lock().unwrap();
        let owned = inner
            .parcels
            .get(id)
            .is_some_and(|r| r.created_by == actor.email);
        let deleted_count = if owned && inner.parcels.remove(id).is_some() {
            1
        } else {
            0
        };
        Ok(DeleteParcelResponse { deleted_count })
    }

    async fn log_tracking(&self, _actor: &Actor, event: &TrackingEvent) -> ClientResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.tracking_fails {
            return Err(ClientError::Server {
                status: 500,
                message: "tracking store down".into(),
            });
        }
        inner.tracking.push(event.clone());
        Ok(())
    }

    async fn create_payment_intent(
        &self,
        _actor: &Actor,
        request: &PaymentIntentRequest,
    ) -> ClientResult<PaymentIntentResponse> {
        Ok(PaymentIntentResponse {
            client_secret: format!("pi_{}_{}_secret", request.parcel_id, request.amount_in_cents),
        })
    }
}

// ========================================================================
// Fixtures
// ========================================================================

pub fn party(name: &str, region: &str, center: &str) -> PartyDetails {
    PartyDetails {
        name: name.to_string(),
        contact: "01711223344".to_string(),
        region: region.to_string(),
        center: center.to_string(),
        address: "Road 7, Block C".to_string(),
        instructions: "Ring the bell".to_string(),
    }
}

/// 5 kg, Dhaka to Khulna: 270
pub fn cross_region_box() -> ParcelDraft {
    ParcelDraft::non_document(
        "Rice cooker",
        5.0,
        party("Rahim", "dhaka", "Gazipur"),
        party("Karim", "khulna", "Jashore"),
    )
}

pub fn actor() -> Actor {
    Actor::new("rahim@zap.test", "token-rahim").with_display_name("Rahim")
}

pub fn engine(api: &InMemoryParcelApi, retry: RetryPolicy) -> EngineState {
    EngineState::from_parts(
        RegionTable::builtin(),
        BookingSubmitter::new(Arc::new(api.clone())),
        retry,
    )
}

pub fn engine_without_proposals(api: &InMemoryParcelApi) -> EngineState {
    EngineState::from_parts(
        RegionTable::builtin(),
        BookingSubmitter::new(Arc::new(api.clone())).with_tracking_proposal(false),
        RetryPolicy::default(),
    )
}
