//! HTTP client for network-based Parcel API calls

use crate::{ClientConfig, ClientError, ClientResult, ParcelApi};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::client::{
    ApiErrorBody, CreateParcelRequest, CreateParcelResponse, DeleteParcelRequest,
    DeleteParcelResponse, IDEMPOTENCY_KEY_HEADER, ParcelRecord, PaymentIntentRequest,
    PaymentIntentResponse, UpdateStatusRequest,
};
use shared::{Actor, DeliveryStatus, TrackingEvent};

/// Network Parcel API client
#[derive(Debug, Clone)]
pub struct NetworkParcelApi {
    client: Client,
    base_url: String,
}

impl NetworkParcelApi {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder, actor: &Actor) -> RequestBuilder {
        request.bearer_auth(actor.token())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Send and check the status, ignoring the body
    async fn send_empty(&self, request: RequestBuilder) -> ClientResult<()> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::error_from_body(status, text));
        }
        Ok(())
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::error_from_body(status, text));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    fn error_from_body(status: StatusCode, text: String) -> ClientError {
        // Structured error body first
        if let Ok(api_err) = serde_json::from_str::<ApiErrorBody>(&text) {
            return ClientError::Api {
                status: status.as_u16(),
                code: api_err.code,
                message: api_err.message,
                details: api_err.details,
            };
        }

        // Fall back to the status line
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(text),
            StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST => ClientError::Validation(text),
            StatusCode::REQUEST_TIMEOUT => ClientError::Timeout,
            s if s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS => {
                ClientError::Server {
                    status: s.as_u16(),
                    message: text,
                }
            }
            _ => ClientError::Conflict(text),
        }
    }
}

#[async_trait]
impl ParcelApi for NetworkParcelApi {
    async fn create_parcel(
        &self,
        actor: &Actor,
        request: &CreateParcelRequest,
    ) -> ClientResult<CreateParcelResponse> {
        tracing::debug!(
            idempotency_key = %request.idempotency_key,
            "POST /parcels"
        );
        let req = self
            .client
            .post(self.url("/parcels"))
            .header(IDEMPOTENCY_KEY_HEADER, request.idempotency_key.as_str())
            .json(request);
        self.send(self.authorized(req, actor)).await
    }

    async fn get_parcel(&self, actor: &Actor, id: &str) -> ClientResult<ParcelRecord> {
        let req = self.client.get(self.url(&format!("/parcel/{id}")));
        self.send(self.authorized(req, actor)).await
    }

    async fn update_delivery_status(
        &self,
        actor: &Actor,
        id: &str,
        status: DeliveryStatus,
    ) -> ClientResult<()> {
        let body = UpdateStatusRequest { new_status: status };
        let req = self
            .client
            .patch(self.url(&format!("/parcel/status/{id}")))
            .json(&body);
        self.send_empty(self.authorized(req, actor)).await
    }

    async fn delete_parcel(&self, actor: &Actor, id: &str) -> ClientResult<DeleteParcelResponse> {
        let body = DeleteParcelRequest {
            email: actor.email.clone(),
        };
        let req = self
            .client
            .delete(self.url(&format!("/parcels/{id}")))
            .json(&body);
        self.send(self.authorized(req, actor)).await
    }

    async fn log_tracking(&self, actor: &Actor, event: &TrackingEvent) -> ClientResult<()> {
        let req = self.client.post(self.url("/tracking")).json(event);
        self.send_empty(self.authorized(req, actor)).await
    }

    async fn create_payment_intent(
        &self,
        actor: &Actor,
        request: &PaymentIntentRequest,
    ) -> ClientResult<PaymentIntentResponse> {
        let req = self
            .client
            .post(self.url("/create-payment-intent"))
            .json(request);
        self.send(self.authorized(req, actor)).await
    }
}
