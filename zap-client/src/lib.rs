//! Zap Client - HTTP client for the Parcel API
//!
//! Provides the [`ParcelApi`] contract used by the booking engine and its
//! network implementation [`NetworkParcelApi`].

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::ParcelApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::NetworkParcelApi;

// Re-export wire types for convenience
pub use shared::client::{
    CreateParcelRequest, CreateParcelResponse, DeleteParcelResponse, ParcelRecord,
    PaymentIntentRequest, PaymentIntentResponse,
};
