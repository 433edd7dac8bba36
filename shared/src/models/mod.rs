//! Domain models
//!
//! Parcel drafts, quotes, bookings and the value types they are built from.

pub mod actor;
pub mod booking;
pub mod money;
pub mod parcel;
pub mod quote;
pub mod region;
pub mod tracking;

pub use actor::Actor;
pub use booking::{
    Booking, BookingStatus, DeliveryStatus, IdempotencyKey, PaymentStatus, TrackingId,
    TrackingIdError,
};
pub use money::{Money, Weight, WeightError};
pub use parcel::{ParcelDraft, ParcelKind, PartyDetails};
pub use quote::Quote;
pub use region::Region;
pub use tracking::{TrackingEvent, TrackingStatus};
