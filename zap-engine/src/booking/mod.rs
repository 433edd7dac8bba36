//! Booking Module
//!
//! Everything that talks to the Parcel API after a quote is confirmed.

mod failure;
mod payment;
mod submitter;

pub use failure::SubmitFailure;
pub use payment::BookingPayment;
pub use submitter::{BookingSubmitter, DeliveryUpdate, SubmitReceipt};
