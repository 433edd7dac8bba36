//! Payment hand-off
//!
//! The gateway charges `Booking.cost` only after the booking exists; this
//! module builds the request for it. Charge capture happens elsewhere.

use crate::core::{EngineError, EngineResult};
use shared::Booking;
use shared::client::PaymentIntentRequest;

/// Payment helpers on a booking read copy
pub trait BookingPayment {
    /// Payment Gateway request for the booking's cost
    fn payment_intent(&self) -> EngineResult<PaymentIntentRequest>;
}

impl BookingPayment for Booking {
    fn payment_intent(&self) -> EngineResult<PaymentIntentRequest> {
        if self.is_paid() {
            return Err(EngineError::AlreadyPaid(self.id.clone()));
        }
        Ok(PaymentIntentRequest {
            amount_in_cents: self.cost.minor(),
            parcel_id: self.id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::{BookingStatus, DeliveryStatus, Money, PaymentStatus, TrackingId};

    fn booking(payment_status: PaymentStatus) -> Booking {
        Booking {
            id: "665f1c2a".to_string(),
            tracking_id: TrackingId::parse("ZAP-482913").unwrap(),
            status: BookingStatus::Pending,
            delivery_status: DeliveryStatus::NotCollected,
            cost: Money::from_major(270),
            payment_status,
            created_by: "sender@zap.test".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_payment_intent_uses_minor_units() {
        let request = booking(PaymentStatus::Unpaid).payment_intent().unwrap();
        assert_eq!(request.amount_in_cents, 27_000);
        assert_eq!(request.parcel_id, "665f1c2a");
    }

    #[test]
    fn test_paid_booking_is_refused() {
        let err = booking(PaymentStatus::Paid).payment_intent().unwrap_err();
        assert!(matches!(err, EngineError::AlreadyPaid(ref id) if id == "665f1c2a"));
    }
}
