//! Quote model

use super::money::Money;
use super::parcel::ParcelDraft;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Priced, immutable snapshot of a draft
///
/// A quote is never edited. When the draft changes the quote is discarded
/// and a new one is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    amount: Money,
    basis: ParcelDraft,
    created_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(amount: Money, basis: ParcelDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            amount,
            basis,
            created_at,
        }
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    /// The draft this quote was computed from
    pub fn basis(&self) -> &ParcelDraft {
        &self.basis
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether this quote still describes `draft`
    pub fn is_current_for(&self, draft: &ParcelDraft) -> bool {
        &self.basis == draft
    }
}
