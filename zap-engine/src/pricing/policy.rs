//! Pricing Policy
//!
//! Validates a draft against the region table and prices it.

use super::calculator::calculate_cost;
use crate::core::{DraftViolation, EngineError, EngineResult};
use crate::region::RegionTable;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
};
use chrono::{DateTime, Utc};
use shared::{Money, ParcelDraft, ParcelKind, Quote, Weight};
use std::sync::Arc;

/// Pricing Policy - turns valid drafts into quotes
#[derive(Clone)]
pub struct PricingPolicy {
    regions: Arc<RegionTable>,
}

impl std::fmt::Debug for PricingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingPolicy")
            .field("regions", &self.regions.len())
            .finish()
    }
}

/// Field names of the two parties, in report order
struct PartyFields {
    name: &'static str,
    contact: &'static str,
    region: &'static str,
    center: &'static str,
    address: &'static str,
    instructions: &'static str,
}

const SENDER_FIELDS: PartyFields = PartyFields {
    name: "senderName",
    contact: "senderContact",
    region: "originRegion",
    center: "originCenter",
    address: "senderAddress",
    instructions: "pickupInstructions",
};

const RECEIVER_FIELDS: PartyFields = PartyFields {
    name: "receiverName",
    contact: "receiverContact",
    region: "destinationRegion",
    center: "destinationCenter",
    address: "receiverAddress",
    instructions: "deliveryInstructions",
};

impl PricingPolicy {
    pub fn new(regions: Arc<RegionTable>) -> Self {
        Self { regions }
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// Check every draft constraint and report all violations at once
    pub fn validate(&self, draft: &ParcelDraft) -> EngineResult<()> {
        let mut violations = Vec::new();

        if draft.kind.is_none() {
            violations.push(DraftViolation::new("kind", "must be document or non-document"));
        }
        collect(&mut violations, validate_required_text(&draft.title, "title", MAX_NAME_LEN));

        if draft.kind == Some(ParcelKind::NonDocument)
            && let Err(v) = Self::weight_of(draft)
        {
            violations.push(v);
        }

        self.validate_party(&mut violations, &draft.sender, &SENDER_FIELDS);
        self.validate_party(&mut violations, &draft.receiver, &RECEIVER_FIELDS);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(EngineError::InvalidDraft(violations))
        }
    }

    /// Price a draft at the current time
    pub fn price(&self, draft: &ParcelDraft) -> EngineResult<Quote> {
        self.price_at(draft, Utc::now())
    }

    /// Price a draft with an explicit quote timestamp
    pub fn price_at(&self, draft: &ParcelDraft, created_at: DateTime<Utc>) -> EngineResult<Quote> {
        let amount = self.amount_for(draft)?;
        tracing::debug!(
            kind = ?draft.kind,
            same_region = draft.is_same_region(),
            amount = %amount,
            "Draft priced"
        );
        Ok(Quote::new(amount, draft.clone(), created_at))
    }

    /// Validated amount for a draft, without building a quote
    pub fn amount_for(&self, draft: &ParcelDraft) -> EngineResult<Money> {
        self.validate(draft)?;

        let kind = draft
            .kind
            .ok_or_else(|| EngineError::InvalidDraft(vec![DraftViolation::new("kind", "missing")]))?;
        let weight = match kind {
            ParcelKind::NonDocument => {
                Some(Self::weight_of(draft).map_err(|v| EngineError::InvalidDraft(vec![v]))?)
            }
            ParcelKind::Document => None,
        };

        Ok(calculate_cost(kind, weight, draft.is_same_region()))
    }

    fn weight_of(draft: &ParcelDraft) -> Result<Weight, DraftViolation> {
        let kg = draft.weight_kg.ok_or_else(|| {
            DraftViolation::new("weightKg", "is required for non-document parcels")
        })?;
        Weight::from_kg(kg).map_err(|e| DraftViolation::new("weightKg", e.to_string()))
    }

    fn validate_party(
        &self,
        violations: &mut Vec<DraftViolation>,
        party: &shared::PartyDetails,
        fields: &PartyFields,
    ) {
        collect(violations, validate_required_text(&party.name, fields.name, MAX_NAME_LEN));
        collect(
            violations,
            validate_required_text(&party.contact, fields.contact, MAX_SHORT_TEXT_LEN),
        );

        let region_ok = match validate_required_text(&party.region, fields.region, MAX_SHORT_TEXT_LEN) {
            Err(v) => {
                violations.push(v);
                false
            }
            Ok(()) if !self.regions.contains(&party.region) => {
                violations.push(DraftViolation::new(
                    fields.region,
                    format!("unknown region '{}'", party.region),
                ));
                false
            }
            Ok(()) => true,
        };

        match validate_required_text(&party.center, fields.center, MAX_SHORT_TEXT_LEN) {
            Err(v) => violations.push(v),
            Ok(()) if region_ok && self.regions.check_center(&party.region, &party.center).is_err() => {
                violations.push(DraftViolation::new(
                    fields.center,
                    format!(
                        "service center '{}' is not in region '{}'",
                        party.center, party.region
                    ),
                ));
            }
            Ok(()) => {}
        }

        collect(
            violations,
            validate_required_text(&party.address, fields.address, MAX_ADDRESS_LEN),
        );
        collect(
            violations,
            validate_required_text(&party.instructions, fields.instructions, MAX_NOTE_LEN),
        );
    }
}

fn collect(violations: &mut Vec<DraftViolation>, result: Result<(), DraftViolation>) {
    if let Err(v) = result {
        violations.push(v);
    }
}
