use super::*;
use crate::core::EngineError;
use crate::region::RegionTable;
use chrono::{TimeZone, Utc};
use shared::{Money, ParcelDraft, PartyDetails};
use std::sync::Arc;

fn policy() -> PricingPolicy {
    PricingPolicy::new(Arc::new(RegionTable::builtin()))
}

fn party(region: &str, center: &str) -> PartyDetails {
    PartyDetails {
        name: "Rahim Uddin".to_string(),
        contact: "01700000000".to_string(),
        region: region.to_string(),
        center: center.to_string(),
        address: "House 12, Road 5".to_string(),
        instructions: "Call before arriving".to_string(),
    }
}

fn document(to_region: &str, to_center: &str) -> ParcelDraft {
    ParcelDraft::document(
        "Contract papers",
        party("dhaka", "Gazipur"),
        party(to_region, to_center),
    )
}

fn box_of(weight_kg: f64, to_region: &str, to_center: &str) -> ParcelDraft {
    ParcelDraft::non_document(
        "Kitchen set",
        weight_kg,
        party("dhaka", "Dhaka"),
        party(to_region, to_center),
    )
}

fn fields(err: &EngineError) -> Vec<&'static str> {
    err.violations().iter().map(|v| v.field).collect()
}

// ========================================================================
// Rates
// ========================================================================

#[test]
fn test_document_rates() {
    let policy = policy();
    assert_eq!(
        policy.price(&document("dhaka", "Tangail")).unwrap().amount(),
        Money::from_major(60)
    );
    assert_eq!(
        policy.price(&document("sylhet", "Sylhet")).unwrap().amount(),
        Money::from_major(80)
    );
}

#[test]
fn test_non_document_rates() {
    let policy = policy();
    let cases = [
        (3.0, "dhaka", "Narayanganj", 110),
        (3.0, "khulna", "Khulna", 150),
        (5.0, "dhaka", "Narayanganj", 190),
        (5.0, "khulna", "Khulna", 270),
    ];
    for (weight, region, center, expected) in cases {
        let quote = policy.price(&box_of(weight, region, center)).unwrap();
        assert_eq!(
            quote.amount(),
            Money::from_major(expected),
            "{weight} kg to {region}"
        );
    }
}

#[test]
fn test_pricing_is_deterministic() {
    let policy = policy();
    let draft = box_of(7.4, "rangpur", "Dinajpur");
    let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();

    let first = policy.price_at(&draft, at).unwrap();
    let second = policy.price_at(&draft, at).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.basis(), &draft);
    assert!(first.is_current_for(&draft));
}

// ========================================================================
// Validation
// ========================================================================

#[test]
fn test_missing_weight_names_weight_kg() {
    let mut draft = box_of(1.0, "dhaka", "Dhaka");
    draft.weight_kg = None;

    let err = policy().price(&draft).unwrap_err();
    assert!(matches!(err, EngineError::InvalidDraft(_)));
    assert_eq!(fields(&err), vec!["weightKg"]);
}

#[test]
fn test_weight_rules() {
    let policy = policy();
    for bad in [0.0, -1.0, 2.25, f64::NAN] {
        let err = policy.price(&box_of(bad, "dhaka", "Dhaka")).unwrap_err();
        assert_eq!(fields(&err), vec!["weightKg"], "weight {bad}");
    }
    // Documents ignore weight
    let mut doc = document("dhaka", "Tangail");
    doc.weight_kg = Some(2.25);
    assert!(policy.price(&doc).is_ok());
}

#[test]
fn test_reports_every_violation() {
    let mut draft = ParcelDraft::default();
    draft.receiver.region = "atlantis".to_string();
    draft.receiver.center = "Harbour".to_string();

    let err = policy().price(&draft).unwrap_err();
    let fields = fields(&err);

    assert!(fields.contains(&"kind"));
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"senderName"));
    assert!(fields.contains(&"senderContact"));
    assert!(fields.contains(&"originRegion"));
    assert!(fields.contains(&"originCenter"));
    assert!(fields.contains(&"pickupInstructions"));
    assert!(fields.contains(&"destinationRegion"));
    assert!(fields.contains(&"deliveryInstructions"));
    // Center of an unknown region is not reported separately
    assert!(!fields.contains(&"destinationCenter"));
}

#[test]
fn test_center_must_belong_to_region() {
    let draft = document("sylhet", "Gazipur");
    let err = policy().price(&draft).unwrap_err();
    assert_eq!(fields(&err), vec!["destinationCenter"]);
    assert!(err.to_string().contains("not in region 'sylhet'"));
}

#[test]
fn test_custom_region_table() {
    let table = RegionTable::from_json(
        r#"[{"id": "north", "name": "North", "centers": ["Hill"]},
            {"id": "south", "name": "South", "centers": ["Port"]}]"#,
    )
    .unwrap();
    let policy = PricingPolicy::new(Arc::new(table));

    let draft = ParcelDraft::document("Letter", party("north", "Hill"), party("south", "Port"));
    assert_eq!(policy.price(&draft).unwrap().amount(), Money::from_major(80));

    // Built-in ids are unknown here
    let err = policy.price(&document("dhaka", "Tangail")).unwrap_err();
    assert!(fields(&err).contains(&"originRegion"));
}
