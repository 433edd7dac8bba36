//! Parcel draft model
//!
//! The draft is owned by the caller and freely mutable until submission.
//! It keeps raw user input (weight as entered, free-text fields) so that
//! validation can report every violated constraint at once.

use serde::{Deserialize, Serialize};

/// Parcel kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParcelKind {
    /// Documents, priced flat regardless of weight
    #[serde(rename = "document")]
    Document,
    /// Anything else, priced by weight
    #[serde(rename = "non-document")]
    NonDocument,
}

impl ParcelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::NonDocument => "non-document",
        }
    }
}

/// One side of the shipment (sender or receiver)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartyDetails {
    pub name: String,
    pub contact: String,
    /// Region id from the region table
    pub region: String,
    /// Service center id, must belong to `region`
    pub center: String,
    pub address: String,
    /// Pickup instructions (sender) or delivery instructions (receiver)
    pub instructions: String,
}

/// Unsubmitted parcel description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParcelDraft {
    pub kind: Option<ParcelKind>,
    pub title: String,
    /// Required iff `kind` is `NonDocument`
    pub weight_kg: Option<f64>,
    pub sender: PartyDetails,
    pub receiver: PartyDetails,
}

impl ParcelDraft {
    /// Document draft
    pub fn document(title: impl Into<String>, sender: PartyDetails, receiver: PartyDetails) -> Self {
        Self {
            kind: Some(ParcelKind::Document),
            title: title.into(),
            weight_kg: None,
            sender,
            receiver,
        }
    }

    /// Non-document draft with a weight in kilograms
    pub fn non_document(
        title: impl Into<String>,
        weight_kg: f64,
        sender: PartyDetails,
        receiver: PartyDetails,
    ) -> Self {
        Self {
            kind: Some(ParcelKind::NonDocument),
            title: title.into(),
            weight_kg: Some(weight_kg),
            sender,
            receiver,
        }
    }

    pub fn origin_region(&self) -> &str {
        &self.sender.region
    }

    pub fn destination_region(&self) -> &str {
        &self.receiver.region
    }

    pub fn origin_center(&self) -> &str {
        &self.sender.center
    }

    pub fn destination_center(&self) -> &str {
        &self.receiver.center
    }

    /// Origin and destination are the same administrative region
    pub fn is_same_region(&self) -> bool {
        self.sender.region == self.receiver.region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(region: &str, center: &str) -> PartyDetails {
        PartyDetails {
            name: "Rahim".to_string(),
            contact: "01700000000".to_string(),
            region: region.to_string(),
            center: center.to_string(),
            address: "House 1, Road 2".to_string(),
            instructions: "Call first".to_string(),
        }
    }

    #[test]
    fn test_same_region() {
        let draft = ParcelDraft::document("Papers", party("dhaka", "Gazipur"), party("dhaka", "Tangail"));
        assert!(draft.is_same_region());
        assert_eq!(draft.origin_center(), "Gazipur");
        assert_eq!(draft.destination_center(), "Tangail");

        let draft = ParcelDraft::non_document("Box", 2.0, party("dhaka", "Dhaka"), party("sylhet", "Sylhet"));
        assert!(!draft.is_same_region());
        assert_eq!(draft.destination_region(), "sylhet");
    }

    #[test]
    fn test_kind_serde() {
        assert_eq!(serde_json::to_string(&ParcelKind::NonDocument).unwrap(), "\"non-document\"");
        let kind: ParcelKind = serde_json::from_str("\"document\"").unwrap();
        assert_eq!(kind, ParcelKind::Document);
        assert_eq!(kind.as_str(), "document");
    }

    #[test]
    fn test_draft_deserialize_partial() {
        let json = r#"{"kind":"non-document","title":"Shoes","sender":{"region":"dhaka"}}"#;
        let draft: ParcelDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.kind, Some(ParcelKind::NonDocument));
        assert!(draft.weight_kg.is_none());
        assert_eq!(draft.sender.region, "dhaka");
        assert!(draft.receiver.name.is_empty());
    }
}
