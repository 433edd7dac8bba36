//! Delivery cost calculation
//!
//! Pure arithmetic in minor currency units and tenths of a kilogram.

use shared::{Money, ParcelKind, Weight};

/// Flat document rate inside one region
pub const DOCUMENT_SAME_REGION: Money = Money::from_major(60);
/// Flat document rate across regions
pub const DOCUMENT_CROSS_REGION: Money = Money::from_major(80);
/// Non-document base rate inside one region (covers the included weight)
pub const PARCEL_SAME_REGION: Money = Money::from_major(110);
/// Non-document base rate across regions (covers the included weight)
pub const PARCEL_CROSS_REGION: Money = Money::from_major(150);
/// Weight covered by the base rate, in tenths of a kilogram (3.0 kg)
pub const INCLUDED_WEIGHT_TENTHS: u32 = 30;
/// Charge per extra kilogram above the included weight
pub const EXTRA_PER_KG: Money = Money::from_major(40);
/// Flat surcharge for overweight parcels leaving their region
pub const CROSS_REGION_OVERWEIGHT_SURCHARGE: Money = Money::from_major(40);

/// Delivery cost for a parcel
///
/// `weight` is ignored for documents. A non-document without a weight is
/// priced at its base rate; callers validate presence beforehand.
pub fn calculate_cost(kind: ParcelKind, weight: Option<Weight>, same_region: bool) -> Money {
    match kind {
        ParcelKind::Document => {
            if same_region {
                DOCUMENT_SAME_REGION
            } else {
                DOCUMENT_CROSS_REGION
            }
        }
        ParcelKind::NonDocument => {
            let base = if same_region {
                PARCEL_SAME_REGION
            } else {
                PARCEL_CROSS_REGION
            };

            let tenths = weight.map(|w| w.tenths()).unwrap_or(0);
            if tenths <= INCLUDED_WEIGHT_TENTHS {
                return base;
            }

            // 40 per kg is 4 per tenth; exact in minor units
            let extra_tenths = i64::from(tenths - INCLUDED_WEIGHT_TENTHS);
            let extra = Money::from_minor(EXTRA_PER_KG.minor() / 10) * extra_tenths;

            if same_region {
                base + extra
            } else {
                base + extra + CROSS_REGION_OVERWEIGHT_SURCHARGE
            }
        }
    }
}
