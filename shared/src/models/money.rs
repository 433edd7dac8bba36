//! Money and weight value types
//!
//! Both are stored as integers (minor currency units, tenths of a kilogram)
//! so pricing arithmetic never accumulates floating point drift.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};
use thiserror::Error;

/// Minor units per major currency unit
pub const MINOR_PER_MAJOR: i64 = 100;

/// Currency amount in minor units (cents / paisa)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Amount from minor units
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Amount from whole major units
    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    /// Amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Exact decimal value in major units (2 decimal places)
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

/// Weight rejection reasons
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WeightError {
    #[error("weight must be a finite number")]
    NotFinite,
    #[error("weight must be greater than 0")]
    NotPositive,
    #[error("weight accepts at most one decimal place")]
    TooPrecise,
    #[error("weight is out of range")]
    OutOfRange,
}

/// Parcel weight in tenths of a kilogram
///
/// Always strictly positive. Serialized as kilograms (`2.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight {
    tenths: u32,
}

impl Weight {
    /// Tolerance when checking that a kilogram value has one decimal place
    const PRECISION_EPSILON: f64 = 1e-6;

    /// Weight from tenths of a kilogram
    pub fn from_tenths(tenths: u32) -> Result<Self, WeightError> {
        if tenths == 0 {
            return Err(WeightError::NotPositive);
        }
        Ok(Self { tenths })
    }

    /// Weight from kilograms, accepting at most one decimal place
    pub fn from_kg(kg: f64) -> Result<Self, WeightError> {
        if !kg.is_finite() {
            return Err(WeightError::NotFinite);
        }
        if kg <= 0.0 {
            return Err(WeightError::NotPositive);
        }

        let scaled = kg * 10.0;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > Self::PRECISION_EPSILON {
            return Err(WeightError::TooPrecise);
        }
        if rounded > f64::from(u32::MAX) {
            return Err(WeightError::OutOfRange);
        }

        Self::from_tenths(rounded as u32)
    }

    pub const fn tenths(&self) -> u32 {
        self.tenths
    }

    pub fn kg(&self) -> f64 {
        f64::from(self.tenths) / 10.0
    }
}

impl TryFrom<f64> for Weight {
    type Error = WeightError;

    fn try_from(kg: f64) -> Result<Self, Self::Error> {
        Self::from_kg(kg)
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.kg()
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} kg", self.tenths / 10, self.tenths % 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_units() {
        assert_eq!(Money::from_major(60).minor(), 6000);
        assert_eq!(Money::from_major(110) + Money::from_minor(8000), Money::from_major(190));
        assert_eq!(Money::from_minor(400) * 5, Money::from_major(20));
        assert_eq!(Money::from_minor(27050).to_string(), "270.50");
        assert!(Money::from_minor(-1).is_negative());
    }

    #[test]
    fn test_weight_accepts_one_decimal() {
        assert_eq!(Weight::from_kg(3.0).unwrap().tenths(), 30);
        assert_eq!(Weight::from_kg(2.5).unwrap().tenths(), 25);
        // 0.3 * 10 is not exactly 3.0 in binary floating point
        assert_eq!(Weight::from_kg(0.3).unwrap().tenths(), 3);
        assert_eq!(Weight::from_kg(0.1).unwrap().to_string(), "0.1 kg");
    }

    #[test]
    fn test_weight_rejections() {
        assert_eq!(Weight::from_kg(0.0), Err(WeightError::NotPositive));
        assert_eq!(Weight::from_kg(-2.0), Err(WeightError::NotPositive));
        assert_eq!(Weight::from_kg(2.55), Err(WeightError::TooPrecise));
        assert_eq!(Weight::from_kg(0.05), Err(WeightError::TooPrecise));
        assert_eq!(Weight::from_kg(f64::NAN), Err(WeightError::NotFinite));
        assert_eq!(Weight::from_kg(1e12), Err(WeightError::OutOfRange));
        assert_eq!(Weight::from_tenths(0), Err(WeightError::NotPositive));
    }

    #[test]
    fn test_weight_serde_as_kg() {
        let weight: Weight = serde_json::from_str("4.5").unwrap();
        assert_eq!(weight.tenths(), 45);
        assert_eq!(serde_json::to_string(&weight).unwrap(), "4.5");
        assert!(serde_json::from_str::<Weight>("4.55").is_err());
    }
}
