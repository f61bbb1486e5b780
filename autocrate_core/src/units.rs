//! # Unit Types
//!
//! Crate geometry is computed in inches. Lumber is bought by the linear foot
//! and plywood is tallied in square inches.
//!
//! ```rust
//! use autocrate_core::units::{Feet, Inches, SqIn};
//!
//! let skid = Inches(96.0);
//! assert_eq!(Feet::from(skid).value(), 8.0);
//! assert_eq!(Inches(48.0) * Inches(96.0), SqIn(4608.0));
//! ```

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Mul;

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Area in square inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqIn(pub f64);

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

impl Mul for Inches {
    type Output = SqIn;
    fn mul(self, rhs: Self) -> Self::Output {
        SqIn(self.0 * rhs.0)
    }
}

impl Sum for Feet {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Feet(iter.map(|v| v.0).sum())
    }
}

macro_rules! impl_value {
    ($($type:ty),*) => {
        $(
            impl $type {
                /// Raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )*
    };
}

impl_value!(Feet, Inches, SqIn);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_to_feet() {
        let feet: Feet = Inches(30.0).into();
        assert_eq!(feet.0, 2.5);
    }

    #[test]
    fn test_sum_of_lengths() {
        let total: Feet = [Feet(1.5), Feet(2.0), Feet(0.5)].into_iter().sum();
        assert_eq!(total.value(), 4.0);
    }

    #[test]
    fn test_serialization_is_transparent() {
        let json = serde_json::to_string(&Inches(11.25)).unwrap();
        assert_eq!(json, "11.25");
    }
}
