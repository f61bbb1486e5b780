//! # Crate Inputs
//!
//! The single immutable record every design is computed from. Inputs are
//! validated once, up front; every out-of-range field is reported together.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "product_length": 96.0,
//!   "product_width": 48.0,
//!   "product_height": 30.0,
//!   "product_weight": 500.0,
//!   "clearance_all_sides": 2.0,
//!   "clearance_top": 2.0,
//!   "panel_thickness": 0.25,
//!   "cleat_thickness": 0.75,
//!   "cleat_member_width": 3.5
//! }
//! ```
//!
//! The camelCase names used by the web form (`productLength`, ...) are
//! accepted as aliases.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult, FieldViolation};

/// Inclusive range for one input field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLimit {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FieldLimit {
    const fn new(field: &'static str, min: f64, max: f64) -> Self {
        FieldLimit { field, min, max }
    }

    /// NaN and infinities never satisfy a limit
    pub fn accepts(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// Allowed ranges, in field declaration order.
pub const INPUT_LIMITS: [FieldLimit; 9] = [
    FieldLimit::new("product_length", 12.0, 130.0),
    FieldLimit::new("product_width", 12.0, 130.0),
    FieldLimit::new("product_height", 6.0, 120.0),
    FieldLimit::new("product_weight", 50.0, 10_000.0),
    FieldLimit::new("clearance_all_sides", 0.5, 6.0),
    FieldLimit::new("clearance_top", 0.5, 6.0),
    FieldLimit::new("panel_thickness", 0.25, 0.75),
    FieldLimit::new("cleat_thickness", 0.75, 2.0),
    FieldLimit::new("cleat_member_width", 1.5, 5.5),
];

/// Product envelope, load, and material choices for one crate.
///
/// All lengths are inches, weight is pounds. Fields missing from a
/// document take their [`Default`] values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrateInputs {
    /// Product length (in)
    #[serde(alias = "productLength")]
    pub product_length: f64,

    /// Product width (in)
    #[serde(alias = "productWidth")]
    pub product_width: f64,

    /// Product height (in)
    #[serde(alias = "productHeight")]
    pub product_height: f64,

    /// Product weight (lb)
    #[serde(alias = "productWeight")]
    pub product_weight: f64,

    /// Clearance added on every side, and once under the product (in)
    #[serde(alias = "clearanceAllSides")]
    pub clearance_all_sides: f64,

    /// Additional clearance above the product (in)
    #[serde(alias = "clearanceTop")]
    pub clearance_top: f64,

    /// Plywood panel thickness (in)
    #[serde(alias = "panelThickness")]
    pub panel_thickness: f64,

    /// Cleat lumber thickness (in)
    #[serde(alias = "cleatThickness")]
    pub cleat_thickness: f64,

    /// Cleat lumber face width (in)
    #[serde(alias = "cleatMemberWidth")]
    pub cleat_member_width: f64,
}

impl Default for CrateInputs {
    /// A 96" x 48" x 30" pallet-sized product at 500 lb
    fn default() -> Self {
        CrateInputs {
            product_length: 96.0,
            product_width: 48.0,
            product_height: 30.0,
            product_weight: 500.0,
            clearance_all_sides: 2.0,
            clearance_top: 2.0,
            panel_thickness: 0.25,
            cleat_thickness: 0.75,
            cleat_member_width: 3.5,
        }
    }
}

impl CrateInputs {
    /// Field values paired with their names, in [`INPUT_LIMITS`] order.
    pub fn fields(&self) -> [(&'static str, f64); 9] {
        [
            ("product_length", self.product_length),
            ("product_width", self.product_width),
            ("product_height", self.product_height),
            ("product_weight", self.product_weight),
            ("clearance_all_sides", self.clearance_all_sides),
            ("clearance_top", self.clearance_top),
            ("panel_thickness", self.panel_thickness),
            ("cleat_thickness", self.cleat_thickness),
            ("cleat_member_width", self.cleat_member_width),
        ]
    }

    /// Validate every field against [`INPUT_LIMITS`].
    ///
    /// Never stops at the first failure: the returned error lists every
    /// out-of-range field.
    pub fn validate(&self) -> CalcResult<()> {
        let violations: Vec<FieldViolation> = self
            .fields()
            .iter()
            .zip(INPUT_LIMITS.iter())
            .filter(|((_, value), limit)| !limit.accepts(*value))
            .map(|((field, value), limit)| {
                FieldViolation::out_of_range(*field, *value, limit.min, limit.max)
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(CalcError::validation_failed(violations))
        }
    }

    /// Set a field by name. Used by the CLI to layer flag overrides.
    pub fn with_field(mut self, field: &str, value: f64) -> CalcResult<Self> {
        let slot = match field {
            "product_length" => &mut self.product_length,
            "product_width" => &mut self.product_width,
            "product_height" => &mut self.product_height,
            "product_weight" => &mut self.product_weight,
            "clearance_all_sides" => &mut self.clearance_all_sides,
            "clearance_top" => &mut self.clearance_top,
            "panel_thickness" => &mut self.panel_thickness,
            "cleat_thickness" => &mut self.cleat_thickness,
            "cleat_member_width" => &mut self.cleat_member_width,
            other => {
                return Err(CalcError::invalid_input(
                    other,
                    value.to_string(),
                    "Unknown input field",
                ))
            }
        };
        *slot = value;
        Ok(self)
    }
}

/// Canned input sets for quick verification runs.
pub fn quick_test_cases() -> [CrateInputs; 3] {
    [
        CrateInputs {
            product_length: 20.0,
            product_width: 20.0,
            product_height: 100.0,
            product_weight: 1000.0,
            clearance_all_sides: 1.0,
            clearance_top: 1.0,
            panel_thickness: 0.25,
            cleat_thickness: 0.75,
            cleat_member_width: 1.5,
        },
        CrateInputs::default(),
        CrateInputs {
            product_length: 48.0,
            product_width: 48.0,
            product_height: 48.0,
            product_weight: 300.0,
            clearance_all_sides: 1.0,
            clearance_top: 1.0,
            panel_thickness: 0.25,
            cleat_thickness: 0.75,
            cleat_member_width: 3.5,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs_are_valid() {
        assert!(CrateInputs::default().validate().is_ok());
        for case in quick_test_cases() {
            assert!(case.validate().is_ok());
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let inputs = CrateInputs {
            product_length: 12.0,
            product_width: 130.0,
            product_height: 6.0,
            product_weight: 10_000.0,
            clearance_all_sides: 0.5,
            clearance_top: 6.0,
            panel_thickness: 0.75,
            cleat_thickness: 0.75,
            cleat_member_width: 5.5,
        };
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_all_violations_reported() {
        let inputs = CrateInputs {
            product_length: 5.0,
            product_weight: 20_000.0,
            cleat_member_width: 6.0,
            ..CrateInputs::default()
        };
        let err = inputs.validate().unwrap_err();
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["product_length", "product_weight", "cleat_member_width"]);
    }

    #[test]
    fn test_non_finite_rejected() {
        let inputs = CrateInputs {
            product_height: f64::NAN,
            clearance_top: f64::INFINITY,
            ..CrateInputs::default()
        };
        let err = inputs.validate().unwrap_err();
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_camel_case_aliases() {
        let json = r#"{
            "productLength": 40, "productWidth": 30, "productHeight": 20,
            "productWeight": 800, "clearanceAllSides": 1, "clearanceTop": 1.5,
            "panelThickness": 0.5, "cleatThickness": 1.5, "cleatMemberWidth": 3.5
        }"#;
        let inputs: CrateInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.product_length, 40.0);
        assert_eq!(inputs.clearance_top, 1.5);
    }

    #[test]
    fn test_with_field() {
        let inputs = CrateInputs::default().with_field("product_weight", 2500.0).unwrap();
        assert_eq!(inputs.product_weight, 2500.0);
        assert!(CrateInputs::default().with_field("color", 1.0).is_err());
    }
}
