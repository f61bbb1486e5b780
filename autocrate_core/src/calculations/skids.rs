//! # Skid Sizing
//!
//! Selects base-runner lumber from the product weight and solves for the
//! number of skids needed to keep center spacing within the lumber's limit.
//!
//! ## Weight Table
//!
//! | Weight (lb) | Lumber | Max spacing (in) |
//! |-------------|--------|------------------|
//! | <= 500      | 2x4    | 48               |
//! | <= 1000     | 2x6    | 36               |
//! | <= 2000     | 4x4    | 30               |
//! | <= 4000     | 4x6    | 24               |
//! | <= 6000     | 6x6    | 20               |
//! | > 6000      | 8x8    | 16               |
//!
//! Skids are edge-aligned: the first sits at 0 and the last at the far edge,
//! so spacing = width / (count - 1). The count is capped at [`MAX_SKID_COUNT`];
//! a crate too wide to meet the spacing limit at the cap keeps the excess.
//!
//! ## Example
//!
//! ```rust
//! use autocrate_core::calculations::skids::calculate;
//! use autocrate_core::materials::LumberSize;
//!
//! let skids = calculate(60.0, 48.0, 1500.0);
//! assert_eq!(skids.lumber_size, LumberSize::L4x4);
//! assert_eq!(skids.count, 3);
//! assert_eq!(skids.spacing, 24.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::materials::LumberSize;

/// Minimum skids under any crate
pub const MIN_SKID_COUNT: u32 = 2;

/// Upper bound on the spacing solver
pub const MAX_SKID_COUNT: u32 = 10;

/// Lumber choice for a weight class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkidLumberProperties {
    pub lumber_size: LumberSize,
    /// Maximum center-to-center spacing (in)
    pub max_spacing: f64,
}

/// Weight upper bound (lb, inclusive) -> lumber and max spacing
const WEIGHT_TABLE: [(f64, LumberSize, f64); 5] = [
    (500.0, LumberSize::L2x4, 48.0),
    (1000.0, LumberSize::L2x6, 36.0),
    (2000.0, LumberSize::L4x4, 30.0),
    (4000.0, LumberSize::L4x6, 24.0),
    (6000.0, LumberSize::L6x6, 20.0),
];

/// Heaviest class, used above the last table bound
const HEAVY_CLASS: (LumberSize, f64) = (LumberSize::L8x8, 16.0);

/// Look up skid lumber and its maximum spacing for a product weight.
pub fn lumber_properties(product_weight_lb: f64) -> SkidLumberProperties {
    let (lumber_size, max_spacing) = WEIGHT_TABLE
        .iter()
        .find(|(bound, _, _)| product_weight_lb <= *bound)
        .map(|(_, size, spacing)| (*size, *spacing))
        .unwrap_or(HEAVY_CLASS);

    SkidLumberProperties {
        lumber_size,
        max_spacing,
    }
}

/// Skid count and spacing for a crate width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkidLayout {
    pub count: u32,
    /// Center-to-center spacing (in)
    pub spacing: f64,
    /// Offset of the first skid from the crate edge (in)
    pub first_position: f64,
}

/// Add skids until spacing is within `max_spacing` or the count cap is hit.
pub fn solve_layout(crate_width: f64, max_spacing: f64) -> SkidLayout {
    let mut count = MIN_SKID_COUNT;
    let mut spacing = crate_width / f64::from(count - 1);

    while spacing > max_spacing && count < MAX_SKID_COUNT {
        count += 1;
        spacing = crate_width / f64::from(count - 1);
    }

    if spacing > max_spacing {
        tracing::warn!(
            crate_width,
            max_spacing,
            spacing,
            "skid count capped at {}; spacing exceeds lumber limit",
            MAX_SKID_COUNT
        );
    }

    SkidLayout {
        count,
        spacing,
        first_position: 0.0,
    }
}

/// Complete skid design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "lumber_size": "4x4",
///   "count": 3,
///   "spacing": 24.0,
///   "length": 60.0,
///   "first_position": 0.0,
///   "max_spacing": 30.0,
///   "lumber_width": 3.5,
///   "lumber_depth": 3.5
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkidResult {
    pub lumber_size: LumberSize,
    /// Number of skids (always >= 2)
    pub count: u32,
    /// Center-to-center spacing (in)
    pub spacing: f64,
    /// Skid length, equal to the crate length (in)
    pub length: f64,
    /// First skid offset from the crate edge (in)
    pub first_position: f64,
    /// Table maximum spacing for this weight class (in)
    pub max_spacing: f64,
    /// Actual lumber width (in)
    pub lumber_width: f64,
    /// Actual lumber depth (in)
    pub lumber_depth: f64,
}

impl SkidResult {
    /// True when the count cap forced spacing above the table maximum
    pub fn exceeds_max_spacing(&self) -> bool {
        self.spacing > self.max_spacing
    }

    /// Design warnings for this skid layout
    pub fn warnings(&self, product_weight_lb: f64) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.spacing > 48.0 {
            warnings.push(format!(
                "Skid spacing ({:.1}\") exceeds recommended maximum of 48\"",
                self.spacing
            ));
        }
        if self.exceeds_max_spacing() {
            warnings.push(format!(
                "Skid spacing exceeds recommended maximum for {} lb load",
                product_weight_lb
            ));
        }
        warnings
    }
}

/// Size and lay out skids for a crate.
///
/// # Arguments
///
/// * `crate_length` - Skid run length (in)
/// * `crate_width` - Width spanned by the skids (in)
/// * `product_weight_lb` - Product weight (lb)
pub fn calculate(crate_length: f64, crate_width: f64, product_weight_lb: f64) -> SkidResult {
    let props = lumber_properties(product_weight_lb);
    let layout = solve_layout(crate_width, props.max_spacing);
    let (lumber_width, lumber_depth) = props.lumber_size.actual_dimensions();

    tracing::debug!(
        lumber = %props.lumber_size,
        count = layout.count,
        spacing = layout.spacing,
        "skid layout solved"
    );

    SkidResult {
        lumber_size: props.lumber_size,
        count: layout.count,
        spacing: layout.spacing,
        length: crate_length,
        first_position: layout.first_position,
        max_spacing: props.max_spacing,
        lumber_width,
        lumber_depth,
    }
}
