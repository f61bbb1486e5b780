//! Standard Lumber Sizes
//!
//! Nominal lumber designations used for crate skids and floorboards, with
//! nominal-to-actual conversions per NDS/AWC standards.
//!
//! ## Nominal vs Actual Dimensions
//!
//! - 2x nominal = 1.5" actual
//! - 4x nominal = 3.5" actual
//! - 6x nominal = 5.5" actual
//! - 8x nominal = 7.25" actual

use serde::{Deserialize, Serialize};

/// Skid lumber designation
///
/// Serializes as the trade name (`"4x4"`), which is also the value written to
/// the `SKID_Lumber_Size` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LumberSize {
    /// 2x4 (1.5" x 3.5")
    #[serde(rename = "2x4")]
    L2x4,
    /// 2x6 (1.5" x 5.5")
    #[serde(rename = "2x6")]
    L2x6,
    /// 4x4 (3.5" x 3.5")
    #[serde(rename = "4x4")]
    L4x4,
    /// 4x6 (3.5" x 5.5")
    #[serde(rename = "4x6")]
    L4x6,
    /// 6x6 (5.5" x 5.5")
    #[serde(rename = "6x6")]
    L6x6,
    /// 8x8 (7.25" x 7.25")
    #[serde(rename = "8x8")]
    L8x8,
}

impl LumberSize {
    /// Get the actual dimensions (width, depth) in inches
    pub fn actual_dimensions(&self) -> (f64, f64) {
        match self {
            LumberSize::L2x4 => (1.5, 3.5),
            LumberSize::L2x6 => (1.5, 5.5),
            LumberSize::L4x4 => (3.5, 3.5),
            LumberSize::L4x6 => (3.5, 5.5),
            LumberSize::L6x6 => (5.5, 5.5),
            LumberSize::L8x8 => (7.25, 7.25),
        }
    }

    /// Get display name (e.g., "4x6")
    pub fn display_name(&self) -> &'static str {
        match self {
            LumberSize::L2x4 => "2x4",
            LumberSize::L2x6 => "2x6",
            LumberSize::L4x4 => "4x4",
            LumberSize::L4x6 => "4x6",
            LumberSize::L6x6 => "6x6",
            LumberSize::L8x8 => "8x8",
        }
    }
}

impl std::fmt::Display for LumberSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// FLOORBOARD STOCK
// ============================================================================

/// Actual face widths of 2x floorboard stock, widest first.
///
/// 2x12, 2x10, 2x8, 2x6, 2x4, 2x3, 2x2.
pub const FLOORBOARD_WIDTHS_IN: [f64; 7] = [11.25, 9.25, 7.25, 5.5, 3.5, 2.5, 1.5];

/// Board width used when nothing in the inventory fits the remaining gap
pub const FLOORBOARD_FALLBACK_WIDTH_IN: f64 = 1.5;

/// Widest stock board that fits in `remaining_in`, or the fallback width.
pub fn widest_floorboard_within(remaining_in: f64) -> f64 {
    FLOORBOARD_WIDTHS_IN
        .iter()
        .copied()
        .find(|w| *w <= remaining_in)
        .unwrap_or(FLOORBOARD_FALLBACK_WIDTH_IN)
}
