//! Plywood Sheet Stock
//!
//! Crate panels are skinned with standard 4'x8' sheets. A sheet can be hung
//! with its long side vertical (standard) or horizontal (rotated).

use serde::{Deserialize, Serialize};

use crate::units::{Inches, SqIn};

/// Standard sheet width in inches (4 ft)
pub const SHEET_WIDTH_IN: f64 = 48.0;

/// Standard sheet height in inches (8 ft)
pub const SHEET_HEIGHT_IN: f64 = 96.0;

/// Full sheet area (4608 sq-in)
pub fn sheet_area() -> SqIn {
    Inches(SHEET_WIDTH_IN) * Inches(SHEET_HEIGHT_IN)
}

/// How a sheet is hung on a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SheetOrientation {
    /// 48" wide x 96" high
    #[default]
    Standard,
    /// 96" wide x 48" high
    Rotated,
}

impl SheetOrientation {
    /// Both orientations, standard first (standard wins exact ties)
    pub const ALL: [SheetOrientation; 2] = [SheetOrientation::Standard, SheetOrientation::Rotated];

    /// Sheet (width, height) in inches as hung in this orientation
    pub fn sheet_dimensions(&self) -> (f64, f64) {
        match self {
            SheetOrientation::Standard => (SHEET_WIDTH_IN, SHEET_HEIGHT_IN),
            SheetOrientation::Rotated => (SHEET_HEIGHT_IN, SHEET_WIDTH_IN),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SheetOrientation::Standard => "standard",
            SheetOrientation::Rotated => "rotated",
        }
    }
}

impl std::fmt::Display for SheetOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotated_swaps_dimensions() {
        assert_eq!(SheetOrientation::Standard.sheet_dimensions(), (48.0, 96.0));
        assert_eq!(SheetOrientation::Rotated.sheet_dimensions(), (96.0, 48.0));
    }

    #[test]
    fn test_sheet_area() {
        assert_eq!(sheet_area(), SqIn(4608.0));
    }
}
