//! # Plywood Layout Optimization
//!
//! Tiles a rectangular panel face with standard 48" x 96" sheets.
//!
//! Two tilings are evaluated, one per [`SheetOrientation`]. The winner is
//! picked by, in order:
//!
//! 1. fewer total sheets
//! 2. fewer horizontal splices (horizontal seams are structurally weaker)
//! 3. less waste, when the waste areas differ by more than 0.1 sq-in
//! 4. standard orientation
//!
//! Sheets are placed row-major from the panel origin (bottom-left). Sheets in
//! the last row and column are clipped to the panel, so the sheet set always
//! partitions the panel rectangle exactly.
//!
//! ## Example
//!
//! ```rust
//! use autocrate_core::calculations::plywood_layout::calculate;
//! use autocrate_core::materials::SheetOrientation;
//!
//! let layout = calculate(100.0, 50.0);
//! assert_eq!(layout.total_sheets, 3);
//! assert_eq!(layout.orientation, SheetOrientation::Standard);
//! ```

use serde::{Deserialize, Serialize};

use crate::materials::plywood::sheet_area;
use crate::materials::SheetOrientation;

/// Waste areas closer than this (sq-in) are treated as equal
pub const WASTE_TIE_TOLERANCE_IN2: f64 = 0.1;

/// Waste above this percentage is flagged
pub const HIGH_WASTE_PERCENT: f64 = 50.0;

/// More horizontal splices than this are flagged
pub const MAX_RECOMMENDED_HORIZONTAL_SPLICES: usize = 2;

/// Clipped pieces narrower or shorter than this (in) are flagged
pub const MIN_PIECE_SIZE_IN: f64 = 6.0;

/// Sheet counts for one candidate orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutOption {
    pub orientation: SheetOrientation,
    pub sheets_wide: u32,
    pub sheets_high: u32,
    pub total_sheets: u32,
    pub vertical_splices: u32,
    pub horizontal_splices: u32,
    /// Full-sheet coverage minus panel area (sq-in)
    pub waste_area: f64,
}

/// Count sheets and splices for one orientation.
pub fn evaluate(panel_width: f64, panel_height: f64, orientation: SheetOrientation) -> LayoutOption {
    let (sheet_w, sheet_h) = orientation.sheet_dimensions();

    let sheets_wide = (panel_width / sheet_w).ceil() as u32;
    let sheets_high = (panel_height / sheet_h).ceil() as u32;

    let covered_area = f64::from(sheets_wide) * sheet_w * f64::from(sheets_high) * sheet_h;

    LayoutOption {
        orientation,
        sheets_wide,
        sheets_high,
        total_sheets: sheets_wide * sheets_high,
        vertical_splices: sheets_wide.saturating_sub(1),
        horizontal_splices: sheets_high.saturating_sub(1),
        waste_area: covered_area - panel_width * panel_height,
    }
}

/// Pick between the standard and rotated candidates.
pub fn choose(standard: LayoutOption, rotated: LayoutOption) -> LayoutOption {
    if standard.total_sheets != rotated.total_sheets {
        return if standard.total_sheets < rotated.total_sheets {
            standard
        } else {
            rotated
        };
    }

    if standard.horizontal_splices != rotated.horizontal_splices {
        return if standard.horizontal_splices < rotated.horizontal_splices {
            standard
        } else {
            rotated
        };
    }

    if (standard.waste_area - rotated.waste_area).abs() > WASTE_TIE_TOLERANCE_IN2 {
        return if standard.waste_area < rotated.waste_area {
            standard
        } else {
            rotated
        };
    }

    standard
}

/// One (possibly clipped) sheet placed on a panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlywoodSheet {
    /// 1-based, row-major
    pub id: u32,
    pub width: f64,
    pub height: f64,
    /// Offset from the panel's left edge (in)
    pub position_x: f64,
    /// Offset from the panel's bottom edge (in)
    pub position_y: f64,
    pub orientation: SheetOrientation,
}

impl PlywoodSheet {
    pub fn area_in2(&self) -> f64 {
        self.width * self.height
    }

    /// Right edge offset (in)
    pub fn right_edge(&self) -> f64 {
        self.position_x + self.width
    }
}

/// Sheet layout for one panel face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlywoodLayout {
    pub panel_width: f64,
    pub panel_height: f64,
    pub orientation: SheetOrientation,
    pub sheets_wide: u32,
    pub sheets_high: u32,
    pub total_sheets: u32,
    pub sheets: Vec<PlywoodSheet>,
    /// Area of the full sheets consumed (sq-in)
    pub covered_area: f64,
    /// (covered - panel) / covered x 100
    pub waste_percentage: f64,
}

impl PlywoodLayout {
    /// Panel face area (sq-in)
    pub fn panel_area(&self) -> f64 {
        self.panel_width * self.panel_height
    }

    /// Sum of the clipped sheet areas; equals the panel area
    pub fn placed_area(&self) -> f64 {
        self.sheets.iter().map(PlywoodSheet::area_in2).sum()
    }

    /// Column seam X-offsets
    pub fn vertical_splices(&self) -> Vec<f64> {
        let (sheet_w, _) = self.orientation.sheet_dimensions();
        (1..self.sheets_wide).map(|col| f64::from(col) * sheet_w).collect()
    }

    /// Row seam Y-offsets
    pub fn horizontal_splices(&self) -> Vec<f64> {
        let (_, sheet_h) = self.orientation.sheet_dimensions();
        (1..self.sheets_high).map(|row| f64::from(row) * sheet_h).collect()
    }

    /// Practical-constraint warnings (waste, seams, slivers)
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.waste_percentage > HIGH_WASTE_PERCENT {
            warnings.push(format!("High material waste: {:.1}%", self.waste_percentage));
        }

        let horizontal = self.horizontal_splices().len();
        if horizontal > MAX_RECOMMENDED_HORIZONTAL_SPLICES {
            warnings.push(format!(
                "Many horizontal splices ({}) may reduce strength",
                horizontal
            ));
        }

        for sheet in &self.sheets {
            if sheet.width < MIN_PIECE_SIZE_IN || sheet.height < MIN_PIECE_SIZE_IN {
                warnings.push(format!(
                    "Small edge piece: {:.2}\" x {:.2}\"",
                    sheet.width, sheet.height
                ));
            }
        }

        warnings
    }
}

/// Place sheets row-major, clipping the last row and column.
fn place_sheets(panel_width: f64, panel_height: f64, option: &LayoutOption) -> Vec<PlywoodSheet> {
    let (sheet_w, sheet_h) = option.orientation.sheet_dimensions();
    let mut sheets = Vec::with_capacity(option.total_sheets as usize);

    for row in 0..option.sheets_high {
        for col in 0..option.sheets_wide {
            let position_x = f64::from(col) * sheet_w;
            let position_y = f64::from(row) * sheet_h;
            sheets.push(PlywoodSheet {
                id: row * option.sheets_wide + col + 1,
                width: sheet_w.min(panel_width - position_x),
                height: sheet_h.min(panel_height - position_y),
                position_x,
                position_y,
                orientation: option.orientation,
            });
        }
    }

    sheets
}

/// Choose and place the sheet layout for a panel face.
pub fn calculate(panel_width: f64, panel_height: f64) -> PlywoodLayout {
    let [standard, rotated] =
        SheetOrientation::ALL.map(|orientation| evaluate(panel_width, panel_height, orientation));
    let selected = choose(standard, rotated);

    let sheets = place_sheets(panel_width, panel_height, &selected);
    let covered_area = f64::from(selected.total_sheets) * sheet_area().value();
    let waste_percentage = if covered_area > 0.0 {
        (covered_area - panel_width * panel_height) / covered_area * 100.0
    } else {
        0.0
    };

    PlywoodLayout {
        panel_width,
        panel_height,
        orientation: selected.orientation,
        sheets_wide: selected.sheets_wide,
        sheets_high: selected.sheets_high,
        total_sheets: selected.total_sheets,
        sheets,
        covered_area,
        waste_percentage,
    }
}

/// Plywood efficiency across several panel layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialEfficiency {
    pub total_sheets: u32,
    /// Offcut area across all layouts (sq-in)
    pub total_waste_area: f64,
    /// Used / covered x 100
    pub average_efficiency: f64,
    /// Sheet cost at `sheet_price` per sheet
    pub cost_estimate: f64,
}

/// Roll up sheet usage for a set of layouts.
pub fn material_efficiency<'a>(
    layouts: impl IntoIterator<Item = &'a PlywoodLayout>,
    sheet_price: f64,
) -> MaterialEfficiency {
    let mut total_sheets = 0;
    let mut covered = 0.0;
    let mut waste = 0.0;

    for layout in layouts {
        total_sheets += layout.total_sheets;
        covered += layout.covered_area;
        waste += layout.covered_area * layout.waste_percentage / 100.0;
    }

    let average_efficiency = if covered > 0.0 {
        (covered - waste) / covered * 100.0
    } else {
        0.0
    };

    MaterialEfficiency {
        total_sheets,
        total_waste_area: waste,
        average_efficiency,
        cost_estimate: f64::from(total_sheets) * sheet_price,
    }
}
