//! # Material Summary
//!
//! Rolls a finished design up into a bill of materials: plywood sheets and
//! waste, lumber linear footage, fastener counts, and a rough cost.
//!
//! ## Cost model
//!
//! ```text
//! materials = sheets × sheet_price + cleat_ft × cleat_price_per_ft + klimps × klimp_price
//! labor     = materials × labor_ratio
//! total     = materials + labor
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::floorboards::FloorboardLayout;
use crate::calculations::klimps::KlimpLayout;
use crate::calculations::panels::PanelResult;
use crate::calculations::skids::SkidResult;
use crate::materials::plywood::sheet_area;
use crate::units::{Feet, Inches};

/// Screws per klimp
pub const SCREWS_PER_KLIMP: u32 = 4;

/// Nails per linear foot of cleat
pub const NAILS_PER_CLEAT_FOOT: f64 = 8.0;

/// Unit prices used by the cost estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRates {
    /// Per plywood sheet
    pub sheet_price: f64,
    /// Per linear foot of cleat
    pub cleat_price_per_ft: f64,
    /// Per klimp
    pub klimp_price: f64,
    /// Labor as a fraction of material cost
    pub labor_ratio: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        CostRates {
            sheet_price: 50.0,
            cleat_price_per_ft: 2.0,
            klimp_price: 5.0,
            labor_ratio: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlywoodSummary {
    pub sheet_count: u32,
    /// Sheets × 4608 (sq-in)
    pub total_area: f64,
    pub waste_percentage: f64,
}

/// Linear footage by member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumberSummary {
    pub cleat_linear_feet: f64,
    pub skid_linear_feet: f64,
    pub floorboard_linear_feet: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardwareSummary {
    pub klimps: u32,
    pub screws: u32,
    pub nails: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub materials: f64,
    pub labor: f64,
    pub total: f64,
}

/// Bill of materials for one design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialSummary {
    pub plywood: PlywoodSummary,
    pub lumber: LumberSummary,
    pub hardware: HardwareSummary,
    pub cost: CostEstimate,
}

fn linear_feet(inches: f64) -> f64 {
    Feet::from(Inches(inches)).value()
}

pub fn plywood_summary(panels: &[PanelResult]) -> PlywoodSummary {
    let sheet_count: u32 = panels.iter().map(|p| p.layout.total_sheets).sum();
    let total_area = f64::from(sheet_count) * sheet_area().value();
    let used_area: f64 = panels.iter().map(|p| p.width * p.height).sum();

    let waste_percentage = if total_area > 0.0 {
        (total_area - used_area) / total_area * 100.0
    } else {
        0.0
    };

    PlywoodSummary {
        sheet_count,
        total_area,
        waste_percentage,
    }
}

pub fn lumber_summary(
    panels: &[PanelResult],
    skids: &SkidResult,
    floorboards: &FloorboardLayout,
) -> LumberSummary {
    let cleat_feet: Feet = panels
        .iter()
        .map(|p| Feet::from(Inches(p.cleat_length())))
        .sum();
    LumberSummary {
        cleat_linear_feet: cleat_feet.value(),
        skid_linear_feet: linear_feet(f64::from(skids.count) * skids.length),
        floorboard_linear_feet: linear_feet(floorboards.total_board_length()),
    }
}

pub fn hardware_summary(klimps: &KlimpLayout, cleat_linear_feet: f64) -> HardwareSummary {
    let active = klimps.active_count() as u32;
    HardwareSummary {
        klimps: active,
        screws: active * SCREWS_PER_KLIMP,
        nails: (cleat_linear_feet * NAILS_PER_CLEAT_FOOT).round() as u32,
    }
}

pub fn cost_estimate(
    plywood: &PlywoodSummary,
    lumber: &LumberSummary,
    hardware: &HardwareSummary,
    rates: &CostRates,
) -> CostEstimate {
    let materials = f64::from(plywood.sheet_count) * rates.sheet_price
        + lumber.cleat_linear_feet * rates.cleat_price_per_ft
        + f64::from(hardware.klimps) * rates.klimp_price;
    let labor = materials * rates.labor_ratio;
    CostEstimate {
        materials,
        labor,
        total: materials + labor,
    }
}

/// Summarize a design's materials.
pub fn calculate(
    panels: &[PanelResult],
    skids: &SkidResult,
    floorboards: &FloorboardLayout,
    klimps: &KlimpLayout,
    rates: &CostRates,
) -> MaterialSummary {
    let plywood = plywood_summary(panels);
    let lumber = lumber_summary(panels, skids, floorboards);
    let hardware = hardware_summary(klimps, lumber.cleat_linear_feet);
    let cost = cost_estimate(&plywood, &lumber, &hardware, rates);

    tracing::debug!(
        sheets = plywood.sheet_count,
        waste_pct = plywood.waste_percentage,
        cleat_ft = lumber.cleat_linear_feet,
        total_cost = cost.total,
        "materials summarized"
    );

    MaterialSummary {
        plywood,
        lumber,
        hardware,
        cost,
    }
}
