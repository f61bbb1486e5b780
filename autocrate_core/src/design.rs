//! # Crate Design
//!
//! The single entry point: validate a [`CrateInputs`], run every stage once,
//! and return the finished [`CrateDesign`].
//!
//! ```text
//! inputs ─► validate ─► dimensions ─┬─► skids
//!                                   ├─► panels ×5 ─► klimps
//!                                   ├─► floorboards
//!                                   └─► summary, efficiency, expressions
//! ```
//!
//! ## Example
//!
//! ```rust
//! use autocrate_core::{compute_design, CrateInputs};
//!
//! let design = compute_design(&CrateInputs::default()).unwrap();
//! assert_eq!(design.klimps.slots().len(), 30);
//! assert!(design.skids.count >= 2);
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::calculations::dimensions::{self, PanelDimensions, PanelType};
use crate::calculations::floorboards::{self, FloorboardLayout};
use crate::calculations::klimps::{self, KlimpGeometry, KlimpLayout};
use crate::calculations::panels::{self, PanelResult};
use crate::calculations::plywood_layout::{self, MaterialEfficiency};
use crate::calculations::skids::{self, SkidResult};
use crate::calculations::summary::{self, CostRates, MaterialSummary};
use crate::errors::CalcResult;
use crate::expressions::{self, ExpressionSheet};
use crate::inputs::CrateInputs;

/// A complete crate design.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrateDesign {
    pub inputs: CrateInputs,
    pub dimensions: PanelDimensions,
    pub skids: SkidResult,
    /// Front, back, left, right, top
    pub panels: [PanelResult; 5],
    pub floorboards: FloorboardLayout,
    pub klimps: KlimpLayout,
    pub materials: MaterialSummary,
    pub efficiency: MaterialEfficiency,
    /// Non-fatal design advisories
    pub warnings: Vec<String>,
    pub expressions: ExpressionSheet,
    pub generated_at: DateTime<Utc>,
}

impl CrateDesign {
    pub fn panel(&self, panel_type: PanelType) -> &PanelResult {
        &self.panels[panel_type.index()]
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Compute a design, stamped with the current time.
pub fn compute_design(inputs: &CrateInputs) -> CalcResult<CrateDesign> {
    compute_design_at(inputs, Utc::now())
}

/// Compute a design with the default cost rates and a fixed timestamp.
pub fn compute_design_at(inputs: &CrateInputs, generated_at: DateTime<Utc>) -> CalcResult<CrateDesign> {
    compute_design_with(inputs, &CostRates::default(), generated_at)
}

/// Compute a design with explicit cost rates and timestamp.
///
/// # Errors
///
/// `CalcError::ValidationFailed` listing every out-of-range input. Once the
/// inputs validate, this always succeeds.
pub fn compute_design_with(
    inputs: &CrateInputs,
    rates: &CostRates,
    generated_at: DateTime<Utc>,
) -> CalcResult<CrateDesign> {
    inputs.validate()?;

    let dims = dimensions::calculate(inputs);
    let skids = skids::calculate(dims.internal.length, dims.internal.width, inputs.product_weight);
    let panels = PanelType::ALL.map(|t| panels::calculate(t, dims.panel(t), inputs));
    let floorboards = floorboards::calculate(dims.end_width, dims.wall_height);

    let panel_of = |t: PanelType| &panels[t.index()];
    let klimps = klimps::calculate(&KlimpGeometry {
        panel_width: dims.top_width,
        panel_length: dims.side_length,
        panel_height: dims.wall_height,
        cleat_member_width: inputs.cleat_member_width,
        cleat_thickness: inputs.cleat_thickness,
        panel_thickness: inputs.panel_thickness,
        top_intermediate_cleats: panel_of(PanelType::Top).intermediate_vertical_centerlines(),
        side_horizontal_splices: panel_of(PanelType::Left).horizontal_splices(),
        center_x: 0.0,
        center_y: 0.0,
        ground_z: 0.0,
    });

    let materials = summary::calculate(&panels, &skids, &floorboards, &klimps, rates);
    let efficiency =
        plywood_layout::material_efficiency(panels.iter().map(|p| &p.layout), rates.sheet_price);

    let mut warnings = skids.warnings(inputs.product_weight);
    warnings.extend(panels.iter().flat_map(PanelResult::warnings));

    let expressions = expressions::serialize(inputs, &dims, &skids, &floorboards, &klimps, generated_at);

    tracing::debug!(
        overall_length = dims.overall.length,
        overall_width = dims.overall.width,
        overall_height = dims.overall.height,
        sheets = materials.plywood.sheet_count,
        klimps = klimps.active_count(),
        warnings = warnings.len(),
        variables = expressions.variable_count(),
        "crate design computed"
    );

    Ok(CrateDesign {
        inputs: *inputs,
        dimensions: dims,
        skids,
        panels,
        floorboards,
        klimps,
        materials,
        efficiency,
        warnings,
        expressions,
        generated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::klimps::KlimpPanel;
    use crate::inputs::quick_test_cases;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[test]
    fn test_default_design() {
        let design = compute_design_at(&CrateInputs::default(), at()).unwrap();
        // 96 + 4 + 0.5 + 1.5
        assert!((design.dimensions.overall.length - 102.0).abs() < 1e-9);
        assert_eq!(design.skids.length, 100.0);
        assert_eq!(design.panel(PanelType::Top).panel_type, PanelType::Top);
        assert_eq!(design.panels.len(), 5);
        assert_eq!(design.klimps.slots().len(), 30);
    }

    #[test]
    fn test_panels_in_type_order() {
        let design = compute_design_at(&CrateInputs::default(), at()).unwrap();
        for (panel, expected) in design.panels.iter().zip(PanelType::ALL) {
            assert_eq!(panel.panel_type, expected);
        }
    }

    #[test]
    fn test_wall_heights_equal() {
        for inputs in quick_test_cases() {
            let design = compute_design_at(&inputs, at()).unwrap();
            let front = design.panel(PanelType::Front).height;
            for t in [PanelType::Back, PanelType::Left, PanelType::Right] {
                assert_eq!(design.panel(t).height, front);
            }
        }
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let inputs = CrateInputs {
            product_length: 5.0,
            product_weight: 20_000.0,
            ..CrateInputs::default()
        };
        let err = compute_design(&inputs).unwrap_err();
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_tall_crate_side_zones() {
        // 100" product gives a 102" wall: two sheet rows, so two side zones
        let design = compute_design_at(&quick_test_cases()[0], at()).unwrap();
        let left = design.panel(PanelType::Left);
        assert_eq!(left.horizontal_splices(), vec![96.0]);
        let active = design
            .klimps
            .panel_slots(KlimpPanel::Left)
            .iter()
            .filter(|s| s.is_active())
            .count();
        // 24" long side: ceil(24/20) = 2 per row
        assert_eq!(active, 4);
    }

    #[test]
    fn test_material_summary_attached() {
        let design = compute_design_at(&CrateInputs::default(), at()).unwrap();
        let sheets: u32 = design.panels.iter().map(|p| p.layout.total_sheets).sum();
        assert_eq!(design.materials.plywood.sheet_count, sheets);
        assert_eq!(design.efficiency.total_sheets, sheets);
        assert_eq!(
            design.materials.hardware.klimps as usize,
            design.klimps.active_count()
        );
    }

    #[test]
    fn test_custom_rates() {
        let rates = CostRates {
            sheet_price: 0.0,
            cleat_price_per_ft: 0.0,
            klimp_price: 0.0,
            labor_ratio: 0.3,
        };
        let design = compute_design_with(&CrateInputs::default(), &rates, at()).unwrap();
        assert_eq!(design.materials.cost.total, 0.0);
        assert_eq!(design.efficiency.cost_estimate, 0.0);
    }

    #[test]
    fn test_design_serializes() {
        let design = compute_design_at(&CrateInputs::default(), at()).unwrap();
        let json = serde_json::to_value(&design).unwrap();
        assert_eq!(json["klimps"]["slots"].as_array().unwrap().len(), 30);
        assert!(json["expressions"][0].as_str().unwrap().starts_with("// AutoCrate"));
    }
}
