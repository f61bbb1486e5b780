//! # Panel Assembly
//!
//! Combines a panel's plywood layout with its cleat framing.
//!
//! Every panel gets a cleat around its perimeter: two vertical edge cleats
//! spanning the height and two horizontal edge cleats spanning the width.
//! Panels wider than [`INTERMEDIATE_CLEAT_SPACING_IN`] also get
//! `floor(width / 24)` intermediate vertical cleats, evenly spaced.

use serde::{Deserialize, Serialize};

use crate::calculations::dimensions::{PanelSize, PanelType};
use crate::calculations::plywood_layout::{self, PlywoodLayout, PlywoodSheet};
use crate::inputs::CrateInputs;

/// Maximum unsupported span between vertical cleats (in)
pub const INTERMEDIATE_CLEAT_SPACING_IN: f64 = 24.0;

/// Splice offsets closer than this (in) are the same seam
const SPLICE_DEDUP_TOLERANCE_IN: f64 = 1e-6;

/// Role of a cleat in the panel frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleatType {
    EdgeVertical,
    EdgeHorizontal,
    IntermediateVertical,
    IntermediateHorizontal,
}

/// A group of identical cleats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CleatSpec {
    pub cleat_type: CleatType,
    /// Length of each cleat (in)
    pub length: f64,
    /// Face width (in)
    pub width: f64,
    pub thickness: f64,
    /// For intermediate cleats, the first centerline; edge cleats sit at 0
    pub position_x: f64,
    pub position_y: f64,
    pub count: u32,
}

impl CleatSpec {
    /// Total length of the group (in)
    pub fn total_length(&self) -> f64 {
        self.length * f64::from(self.count)
    }
}

/// A panel with its sheets, cleats, and seam positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelResult {
    pub panel_type: PanelType,
    pub width: f64,
    pub height: f64,
    pub layout: PlywoodLayout,
    pub cleats: Vec<CleatSpec>,
    /// Distinct vertical seam X-offsets, ascending
    pub splice_positions: Vec<f64>,
}

impl PanelResult {
    pub fn sheets(&self) -> &[PlywoodSheet] {
        &self.layout.sheets
    }

    /// Intermediate vertical cleat centerlines, ascending
    pub fn intermediate_vertical_centerlines(&self) -> Vec<f64> {
        self.cleats
            .iter()
            .filter(|c| c.cleat_type == CleatType::IntermediateVertical)
            .flat_map(|c| (1..=c.count).map(move |k| c.position_x * f64::from(k)))
            .collect()
    }

    /// Row seam Y-offsets from the sheet layout
    pub fn horizontal_splices(&self) -> Vec<f64> {
        self.layout.horizontal_splices()
    }

    /// Total cleat length on this panel (in)
    pub fn cleat_length(&self) -> f64 {
        self.cleats.iter().map(CleatSpec::total_length).sum()
    }

    /// Layout warnings, labelled with the panel name
    pub fn warnings(&self) -> Vec<String> {
        self.layout
            .warnings()
            .into_iter()
            .map(|w| format!("{} panel: {}", self.panel_type, w))
            .collect()
    }
}

/// Perimeter and intermediate cleats for a panel face.
pub fn cleats_for(panel_width: f64, panel_height: f64, inputs: &CrateInputs) -> Vec<CleatSpec> {
    let width = inputs.cleat_member_width;
    let thickness = inputs.cleat_thickness;

    let mut cleats = vec![
        CleatSpec {
            cleat_type: CleatType::EdgeVertical,
            length: panel_height,
            width,
            thickness,
            position_x: 0.0,
            position_y: 0.0,
            count: 2,
        },
        CleatSpec {
            cleat_type: CleatType::EdgeHorizontal,
            length: panel_width,
            width,
            thickness,
            position_x: 0.0,
            position_y: 0.0,
            count: 2,
        },
    ];

    if panel_width > INTERMEDIATE_CLEAT_SPACING_IN {
        let count = (panel_width / INTERMEDIATE_CLEAT_SPACING_IN).floor() as u32;
        if count > 0 {
            cleats.push(CleatSpec {
                cleat_type: CleatType::IntermediateVertical,
                length: panel_height,
                width,
                thickness,
                position_x: panel_width / f64::from(count + 1),
                position_y: 0.0,
                count,
            });
        }
    }

    cleats
}

/// Distinct X-offsets where same-row sheets abut, ascending.
pub fn splice_positions(sheets: &[PlywoodSheet]) -> Vec<f64> {
    let mut splices: Vec<f64> = sheets
        .iter()
        .filter(|s| {
            sheets
                .iter()
                .any(|o| o.position_y == s.position_y && o.position_x > s.position_x)
        })
        .map(PlywoodSheet::right_edge)
        .collect();

    splices.sort_by(f64::total_cmp);
    splices.dedup_by(|a, b| (*a - *b).abs() < SPLICE_DEDUP_TOLERANCE_IN);
    splices
}

/// Assemble one panel.
pub fn calculate(panel_type: PanelType, size: PanelSize, inputs: &CrateInputs) -> PanelResult {
    let layout = plywood_layout::calculate(size.width, size.height);
    let cleats = cleats_for(size.width, size.height, inputs);
    let splice_positions = splice_positions(&layout.sheets);

    tracing::debug!(
        panel = %panel_type,
        sheets = layout.total_sheets,
        orientation = %layout.orientation,
        cleat_groups = cleats.len(),
        "panel assembled"
    );

    PanelResult {
        panel_type,
        width: size.width,
        height: size.height,
        layout,
        cleats,
        splice_positions,
    }
}
