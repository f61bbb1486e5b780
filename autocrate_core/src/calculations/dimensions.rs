//! # Crate Dimensions
//!
//! Derives the internal and overall crate envelopes and every panel's face
//! size from the product envelope, clearances, and material thicknesses.
//!
//! The derivation is closed-form: the material build-up is added once, so
//! identical inputs always give identical dimensions.
//!
//! ## Build-up
//!
//! - internal = product + 2 x side clearance (L, W); product + top + side clearance (H)
//! - overall = internal + 2 x (panel + cleat) (L, W); internal + panel + cleat + cleat width (H)
//! - front/back width = overall W - 2 x panel
//! - left/right width = overall L
//! - wall height (all four walls) = overall H - panel - cleat - cleat width
//! - top = front/back width x overall L
//!
//! ## Example
//!
//! ```rust
//! use autocrate_core::calculations::dimensions::{calculate, PanelType};
//! use autocrate_core::CrateInputs;
//!
//! let dims = calculate(&CrateInputs::default());
//! assert_eq!(dims.overall.length, 96.0 + 4.0 + 0.5 + 1.5);
//! assert_eq!(dims.panel(PanelType::Front).height, dims.panel(PanelType::Left).height);
//! ```

use serde::{Deserialize, Serialize};

use crate::inputs::CrateInputs;

/// One of the five plywood panels of a crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelType {
    Front,
    Back,
    Left,
    Right,
    Top,
}

impl PanelType {
    /// All panels in assembly order
    pub const ALL: [PanelType; 5] = [
        PanelType::Front,
        PanelType::Back,
        PanelType::Left,
        PanelType::Right,
        PanelType::Top,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PanelType::Front => "Front",
            PanelType::Back => "Back",
            PanelType::Left => "Left",
            PanelType::Right => "Right",
            PanelType::Top => "Top",
        }
    }

    /// Position in [`PanelType::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PanelType::Front => 0,
            PanelType::Back => 1,
            PanelType::Left => 2,
            PanelType::Right => 3,
            PanelType::Top => 4,
        }
    }
}

impl std::fmt::Display for PanelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A length x width x height box in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// Face size of one panel: width along its base, height up its face.
///
/// For the top panel, `height` is its run along the crate length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelSize {
    pub width: f64,
    pub height: f64,
}

impl PanelSize {
    /// Face area in square inches
    pub fn area_in2(&self) -> f64 {
        self.width * self.height
    }
}

/// All derived crate dimensions.
///
/// The four walls share one `wall_height` field, so front, back, left, and
/// right heights cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelDimensions {
    /// Product plus clearances
    pub internal: Envelope,
    /// Internal plus panels and cleats
    pub overall: Envelope,
    /// Front and back panel width
    pub end_width: f64,
    /// Left and right panel width (the panel "length face")
    pub side_length: f64,
    /// Height shared by all four walls
    pub wall_height: f64,
    /// Top panel width (across the crate)
    pub top_width: f64,
    /// Top panel length (along the crate)
    pub top_length: f64,
}

impl PanelDimensions {
    /// Face size for a given panel
    pub fn panel(&self, panel: PanelType) -> PanelSize {
        match panel {
            PanelType::Front | PanelType::Back => PanelSize {
                width: self.end_width,
                height: self.wall_height,
            },
            PanelType::Left | PanelType::Right => PanelSize {
                width: self.side_length,
                height: self.wall_height,
            },
            PanelType::Top => PanelSize {
                width: self.top_width,
                height: self.top_length,
            },
        }
    }
}

/// Derive the internal envelope (product plus clearances).
pub fn internal_envelope(inputs: &CrateInputs) -> Envelope {
    let side = inputs.clearance_all_sides;
    Envelope {
        length: inputs.product_length + 2.0 * side,
        width: inputs.product_width + 2.0 * side,
        height: inputs.product_height + inputs.clearance_top + side,
    }
}

/// Derive every crate dimension from validated inputs.
pub fn calculate(inputs: &CrateInputs) -> PanelDimensions {
    let internal = internal_envelope(inputs);

    let panel = inputs.panel_thickness;
    let cleat = inputs.cleat_thickness;
    let cleat_width = inputs.cleat_member_width;

    let overall = Envelope {
        length: internal.length + 2.0 * panel + 2.0 * cleat,
        width: internal.width + 2.0 * panel + 2.0 * cleat,
        height: internal.height + panel + cleat + cleat_width,
    };

    let end_width = overall.width - 2.0 * panel;
    let wall_height = overall.height - panel - cleat - cleat_width;

    PanelDimensions {
        internal,
        overall,
        end_width,
        side_length: overall.length,
        wall_height,
        top_width: end_width,
        top_length: overall.length,
    }
}
