//! Crate input resolution: `--input FILE`, then per-field flags, then defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use autocrate_core::{load_inputs, CrateInputs};

/// Input flags shared by commands that compute a design.
#[derive(Debug, Default, Clone, Args)]
pub struct InputArgs {
    /// Inputs document (.json, .toml, or .acj job file)
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Product length (in)
    #[arg(long)]
    pub length: Option<f64>,

    /// Product width (in)
    #[arg(long)]
    pub width: Option<f64>,

    /// Product height (in)
    #[arg(long)]
    pub height: Option<f64>,

    /// Product weight (lb)
    #[arg(long)]
    pub weight: Option<f64>,

    /// Clearance on every side (in)
    #[arg(long)]
    pub clearance: Option<f64>,

    /// Additional clearance above the product (in)
    #[arg(long)]
    pub clearance_top: Option<f64>,

    /// Plywood panel thickness (in)
    #[arg(long)]
    pub panel_thickness: Option<f64>,

    /// Cleat lumber thickness (in)
    #[arg(long)]
    pub cleat_thickness: Option<f64>,

    /// Cleat lumber face width (in)
    #[arg(long)]
    pub cleat_width: Option<f64>,
}

impl InputArgs {
    /// Flag values keyed by input field name
    fn overrides(&self) -> [(&'static str, Option<f64>); 9] {
        [
            ("product_length", self.length),
            ("product_width", self.width),
            ("product_height", self.height),
            ("product_weight", self.weight),
            ("clearance_all_sides", self.clearance),
            ("clearance_top", self.clearance_top),
            ("panel_thickness", self.panel_thickness),
            ("cleat_thickness", self.cleat_thickness),
            ("cleat_member_width", self.cleat_width),
        ]
    }

    /// Build the crate inputs. Validation is left to the design engine.
    pub fn resolve(&self) -> Result<CrateInputs> {
        let base = match &self.input {
            Some(path) => load_inputs(path)
                .with_context(|| format!("failed to load inputs from {}", path.display()))?,
            None => CrateInputs::default(),
        };

        let mut inputs = base;
        for (field, value) in self.overrides() {
            if let Some(value) = value {
                inputs = inputs.with_field(field, value)?;
            }
        }

        tracing::debug!(?inputs, from_file = self.input.is_some(), "inputs resolved");
        Ok(inputs)
    }
}
