//! Command implementations for the `autocrate` binary.

use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;

use autocrate_core::calculations::PanelType;
use autocrate_core::file_io::{export_file_name, save_expressions, write_atomic};
use autocrate_core::{compute_design_with, quick_test_cases, CrateDesign, CrateInputs};

use crate::config::AutocrateConfig;

/// Output format for `calc`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// NX expression lines
    #[default]
    Exp,
    /// The whole design as JSON
    Json,
    /// Human-readable summary
    Summary,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Exp => "exp",
            OutputFormat::Json => "json",
            OutputFormat::Summary => "txt",
        }
    }
}

/// Compute a design and emit it.
///
/// Writes to `output` when given, else into the configured output
/// directory (created if missing), else to `stdout`. Returns the file
/// written, if any.
pub fn run_calc(
    inputs: &CrateInputs,
    config: &AutocrateConfig,
    format: OutputFormat,
    output: Option<&Path>,
    now: DateTime<Utc>,
    stdout: &mut impl Write,
) -> Result<Option<PathBuf>> {
    let design = compute_design_with(inputs, &config.costs, now)?;
    for warning in &design.warnings {
        tracing::warn!("{warning}");
    }

    let target = match (output, &config.output_dir) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, Some(dir)) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create output directory {}", dir.display()))?;
            Some(dir.clone())
        }
        (None, None) => None,
    };
    let Some(target) = target else {
        match format {
            OutputFormat::Exp => write!(stdout, "{}", design.expressions)?,
            OutputFormat::Json => writeln!(stdout, "{}", to_json(&design)?)?,
            OutputFormat::Summary => write!(stdout, "{}", render_summary(&design))?,
        }
        return Ok(None);
    };

    let written = match format {
        OutputFormat::Exp => save_expressions(&design.expressions, &target, now)
            .with_context(|| format!("failed to export expressions to {}", target.display()))?,
        OutputFormat::Json | OutputFormat::Summary => {
            let path = if target.is_dir() {
                target.join(export_file_name(now)).with_extension(format.extension())
            } else {
                target
            };
            let contents = match format {
                OutputFormat::Json => to_json(&design)?,
                _ => render_summary(&design),
            };
            write_atomic(&path, contents.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            path
        }
    };

    tracing::info!(path = %written.display(), format = ?format, "design exported");
    Ok(Some(written))
}

fn to_json(design: &CrateDesign) -> Result<String> {
    serde_json::to_string_pretty(design).context("failed to serialize design")
}

/// Run the built-in quick test cases, one summary line each.
pub fn run_quick_test(config: &AutocrateConfig, now: DateTime<Utc>, stdout: &mut impl Write) -> Result<()> {
    for (index, inputs) in quick_test_cases().iter().enumerate() {
        let design = compute_design_with(inputs, &config.costs, now)
            .with_context(|| format!("quick test case {} failed", index + 1))?;
        writeln!(stdout, "Case {}: {}", index + 1, quick_test_line(&design))?;
    }
    Ok(())
}

/// One-line digest of a design
pub fn quick_test_line(design: &CrateDesign) -> String {
    let i = &design.inputs;
    let o = &design.dimensions.overall;
    format!(
        "{}x{}x{} @ {} lb -> {:.3}x{:.3}x{:.3} in, {} x {} skids, {} sheets, {} klimps, {} variables",
        i.product_length,
        i.product_width,
        i.product_height,
        i.product_weight,
        o.length,
        o.width,
        o.height,
        design.skids.count,
        design.skids.lumber_size,
        design.materials.plywood.sheet_count,
        design.klimps.active_count(),
        design.expressions.variable_count(),
    )
}

/// Human-readable design report
pub fn render_summary(design: &CrateDesign) -> String {
    let i = &design.inputs;
    let d = &design.dimensions;
    let m = &design.materials;
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "AutoCrate design ({})", design.generated_at.to_rfc3339());
    let _ = writeln!(
        out,
        "Product:     {} x {} x {} in, {} lb",
        i.product_length, i.product_width, i.product_height, i.product_weight
    );
    let _ = writeln!(
        out,
        "Overall:     {:.3} x {:.3} x {:.3} in",
        d.overall.length, d.overall.width, d.overall.height
    );
    let _ = writeln!(
        out,
        "Skids:       {} x {} @ {:.3} in spacing, {:.3} in long",
        design.skids.count, design.skids.lumber_size, design.skids.spacing, design.skids.length
    );

    let _ = writeln!(out, "Panels:");
    for panel_type in PanelType::ALL {
        let panel = design.panel(panel_type);
        let _ = writeln!(
            out,
            "  {:<6} {:>8.3} x {:<8.3} {} sheet(s), {}, waste {:.1}%",
            panel_type.display_name(),
            panel.width,
            panel.height,
            panel.layout.total_sheets,
            panel.layout.orientation,
            panel.layout.waste_percentage
        );
    }

    let _ = writeln!(
        out,
        "Floorboards: {} boards, center gap {:.3} in",
        design.floorboards.board_count(),
        design.floorboards.center_gap
    );
    let _ = writeln!(out, "Klimps:      {} active of 30", design.klimps.active_count());
    let _ = writeln!(
        out,
        "Plywood:     {} sheets, waste {:.1}%, efficiency {:.1}%",
        m.plywood.sheet_count, m.plywood.waste_percentage, design.efficiency.average_efficiency
    );
    let _ = writeln!(
        out,
        "Lumber:      cleats {:.1} ft, skids {:.1} ft, floorboards {:.1} ft",
        m.lumber.cleat_linear_feet, m.lumber.skid_linear_feet, m.lumber.floorboard_linear_feet
    );
    let _ = writeln!(
        out,
        "Hardware:    {} klimps, {} screws, {} nails",
        m.hardware.klimps, m.hardware.screws, m.hardware.nails
    );
    let _ = writeln!(
        out,
        "Cost:        materials ${:.2}, labor ${:.2}, total ${:.2}",
        m.cost.materials, m.cost.labor, m.cost.total
    );

    if design.has_warnings() {
        let _ = writeln!(out, "Warnings:");
        for warning in &design.warnings {
            let _ = writeln!(out, "  - {warning}");
        }
    }

    out
}
