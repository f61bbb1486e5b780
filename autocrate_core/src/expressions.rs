//! # CAD Expression Export
//!
//! Serializes a design into the line-oriented parameter list read by the
//! CAD model's expression importer. Each line is either a comment, a blank
//! group separator, or an assignment:
//!
//! ```text
//! [Inch]CRATE_Overall_Length = 102.500
//! SKID_Count = 3
//! SKID_Lumber_Size = "2x4"
//! KL_11_Q_W = 0.707107 // Quaternion W (scalar) component
//! ```
//!
//! Line order and naming are fixed by the importer. Decimals are fixed-point
//! with ties rounded away from zero, and a value that rounds to zero is never
//! written with a minus sign.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::calculations::dimensions::PanelDimensions;
use crate::calculations::floorboards::FloorboardLayout;
use crate::calculations::klimps::{KlimpLayout, KlimpSlot};
use crate::calculations::skids::SkidResult;
use crate::inputs::CrateInputs;

/// Decimals for lengths and Euler angles
pub const LENGTH_DECIMALS: usize = 3;

/// Decimals for quaternion and direction components
pub const UNIT_DECIMALS: usize = 6;

/// Extra digits used to recognise an exact half
const TIE_PROBE_DIGITS: usize = 30;

const HEADER_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S-%3fZ";

// ============================================================================
// Number Formatting
// ============================================================================

/// Fixed-point decimal text, ties away from zero, no negative zero.
///
/// ```rust
/// use autocrate_core::expressions::format_fixed;
///
/// assert_eq!(format_fixed(0.0625, 3), "0.063");
/// assert_eq!(format_fixed(-0.0001, 3), "0.000");
/// ```
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    let probe = format!("{:.*}", decimals + TIE_PROBE_DIGITS, magnitude);
    let (head, tail) = probe.split_at(probe.len() - TIE_PROBE_DIGITS);

    // std rounds exact halves to even
    let digits = if tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0') {
        round_up_last_digit(head.trim_end_matches('.'))
    } else {
        format!("{:.*}", decimals, magnitude)
    };

    let is_zero = digits.bytes().all(|b| b == b'0' || b == b'.');
    if value.is_sign_negative() && !is_zero {
        format!("-{digits}")
    } else {
        digits
    }
}

fn round_up_last_digit(digits: &str) -> String {
    let mut chars: Vec<char> = digits.chars().collect();
    for c in chars.iter_mut().rev() {
        match *c {
            '.' => continue,
            '9' => *c = '0',
            d => {
                *c = char::from(d as u8 + 1);
                return chars.into_iter().collect();
            }
        }
    }
    std::iter::once('1').chain(chars).collect()
}

// ============================================================================
// Expression Lines
// ============================================================================

/// Right-hand side of an assignment
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionValue {
    /// Length, written with the `[Inch]` unit prefix and 3 decimals
    Inches(f64),
    Integer(u64),
    /// Quoted string
    Text(String),
    /// Unitless decimal with the given precision
    Unitless { value: f64, decimals: usize },
}

impl ExpressionValue {
    fn unit_prefix(&self) -> &'static str {
        match self {
            ExpressionValue::Inches(_) => "[Inch]",
            _ => "",
        }
    }
}

impl fmt::Display for ExpressionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionValue::Inches(v) => f.write_str(&format_fixed(*v, LENGTH_DECIMALS)),
            ExpressionValue::Integer(n) => write!(f, "{n}"),
            ExpressionValue::Text(s) => write!(f, "\"{s}\""),
            ExpressionValue::Unitless { value, decimals } => {
                f.write_str(&format_fixed(*value, *decimals))
            }
        }
    }
}

/// One named assignment
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub name: String,
    pub value: ExpressionValue,
    pub comment: Option<&'static str>,
}

/// One output line
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionLine {
    Comment(String),
    Blank,
    Assignment(Expression),
}

impl ExpressionLine {
    pub fn is_assignment(&self) -> bool {
        matches!(self, ExpressionLine::Assignment(_))
    }

    /// Variable name, for assignments
    pub fn name(&self) -> Option<&str> {
        match self {
            ExpressionLine::Assignment(e) => Some(&e.name),
            _ => None,
        }
    }
}

impl fmt::Display for ExpressionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionLine::Comment(text) => write!(f, "// {text}"),
            ExpressionLine::Blank => Ok(()),
            ExpressionLine::Assignment(e) => {
                write!(f, "{}{} = {}", e.value.unit_prefix(), e.name, e.value)?;
                if let Some(comment) = e.comment {
                    write!(f, " // {comment}")?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for ExpressionLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The ordered parameter list for one design.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExpressionSheet {
    lines: Vec<ExpressionLine>,
}

impl ExpressionSheet {
    pub fn lines(&self) -> &[ExpressionLine] {
        &self.lines
    }

    /// Rendered lines, in order
    pub fn to_strings(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }

    /// Number of assignment lines
    pub fn variable_count(&self) -> usize {
        self.lines.iter().filter(|l| l.is_assignment()).count()
    }

    /// Full `.exp` file text with the export header and footer.
    pub fn render_file(&self, exported_at: DateTime<Utc>) -> String {
        let mut out = String::new();
        out.push_str("// AutoCrate - NX Expressions File\n");
        out.push_str(&format!(
            "// Generated: {}\n",
            exported_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
        out.push('\n');
        for line in &self.lines {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out.push('\n');
        out.push_str("// End of AutoCrate Expressions\n");
        out.push_str(&format!("// Total variables: {}\n", self.variable_count()));
        out
    }
}

impl fmt::Display for ExpressionSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Serializer
// ============================================================================

#[derive(Default)]
struct SheetBuilder {
    lines: Vec<ExpressionLine>,
}

impl SheetBuilder {
    fn comment(&mut self, text: impl Into<String>) {
        self.lines.push(ExpressionLine::Comment(text.into()));
    }

    fn blank(&mut self) {
        self.lines.push(ExpressionLine::Blank);
    }

    fn assign(&mut self, name: impl Into<String>, value: ExpressionValue, comment: Option<&'static str>) {
        self.lines.push(ExpressionLine::Assignment(Expression {
            name: name.into(),
            value,
            comment,
        }));
    }

    fn inches(&mut self, name: impl Into<String>, value: f64) {
        self.assign(name, ExpressionValue::Inches(value), None);
    }

    fn unitless(&mut self, name: String, value: f64, decimals: usize, comment: &'static str) {
        self.assign(name, ExpressionValue::Unitless { value, decimals }, Some(comment));
    }

    fn klimp(&mut self, slot: &KlimpSlot) {
        let id = slot.id;
        let p = slot.position;
        self.assign(format!("KL_{id}_X"), ExpressionValue::Inches(p.x), Some("Position X coordinate"));
        self.assign(format!("KL_{id}_Y"), ExpressionValue::Inches(p.y), Some("Position Y coordinate"));
        self.assign(format!("KL_{id}_Z"), ExpressionValue::Inches(p.z), Some("Position Z coordinate"));

        let q = slot.quaternion();
        self.unitless(format!("KL_{id}_Q_W"), q.w, UNIT_DECIMALS, "Quaternion W (scalar) component");
        self.unitless(format!("KL_{id}_Q_X"), q.x, UNIT_DECIMALS, "Quaternion X (i) component");
        self.unitless(format!("KL_{id}_Q_Y"), q.y, UNIT_DECIMALS, "Quaternion Y (j) component");
        self.unitless(format!("KL_{id}_Q_Z"), q.z, UNIT_DECIMALS, "Quaternion Z (k) component");

        const AXIS_COMMENTS: [[&str; 3]; 3] = [
            [
                "X-axis direction X component",
                "X-axis direction Y component",
                "X-axis direction Z component",
            ],
            [
                "Y-axis direction X component",
                "Y-axis direction Y component",
                "Y-axis direction Z component",
            ],
            [
                "Z-axis direction X component",
                "Z-axis direction Y component",
                "Z-axis direction Z component",
            ],
        ];
        let axes = slot.direction_vectors().axes();
        for ((axis_name, axis), comments) in ["X", "Y", "Z"].iter().zip(axes).zip(AXIS_COMMENTS) {
            for ((component, value), comment) in ["X", "Y", "Z"].iter().zip(axis.to_array()).zip(comments) {
                self.unitless(
                    format!("KL_{id}_{axis_name}_DIR_{component}"),
                    value,
                    UNIT_DECIMALS,
                    comment,
                );
            }
        }

        let euler = slot.euler_angles();
        self.unitless(format!("KL_{id}_RX"), euler.rx, LENGTH_DECIMALS, "Legacy Euler angle X rotation (degrees)");
        self.unitless(format!("KL_{id}_RY"), euler.ry, LENGTH_DECIMALS, "Legacy Euler angle Y rotation (degrees)");
        self.unitless(format!("KL_{id}_RZ"), euler.rz, LENGTH_DECIMALS, "Legacy Euler angle Z rotation (degrees)");

        self.assign(
            format!("KL_{id}_SUPPRESS"),
            ExpressionValue::Integer(u64::from(slot.suppressed)),
            Some("Suppress flag (0=hide, 1=show)"),
        );
    }
}

/// Build the expression list for a computed design.
pub fn serialize(
    inputs: &CrateInputs,
    dimensions: &PanelDimensions,
    skids: &SkidResult,
    floorboards: &FloorboardLayout,
    klimps: &KlimpLayout,
    generated_at: DateTime<Utc>,
) -> ExpressionSheet {
    let mut b = SheetBuilder::default();

    b.comment(format!(
        "AutoCrate NX Expressions - Generated {}",
        generated_at.format(HEADER_TIMESTAMP_FORMAT)
    ));
    b.comment(format!(
        "Product: {}x{}x{}, Weight: {}lbs",
        inputs.product_length, inputs.product_width, inputs.product_height, inputs.product_weight
    ));
    b.comment(format!(
        "Materials: {}\" panels, {}\" cleats",
        inputs.panel_thickness, inputs.cleat_thickness
    ));
    b.blank();

    b.inches("CRATE_Overall_Length", dimensions.overall.length);
    b.inches("CRATE_Overall_Width", dimensions.overall.width);
    b.inches("CRATE_Overall_Height", dimensions.overall.height);
    b.blank();

    b.inches("PANEL_Front_Assy_Overall_Width", dimensions.end_width);
    b.inches("PANEL_Front_Assy_Overall_Height", dimensions.wall_height);
    b.inches("PANEL_Back_Assy_Overall_Width", dimensions.end_width);
    b.inches("PANEL_Back_Assy_Overall_Height", dimensions.wall_height);
    b.assign(
        "PANEL_End_Assy_Overall_Length_Face",
        ExpressionValue::Inches(dimensions.side_length),
        Some("For Left & Right End Panels"),
    );
    b.inches("PANEL_End_Assy_Overall_Height", dimensions.wall_height);
    b.inches("PANEL_Top_Assy_Overall_Width", dimensions.top_width);
    b.inches("PANEL_Top_Assy_Overall_Length", dimensions.top_length);
    b.blank();

    b.assign("SKID_Count", ExpressionValue::Integer(u64::from(skids.count)), None);
    b.inches("SKID_Spacing", skids.spacing);
    b.inches("SKID_Length", skids.length);
    b.assign(
        "SKID_Lumber_Size",
        ExpressionValue::Text(skids.lumber_size.display_name().to_string()),
        None,
    );
    b.blank();

    for (index, board) in floorboards.boards.iter().enumerate() {
        let n = index + 1;
        b.inches(format!("FB_Width_{n}"), board.width);
        b.inches(format!("FB_Length_{n}"), board.length);
        b.inches(format!("FB_Position_X_{n}"), board.position_x);
    }
    b.assign(
        "FB_Board_Count",
        ExpressionValue::Integer(floorboards.board_count() as u64),
        None,
    );
    b.blank();

    b.inches("Panel_Thickness", inputs.panel_thickness);
    b.inches("Cleat_Thickness", inputs.cleat_thickness);
    b.inches("Cleat_Member_Width", inputs.cleat_member_width);
    b.blank();

    b.comment("=== KLIMP SYSTEM VARIABLES ===");
    for slot in klimps.iter() {
        b.klimp(slot);
    }
    b.blank();

    // Duplicate of KL_1_Z; the importer keys total height off the last one
    let total_height = dimensions.wall_height
        + inputs.panel_thickness
        + inputs.cleat_thickness
        + inputs.cleat_member_width;
    b.comment("Critical height measurement");
    b.assign(
        "KL_1_Z",
        ExpressionValue::Inches(total_height),
        Some("Total crate height including top assembly"),
    );

    ExpressionSheet { lines: b.lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::dimensions;
    use crate::calculations::floorboards;
    use crate::calculations::klimps::{self, KlimpGeometry};
    use crate::calculations::skids;
    use chrono::TimeZone;

    #[test]
    fn test_format_fixed_ties_away_from_zero() {
        assert_eq!(format_fixed(0.0625, 3), "0.063");
        assert_eq!(format_fixed(-0.0625, 3), "-0.063");
        assert_eq!(format_fixed(2.5, 0), "3");
        assert_eq!(format_fixed(9.5, 0), "10");
        assert_eq!(format_fixed(99.9375, 3), "99.938");
    }

    #[test]
    fn test_format_fixed_non_ties() {
        assert_eq!(format_fixed(102.5, 3), "102.500");
        assert_eq!(format_fixed(1.0 / 3.0, 3), "0.333");
        assert_eq!(format_fixed(std::f64::consts::FRAC_1_SQRT_2, 6), "0.707107");
        assert_eq!(format_fixed(-std::f64::consts::FRAC_1_SQRT_2, 6), "-0.707107");
        // 1.0005 is stored just below the half
        assert_eq!(format_fixed(1.0005, 3), "1.000");
    }

    #[test]
    fn test_format_fixed_no_negative_zero() {
        assert_eq!(format_fixed(-0.0, 3), "0.000");
        assert_eq!(format_fixed(-0.0001, 3), "0.000");
        assert_eq!(format_fixed(-1e-17, 6), "0.000000");
    }

    #[test]
    fn test_line_rendering() {
        let inch = ExpressionLine::Assignment(Expression {
            name: "SKID_Length".into(),
            value: ExpressionValue::Inches(102.5),
            comment: None,
        });
        assert_eq!(inch.to_string(), "[Inch]SKID_Length = 102.500");

        let text = ExpressionLine::Assignment(Expression {
            name: "SKID_Lumber_Size".into(),
            value: ExpressionValue::Text("4x4".into()),
            comment: None,
        });
        assert_eq!(text.to_string(), "SKID_Lumber_Size = \"4x4\"");

        let commented = ExpressionLine::Assignment(Expression {
            name: "KL_1_SUPPRESS".into(),
            value: ExpressionValue::Integer(1),
            comment: Some("Suppress flag (0=hide, 1=show)"),
        });
        assert_eq!(
            commented.to_string(),
            "KL_1_SUPPRESS = 1 // Suppress flag (0=hide, 1=show)"
        );
        assert_eq!(ExpressionLine::Blank.to_string(), "");
    }

    fn sheet() -> ExpressionSheet {
        let inputs = CrateInputs::default();
        let dims = dimensions::calculate(&inputs);
        let skids = skids::calculate(dims.internal.length, dims.internal.width, inputs.product_weight);
        let floor = floorboards::calculate(dims.end_width, dims.wall_height);
        let klimps = klimps::calculate(&KlimpGeometry {
            panel_width: dims.end_width,
            panel_length: dims.side_length,
            panel_height: dims.wall_height,
            cleat_member_width: inputs.cleat_member_width,
            cleat_thickness: inputs.cleat_thickness,
            panel_thickness: inputs.panel_thickness,
            top_intermediate_cleats: vec![],
            side_horizontal_splices: vec![],
            center_x: 0.0,
            center_y: 0.0,
            ground_z: 0.0,
        });
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        serialize(&inputs, &dims, &skids, &floor, &klimps, at)
    }

    #[test]
    fn test_header_lines() {
        let lines = sheet().to_strings();
        assert_eq!(lines[0], "// AutoCrate NX Expressions - Generated 2024-03-05T14-07-09-000Z");
        assert_eq!(lines[1], "// Product: 96x48x30, Weight: 500lbs");
        assert_eq!(lines[2], "// Materials: 0.25\" panels, 0.75\" cleats");
        assert_eq!(lines[3], "");
        assert!(lines[4].starts_with("[Inch]CRATE_Overall_Length = "));
    }

    #[test]
    fn test_klimp_block_shape() {
        let sheet = sheet();
        let names: Vec<&str> = sheet.lines().iter().filter_map(ExpressionLine::name).collect();
        let start = names.iter().position(|n| *n == "KL_1_X").unwrap();
        let block = &names[start..start + 20];
        assert_eq!(block[3], "KL_1_Q_W");
        assert_eq!(block[7], "KL_1_X_DIR_X");
        assert_eq!(block[15], "KL_1_Z_DIR_Z");
        assert_eq!(block[16], "KL_1_RX");
        assert_eq!(block[19], "KL_1_SUPPRESS");
        assert_eq!(names[start + 20], "KL_2_X");
        assert_eq!(names.iter().filter(|n| n.ends_with("_SUPPRESS")).count(), 30);
    }

    #[test]
    fn test_trailing_height_line() {
        let lines = sheet().to_strings();
        let last = lines.last().unwrap();
        // Wall 30 + 2 + 2, plus 0.25 + 0.75 + 3.5
        assert_eq!(
            last,
            "[Inch]KL_1_Z = 38.500 // Total crate height including top assembly"
        );
        assert_eq!(lines[lines.len() - 2], "// Critical height measurement");
        assert_eq!(lines[lines.len() - 3], "");
    }

    #[test]
    fn test_render_file_framing() {
        let sheet = sheet();
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let text = sheet.render_file(at);
        assert!(text.starts_with(
            "// AutoCrate - NX Expressions File\n// Generated: 2024-03-05T14:07:09.000Z\n\n"
        ));
        let footer = format!(
            "\n// End of AutoCrate Expressions\n// Total variables: {}\n",
            sheet.variable_count()
        );
        assert!(text.ends_with(&footer));
    }

    #[test]
    fn test_serialized_as_strings() {
        let json = serde_json::to_value(sheet()).unwrap();
        assert_eq!(json[3], "");
        assert!(json[4].as_str().unwrap().starts_with("[Inch]CRATE_Overall_Length"));
    }
}
