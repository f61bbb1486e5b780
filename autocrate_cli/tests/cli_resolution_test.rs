//! Integration tests for config resolution, input resolution, and `calc`
//! output routing. Everything runs against temp directories; the real
//! user config is never touched.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use autocrate_cli::commands::{self, OutputFormat};
use autocrate_cli::config::{self, AutocrateConfig, ConfigFile, ConfigSource, OutputSection};
use autocrate_cli::resolve::InputArgs;
use autocrate_core::{CalcError, CostRates, CrateInputs};

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
}

fn write_config(dir: &TempDir, name: &str, sheet_price: f64) -> PathBuf {
    let path = dir.path().join(name);
    let contents = format!("[costs]\nsheet_price = {sheet_price:.1}\n");
    fs::write(&path, contents).unwrap();
    path
}

fn default_config() -> AutocrateConfig {
    AutocrateConfig {
        costs: CostRates::default(),
        output_dir: None,
        source: ConfigSource::Defaults,
    }
}

// -----------------------------------------------------------------------
// Config resolution
// -----------------------------------------------------------------------

#[test]
fn resolve_flag_beats_env_and_file() {
    let tmp = TempDir::new().unwrap();
    let flag = write_config(&tmp, "flag.toml", 11.0);
    let env = write_config(&tmp, "env.toml", 22.0);
    let file = write_config(&tmp, "config.toml", 33.0);

    let config = AutocrateConfig::resolve_from(Some(&flag), Some(env), &file).unwrap();
    assert_eq!(config.costs.sheet_price, 11.0);
    assert_eq!(config.source, ConfigSource::Flag(flag));
}

#[test]
fn resolve_env_beats_file() {
    let tmp = TempDir::new().unwrap();
    let env = write_config(&tmp, "env.toml", 22.0);
    let file = write_config(&tmp, "config.toml", 33.0);

    let config = AutocrateConfig::resolve_from(None, Some(env.clone()), &file).unwrap();
    assert_eq!(config.costs.sheet_price, 22.0);
    assert_eq!(config.source, ConfigSource::Env(env));
}

#[test]
fn resolve_reads_default_file() {
    let tmp = TempDir::new().unwrap();
    let file = write_config(&tmp, "config.toml", 33.0);

    let config = AutocrateConfig::resolve_from(None, None, &file).unwrap();
    assert_eq!(config.costs.sheet_price, 33.0);
    // Unset rates keep their defaults
    assert_eq!(config.costs.klimp_price, CostRates::default().klimp_price);
}

#[test]
fn resolve_defaults_when_nothing_present() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("config.toml");

    let config = AutocrateConfig::resolve_from(None, None, &missing).unwrap();
    assert_eq!(config, default_config());
}

#[test]
fn resolve_errors_on_missing_explicit_file() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");
    let file = tmp.path().join("config.toml");

    let err = AutocrateConfig::resolve_from(Some(&missing), None, &file).unwrap_err();
    assert!(
        format!("{err:#}").contains("failed to read config file"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn init_config_writes_defaults_and_respects_force() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("autocrate").join("config.toml");

    config::init_config(&path, false).unwrap();
    let loaded = config::load_config(&path).unwrap();
    assert_eq!(loaded, ConfigFile::default());

    assert!(config::init_config(&path, false).is_err());
    config::init_config(&path, true).unwrap();
}

#[test]
fn config_roundtrip_with_output_dir() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    let original = ConfigFile {
        costs: CostRates {
            labor_ratio: 0.45,
            ..CostRates::default()
        },
        output: OutputSection {
            directory: Some(PathBuf::from("/srv/exports")),
        },
    };

    config::save_config(&original, &path).unwrap();
    assert_eq!(config::load_config(&path).unwrap(), original);
}

#[test]
fn config_path_ends_with_expected_filename() {
    let path = config::config_path();
    assert!(
        path.ends_with("autocrate/config.toml"),
        "unexpected config path: {}",
        path.display()
    );
}

// -----------------------------------------------------------------------
// Input resolution
// -----------------------------------------------------------------------

#[test]
fn inputs_default_without_flags() {
    let inputs = InputArgs::default().resolve().unwrap();
    assert_eq!(inputs, CrateInputs::default());
}

#[test]
fn flags_override_input_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("crate.toml");
    fs::write(&path, "product_length = 72.0\nproduct_weight = 900.0\n").unwrap();

    let args = InputArgs {
        input: Some(path),
        weight: Some(1500.0),
        cleat_width: Some(5.5),
        ..InputArgs::default()
    };
    let inputs = args.resolve().unwrap();
    assert_eq!(inputs.product_length, 72.0);
    assert_eq!(inputs.product_weight, 1500.0);
    assert_eq!(inputs.cleat_member_width, 5.5);
    assert_eq!(inputs.product_width, CrateInputs::default().product_width);
}

#[test]
fn missing_input_file_has_context() {
    let tmp = TempDir::new().unwrap();
    let args = InputArgs {
        input: Some(tmp.path().join("absent.json")),
        ..InputArgs::default()
    };
    let err = args.resolve().unwrap_err();
    assert!(format!("{err:#}").contains("failed to load inputs"));
}

// -----------------------------------------------------------------------
// calc output routing
// -----------------------------------------------------------------------

#[test]
fn calc_exp_to_stdout() {
    let mut out = Vec::new();
    let written = commands::run_calc(
        &CrateInputs::default(),
        &default_config(),
        OutputFormat::Exp,
        None,
        fixed_time(),
        &mut out,
    )
    .unwrap();

    assert!(written.is_none());
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("// AutoCrate NX Expressions - Generated 2024-03-05T14-07-09-000Z\n"));
    assert!(text.contains("KL_30_SUPPRESS = "));
}

#[test]
fn calc_exports_into_directory() {
    let tmp = TempDir::new().unwrap();
    let mut out = Vec::new();
    let written = commands::run_calc(
        &CrateInputs::default(),
        &default_config(),
        OutputFormat::Exp,
        Some(tmp.path()),
        fixed_time(),
        &mut out,
    )
    .unwrap()
    .unwrap();

    assert_eq!(written, tmp.path().join("AutoCrate_2024-03-05_140709_ASTM.exp"));
    assert!(out.is_empty());
    let text = fs::read_to_string(&written).unwrap();
    assert!(text.contains("// End of AutoCrate Expressions"));
}

#[test]
fn calc_uses_configured_output_dir() {
    let tmp = TempDir::new().unwrap();
    let config = AutocrateConfig {
        output_dir: Some(tmp.path().to_path_buf()),
        ..default_config()
    };
    let mut out = Vec::new();
    let written = commands::run_calc(
        &CrateInputs::default(),
        &config,
        OutputFormat::Json,
        None,
        fixed_time(),
        &mut out,
    )
    .unwrap()
    .unwrap();

    assert_eq!(written, tmp.path().join("AutoCrate_2024-03-05_140709_ASTM.json"));
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
    assert_eq!(json["klimps"]["slots"].as_array().unwrap().len(), 30);
}

#[test]
fn calc_creates_missing_configured_output_dir() {
    let tmp = TempDir::new().unwrap();
    let exports = tmp.path().join("exports");
    let config = AutocrateConfig {
        output_dir: Some(exports.clone()),
        ..default_config()
    };

    for (format, name) in [
        (OutputFormat::Exp, "AutoCrate_2024-03-05_140709_ASTM.exp"),
        (OutputFormat::Summary, "AutoCrate_2024-03-05_140709_ASTM.txt"),
    ] {
        let mut out = Vec::new();
        let written = commands::run_calc(
            &CrateInputs::default(),
            &config,
            format,
            None,
            fixed_time(),
            &mut out,
        )
        .unwrap()
        .unwrap();

        assert!(exports.is_dir());
        assert_eq!(written, exports.join(name));
        assert!(written.is_file());
    }
}

#[test]
fn calc_summary_reports_costs() {
    let mut out = Vec::new();
    commands::run_calc(
        &CrateInputs::default(),
        &default_config(),
        OutputFormat::Summary,
        None,
        fixed_time(),
        &mut out,
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Panels:"));
    assert!(text.contains("  Front "));
    assert!(text.contains("Klimps:      "));
    assert!(text.contains("Cost:        materials $"));
}

#[test]
fn calc_rejects_invalid_inputs() {
    let inputs = CrateInputs {
        product_height: 500.0,
        cleat_thickness: 0.1,
        ..CrateInputs::default()
    };
    let mut out = Vec::new();
    let err = commands::run_calc(
        &inputs,
        &default_config(),
        OutputFormat::Exp,
        None,
        fixed_time(),
        &mut out,
    )
    .unwrap_err();

    let calc = err.downcast_ref::<CalcError>().unwrap();
    assert_eq!(calc.violations().len(), 2);
    assert!(out.is_empty());
}

#[test]
fn quick_test_prints_three_cases() {
    let mut out = Vec::new();
    commands::run_quick_test(&default_config(), fixed_time(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Case 1: 20x20x100 @ 1000 lb"));
    assert!(lines[1].starts_with("Case 2: 96x48x30 @ 500 lb"));
    assert!(lines[2].starts_with("Case 3: 48x48x48 @ 300 lb"));
}
