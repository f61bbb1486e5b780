//! # File I/O Module
//!
//! Handles job and export files with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure job schema compatibility
//! - **Input documents**: Bare `CrateInputs` in JSON or TOML
//!
//! ## File Formats
//!
//! | Extension | Contents                                 |
//! |-----------|------------------------------------------|
//! | `.acj`    | [`CrateJob`] as pretty JSON              |
//! | `.json`   | bare [`CrateInputs`]                     |
//! | `.toml`   | bare [`CrateInputs`]                     |
//! | `.exp`    | CAD expressions with export header       |
//!
//! ## Example
//!
//! ```rust,no_run
//! use autocrate_core::file_io::{save_job, load_job};
//! use autocrate_core::job::CrateJob;
//! use std::path::Path;
//!
//! let job = CrateJob::new("24-118", "Acme Instruments");
//! save_job(&job, Path::new("crate.acj"))?;
//!
//! let loaded = load_job(Path::new("crate.acj"))?;
//! assert_eq!(loaded.meta.job_id, "24-118");
//! # Ok::<(), autocrate_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::errors::{CalcError, CalcResult};
use crate::expressions::ExpressionSheet;
use crate::inputs::CrateInputs;
use crate::job::{CrateJob, SCHEMA_VERSION};

/// Job file extension
pub const JOB_EXTENSION: &str = "acj";

/// Expression export extension
pub const EXPRESSIONS_EXTENSION: &str = "exp";

/// Temp path next to `path`, e.g. `crate.acj` -> `crate.acj.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write `contents` to `path` with atomic write semantics.
///
/// The save process:
/// 1. Write to a temporary file (.tmp)
/// 2. Sync to disk (fsync)
/// 3. Rename .tmp over the target (atomic on most filesystems)
pub fn write_atomic(path: &Path, contents: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "file saved");
    Ok(())
}

fn read_to_string(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

/// Save a job as pretty JSON.
pub fn save_job(job: &CrateJob, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(job).map_err(|e| CalcError::serialization(e.to_string()))?;
    write_atomic(path, json.as_bytes())
}

/// Load a job, checking its schema version.
///
/// # Returns
///
/// * `Ok(CrateJob)` - Successfully loaded job
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_job(path: &Path) -> CalcResult<CrateJob> {
    let contents = read_to_string(path)?;

    let job: CrateJob = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&job.meta.version)?;
    Ok(job)
}

/// Load crate inputs from a job, JSON, or TOML file, chosen by extension.
///
/// The inputs are returned as written; validation happens when the design
/// is computed.
pub fn load_inputs(path: &Path) -> CalcResult<CrateInputs> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        JOB_EXTENSION => load_job(path).map(|job| job.inputs),
        "toml" => {
            let contents = read_to_string(path)?;
            toml::from_str(&contents).map_err(|e| {
                CalcError::serialization(format!("Invalid TOML in {}: {}", path.display(), e))
            })
        }
        _ => {
            let contents = read_to_string(path)?;
            serde_json::from_str(&contents).map_err(|e| {
                CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
            })
        }
    }
}

/// Export file name for a timestamp, e.g. `AutoCrate_2024-03-05_140709_ASTM.exp`
pub fn export_file_name(exported_at: DateTime<Utc>) -> String {
    format!(
        "AutoCrate_{}_ASTM.{}",
        exported_at.format("%Y-%m-%d_%H%M%S"),
        EXPRESSIONS_EXTENSION
    )
}

/// Write an expression sheet with its export framing.
///
/// When `path` is an existing directory the file is created inside it under
/// [`export_file_name`]. Returns the path written.
pub fn save_expressions(
    sheet: &ExpressionSheet,
    path: &Path,
    exported_at: DateTime<Utc>,
) -> CalcResult<PathBuf> {
    let target = if path.is_dir() {
        path.join(export_file_name(exported_at))
    } else {
        path.to_path_buf()
    };

    write_atomic(&target, sheet.render_file(exported_at).as_bytes())?;
    Ok(target)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    // Major version must match
    if file_major != current_major {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor is a breaking change
    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::compute_design_at;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roundtrip.acj");

        let job = CrateJob::new("TEST-001", "Test Customer");
        save_job(&job, &path).unwrap();

        let loaded = load_job(&path).unwrap();
        assert_eq!(loaded, job);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("atomic.acj");

        save_job(&CrateJob::default(), &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());
    }

    #[test]
    fn test_tmp_path_keeps_extension() {
        assert_eq!(
            tmp_path_for(Path::new("/jobs/crate.acj")),
            Path::new("/jobs/crate.acj.tmp")
        );
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_load_rejects_newer_job() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("newer.acj");

        let mut job = CrateJob::default();
        job.meta.version = "0.9.0".to_string();
        save_job(&job, &path).unwrap();

        let err = load_job(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_load_inputs_by_extension() {
        let dir = TempDir::new().unwrap();

        let toml_path = dir.path().join("crate.toml");
        fs::write(&toml_path, "product_length = 72.0\nproduct_weight = 1500.0\n").unwrap();
        let from_toml = load_inputs(&toml_path).unwrap();
        assert_eq!(from_toml.product_length, 72.0);
        assert_eq!(from_toml.product_weight, 1500.0);
        assert_eq!(from_toml.product_width, CrateInputs::default().product_width);

        let json_path = dir.path().join("crate.json");
        fs::write(&json_path, r#"{"productWidth": 40.0}"#).unwrap();
        assert_eq!(load_inputs(&json_path).unwrap().product_width, 40.0);

        let job_path = dir.path().join("crate.acj");
        let job = CrateJob::with_inputs(
            "1",
            "c",
            CrateInputs {
                product_height: 55.0,
                ..CrateInputs::default()
            },
        );
        save_job(&job, &job_path).unwrap();
        assert_eq!(load_inputs(&job_path).unwrap().product_height, 55.0);
    }

    #[test]
    fn test_load_inputs_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "product_length = [").unwrap();
        let err = load_inputs(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let missing = load_inputs(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(missing.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name(fixed_time()),
            "AutoCrate_2024-03-05_140709_ASTM.exp"
        );
    }

    #[test]
    fn test_save_expressions_into_directory() {
        let dir = TempDir::new().unwrap();
        let design = compute_design_at(&CrateInputs::default(), fixed_time()).unwrap();

        let written = save_expressions(&design.expressions, dir.path(), fixed_time()).unwrap();
        assert_eq!(written, dir.path().join("AutoCrate_2024-03-05_140709_ASTM.exp"));

        let text = fs::read_to_string(&written).unwrap();
        assert!(text.starts_with("// AutoCrate - NX Expressions File\n"));
        assert!(text.contains("[Inch]CRATE_Overall_Length = "));
        assert!(text.trim_end().ends_with(&format!(
            "// Total variables: {}",
            design.expressions.variable_count()
        )));
    }
}
