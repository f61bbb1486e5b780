//! # Crate Jobs
//!
//! A `CrateJob` is the saved form of one crate design request: who it is
//! for, when it was made, and the inputs to design it from. Jobs serialize to
//! `.acj` (AutoCrate job) files as human-readable JSON. The design itself is
//! never stored; it is recomputed from the inputs.
//!
//! ## Structure
//!
//! ```text
//! CrateJob
//! ├── meta: JobMetadata (version, job number, customer, timestamps)
//! └── inputs: CrateInputs
//! ```
//!
//! ## Example
//!
//! ```rust
//! use autocrate_core::job::CrateJob;
//!
//! let job = CrateJob::new("24-118", "Acme Instruments");
//! let json = serde_json::to_string_pretty(&job).unwrap();
//! assert!(json.contains("24-118"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::inputs::CrateInputs;

/// Current schema version for .acj files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// A saved crate design request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrateJob {
    pub meta: JobMetadata,
    pub inputs: CrateInputs,
}

impl CrateJob {
    /// New job with the default crate inputs.
    pub fn new(job_id: impl Into<String>, customer: impl Into<String>) -> Self {
        CrateJob::with_inputs(job_id, customer, CrateInputs::default())
    }

    pub fn with_inputs(
        job_id: impl Into<String>,
        customer: impl Into<String>,
        inputs: CrateInputs,
    ) -> Self {
        let now = Utc::now();
        CrateJob {
            meta: JobMetadata {
                version: SCHEMA_VERSION.to_string(),
                job_id: job_id.into(),
                customer: customer.into(),
                notes: String::new(),
                created: now,
                modified: now,
            },
            inputs,
        }
    }

    /// Replace the inputs and mark the job modified.
    pub fn set_inputs(&mut self, inputs: CrateInputs) {
        self.inputs = inputs;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for CrateJob {
    fn default() -> Self {
        CrateJob::new("", "")
    }
}

/// Job metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Job/quote number
    pub job_id: String,

    pub customer: String,

    #[serde(default)]
    pub notes: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_creation() {
        let job = CrateJob::new("24-118", "Acme Instruments");
        assert_eq!(job.meta.job_id, "24-118");
        assert_eq!(job.meta.customer, "Acme Instruments");
        assert_eq!(job.meta.version, SCHEMA_VERSION);
        assert_eq!(job.inputs, CrateInputs::default());
        assert_eq!(job.meta.created, job.meta.modified);
    }

    #[test]
    fn test_set_inputs_touches() {
        let mut job = CrateJob::new("24-118", "Acme");
        let created = job.meta.created;
        let inputs = CrateInputs {
            product_weight: 1500.0,
            ..CrateInputs::default()
        };
        job.set_inputs(inputs);
        assert_eq!(job.inputs.product_weight, 1500.0);
        assert!(job.meta.modified >= created);
    }

    #[test]
    fn test_job_serialization() {
        let job = CrateJob::new("24-042", "Test Customer");
        let json = serde_json::to_string_pretty(&job).unwrap();
        assert!(json.contains("Test Customer"));
        assert!(json.contains("product_length"));

        let roundtrip: CrateJob = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, job);
    }

    #[test]
    fn test_notes_optional() {
        let json = r#"{
            "meta": {
                "version": "0.1.0",
                "job_id": "1",
                "customer": "c",
                "created": "2024-01-01T00:00:00Z",
                "modified": "2024-01-01T00:00:00Z"
            },
            "inputs": {
                "product_length": 96.0,
                "product_width": 48.0,
                "product_height": 30.0,
                "product_weight": 500.0,
                "clearance_all_sides": 2.0,
                "clearance_top": 2.0,
                "panel_thickness": 0.25,
                "cleat_thickness": 0.75,
                "cleat_member_width": 3.5
            }
        }"#;
        let job: CrateJob = serde_json::from_str(json).unwrap();
        assert!(job.meta.notes.is_empty());
    }
}
