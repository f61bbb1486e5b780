//! # autocrate_core - Shipping Crate Design Engine
//!
//! `autocrate_core` turns a product's size and weight into a complete
//! shipping crate design: overall dimensions, skids, plywood panel layouts
//! with cleat framing, floorboards, the 30 klimp fasteners, a bill of
//! materials, and the parameter list consumed by the CAD model.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take inputs and return results
//! - **JSON-First**: Inputs and results implement serde traits
//! - **Rich Errors**: Every invalid field is reported, not just the first
//! - **Deterministic**: Same inputs, same expression lines (bar the timestamp)
//!
//! ## Quick Start
//!
//! ```rust
//! use autocrate_core::{compute_design, CrateInputs};
//!
//! let inputs = CrateInputs {
//!     product_weight: 1500.0,
//!     ..CrateInputs::default()
//! };
//! let design = compute_design(&inputs).unwrap();
//!
//! for line in design.expressions.to_strings() {
//!     println!("{line}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`inputs`] - The validated input record
//! - [`design`] - The `compute_design` entry point
//! - [`calculations`] - Individual design stages
//! - [`expressions`] - CAD expression export
//! - [`orientation`] - Klimp orientation math
//! - [`materials`] - Lumber and plywood stock
//! - [`job`] / [`file_io`] - Saved jobs, input documents, atomic exports
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod design;
pub mod errors;
pub mod expressions;
pub mod file_io;
pub mod inputs;
pub mod job;
pub mod materials;
pub mod orientation;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::CostRates;
pub use design::{compute_design, compute_design_at, compute_design_with, CrateDesign};
pub use errors::{CalcError, CalcResult, FieldViolation};
pub use file_io::{load_inputs, load_job, save_expressions, save_job};
pub use inputs::{quick_test_cases, CrateInputs};
pub use job::CrateJob;
