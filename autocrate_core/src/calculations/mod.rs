//! # Crate Design Stages
//!
//! Each stage of the design pipeline lives in its own module and follows the
//! same pattern:
//!
//! - plain, JSON-serializable result types
//! - a pure `calculate(...)` function with no I/O and no shared state
//!
//! Inputs are validated once, up front, by [`crate::design::compute_design`];
//! after that every stage is total.
//!
//! ## Stages
//!
//! - [`dimensions`] - internal envelope, overall size, per-panel sizes
//! - [`skids`] - skid lumber, count, and spacing from product weight
//! - [`plywood_layout`] - sheet orientation choice and clipped sheet tiling
//! - [`panels`] - plywood plus cleat framing per panel
//! - [`floorboards`] - greedy floorboard fill
//! - [`klimps`] - the fixed 30-slot fastener array
//! - [`summary`] - bill of materials and cost estimate

pub mod dimensions;
pub mod floorboards;
pub mod klimps;
pub mod panels;
pub mod plywood_layout;
pub mod skids;
pub mod summary;

// Re-export commonly used types
pub use dimensions::{PanelDimensions, PanelSize, PanelType};
pub use floorboards::{Floorboard, FloorboardLayout};
pub use klimps::{KlimpLayout, KlimpPanel, KlimpSlot};
pub use panels::{CleatSpec, CleatType, PanelResult};
pub use plywood_layout::{MaterialEfficiency, PlywoodLayout, PlywoodSheet};
pub use skids::SkidResult;
pub use summary::{CostRates, MaterialSummary};
