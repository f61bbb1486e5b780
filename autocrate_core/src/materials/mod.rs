//! # Materials
//!
//! Stock material catalogs for crate construction:
//!
//! - **Lumber**: skid sizes by trade name and 2x floorboard widths
//! - **Plywood**: standard 4'x8' sheets and how they hang on a panel
//!
//! ## Example
//!
//! ```rust
//! use autocrate_core::materials::{LumberSize, SheetOrientation};
//!
//! assert_eq!(LumberSize::L4x4.actual_dimensions(), (3.5, 3.5));
//! assert_eq!(SheetOrientation::Rotated.sheet_dimensions(), (96.0, 48.0));
//! ```

pub mod lumber_sizes;
pub mod plywood;

pub use lumber_sizes::{LumberSize, FLOORBOARD_WIDTHS_IN};
pub use plywood::{SheetOrientation, SHEET_HEIGHT_IN, SHEET_WIDTH_IN};
