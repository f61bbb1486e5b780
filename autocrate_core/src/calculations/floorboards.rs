//! # Floorboard Layout
//!
//! Greedy left-to-right fill of the crate floor with the widest stock board
//! that still fits. Filling stops once the remaining width is at most
//! [`MAX_CENTER_GAP_IN`]; whatever is left is reported as the center gap.

use serde::{Deserialize, Serialize};

use crate::materials::lumber_sizes::widest_floorboard_within;

/// Remaining width at or below which filling stops (in)
pub const MAX_CENTER_GAP_IN: f64 = 0.5;

/// One floorboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Floorboard {
    pub width: f64,
    pub length: f64,
    /// Left edge offset from the floor origin (in)
    pub position_x: f64,
}

/// Ordered floorboards plus the unfilled remainder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorboardLayout {
    pub boards: Vec<Floorboard>,
    /// Floor width being filled (in)
    pub total_width: f64,
    /// Width left unfilled (in)
    pub center_gap: f64,
}

impl FloorboardLayout {
    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    /// Total board length (in)
    pub fn total_board_length(&self) -> f64 {
        self.boards.iter().map(|b| b.length).sum()
    }
}

/// Lay out floorboards across `floor_width`, each `board_length` long.
pub fn calculate(floor_width: f64, board_length: f64) -> FloorboardLayout {
    let mut boards = Vec::new();
    let mut remaining = floor_width;
    let mut position_x = 0.0;

    while remaining > MAX_CENTER_GAP_IN {
        let width = widest_floorboard_within(remaining);
        boards.push(Floorboard {
            width,
            length: board_length,
            position_x,
        });
        remaining -= width;
        position_x += width;
    }

    tracing::debug!(boards = boards.len(), center_gap = remaining, "floorboards laid out");

    FloorboardLayout {
        boards,
        total_width: floor_width,
        center_gap: remaining,
    }
}
