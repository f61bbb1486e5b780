//! # Klimp Placement
//!
//! Places the L-bracket fasteners ("klimps") that tie the top and side panels
//! to their neighbours. The CAD model has exactly 30 klimp instances, so the
//! output is a fixed 30-slot array:
//!
//! - `KL_1`..`KL_10` on the top panel
//! - `KL_11`..`KL_20` on the left panel
//! - `KL_21`..`KL_30` on the right panel
//!
//! Slots with no placement are kept but suppressed, at the origin with the
//! identity orientation.
//!
//! ## Top panel
//!
//! Klimps go in the gaps between vertical cleats. Each gap loses half a cleat
//! width plus [`CLEAT_MARGIN_IN`] at both ends; a gap whose usable span beats
//! [`KLIMP_WIDTH_IN`] gets `max(1, ceil(span / 20))` klimps, one centered or
//! several spread edge to edge.
//!
//! ## Side panels
//!
//! The panel height is split into zones by the bottom cleat, each horizontal
//! plywood splice, and the top cleat. Every usable zone gets a row of
//! `max(1, ceil(length / 20))` klimps evenly inset along the panel length at
//! the zone's mid-height.

use serde::{Deserialize, Serialize};

use crate::orientation::{DirectionBasis, EulerAngles, Mounting, Quaternion, Vec3};

/// Total klimp instances in the CAD model
pub const KLIMP_SLOT_COUNT: usize = 30;

/// Slots reserved for each of top, left, and right
pub const SLOTS_PER_PANEL: usize = 10;

/// Bracket width; a usable span must exceed this (in)
pub const KLIMP_WIDTH_IN: f64 = 1.0;

/// Clear distance kept from a cleat edge (in)
pub const CLEAT_MARGIN_IN: f64 = 0.25;

/// Target spacing between klimps (in)
pub const TARGET_KLIMP_SPACING_IN: f64 = 20.0;

/// Panel a slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KlimpPanel {
    Top,
    Left,
    Right,
}

impl KlimpPanel {
    /// Slot groups in id order
    pub const ALL: [KlimpPanel; 3] = [KlimpPanel::Top, KlimpPanel::Left, KlimpPanel::Right];

    /// Id of the group's first slot
    pub fn first_id(&self) -> u32 {
        match self {
            KlimpPanel::Top => 1,
            KlimpPanel::Left => 11,
            KlimpPanel::Right => 21,
        }
    }

    pub fn mounting(&self) -> Mounting {
        match self {
            KlimpPanel::Top => Mounting::Top,
            KlimpPanel::Left => Mounting::Left,
            KlimpPanel::Right => Mounting::Right,
        }
    }

    fn group_index(&self) -> usize {
        match self {
            KlimpPanel::Top => 0,
            KlimpPanel::Left => 1,
            KlimpPanel::Right => 2,
        }
    }
}

/// One of the 30 klimp instances.
///
/// Orientation is held as a [`Mounting`]; the quaternion, axes, and Euler
/// angles are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "KlimpSlotRecord", from = "KlimpSlotRecord")]
pub struct KlimpSlot {
    /// 1..=30
    pub id: u32,
    pub panel: KlimpPanel,
    /// Absolute position in crate coordinates (in)
    pub position: Vec3,
    pub mounting: Mounting,
    pub suppressed: bool,
}

impl KlimpSlot {
    fn placed(id: u32, panel: KlimpPanel, position: Vec3) -> Self {
        KlimpSlot {
            id,
            panel,
            position,
            mounting: panel.mounting(),
            suppressed: false,
        }
    }

    fn suppressed(id: u32, panel: KlimpPanel) -> Self {
        KlimpSlot {
            id,
            panel,
            position: Vec3::ZERO,
            mounting: Mounting::Unmounted,
            suppressed: true,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.suppressed
    }

    pub fn quaternion(&self) -> Quaternion {
        self.mounting.quaternion()
    }

    pub fn direction_vectors(&self) -> DirectionBasis {
        self.mounting.basis()
    }

    pub fn euler_angles(&self) -> EulerAngles {
        self.mounting.euler_angles()
    }
}

/// Wire form of a slot, with the derived orientation spelled out.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct KlimpSlotRecord {
    id: u32,
    panel: KlimpPanel,
    position: Vec3,
    mounting: Mounting,
    suppressed: bool,
    quaternion: Quaternion,
    direction_vectors: DirectionBasis,
    euler_angles: EulerAngles,
}

impl From<KlimpSlot> for KlimpSlotRecord {
    fn from(slot: KlimpSlot) -> Self {
        KlimpSlotRecord {
            id: slot.id,
            panel: slot.panel,
            position: slot.position,
            mounting: slot.mounting,
            suppressed: slot.suppressed,
            quaternion: slot.quaternion(),
            direction_vectors: slot.direction_vectors(),
            euler_angles: slot.euler_angles(),
        }
    }
}

impl From<KlimpSlotRecord> for KlimpSlot {
    fn from(record: KlimpSlotRecord) -> Self {
        KlimpSlot {
            id: record.id,
            panel: record.panel,
            position: record.position,
            mounting: record.mounting,
            suppressed: record.suppressed,
        }
    }
}

/// Geometry the placer needs from the rest of the design.
#[derive(Debug, Clone, PartialEq)]
pub struct KlimpGeometry {
    /// Top panel width, across the crate (in)
    pub panel_width: f64,
    /// Side panel length, along the crate (in)
    pub panel_length: f64,
    /// Wall height (in)
    pub panel_height: f64,
    pub cleat_member_width: f64,
    pub cleat_thickness: f64,
    pub panel_thickness: f64,
    /// Top panel intermediate cleat centerlines (in from the panel edge)
    pub top_intermediate_cleats: Vec<f64>,
    /// Side panel horizontal splice heights (in from the panel bottom)
    pub side_horizontal_splices: Vec<f64>,
    pub center_x: f64,
    pub center_y: f64,
    pub ground_z: f64,
}

/// Klimp X-offsets across the top panel, measured from its left edge.
pub fn top_placements(panel_width: f64, cleat_width: f64, intermediate_cleats: &[f64]) -> Vec<f64> {
    let half_cleat = cleat_width / 2.0;

    let mut centerlines = Vec::with_capacity(intermediate_cleats.len() + 2);
    centerlines.push(half_cleat);
    centerlines.extend_from_slice(intermediate_cleats);
    centerlines.push(panel_width - half_cleat);
    centerlines.sort_by(f64::total_cmp);

    let mut placements = Vec::new();
    for pair in centerlines.windows(2) {
        let left = pair[0] + half_cleat + CLEAT_MARGIN_IN;
        let right = pair[1] - half_cleat - CLEAT_MARGIN_IN;
        let span = right - left;
        if span <= KLIMP_WIDTH_IN {
            continue;
        }

        let needed = ((span / TARGET_KLIMP_SPACING_IN).ceil() as u32).max(1);
        if needed == 1 {
            placements.push((left + right) / 2.0);
        } else {
            let spacing = span / f64::from(needed - 1);
            placements.extend((0..needed).map(|j| left + f64::from(j) * spacing));
        }
    }
    placements
}

/// Klimp (along-length, height) offsets on a side panel.
pub fn side_placements(
    panel_length: f64,
    panel_height: f64,
    cleat_width: f64,
    horizontal_splices: &[f64],
) -> Vec<(f64, f64)> {
    let half_cleat = cleat_width / 2.0;

    let mut boundaries = Vec::with_capacity(horizontal_splices.len() + 2);
    boundaries.push(half_cleat);
    boundaries.extend_from_slice(horizontal_splices);
    boundaries.push(panel_height - half_cleat);
    boundaries.sort_by(f64::total_cmp);

    let per_row = ((panel_length / TARGET_KLIMP_SPACING_IN).ceil() as u32).max(1);
    let spacing = panel_length / f64::from(per_row + 1);

    let mut placements = Vec::new();
    for pair in boundaries.windows(2) {
        let bottom = pair[0] + half_cleat + CLEAT_MARGIN_IN;
        let top = pair[1] - half_cleat - CLEAT_MARGIN_IN;
        if top - bottom <= KLIMP_WIDTH_IN {
            continue;
        }

        let mid_height = (bottom + top) / 2.0;
        placements.extend((1..=per_row).map(|j| (spacing * f64::from(j), mid_height)));
    }
    placements
}

/// The fixed 30-slot klimp array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KlimpLayout {
    slots: [KlimpSlot; KLIMP_SLOT_COUNT],
}

impl KlimpLayout {
    /// All slots, ordered by id
    pub fn slots(&self) -> &[KlimpSlot; KLIMP_SLOT_COUNT] {
        &self.slots
    }

    /// Slot by id (1..=30)
    pub fn slot(&self, id: u32) -> Option<&KlimpSlot> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.slots.get(index)
    }

    /// The ten slots belonging to one panel
    pub fn panel_slots(&self, panel: KlimpPanel) -> &[KlimpSlot] {
        let start = panel.group_index() * SLOTS_PER_PANEL;
        &self.slots[start..start + SLOTS_PER_PANEL]
    }

    pub fn iter(&self) -> impl Iterator<Item = &KlimpSlot> {
        self.slots.iter()
    }

    /// Number of unsuppressed slots
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }
}

/// Place all 30 klimps.
pub fn calculate(geometry: &KlimpGeometry) -> KlimpLayout {
    let cleat_width = geometry.cleat_member_width;
    let half_width = geometry.panel_width / 2.0;
    let wall_offset = half_width + geometry.panel_thickness + geometry.cleat_thickness;

    let top_z = geometry.ground_z
        + geometry.panel_height
        + geometry.panel_thickness
        + geometry.cleat_thickness
        + cleat_width;
    let left_x = geometry.center_x - wall_offset;
    let right_x = geometry.center_x + wall_offset;

    let top: Vec<Vec3> = top_placements(
        geometry.panel_width,
        cleat_width,
        &geometry.top_intermediate_cleats,
    )
    .into_iter()
    .map(|x| Vec3::new(geometry.center_x + x - half_width, geometry.center_y, top_z))
    .collect();

    let sides = side_placements(
        geometry.panel_length,
        geometry.panel_height,
        cleat_width,
        &geometry.side_horizontal_splices,
    );
    let side_position = |wall_x: f64| -> Vec<Vec3> {
        sides
            .iter()
            .map(|(y, z)| Vec3::new(wall_x, geometry.center_y + y, geometry.ground_z + z))
            .collect()
    };
    let left = side_position(left_x);
    let right = side_position(right_x);

    let groups = [&top, &left, &right];
    let slots = std::array::from_fn(|index| {
        let panel = KlimpPanel::ALL[index / SLOTS_PER_PANEL];
        let offset = index % SLOTS_PER_PANEL;
        let id = panel.first_id() + offset as u32;
        match groups[panel.group_index()].get(offset) {
            Some(position) => KlimpSlot::placed(id, panel, *position),
            None => KlimpSlot::suppressed(id, panel),
        }
    });

    let layout = KlimpLayout { slots };
    tracing::debug!(
        top = top.len().min(SLOTS_PER_PANEL),
        left = left.len().min(SLOTS_PER_PANEL),
        right = right.len().min(SLOTS_PER_PANEL),
        active = layout.active_count(),
        "klimps placed"
    );
    layout
}
