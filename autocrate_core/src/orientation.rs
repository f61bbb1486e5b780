//! # Klimp Orientation
//!
//! A klimp's orientation is fully determined by the panel it is mounted on:
//! a yaw about the crate's vertical (Z) axis, plus which way its long leg
//! points. [`Mounting`] is the only orientation value stored on a slot; the
//! quaternion, direction basis, and legacy Euler angles written to the CAD
//! model are all derived from it, so they cannot disagree.
//!
//! | Mounting  | Yaw   | X axis     | Y axis     | Z axis     |
//! |-----------|-------|------------|------------|------------|
//! | Top       | 0°    | (1, 0, 0)  | (0, 1, 0)  | (0, 0, -1) |
//! | Left      | -90°  | (0, -1, 0) | (1, 0, 0)  | (0, 0, 1)  |
//! | Right     | +90°  | (0, 1, 0)  | (-1, 0, 0) | (0, 0, 1)  |
//! | Unmounted | 0°    | (1, 0, 0)  | (0, 1, 0)  | (0, 0, 1)  |
//!
//! On the top panel the long leg runs down into the crate, so the bracket's
//! Z axis is flipped while its rotation stays the identity.

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Components this close to an integer are snapped to it
const SNAP_EPSILON: f64 = 1e-12;

fn snap(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() < SNAP_EPSILON {
        // `+ 0.0` turns -0.0 into 0.0
        nearest + 0.0
    } else {
        value
    }
}

/// A 3D vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const UNIT_X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    /// Components as an array, in X, Y, Z order
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<Vector3<f64>> for Vec3 {
    fn from(v: Vector3<f64>) -> Self {
        Vec3::new(snap(v.x), snap(v.y), snap(v.z))
    }
}

/// Unit quaternion (scalar-first)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Rotation of `radians` about the Z axis
    pub fn about_z(radians: f64) -> Self {
        Quaternion::from(&yaw_rotation(radians))
    }

    pub fn norm(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl From<&UnitQuaternion<f64>> for Quaternion {
    fn from(q: &UnitQuaternion<f64>) -> Self {
        let imag = q.imag();
        Quaternion {
            w: snap(q.scalar()),
            x: snap(imag.x),
            y: snap(imag.y),
            z: snap(imag.z),
        }
    }
}

fn yaw_rotation(radians: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), radians)
}

/// Local axes of a placed klimp, in crate coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionBasis {
    pub x: Vec3,
    pub y: Vec3,
    pub z: Vec3,
}

impl DirectionBasis {
    pub const STANDARD: DirectionBasis = DirectionBasis {
        x: Vec3::UNIT_X,
        y: Vec3::UNIT_Y,
        z: Vec3::UNIT_Z,
    };

    /// Axes in X, Y, Z order
    pub fn axes(&self) -> [Vec3; 3] {
        [self.x, self.y, self.z]
    }
}

/// Legacy Euler angles, degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EulerAngles {
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
}

/// Where a klimp is mounted, which fixes its orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mounting {
    Top,
    Left,
    Right,
    /// Suppressed slot; identity orientation
    Unmounted,
}

impl Mounting {
    /// Rotation about the crate Z axis, degrees
    pub fn yaw_degrees(&self) -> f64 {
        match self {
            Mounting::Top | Mounting::Unmounted => 0.0,
            Mounting::Left => -90.0,
            Mounting::Right => 90.0,
        }
    }

    /// True when the long leg points down into the crate
    fn leg_points_down(&self) -> bool {
        matches!(self, Mounting::Top)
    }

    pub fn quaternion(&self) -> Quaternion {
        match self {
            Mounting::Top | Mounting::Unmounted => Quaternion::IDENTITY,
            _ => Quaternion::about_z(self.yaw_degrees().to_radians()),
        }
    }

    pub fn basis(&self) -> DirectionBasis {
        let rotation = yaw_rotation(self.yaw_degrees().to_radians());
        let z = if self.leg_points_down() {
            Vec3::new(0.0, 0.0, -1.0)
        } else {
            Vec3::UNIT_Z
        };
        DirectionBasis {
            x: Vec3::from(rotation * Vector3::x()),
            y: Vec3::from(rotation * Vector3::y()),
            z,
        }
    }

    pub fn euler_angles(&self) -> EulerAngles {
        EulerAngles {
            rx: 0.0,
            ry: 0.0,
            rz: self.yaw_degrees(),
        }
    }
}
