/*!
Math aliases and small enums shared by every geometry primitive.

This module contains no algorithms. Units are abstract world units with
x and z horizontal and y pointing up.
*/

use nalgebra as na;
use serde::{Deserialize, Serialize};

use crate::constants::{ANTI_FORCE_REINFORCED, ANTI_FORCE_STANDARD, ANTI_FORCE_THIN};

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Point3 = na::Point3<f32>;
pub type Iso = na::Isometry3<f32>;

/// World axis. Used as the normal of an axis-aligned plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component of `v` along this axis.
    #[inline]
    pub fn of(self, v: &Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// The other horizontal axis. `Y` maps to itself.
    #[inline]
    pub fn lateral(self) -> Axis {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
            Axis::Y => Axis::Y,
        }
    }

    /// Axis whose unit vector is closest to `normal`.
    pub fn dominant(normal: &Vec3) -> Axis {
        let (x, y, z) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
        if y >= x && y >= z {
            Axis::Y
        } else if x >= z {
            Axis::X
        } else {
            Axis::Z
        }
    }
}

/// What a wall or box is made of. Decides how much penetration power a shot loses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Thin,
    #[default]
    Standard,
    Reinforced,
    /// Map edge. Always stops a shot.
    Boundary,
}

impl Material {
    #[inline]
    pub fn anti_force(self) -> i32 {
        match self {
            Material::Thin => ANTI_FORCE_THIN,
            Material::Standard => ANTI_FORCE_STANDARD,
            Material::Reinforced => ANTI_FORCE_REINFORCED,
            Material::Boundary => i32::MAX,
        }
    }
}

/// Distance outside the closed interval `[lo, hi]`, zero when inside.
#[inline]
pub(crate) fn interval_gap(value: f32, lo: f32, hi: f32) -> f32 {
    (lo - value).max(value - hi).max(0.0)
}

/// Strict overlap of the open interval `(center - half, center + half)` with `[lo, hi]`.
#[inline]
pub(crate) fn overlaps_open(center: f32, half: f32, lo: f32, hi: f32) -> bool {
    center - half < hi && center + half > lo
}
