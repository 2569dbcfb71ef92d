use rapier3d::parry::query::Ray;
use serde::{Deserialize, Serialize};

use super::types::{Vec3, interval_gap};

/// Horizontal rectangle at a fixed height. `width` runs along +x, `depth` along +z.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub start: Vec3,
    pub width: f32,
    pub depth: f32,
}

impl Floor {
    pub fn new(start: Vec3, width: f32, depth: f32) -> Self {
        Self {
            start,
            width,
            depth,
        }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.start.y
    }

    /// Euclidean distance from `(x, z)` to the rectangle, zero when above it.
    #[inline]
    pub fn horizontal_distance(&self, x: f32, z: f32) -> f32 {
        let dx = interval_gap(x, self.start.x, self.start.x + self.width);
        let dz = interval_gap(z, self.start.z, self.start.z + self.depth);
        (dx * dx + dz * dz).sqrt()
    }

    /// Does this floor hold up `point` given a horizontal reach and a vertical tolerance?
    #[inline]
    pub fn supports(&self, point: &Vec3, search_radius: f32, vertical_tolerance: f32) -> bool {
        (point.y - self.height()).abs() <= vertical_tolerance
            && self.horizontal_distance(point.x, point.z) <= search_radius
    }

    /// Distance along `ray` to the floor plane, if the crossing lies on the rectangle.
    pub fn intersect_ray(&self, ray: &Ray, max_distance: f32) -> Option<f32> {
        if ray.dir.y == 0.0 {
            return None;
        }
        let t = (self.height() - ray.origin.y) / ray.dir.y;
        if !(0.0..=max_distance).contains(&t) {
            return None;
        }
        let p = ray.point_at(t);
        (self.horizontal_distance(p.x, p.z) == 0.0).then_some(t)
    }
}
