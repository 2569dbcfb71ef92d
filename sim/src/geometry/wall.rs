use nalgebra as na;
use rapier3d::parry::{bounding_volume::Aabb, query::Ray};
use serde::{Deserialize, Serialize};

use super::types::{Axis, Material, Vec3, overlaps_open};

/// Vertical rectangle lying in an axis-aligned plane.
///
/// - `normal == Axis::Z`: the plane `z = start.z`, spanning `start.x ..= start.x + length`.
/// - `normal == Axis::X`: the plane `x = start.x`, spanning `start.z ..= start.z + length`.
///
/// In both cases the wall rises from `start.y` to `start.y + height`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub start: Vec3,
    pub normal: Axis,
    pub length: f32,
    pub height: f32,
    #[serde(default)]
    pub material: Material,
}

impl Wall {
    pub fn new(start: Vec3, normal: Axis, length: f32, height: f32) -> Self {
        debug_assert!(normal != Axis::Y, "walls are vertical");
        Self {
            start,
            normal,
            length,
            height,
            material: Material::Standard,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Coordinate of the wall plane along its normal.
    #[inline]
    pub fn base(&self) -> f32 {
        self.normal.of(&self.start)
    }

    /// Horizontal extent along the wall.
    #[inline]
    pub fn span(&self) -> (f32, f32) {
        let lo = self.normal.lateral().of(&self.start);
        (lo, lo + self.length)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.start.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.start.y + self.height
    }

    /// Does a body standing at `feet` (cylinder of `radius` up to `body_top`) collide with
    /// this wall when its center sits on the wall plane?
    ///
    /// Only the lateral and vertical extents are checked; the caller decides the plane
    /// crossing. Walls whose top is at most `step_height` above the feet are climbable.
    pub fn blocks_volume(&self, feet: &Vec3, radius: f32, body_top: f32, step_height: f32) -> bool {
        let (lo, hi) = self.span();
        let lateral = self.normal.lateral().of(feet);
        overlaps_open(lateral, radius, lo, hi)
            && self.bottom() < body_top
            && self.top() > feet.y + step_height
    }

    /// Does the body's footprint cross the wall plane within the wall's height band?
    ///
    /// Such a body runs into the wall's end edges when it moves along the wall.
    pub fn straddles(&self, feet: &Vec3, radius: f32, body_top: f32, step_height: f32) -> bool {
        let base = self.base();
        overlaps_open(self.normal.of(feet), radius, base, base)
            && self.bottom() < body_top
            && self.top() > feet.y + step_height
    }

    /// Distance along `ray` to the wall, if the plane crossing lies on the rectangle.
    pub fn intersect_ray(&self, ray: &Ray, max_distance: f32) -> Option<f32> {
        let d = self.normal.of(&ray.dir);
        if d == 0.0 {
            return None;
        }
        let t = (self.base() - self.normal.of(&ray.origin.coords)) / d;
        if !(0.0..=max_distance).contains(&t) {
            return None;
        }
        let p = ray.point_at(t).coords;
        let (lo, hi) = self.span();
        let lateral = self.normal.lateral().of(&p);
        (lateral >= lo && lateral <= hi && p.y >= self.bottom() && p.y <= self.top()).then_some(t)
    }

    /// World-space bounds (zero thickness along the normal).
    pub fn aabb(&self) -> Aabb {
        let (lo, hi) = self.span();
        let (mins, maxs) = match self.normal {
            Axis::Z => (
                na::Point3::new(lo, self.bottom(), self.base()),
                na::Point3::new(hi, self.top(), self.base()),
            ),
            _ => (
                na::Point3::new(self.base(), self.bottom(), lo),
                na::Point3::new(self.base(), self.top(), hi),
            ),
        };
        Aabb::new(mins, maxs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::types::Point3;

    fn z_wall() -> Wall {
        Wall::new(Vec3::new(-200.0, -10.0, 100.0), Axis::Z, 400.0, 300.0)
    }

    #[test]
    fn ray_hits_plane_within_rectangle() {
        let wall = z_wall();
        let ray = Ray::new(Point3::new(0.0, 50.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(wall.intersect_ray(&ray, 1000.0), Some(100.0));

        let above = Ray::new(Point3::new(0.0, 500.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(wall.intersect_ray(&above, 1000.0), None);

        let parallel = Ray::new(Point3::new(0.0, 50.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(wall.intersect_ray(&parallel, 1000.0), None);

        let behind = Ray::new(Point3::new(0.0, 50.0, 200.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(wall.intersect_ray(&behind, 1000.0), None);
    }

    #[test]
    fn short_walls_are_climbable() {
        let low = Wall::new(Vec3::new(0.0, 0.0, 10.0), Axis::Z, 100.0, 20.0);
        let feet = Vec3::new(50.0, 0.0, 0.0);
        assert!(!low.blocks_volume(&feet, 30.0, 190.0, 20.0));
        assert!(low.blocks_volume(&feet, 30.0, 190.0, 19.0));
    }

    #[test]
    fn lateral_overlap_is_strict() {
        let wall = Wall::new(Vec3::new(0.0, 0.0, 10.0), Axis::Z, 100.0, 200.0);
        assert!(!wall.blocks_volume(&Vec3::new(-30.0, 0.0, 0.0), 30.0, 190.0, 20.0));
        assert!(wall.blocks_volume(&Vec3::new(-29.0, 0.0, 0.0), 30.0, 190.0, 20.0));
    }

    #[test]
    fn straddle_needs_plane_crossing_and_height() {
        let wall = Wall::new(Vec3::new(0.0, 0.0, 50.0), Axis::Z, 100.0, 300.0);
        assert!(wall.straddles(&Vec3::new(-100.0, 0.0, 40.0), 30.0, 190.0, 20.0));
        assert!(!wall.straddles(&Vec3::new(-100.0, 0.0, 20.0), 30.0, 190.0, 20.0));
        assert!(!wall.straddles(&Vec3::new(-100.0, 300.0, 40.0), 30.0, 190.0, 20.0));
    }

    #[test]
    fn aabb_is_flat_along_normal() {
        let wall = Wall::new(Vec3::new(5.0, 0.0, 1.0), Axis::X, 10.0, 3.0);
        let aabb = wall.aabb();
        assert_eq!(aabb.mins.x, aabb.maxs.x);
        assert_eq!((aabb.mins.z, aabb.maxs.z), (1.0, 11.0));
    }
}
