use nalgebra as na;
use rapier3d::parry::{
    query::{Ray, RayCast},
    shape::Cuboid,
};
use serde::{Deserialize, Serialize};

use super::{
    floor::Floor,
    types::{Axis, Iso, Material, Vec3},
    wall::Wall,
};

/// Axis-aligned solid. `base` is the minimum corner; `width` runs along +x, `height` along
/// +y and `depth` along +z.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolidBox {
    pub base: Vec3,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    #[serde(default)]
    pub material: Material,
}

/// First face of a box struck by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxContact {
    pub distance: f32,
    pub plane: Axis,
}

impl SolidBox {
    pub fn new(base: Vec3, width: f32, height: f32, depth: f32) -> Self {
        Self {
            base,
            width,
            height,
            depth,
            material: Material::Standard,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth) * 0.5
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.base + self.half_extents()
    }

    /// The four vertical faces, each a wall made of the box's material.
    pub fn side_walls(&self) -> [Wall; 4] {
        let b = self.base;
        [
            Wall::new(b, Axis::Z, self.width, self.height),
            Wall::new(b + Vec3::new(0.0, 0.0, self.depth), Axis::Z, self.width, self.height),
            Wall::new(b, Axis::X, self.depth, self.height),
            Wall::new(b + Vec3::new(self.width, 0.0, 0.0), Axis::X, self.depth, self.height),
        ]
        .map(|w| w.with_material(self.material))
    }

    /// Walkable top face.
    pub fn top(&self) -> Floor {
        Floor::new(
            self.base + Vec3::new(0.0, self.height, 0.0),
            self.width,
            self.depth,
        )
    }

    /// Underside; stops the head of a player jumping from below.
    pub fn bottom(&self) -> Floor {
        Floor::new(self.base, self.width, self.depth)
    }

    /// Nearest face boundary crossed by `ray`.
    ///
    /// A ray starting inside the box reports the face it leaves through.
    pub fn intersect_ray(&self, ray: &Ray, max_distance: f32) -> Option<BoxContact> {
        let cuboid = Cuboid::new(self.half_extents());
        let c = self.center();
        let iso = Iso::from_parts(na::Translation3::new(c.x, c.y, c.z), na::UnitQuaternion::identity());
        cuboid
            .cast_ray_and_get_normal(&iso, ray, max_distance, false)
            .map(|hit| BoxContact {
                distance: hit.time_of_impact,
                plane: Axis::dominant(&hit.normal),
            })
    }
}
