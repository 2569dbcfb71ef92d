use rapier3d::parry::query::Ray;
use serde::{Deserialize, Serialize};

use super::{
    floor::Floor,
    ramp::Ramp,
    solid_box::SolidBox,
    types::{Axis, Material, Vec3},
    wall::Wall,
};

/// One piece of static map geometry, as handed over by a map loader.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Floor(Floor),
    Wall(Wall),
    Box(SolidBox),
    Ramp(Ramp),
}

/// Where a ray met a piece of geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayContact {
    pub distance: f32,
    pub plane: Axis,
}

impl Geometry {
    /// First contact of `ray` within `max_distance`. Ramps are never ray targets.
    pub fn intersects_ray(&self, ray: &Ray, max_distance: f32) -> Option<RayContact> {
        match self {
            Geometry::Floor(f) => f.intersect_ray(ray, max_distance).map(|distance| RayContact {
                distance,
                plane: Axis::Y,
            }),
            Geometry::Wall(w) => w.intersect_ray(ray, max_distance).map(|distance| RayContact {
                distance,
                plane: w.normal,
            }),
            Geometry::Box(b) => b.intersect_ray(ray, max_distance).map(|c| RayContact {
                distance: c.distance,
                plane: c.plane,
            }),
            Geometry::Ramp(_) => None,
        }
    }

    /// Would a body at `feet` be stopped by this geometry if its center reached it?
    ///
    /// Floors and ramps are walked on, never walked into.
    pub fn blocks_volume(&self, feet: &Vec3, radius: f32, body_top: f32, step_height: f32) -> bool {
        match self {
            Geometry::Floor(_) | Geometry::Ramp(_) => false,
            Geometry::Wall(w) => w.blocks_volume(feet, radius, body_top, step_height),
            Geometry::Box(b) => b
                .side_walls()
                .iter()
                .any(|w| w.blocks_volume(feet, radius, body_top, step_height)),
        }
    }
}

/// Geometry that stops a moving body: a standalone wall or a box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SolidSurface<'a> {
    Wall(&'a Wall),
    Box(&'a SolidBox),
}

impl SolidSurface<'_> {
    /// Vertical faces a body can run into. A wall is its own single face.
    pub fn faces(&self) -> Vec<Wall> {
        match self {
            SolidSurface::Wall(w) => vec![**w],
            SolidSurface::Box(b) => b.side_walls().to_vec(),
        }
    }

    pub fn blocks_volume(&self, feet: &Vec3, radius: f32, body_top: f32, step_height: f32) -> bool {
        match self {
            SolidSurface::Wall(w) => Geometry::Wall(**w).blocks_volume(feet, radius, body_top, step_height),
            SolidSurface::Box(b) => Geometry::Box(**b).blocks_volume(feet, radius, body_top, step_height),
        }
    }

    pub fn intersects_ray(&self, ray: &Ray, max_distance: f32) -> Option<RayContact> {
        match self {
            SolidSurface::Wall(w) => Geometry::Wall(**w).intersects_ray(ray, max_distance),
            SolidSurface::Box(b) => Geometry::Box(**b).intersects_ray(ray, max_distance),
        }
    }

    pub fn as_surface(&self) -> SurfaceRef<'_> {
        match *self {
            SolidSurface::Wall(w) => SurfaceRef::Wall(w),
            SolidSurface::Box(b) => SurfaceRef::Box(b),
        }
    }

    pub fn describe(&self, plane: Axis) -> SurfaceDescriptor {
        self.as_surface().describe(plane)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Floor,
    Wall,
    Box,
}

/// Borrowed view of a ray-hittable surface owned by the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceRef<'a> {
    Floor(&'a Floor),
    Wall(&'a Wall),
    Box(&'a SolidBox),
}

impl SurfaceRef<'_> {
    pub fn kind(&self) -> SurfaceKind {
        match self {
            SurfaceRef::Floor(_) => SurfaceKind::Floor,
            SurfaceRef::Wall(_) => SurfaceKind::Wall,
            SurfaceRef::Box(_) => SurfaceKind::Box,
        }
    }

    /// Floors have no material: shots pass through them.
    pub fn material(&self) -> Option<Material> {
        match self {
            SurfaceRef::Floor(_) => None,
            SurfaceRef::Wall(w) => Some(w.material),
            SurfaceRef::Box(b) => Some(b.material),
        }
    }

    /// Penetration power a shot loses passing through this surface.
    pub fn anti_force(&self) -> i32 {
        self.material().map_or(0, Material::anti_force)
    }

    /// Can a shot stop on, or lose power to, this surface?
    pub fn is_shot_target(&self) -> bool {
        self.material().is_some()
    }

    pub fn describe(&self, plane: Axis) -> SurfaceDescriptor {
        SurfaceDescriptor {
            kind: self.kind(),
            plane,
            force: self.anti_force(),
        }
    }
}

/// Serializable summary of a struck surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceDescriptor {
    pub kind: SurfaceKind,
    /// Normal axis of the struck face.
    pub plane: Axis,
    /// Anti-force the surface applied to the shot.
    pub force: i32,
}
