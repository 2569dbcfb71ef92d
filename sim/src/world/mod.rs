/*!
Static world: owns every floor, wall, box and ramp of the map.

Geometry is appended during setup and read-only afterwards. The queries here never
mutate; movement and ballistics borrow the world immutably.

- broad: BVH over walls and boxes used to prune movement candidates
*/

pub mod broad;

use log::debug;
use rapier3d::parry::{bounding_volume::Aabb, query::Ray};

use crate::constants::FLOOR_VERTICAL_TOLERANCE;
use crate::geometry::{
    Axis, Floor, Geometry, Point3, Ramp, SolidBox, SolidSurface, SurfaceRef, Vec3, Wall,
};

pub use broad::{SolidAccel, SolidIndex};

/// One surface crossed by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit<'a> {
    pub surface: SurfaceRef<'a>,
    pub point: Vec3,
    pub distance: f32,
    /// Normal axis of the struck face.
    pub plane: Axis,
}

/// Surfaces crossed by one ray, nearest first.
///
/// Every crossing is gathered and sorted when the ray is cast; iteration hands them out
/// in order. Equal distances keep insertion order: floors, then walls, then boxes.
pub struct RayHits<'a> {
    hits: std::vec::IntoIter<SurfaceHit<'a>>,
}

impl<'a> Iterator for RayHits<'a> {
    type Item = SurfaceHit<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.hits.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.hits.size_hint()
    }
}

impl ExactSizeIterator for RayHits<'_> {}

pub struct World {
    floors: Vec<Floor>,
    walls: Vec<Wall>,
    boxes: Vec<SolidBox>,
    ramps: Vec<Ramp>,
    accel: SolidAccel,
    floor_tolerance: f32,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            floors: Vec::new(),
            walls: Vec::new(),
            boxes: Vec::new(),
            ramps: Vec::new(),
            accel: SolidAccel::default(),
            floor_tolerance: FLOOR_VERTICAL_TOLERANCE,
        }
    }

    /// Vertical tolerance used by [`World::find_floor`] and step resolution.
    pub fn with_floor_tolerance(mut self, tolerance: f32) -> Self {
        self.floor_tolerance = tolerance.max(0.0);
        self
    }

    pub fn set_floor_tolerance(&mut self, tolerance: f32) {
        self.floor_tolerance = tolerance.max(0.0);
    }

    #[inline]
    pub fn floor_tolerance(&self) -> f32 {
        self.floor_tolerance
    }

    pub fn add_floor(&mut self, floor: Floor) {
        self.floors.push(floor);
    }

    pub fn add_wall(&mut self, wall: Wall) {
        self.walls.push(wall);
        self.rebuild_accel();
    }

    pub fn add_box(&mut self, solid: SolidBox) {
        self.boxes.push(solid);
        self.rebuild_accel();
    }

    pub fn add_ramp(&mut self, ramp: Ramp) {
        self.ramps.push(ramp);
    }

    pub fn add(&mut self, geometry: Geometry) {
        match geometry {
            Geometry::Floor(f) => self.add_floor(f),
            Geometry::Wall(w) => self.add_wall(w),
            Geometry::Box(b) => self.add_box(b),
            Geometry::Ramp(r) => self.add_ramp(r),
        }
    }

    /// Bulk load. The broad phase is rebuilt once at the end.
    pub fn extend<I: IntoIterator<Item = Geometry>>(&mut self, geometry: I) {
        for g in geometry {
            match g {
                Geometry::Floor(f) => self.floors.push(f),
                Geometry::Wall(w) => self.walls.push(w),
                Geometry::Box(b) => self.boxes.push(b),
                Geometry::Ramp(r) => self.ramps.push(r),
            }
        }
        self.rebuild_accel();
    }

    fn rebuild_accel(&mut self) {
        self.accel = broad::build_solid_accel(&self.walls, &self.boxes);
        debug!(
            "world broad phase rebuilt: {} walls, {} boxes",
            self.walls.len(),
            self.boxes.len()
        );
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn boxes(&self) -> &[SolidBox] {
        &self.boxes
    }

    pub fn ramps(&self) -> &[Ramp] {
        &self.ramps
    }

    /// Floor supporting `point` within `search_radius` horizontally and the floor tolerance
    /// vertically. Several candidates: the horizontally closest, then the first added.
    pub fn find_floor(&self, point: &Vec3, search_radius: f32) -> Option<&Floor> {
        let mut best: Option<(&Floor, f32)> = None;
        for floor in &self.floors {
            if (point.y - floor.height()).abs() > self.floor_tolerance {
                continue;
            }
            let d = floor.horizontal_distance(point.x, point.z);
            if d > search_radius {
                continue;
            }
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((floor, d));
            }
        }
        best.map(|(f, _)| f)
    }

    /// Every walkable top (floors and box tops).
    fn walkable_tops(&self) -> impl Iterator<Item = Floor> + '_ {
        self.floors
            .iter()
            .copied()
            .chain(self.boxes.iter().map(SolidBox::top))
    }

    /// Every surface that stops a rising head (floors and box bottoms).
    fn undersides(&self) -> impl Iterator<Item = Floor> + '_ {
        self.floors
            .iter()
            .copied()
            .chain(self.boxes.iter().map(SolidBox::bottom))
    }

    /// Highest floor or box top under a footprint of `radius` whose height lies in
    /// `[min_y, max_y]`.
    pub fn highest_support(&self, point: &Vec3, radius: f32, min_y: f32, max_y: f32) -> Option<f32> {
        self.walkable_tops()
            .filter(|f| {
                let h = f.height();
                h >= min_y && h <= max_y && f.horizontal_distance(point.x, point.z) <= radius
            })
            .map(|f| f.height())
            .reduce(f32::max)
    }

    /// Lowest floor or box bottom above a footprint of `radius` whose height lies in
    /// `[min_y, max_y]`.
    pub fn lowest_ceiling(&self, point: &Vec3, radius: f32, min_y: f32, max_y: f32) -> Option<f32> {
        self.undersides()
            .filter(|f| {
                let h = f.height();
                h >= min_y && h <= max_y && f.horizontal_distance(point.x, point.z) < radius
            })
            .map(|f| f.height())
            .reduce(f32::min)
    }

    /// Highest ramp step under the footprint within `max_delta` of `y`.
    pub fn ramp_height(&self, point: &Vec3, radius: f32, y: f32, max_delta: f32) -> Option<f32> {
        self.ramps
            .iter()
            .filter_map(|r| r.height_at(point, radius))
            .filter(|h| (h - y).abs() <= max_delta)
            .reduce(f32::max)
    }

    /// Highest ramp step crossed while falling through `[min_y, max_y]`.
    pub fn ramp_landing(&self, point: &Vec3, radius: f32, min_y: f32, max_y: f32) -> Option<f32> {
        self.ramps
            .iter()
            .filter_map(|r| r.height_at(point, radius))
            .filter(|h| *h >= min_y && *h <= max_y)
            .reduce(f32::max)
    }

    /// Walls and boxes whose bounds touch `swept`, walls first, each in insertion order.
    pub fn solids_near(&self, swept: &Aabb) -> Vec<SolidSurface<'_>> {
        broad::query_candidates(&self.accel, swept)
            .into_iter()
            .filter_map(|idx| match idx {
                SolidIndex::Wall(i) => self.walls.get(i).map(SolidSurface::Wall),
                SolidIndex::Box(i) => self.boxes.get(i).map(SolidSurface::Box),
            })
            .collect()
    }

    /// Every floor, wall and box face struck by a ray within `max_distance`, nearest first.
    ///
    /// `direction` need not be normalized; distances are measured along its unit vector.
    /// A zero direction crosses nothing. The whole world is tested up front, so stopping
    /// early saves no ray tests.
    pub fn cast_ray(&self, origin: &Vec3, direction: &Vec3, max_distance: f32) -> RayHits<'_> {
        let Some(dir) = direction.try_normalize(f32::EPSILON) else {
            return RayHits {
                hits: Vec::new().into_iter(),
            };
        };
        let ray = Ray::new(Point3::from(*origin), dir);

        let floors = self.floors.iter().map(|f| (SurfaceRef::Floor(f), Geometry::Floor(*f)));
        let walls = self.walls.iter().map(|w| (SurfaceRef::Wall(w), Geometry::Wall(*w)));
        let boxes = self.boxes.iter().map(|b| (SurfaceRef::Box(b), Geometry::Box(*b)));

        let mut hits: Vec<SurfaceHit<'_>> = floors
            .chain(walls)
            .chain(boxes)
            .filter_map(|(surface, geometry)| {
                geometry
                    .intersects_ray(&ray, max_distance)
                    .map(|contact| SurfaceHit {
                        surface,
                        point: ray.point_at(contact.distance).coords,
                        distance: contact.distance,
                        plane: contact.plane,
                    })
            })
            .collect();
        // Stable: equal distances keep insertion order.
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        RayHits {
            hits: hits.into_iter(),
        }
    }
}
