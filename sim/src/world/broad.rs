use nalgebra as na;
use rapier3d::parry::{
    bounding_volume::{Aabb, BoundingVolume},
    partitioning::{Bvh, BvhBuildStrategy},
};

use crate::geometry::{SolidBox, Vec3, Wall};

/// Index of a blocking solid in the world's own collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SolidIndex {
    Wall(usize),
    Box(usize),
}

/// Acceleration structure for broad-phase queries over blocking geometry.
///
/// Notes:
/// - Walls and boxes are stored as world-space AABBs. Walls have zero thickness along their
///   normal; the BVH overlap test is inclusive, so a flat leaf is still found.
/// - `leaves` maps each stored AABB back to the wall or box it came from.
pub struct SolidAccel {
    /// BVH over blocking solids (AABBs).
    pub bvh: Bvh,
    /// Source of each AABB above, in leaf order.
    pub leaves: Vec<SolidIndex>,
}

impl SolidAccel {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }
}

impl Default for SolidAccel {
    fn default() -> Self {
        build_solid_accel(&[], &[])
    }
}

/// Build the broad-phase accelerator over every wall and box.
pub fn build_solid_accel(walls: &[Wall], boxes: &[SolidBox]) -> SolidAccel {
    let mut aabbs: Vec<Aabb> = Vec::with_capacity(walls.len() + boxes.len());
    let mut leaves: Vec<SolidIndex> = Vec::with_capacity(walls.len() + boxes.len());

    for (i, w) in walls.iter().enumerate() {
        aabbs.push(w.aabb());
        leaves.push(SolidIndex::Wall(i));
    }
    for (i, b) in boxes.iter().enumerate() {
        aabbs.push(box_aabb(b));
        leaves.push(SolidIndex::Box(i));
    }

    SolidAccel {
        bvh: Bvh::from_leaves(BvhBuildStrategy::Binned, &aabbs),
        leaves,
    }
}

fn box_aabb(b: &SolidBox) -> Aabb {
    let maxs = b.base + Vec3::new(b.width, b.height, b.depth);
    Aabb::new(na::Point3::from(b.base), na::Point3::from(maxs))
}

/// AABB swept by an upright cylinder moving from `from` to `to` (both at the feet).
///
/// The resulting AABB is inflated by `skin` to conservatively include near misses.
pub fn swept_cylinder_aabb(from: Vec3, to: Vec3, radius: f32, height: f32, skin: f32) -> Aabb {
    let footprint = |p: Vec3| {
        Aabb::new(
            na::Point3::new(p.x - radius, p.y, p.z - radius),
            na::Point3::new(p.x + radius, p.y + height, p.z + radius),
        )
    };

    let swept = footprint(from).merged(&footprint(to));
    if skin > 0.0 {
        swept.loosened(skin)
    } else {
        swept
    }
}

/// Query solids whose AABB intersects `swept`, in insertion order (walls, then boxes).
pub fn query_candidates(accel: &SolidAccel, swept: &Aabb) -> Vec<SolidIndex> {
    let mut found: Vec<SolidIndex> = accel
        .bvh
        .intersect_aabb(swept)
        .map(|leaf_idx| accel.leaves[leaf_idx as usize])
        .collect();
    found.sort_unstable();
    found.dedup();
    found
}
