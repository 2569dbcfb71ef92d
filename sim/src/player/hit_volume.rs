/*!
Player hit-volumes.

A body is a head sphere on top of stacked boxes (chest, stomach, legs) with one box
per arm. Heights are laid out for a standing body of `head_height_stand` and scale
with the current head height, so a crouching body shrinks as a whole. The head
sphere always sits right under the top of the head and its center is the eye.
*/

use nalgebra as na;
use rapier3d::parry::{
    query::{Ray, RayCast},
    shape::{Ball, Cuboid},
};
use serde::{Deserialize, Serialize};

use crate::geometry::{Iso, Vec3};
use crate::utils::horizontal_basis;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Head,
    Chest,
    Stomach,
    Legs,
    Arms,
}

/// Standing layout: (part, bottom, top, half width), heights in standing units.
const TORSO: [(BodyPart, f32, f32, f32); 3] = [
    (BodyPart::Chest, 105.0, 166.0, 16.0),
    (BodyPart::Stomach, 80.0, 105.0, 15.0),
    (BodyPart::Legs, 0.0, 80.0, 14.0),
];
const ARM_BOTTOM: f32 = 100.0;
const ARM_TOP: f32 = 160.0;
const ARM_HALF_WIDTH: f32 = 6.0;
const ARM_OFFSET: f32 = 24.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VolumeShape {
    Sphere { center: Vec3, radius: f32 },
    Box { center: Vec3, half_extents: Vec3 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitVolume {
    pub part: BodyPart,
    pub shape: VolumeShape,
}

impl HitVolume {
    /// Distance along `ray` to this volume. A ray starting inside hits at zero.
    pub fn intersect_ray(&self, ray: &Ray, max_distance: f32) -> Option<f32> {
        match self.shape {
            VolumeShape::Sphere { center, radius } => {
                Ball::new(radius).cast_ray(&translation(center), ray, max_distance, true)
            }
            VolumeShape::Box {
                center,
                half_extents,
            } => Cuboid::new(half_extents).cast_ray(&translation(center), ray, max_distance, true),
        }
    }
}

fn translation(center: Vec3) -> Iso {
    Iso::from_parts(
        na::Translation3::new(center.x, center.y, center.z),
        na::UnitQuaternion::identity(),
    )
}

/// Hit-volumes of a body standing at `feet` with the given head height and look angle.
///
/// Order is the tie-break order for equal ray distances: head first.
pub fn body_volumes(
    feet: &Vec3,
    head_height: f32,
    head_radius: f32,
    stand_height: f32,
    horizontal_deg: f32,
) -> [HitVolume; 6] {
    let scale = if stand_height > 0.0 {
        head_height / stand_height
    } else {
        1.0
    };
    let slab = |bottom: f32, top: f32, half: f32, offset: Vec3| {
        let lo = bottom * scale;
        let hi = top * scale;
        VolumeShape::Box {
            center: feet + offset + Vec3::new(0.0, (lo + hi) * 0.5, 0.0),
            half_extents: Vec3::new(half, (hi - lo) * 0.5, half),
        }
    };
    let (_, right) = horizontal_basis(horizontal_deg);
    let torso = TORSO.map(|(part, bottom, top, half)| HitVolume {
        part,
        shape: slab(bottom, top, half, Vec3::zeros()),
    });
    let arm = |side: f32| HitVolume {
        part: BodyPart::Arms,
        shape: slab(ARM_BOTTOM, ARM_TOP, ARM_HALF_WIDTH, right * (side * ARM_OFFSET)),
    };

    [
        HitVolume {
            part: BodyPart::Head,
            shape: VolumeShape::Sphere {
                center: feet + Vec3::new(0.0, head_height - head_radius, 0.0),
                radius: head_radius,
            },
        },
        torso[0],
        torso[1],
        torso[2],
        arm(-1.0),
        arm(1.0),
    ]
}

/// Nearest volume struck by `ray`; equal distances keep volume order.
pub fn nearest_hit(volumes: &[HitVolume], ray: &Ray, max_distance: f32) -> Option<(BodyPart, f32)> {
    let mut best: Option<(BodyPart, f32)> = None;
    for v in volumes {
        if let Some(d) = v.intersect_ray(ray, max_distance)
            && best.is_none_or(|(_, bd)| d < bd)
        {
            best = Some((v.part, d));
        }
    }
    best
}
