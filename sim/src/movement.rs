use log::debug;

use crate::geometry::{Axis, Vec3, Wall};
use crate::player::{Player, PlayerInput};
use crate::settings::SimSettings;
use crate::world::{World, broad::swept_cylinder_aabb};

/// Kinematic state the resolver reads at the start of a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Feet position (bottom center of the bounding cylinder).
    pub feet: Vec3,
    pub vertical_velocity: f32,
    pub grounded: bool,
    /// Head height for this tick, after the stance transition.
    pub head_height: f32,
}

/// Motion requested for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveRequest {
    /// Horizontal displacement (y is ignored).
    pub delta: Vec3,
    pub jump: bool,
}

/// Output of a single `step_movement()` tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepMovementResult {
    pub new_position: Vec3,
    pub vertical_velocity: f32,
    /// Whether the body stands on a floor, box top, ramp step or the ground plane.
    pub is_grounded: bool,
    /// Axes along which a blocking face stopped the requested displacement.
    pub blocked_x: bool,
    pub blocked_z: bool,
}

impl World {
    /// Resolve one tick of movement for `body` against this world.
    pub fn resolve_movement(
        &self,
        settings: &SimSettings,
        body: &Body,
        request: &MoveRequest,
    ) -> StepMovementResult {
        step_movement(self, settings, body, request)
    }
}

/// Perform one deterministic movement tick.
///
/// Behavior
/// - Vertical: jump when grounded; integrate velocity when airborne, landing on the
///   highest support crossed while falling, or stopping the head under a ceiling.
/// - Horizontal: resolve x then z against blocking faces, never moving backwards.
/// - Step: snap onto a ramp step, floor or box top within step height; otherwise airborne.
pub fn step_movement(
    world: &World,
    settings: &SimSettings,
    body: &Body,
    request: &MoveRequest,
) -> StepMovementResult {
    let mut pos = body.feet;
    let mut v = body.vertical_velocity;
    let mut grounded = body.grounded;

    // 1) Vertical phase.
    if request.jump && grounded {
        v = settings.jump_velocity;
        grounded = false;
    }
    if !grounded {
        let vertical = integrate_vertical(world, settings, &pos, v, body.head_height);
        pos.y = vertical.y;
        v = vertical.velocity;
        grounded = vertical.landed;
    }

    // 2) Horizontal phase, one axis at a time.
    let (x, blocked_x) = resolve_axis(world, settings, &pos, Axis::X, request.delta.x, body.head_height);
    pos.x = x;
    let (z, blocked_z) = resolve_axis(world, settings, &pos, Axis::Z, request.delta.z, body.head_height);
    pos.z = z;

    // 3) Step resolution at the new horizontal position.
    // Stepping down is only allowed for a body that is still on the ground.
    match step_target(world, settings, &pos, grounded) {
        Some(h) => {
            if h != pos.y {
                debug!("step {} -> {} at ({}, {})", pos.y, h, pos.x, pos.z);
            }
            pos.y = h;
            v = 0.0;
            grounded = true;
        }
        None => grounded = false,
    }

    StepMovementResult {
        new_position: pos,
        vertical_velocity: v,
        is_grounded: grounded,
        blocked_x,
        blocked_z,
    }
}

/// Apply one tick of `input` to `player`: look, stance transition, then movement.
pub fn advance_player(world: &World, settings: &SimSettings, player: &mut Player, input: &PlayerInput) {
    if let Some(change) = input.look {
        player.apply_look(change);
    }
    player.stance.request_crouch(input.crouch);
    player.stance.advance(settings);

    let delta = input.horizontal_delta(
        player.look_horizontal,
        player.stance.slows_movement(),
        settings,
    );
    let body = Body {
        feet: player.position,
        vertical_velocity: player.vertical_velocity,
        grounded: player.grounded,
        head_height: player.head_height(settings),
    };
    let request = MoveRequest {
        delta,
        jump: input.jump,
    };

    let result = world.resolve_movement(settings, &body, &request);
    player.position = result.new_position;
    player.vertical_velocity = result.vertical_velocity;
    player.grounded = result.is_grounded;
}

struct Vertical {
    y: f32,
    velocity: f32,
    landed: bool,
}

/// Integrate one airborne tick. Never ends below the ground plane.
fn integrate_vertical(
    world: &World,
    settings: &SimSettings,
    feet: &Vec3,
    velocity: f32,
    head_height: f32,
) -> Vertical {
    let r = settings.player_radius;
    let y0 = feet.y;
    let y1 = (y0 + velocity).max(0.0);

    if velocity <= 0.0 {
        // Falling: land on the highest support crossed during the tick.
        let support = [
            world.highest_support(feet, r, y1, y0),
            world.ramp_landing(feet, r, y1, y0),
            (y1 <= 0.0).then_some(0.0),
        ]
        .into_iter()
        .flatten()
        .reduce(f32::max);
        if let Some(h) = support {
            debug!("landed at {h} (fell from {y0})");
            return Vertical {
                y: h,
                velocity: 0.0,
                landed: true,
            };
        }
    } else if let Some(c) = world.lowest_ceiling(feet, r, y0 + head_height, y1 + head_height) {
        // Rising: the head stops under the first ceiling crossed.
        return Vertical {
            y: (c - head_height).max(y0),
            velocity: 0.0,
            landed: false,
        };
    }

    Vertical {
        y: y1,
        velocity: velocity - settings.gravity,
        landed: false,
    }
}

/// Move `feet` by `delta` along `axis`, stopping in front of every blocking face ahead.
///
/// Returns `(new coordinate, blocked)`. The result never lies behind the start, so a body
/// already closer than its radius to a face cannot move toward it at all.
fn resolve_axis(
    world: &World,
    settings: &SimSettings,
    feet: &Vec3,
    axis: Axis,
    delta: f32,
    head_height: f32,
) -> (f32, bool) {
    let old = axis.of(feet);
    if delta == 0.0 {
        return (old, false);
    }

    let r = settings.player_radius;
    let clearance = settings.wall_clearance;
    let body_top = feet.y + head_height;
    let mut target = old + delta;

    let mut to = *feet;
    match axis {
        Axis::X => to.x = target,
        Axis::Z => to.z = target,
        Axis::Y => return (old, false),
    }
    let swept = swept_cylinder_aabb(*feet, to, r, head_height, clearance);

    let mut blocked = false;
    for solid in world.solids_near(&swept) {
        for face in solid.faces() {
            let Some(w) = stop_plane(&face, feet, axis, delta, r, body_top, settings.step_height) else {
                continue;
            };
            if delta > 0.0 && w > old {
                let limit = w - r - clearance;
                if target > limit {
                    target = limit.max(old);
                    blocked = true;
                }
            } else if delta < 0.0 && w < old {
                let limit = w + r + clearance;
                if target < limit {
                    target = limit.min(old);
                    blocked = true;
                }
            }
        }
    }

    (target, blocked)
}

/// Plane along `axis` at which `face` stops a body moving by `delta`, if any.
///
/// Moving across the face, the plane is the face itself. Moving along it while the body
/// straddles the face plane, the plane is the end edge ahead.
fn stop_plane(
    face: &Wall,
    feet: &Vec3,
    axis: Axis,
    delta: f32,
    radius: f32,
    body_top: f32,
    step_height: f32,
) -> Option<f32> {
    if face.normal == axis {
        return face
            .blocks_volume(feet, radius, body_top, step_height)
            .then(|| face.base());
    }
    if face.normal.lateral() != axis || !face.straddles(feet, radius, body_top, step_height) {
        return None;
    }
    let (lo, hi) = face.span();
    Some(if delta > 0.0 { lo } else { hi })
}

/// Height the body should stand at after moving, if anything supports it.
fn step_target(world: &World, settings: &SimSettings, feet: &Vec3, allow_step_down: bool) -> Option<f32> {
    let r = settings.player_radius;
    let step = settings.step_height;
    let tol = world.floor_tolerance();
    let y = feet.y;

    let floor = world.highest_support(feet, r, y - tol, y + step);
    let ramp = if allow_step_down {
        world.ramp_height(feet, r, y, step)
    } else {
        world.ramp_landing(feet, r, y - tol, y + step)
    };
    let ground = (y <= tol).then_some(0.0);

    [floor, ramp, ground].into_iter().flatten().reduce(f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Floor, Heading, Ramp, SolidBox, Wall};

    fn settings() -> SimSettings {
        SimSettings::default()
    }

    fn standing(feet: Vec3) -> Body {
        Body {
            feet,
            vertical_velocity: 0.0,
            grounded: true,
            head_height: 190.0,
        }
    }

    fn walk(delta: Vec3) -> MoveRequest {
        MoveRequest { delta, jump: false }
    }

    #[test]
    fn resting_player_stays_put() {
        let world = World::new();
        let s = settings();
        let r = world.resolve_movement(&s, &standing(Vec3::zeros()), &MoveRequest::default());
        assert_eq!(r.new_position, Vec3::zeros());
        assert!(r.is_grounded);
        assert_eq!(r.vertical_velocity, 0.0);
    }

    #[test]
    fn wall_clamps_with_clearance() {
        let mut world = World::new();
        world.add_wall(Wall::new(Vec3::new(-100.0, 0.0, 50.0), Axis::Z, 200.0, 200.0));
        let s = settings();

        let r = world.resolve_movement(&s, &standing(Vec3::zeros()), &walk(Vec3::new(0.0, 0.0, 25.0)));
        assert_eq!(r.new_position.z, 19.0);
        assert!(r.blocked_z);
        assert!(!r.blocked_x);

        // Moving away is free.
        let r = world.resolve_movement(&s, &standing(Vec3::new(0.0, 0.0, 19.0)), &walk(Vec3::new(0.0, 0.0, -25.0)));
        assert_eq!(r.new_position.z, -6.0);
        assert!(!r.blocked_z);
    }

    #[test]
    fn wedged_body_is_not_pushed_back() {
        let mut world = World::new();
        world.add_wall(Wall::new(Vec3::new(-100.0, 0.0, 50.0), Axis::Z, 200.0, 200.0));
        let s = settings();
        let r = world.resolve_movement(&s, &standing(Vec3::new(0.0, 0.0, 40.0)), &walk(Vec3::new(0.0, 0.0, 25.0)));
        assert_eq!(r.new_position.z, 40.0);
        assert!(r.blocked_z);
    }

    #[test]
    fn wall_end_stops_a_body_straddling_its_plane() {
        let mut world = World::new();
        world.add_wall(Wall::new(Vec3::new(0.0, 0.0, 50.0), Axis::Z, 100.0, 300.0));
        let s = settings();

        let mut feet = Vec3::new(-100.0, 0.0, 40.0);
        for _ in 0..6 {
            feet = world
                .resolve_movement(&s, &standing(feet), &walk(Vec3::new(25.0, 0.0, 0.0)))
                .new_position;
        }
        assert_eq!(feet, Vec3::new(-31.0, 0.0, 40.0));

        // Approaching the far end from beyond it.
        let r = world.resolve_movement(&s, &standing(Vec3::new(140.0, 0.0, 60.0)), &walk(Vec3::new(-25.0, 0.0, 0.0)));
        assert_eq!(r.new_position.x, 131.0);
        assert!(r.blocked_x);

        // Clear of the plane, the body passes the end.
        let r = world.resolve_movement(&s, &standing(Vec3::new(-40.0, 0.0, 10.0)), &walk(Vec3::new(25.0, 0.0, 0.0)));
        assert_eq!(r.new_position.x, -15.0);
        assert!(!r.blocked_x);
    }

    #[test]
    fn low_box_is_stepped_onto() {
        let mut world = World::new();
        world.add_box(SolidBox::new(Vec3::new(-50.0, 0.0, 40.0), 100.0, 20.0, 100.0));
        let s = settings();
        let r = world.resolve_movement(&s, &standing(Vec3::zeros()), &walk(Vec3::new(0.0, 0.0, 25.0)));
        assert_eq!(r.new_position, Vec3::new(0.0, 20.0, 25.0));
        assert!(r.is_grounded);
    }

    #[test]
    fn tall_box_blocks() {
        let mut world = World::new();
        world.add_box(SolidBox::new(Vec3::new(-50.0, 0.0, 40.0), 100.0, 21.0, 100.0));
        let s = settings();
        let r = world.resolve_movement(&s, &standing(Vec3::zeros()), &walk(Vec3::new(0.0, 0.0, 25.0)));
        assert_eq!(r.new_position, Vec3::new(0.0, 0.0, 9.0));
    }

    #[test]
    fn walking_off_a_ledge_starts_a_fall() {
        let mut world = World::new();
        world.add_floor(Floor::new(Vec3::new(-100.0, 100.0, -100.0), 200.0, 100.0));
        let s = settings();

        let edge = Vec3::new(0.0, 100.0, 25.0);
        let r = world.resolve_movement(&s, &standing(edge), &walk(Vec3::new(0.0, 0.0, 25.0)));
        assert_eq!(r.new_position.y, 100.0);
        assert!(!r.is_grounded);

        let mut body = Body {
            feet: r.new_position,
            vertical_velocity: r.vertical_velocity,
            grounded: r.is_grounded,
            head_height: 190.0,
        };
        let mut ticks = 0;
        while !body.grounded {
            let r = world.resolve_movement(&s, &body, &MoveRequest::default());
            assert!(r.new_position.y >= 0.0);
            body.feet = r.new_position;
            body.vertical_velocity = r.vertical_velocity;
            body.grounded = r.is_grounded;
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(body.feet.y, 0.0);
    }

    #[test]
    fn jump_arc_returns_to_ground() {
        let world = World::new();
        let s = settings();
        let jump = MoveRequest {
            delta: Vec3::zeros(),
            jump: true,
        };

        let r = world.resolve_movement(&s, &standing(Vec3::zeros()), &jump);
        assert_eq!(r.new_position.y, s.jump_velocity);
        assert!(!r.is_grounded);

        let mut body = Body {
            feet: r.new_position,
            vertical_velocity: r.vertical_velocity,
            grounded: r.is_grounded,
            head_height: 190.0,
        };
        let mut apex = body.feet.y;
        for _ in 0..100 {
            let r = world.resolve_movement(&s, &body, &MoveRequest::default());
            body.feet = r.new_position;
            body.vertical_velocity = r.vertical_velocity;
            body.grounded = r.is_grounded;
            apex = apex.max(body.feet.y);
            if body.grounded {
                break;
            }
        }
        assert!(body.grounded);
        assert_eq!(body.feet.y, 0.0);
        assert!(apex > s.jump_velocity);
    }

    #[test]
    fn ceiling_stops_the_head() {
        let mut world = World::new();
        world.add_box(SolidBox::new(Vec3::new(-100.0, 200.0, -100.0), 200.0, 50.0, 200.0));
        let s = settings();
        let jump = MoveRequest {
            delta: Vec3::zeros(),
            jump: true,
        };
        let r = world.resolve_movement(&s, &standing(Vec3::zeros()), &jump);
        assert_eq!(r.new_position.y, 10.0);
        assert_eq!(r.vertical_velocity, 0.0);
    }

    #[test]
    fn ramp_climb_and_descent() {
        let mut world = World::new();
        world.add_ramp(Ramp::new(Vec3::new(30.0, 0.0, 0.0), Heading::PosX, 4, 250.0, true, 25.0, 20.0));
        let s = settings();

        let mut body = standing(Vec3::zeros());
        for expected in [20.0, 40.0, 60.0, 80.0] {
            let r = world.resolve_movement(&s, &body, &walk(Vec3::new(25.0, 0.0, 0.0)));
            assert_eq!(r.new_position.y, expected);
            body.feet = r.new_position;
        }
    }
}
