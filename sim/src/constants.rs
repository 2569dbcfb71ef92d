/// Length of one simulation tick in milliseconds.
pub const TICK_MS: u32 = 15;

/// Radius of the player's bounding cylinder (world units).
pub const PLAYER_BOUNDING_RADIUS: f32 = 30.0;

/// Horizontal distance covered by one tick of running.
///
/// All default distances are integer valued so repeated additions stay exact in `f32`.
pub const MOVE_DISTANCE_PER_TICK: f32 = 25.0;

/// Speed multiplier applied while the walk modifier is held.
pub const WALK_SPEED_MULTIPLIER: f32 = 0.6;

/// Speed multiplier applied while crouched or transitioning into a crouch.
pub const CROUCH_SPEED_MULTIPLIER: f32 = 0.4;

/// Highest obstacle (or ramp step) a player climbs without jumping.
pub const OBSTACLE_OVERCOME_HEIGHT: f32 = 20.0;

/// Upward velocity given by a jump (units per tick).
pub const JUMP_VELOCITY_PER_TICK: f32 = 30.0;

/// Velocity lost to gravity every airborne tick (units per tick^2).
pub const GRAVITY_PER_TICK: f32 = 5.0;

/// Gap kept between a player's bounding cylinder and a blocking face.
pub const WALL_CLEARANCE: f32 = 1.0;

/// Vertical tolerance used by floor support queries.
///
/// Zero means a floor supports a point only at exactly its height.
pub const FLOOR_VERTICAL_TOLERANCE: f32 = 0.0;

/// Head height (top of the head above the feet) while standing.
pub const HEAD_HEIGHT_STAND: f32 = 190.0;

/// Head height while fully crouched.
pub const HEAD_HEIGHT_CROUCH: f32 = 140.0;

/// Number of ticks a full stand <-> crouch transition takes.
pub const TICK_COUNT_CROUCH: u32 = 5;

/// Radius of the head hit-volume sphere. The eye sits at its center.
pub const HEAD_RADIUS: f32 = 12.0;

/// Health of a freshly spawned player.
pub const MAX_HEALTH: i32 = 100;

/// Money balance ceiling.
pub const MAX_MONEY: i32 = 16_000;

/// Penetration cost of passing through a player.
pub const PLAYER_HIT_ANTI_FORCE: i32 = 10_000;

/// Penetration cost of thin materials (wood, drywall).
pub const ANTI_FORCE_THIN: i32 = 8_000;

/// Penetration cost of ordinary walls and boxes.
pub const ANTI_FORCE_STANDARD: i32 = 25_123;

/// Penetration cost of reinforced materials (concrete, metal).
pub const ANTI_FORCE_REINFORCED: i32 = 60_000;

/// Default shot range.
pub const DEFAULT_SHOT_DISTANCE: f32 = 8_192.0;

/// Explosions deal no damage to players farther than this from the detonation point.
pub const MAX_BLAST_DISTANCE: f32 = 1_000.0;

/// Damage level at which armor absorbs half of its nominal share.
///
/// Mitigation falls off as damage grows: `absorbed = (1 - armor_penetration) * K / (K + damage)`.
pub const ARMOR_MITIGATION_KNEE: f32 = 50.0;
