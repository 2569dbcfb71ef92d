pub mod ballistics;
pub mod bomb;
pub mod constants;
pub mod damage;
pub mod error;
pub mod geometry;
pub mod movement;
pub mod player;
pub mod settings;
pub mod simulation;
pub mod utils;
pub mod world;

pub use ballistics::{AttackResult, Hit, HitTarget, Shot, fire};
pub use bomb::Bomb;
pub use constants::{
    DEFAULT_SHOT_DISTANCE, MAX_BLAST_DISTANCE, MAX_HEALTH, MAX_MONEY, PLAYER_BOUNDING_RADIUS,
    TICK_MS,
};
pub use damage::{ArmorType, DamageProfile, blast_damage};
pub use error::SimError;
pub use geometry::{
    Axis, Floor, Geometry, Heading, Material, Ramp, SolidBox, SurfaceDescriptor, SurfaceKind,
    Vec3, Wall,
};
pub use movement::{Body, MoveRequest, StepMovementResult, step_movement};
pub use player::{
    BodyPart, LookChange, Loadout, Player, PlayerId, PlayerInput, PlayerSnapshot, WeaponStats,
};
pub use settings::SimSettings;
pub use simulation::{BlastReport, Simulation, TickReport};
pub use utils::{direction_from_angles, ms_to_ticks};
pub use world::{RayHits, SurfaceHit, World};
