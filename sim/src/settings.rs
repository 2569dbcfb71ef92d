/*!
Simulation tunables.

Every physics constant used by the world, movement and ballistics code is read
from a [`SimSettings`] value handed to the simulation at construction. Two
simulations with different settings never share state, so tests can run many
matches side by side.

The defaults come from [`crate::constants`]. A loader may override any subset
from TOML; missing keys fall back to the defaults.
*/

use serde::{Deserialize, Serialize};

use crate::constants::{
    CROUCH_SPEED_MULTIPLIER, FLOOR_VERTICAL_TOLERANCE, GRAVITY_PER_TICK, HEAD_HEIGHT_CROUCH,
    HEAD_HEIGHT_STAND, HEAD_RADIUS, JUMP_VELOCITY_PER_TICK, MAX_HEALTH, MAX_MONEY,
    MOVE_DISTANCE_PER_TICK, OBSTACLE_OVERCOME_HEIGHT, PLAYER_BOUNDING_RADIUS,
    PLAYER_HIT_ANTI_FORCE, TICK_COUNT_CROUCH, TICK_MS, WALK_SPEED_MULTIPLIER, WALL_CLEARANCE,
};
use crate::error::SimError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    pub tick_ms: u32,
    pub player_radius: f32,
    pub move_distance_per_tick: f32,
    pub walk_multiplier: f32,
    pub crouch_multiplier: f32,
    /// Highest obstacle or ramp step climbed without jumping.
    pub step_height: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub wall_clearance: f32,
    pub floor_tolerance: f32,
    pub head_height_stand: f32,
    pub head_height_crouch: f32,
    pub head_radius: f32,
    pub crouch_ticks: u32,
    pub max_health: i32,
    pub max_money: i32,
    /// Penetration power consumed by every player a shot passes through.
    pub player_anti_force: i32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            player_radius: PLAYER_BOUNDING_RADIUS,
            move_distance_per_tick: MOVE_DISTANCE_PER_TICK,
            walk_multiplier: WALK_SPEED_MULTIPLIER,
            crouch_multiplier: CROUCH_SPEED_MULTIPLIER,
            step_height: OBSTACLE_OVERCOME_HEIGHT,
            jump_velocity: JUMP_VELOCITY_PER_TICK,
            gravity: GRAVITY_PER_TICK,
            wall_clearance: WALL_CLEARANCE,
            floor_tolerance: FLOOR_VERTICAL_TOLERANCE,
            head_height_stand: HEAD_HEIGHT_STAND,
            head_height_crouch: HEAD_HEIGHT_CROUCH,
            head_radius: HEAD_RADIUS,
            crouch_ticks: TICK_COUNT_CROUCH,
            max_health: MAX_HEALTH,
            max_money: MAX_MONEY,
            player_anti_force: PLAYER_HIT_ANTI_FORCE,
        }
    }
}

impl SimSettings {
    /// Parse settings from a TOML document. Keys that are absent keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, SimError> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the movement and stance code cannot work with.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.tick_ms == 0 {
            return Err(SimError::InvalidSettings("tick_ms must be positive"));
        }
        if self.player_radius <= 0.0 {
            return Err(SimError::InvalidSettings("player_radius must be positive"));
        }
        if self.head_height_crouch > self.head_height_stand {
            return Err(SimError::InvalidSettings(
                "head_height_crouch must not exceed head_height_stand",
            ));
        }
        if self.head_radius * 2.0 > self.head_height_crouch {
            return Err(SimError::InvalidSettings(
                "head_radius does not fit the crouched body",
            ));
        }
        Ok(())
    }

    /// Head height lost per tick of crouch transition.
    #[inline]
    pub fn crouch_distance_per_tick(&self) -> f32 {
        if self.crouch_ticks == 0 {
            return self.head_height_stand - self.head_height_crouch;
        }
        (self.head_height_stand - self.head_height_crouch) / self.crouch_ticks as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimSettings::default().validate().is_ok());
    }

    #[test]
    fn toml_overrides_only_listed_keys() {
        let settings = SimSettings::from_toml_str("tick_ms = 20\nplayer_radius = 16.0\n").unwrap();
        assert_eq!(settings.tick_ms, 20);
        assert_eq!(settings.player_radius, 16.0);
        assert_eq!(settings.step_height, OBSTACLE_OVERCOME_HEIGHT);
    }

    #[test]
    fn toml_with_bad_values_is_rejected() {
        let err = SimSettings::from_toml_str("tick_ms = 0").unwrap_err();
        assert!(matches!(err, SimError::InvalidSettings(_)));

        let err = SimSettings::from_toml_str("tick_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn crouch_distance_splits_head_drop_evenly() {
        let settings = SimSettings::default();
        let per_tick = settings.crouch_distance_per_tick();
        assert_eq!(
            per_tick * settings.crouch_ticks as f32,
            settings.head_height_stand - settings.head_height_crouch
        );
    }
}
