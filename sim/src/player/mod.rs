/*!
Player state owned by the simulation.

- stance:     crouch transition and head height
- hit_volume: named body volumes used as ray targets
- input:      per-tick client requests
- loadout:    weapon stats and armor read from the inventory
*/

pub mod hit_volume;
pub mod input;
pub mod loadout;
pub mod stance;

use log::info;
use serde::{Deserialize, Serialize};

use crate::geometry::Vec3;
use crate::settings::SimSettings;
use crate::utils::{direction_from_angles, wrap_degrees};

pub use hit_volume::{BodyPart, HitVolume, body_volumes};
pub use input::{LookChange, PlayerInput};
pub use loadout::{Loadout, WeaponStats};
pub use stance::Stance;

pub type PlayerId = u64;

/// Vertical look limit in degrees, up and down.
const MAX_VERTICAL_LOOK: f32 = 90.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) position: Vec3,
    pub(crate) look_horizontal: f32,
    pub(crate) look_vertical: f32,
    pub(crate) stance: Stance,
    pub(crate) vertical_velocity: f32,
    pub(crate) grounded: bool,
    pub(crate) radius: f32,
    pub(crate) health: i32,
    pub(crate) money: i32,
    pub(crate) loadout: Loadout,
}

impl Player {
    pub fn new(id: PlayerId, position: Vec3, settings: &SimSettings) -> Self {
        Self {
            id,
            position,
            look_horizontal: 0.0,
            look_vertical: 0.0,
            stance: Stance::default(),
            vertical_velocity: 0.0,
            grounded: false,
            radius: settings.player_radius,
            health: settings.max_health,
            money: 0,
            loadout: Loadout::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleport; the next tick re-derives support from the new position.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.vertical_velocity = 0.0;
        self.grounded = false;
    }

    #[inline]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[inline]
    pub fn money(&self) -> i32 {
        self.money
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    #[inline]
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn stance(&self) -> &Stance {
        &self.stance
    }

    #[inline]
    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn set_loadout(&mut self, loadout: Loadout) {
        self.loadout = loadout;
    }

    #[inline]
    pub fn look_horizontal(&self) -> f32 {
        self.look_horizontal
    }

    #[inline]
    pub fn look_vertical(&self) -> f32 {
        self.look_vertical
    }

    /// Set absolute look angles. Horizontal wraps to `[0, 360)`, vertical clamps to ±90.
    pub fn look_at(&mut self, horizontal: f32, vertical: f32) {
        self.look_horizontal = wrap_degrees(horizontal);
        self.look_vertical = vertical.clamp(-MAX_VERTICAL_LOOK, MAX_VERTICAL_LOOK);
    }

    /// Turn horizontally by `degrees`.
    pub fn turn(&mut self, degrees: f32) {
        self.look_horizontal = wrap_degrees(self.look_horizontal + degrees);
    }

    pub fn apply_look(&mut self, change: LookChange) {
        match change {
            LookChange::At {
                horizontal,
                vertical,
            } => self.look_at(horizontal, vertical),
            LookChange::Turn { degrees } => self.turn(degrees),
        }
    }

    pub fn look_direction(&self) -> Vec3 {
        direction_from_angles(self.look_horizontal, self.look_vertical)
    }

    pub fn head_height(&self, settings: &SimSettings) -> f32 {
        self.stance.head_height(settings)
    }

    /// Shot origin: the center of the head volume.
    pub fn eye_position(&self, settings: &SimSettings) -> Vec3 {
        self.position + Vec3::new(0.0, self.head_height(settings) - settings.head_radius, 0.0)
    }

    pub fn hit_volumes(&self, settings: &SimSettings) -> [HitVolume; 6] {
        body_volumes(
            &self.position,
            self.head_height(settings),
            settings.head_radius,
            settings.head_height_stand,
            self.look_horizontal,
        )
    }

    /// Subtract health, clamping at zero. Returns true if this call killed the player.
    pub fn lower_health(&mut self, amount: i32) -> bool {
        if !self.is_alive() || amount <= 0 {
            return false;
        }
        self.health = self.health.saturating_sub(amount).max(0);
        if !self.is_alive() {
            info!("player {} died", self.id);
            return true;
        }
        false
    }

    /// Add (or with a negative amount, spend) money within `[0, max_money]`.
    pub fn earn_money(&mut self, amount: i32, max_money: i32) {
        self.money = self.money.saturating_add(amount).clamp(0, max_money);
    }

    /// Back to full health at `position`, standing and at rest. Money and loadout stay.
    pub fn respawn(&mut self, position: Vec3, settings: &SimSettings) {
        self.position = position;
        self.stance = Stance::default();
        self.vertical_velocity = 0.0;
        self.grounded = false;
        self.radius = settings.player_radius;
        self.health = settings.max_health;
        info!("player {} respawned at {:?}", self.id, position);
    }

    pub fn snapshot(&self, settings: &SimSettings) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id,
            position: self.position,
            look_horizontal: self.look_horizontal,
            look_vertical: self.look_vertical,
            head_height: self.head_height(settings),
            crouching: !self.stance.is_standing(),
            grounded: self.grounded,
            vertical_velocity: self.vertical_velocity,
            health: self.health,
            money: self.money,
            alive: self.is_alive(),
        }
    }
}

/// Per-tick kinematic and vital state handed to round/session logic.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub position: Vec3,
    pub look_horizontal: f32,
    pub look_vertical: f32,
    pub head_height: f32,
    pub crouching: bool,
    pub grounded: bool,
    pub vertical_velocity: f32,
    pub health: i32,
    pub money: i32,
    pub alive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(1, Vec3::zeros(), &SimSettings::default())
    }

    #[test]
    fn money_is_clamped() {
        let mut p = player();
        p.earn_money(20_000, 16_000);
        assert_eq!(p.money(), 16_000);
        p.earn_money(-50_000, 16_000);
        assert_eq!(p.money(), 0);
    }

    #[test]
    fn health_clamps_and_reports_kill_once() {
        let mut p = player();
        assert!(!p.lower_health(60));
        assert!(p.lower_health(60));
        assert_eq!(p.health(), 0);
        assert!(!p.lower_health(10));
        assert!(!p.is_alive());
    }

    #[test]
    fn look_wraps_and_clamps() {
        let mut p = player();
        p.look_at(370.0, 120.0);
        assert_eq!(p.look_horizontal(), 10.0);
        assert_eq!(p.look_vertical(), 90.0);
        p.turn(-20.0);
        assert_eq!(p.look_horizontal(), 350.0);
        p.apply_look(LookChange::At {
            horizontal: 180.0,
            vertical: -95.0,
        });
        assert_eq!(p.look_vertical(), -90.0);
        assert_eq!(p.look_direction(), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn respawn_keeps_money() {
        let settings = SimSettings::default();
        let mut p = player();
        p.earn_money(800, settings.max_money);
        p.lower_health(500);
        p.stance.request_crouch(true);
        p.respawn(Vec3::new(10.0, 0.0, 10.0), &settings);
        assert!(p.is_alive());
        assert_eq!(p.health(), settings.max_health);
        assert_eq!(p.money(), 800);
        assert!(p.stance().is_standing());
    }

    #[test]
    fn eye_sits_at_head_center() {
        let settings = SimSettings::default();
        let p = player();
        assert_eq!(p.eye_position(&settings).y, 178.0);
    }

    #[test]
    fn snapshot_serializes() {
        let settings = SimSettings::default();
        let json = serde_json::to_string(&player().snapshot(&settings)).unwrap();
        assert!(json.contains("\"health\":100"));
    }
}
