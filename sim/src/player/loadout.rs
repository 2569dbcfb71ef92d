use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SHOT_DISTANCE;
use crate::damage::{ArmorType, DamageProfile};

/// Weapon numbers the simulation needs; owned by the weapon stat tables.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage: DamageProfile,
    /// Budget consumed by every wall, box or player the shot passes through.
    pub penetration_power: i32,
    pub max_distance: f32,
    /// Money credited to the shooter for a kill.
    pub kill_award: i32,
}

impl WeaponStats {
    pub fn new(damage: DamageProfile, penetration_power: i32, kill_award: i32) -> Self {
        Self {
            damage,
            penetration_power,
            max_distance: DEFAULT_SHOT_DISTANCE,
            kill_award,
        }
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }
}

impl Default for WeaponStats {
    /// Sidearm every player spawns with.
    fn default() -> Self {
        Self::new(DamageProfile::new(35.0, 0.5), 30_000, 300)
    }
}

/// Inventory-derived state the simulation reads on every attack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub weapon: WeaponStats,
    pub armor: ArmorType,
}

impl Loadout {
    pub fn new(weapon: WeaponStats, armor: ArmorType) -> Self {
        Self { weapon, armor }
    }
}
