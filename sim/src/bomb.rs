use serde::{Deserialize, Serialize};

use crate::damage::blast_damage;
use crate::geometry::Vec3;
use crate::utils::ms_to_ticks;

/// Defuse ticks gained per tick with a defuse kit.
const DEFUSE_KIT_RATE: u32 = 2;

/// Plant and defuse progress plus the planted position.
///
/// Progress is counted in ticks; each call to [`Bomb::plant`] or [`Bomb::defuse`] is one
/// tick of holding the action.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    position: Option<Vec3>,
    plant_ticks: u32,
    plant_ticks_max: u32,
    defuse_ticks: u32,
    defuse_ticks_max: u32,
}

impl Bomb {
    pub fn new(plant_time_ms: u32, defuse_time_ms: u32, tick_ms: u32) -> Self {
        Self {
            position: None,
            plant_ticks: 0,
            plant_ticks_max: ms_to_ticks(plant_time_ms, tick_ms),
            defuse_ticks: 0,
            defuse_ticks_max: ms_to_ticks(defuse_time_ms, tick_ms),
        }
    }

    /// One tick of planting. Returns true once planting is complete.
    pub fn plant(&mut self) -> bool {
        self.plant_ticks = self.plant_ticks.saturating_add(1);
        self.plant_ticks >= self.plant_ticks_max
    }

    /// One tick of defusing. A kit doubles the rate. Returns true once defused.
    pub fn defuse(&mut self, has_kit: bool) -> bool {
        let rate = if has_kit { DEFUSE_KIT_RATE } else { 1 };
        self.defuse_ticks = self.defuse_ticks.saturating_add(rate);
        self.defuse_ticks >= self.defuse_ticks_max
    }

    /// Drop all progress, e.g. when the player lets go of the action.
    pub fn reset(&mut self) {
        self.plant_ticks = 0;
        self.defuse_ticks = 0;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = Some(position);
    }

    pub fn position(&self) -> Option<Vec3> {
        self.position
    }

    pub fn plant_progress(&self) -> (u32, u32) {
        (self.plant_ticks, self.plant_ticks_max)
    }

    pub fn defuse_progress(&self) -> (u32, u32) {
        (self.defuse_ticks, self.defuse_ticks_max)
    }

    /// Blast damage to something at `target`. Zero when the bomb has no position.
    pub fn damage_at(&self, target: &Vec3) -> i32 {
        self.position
            .map_or(0, |p| blast_damage((target - p).norm_squared()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_counts_ticks() {
        let mut bomb = Bomb::new(45, 90, 15);
        assert_eq!(bomb.plant_progress(), (0, 3));
        assert!(!bomb.plant());
        assert!(!bomb.plant());
        assert!(bomb.plant());
    }

    #[test]
    fn kit_defuses_twice_as_fast() {
        let mut with_kit = Bomb::new(45, 60, 15);
        let mut without = with_kit;
        assert!(!with_kit.defuse(true));
        assert!(with_kit.defuse(true));

        for _ in 0..3 {
            assert!(!without.defuse(false));
        }
        assert!(without.defuse(false));
    }

    #[test]
    fn reset_clears_progress() {
        let mut bomb = Bomb::new(45, 60, 15);
        bomb.plant();
        bomb.defuse(true);
        bomb.reset();
        assert_eq!(bomb.plant_progress().0, 0);
        assert_eq!(bomb.defuse_progress().0, 0);
    }

    #[test]
    fn damage_needs_a_position() {
        let mut bomb = Bomb::new(45, 60, 15);
        assert_eq!(bomb.damage_at(&Vec3::zeros()), 0);
        bomb.set_position(Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(bomb.damage_at(&Vec3::zeros()), 500);
        assert_eq!(bomb.damage_at(&Vec3::new(0.0, 0.0, 2_000.0)), 0);
    }
}
