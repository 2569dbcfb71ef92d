/*!
Damage model.

Turns a ballistic hit into a health delta, and an explosion distance into blast
damage. Pure functions: nothing here touches player state.
*/

use serde::{Deserialize, Serialize};

use crate::constants::{ARMOR_MITIGATION_KNEE, MAX_BLAST_DISTANCE};
use crate::player::BodyPart;

/// Armor worn by a player, as reported by the inventory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorType {
    #[default]
    None,
    Kevlar,
    KevlarAndHelmet,
}

impl ArmorType {
    /// Does this armor protect `part`? The head needs a helmet; legs are never covered.
    pub fn covers(self, part: BodyPart) -> bool {
        match (self, part) {
            (ArmorType::None, _) | (_, BodyPart::Legs) => false,
            (ArmorType::Kevlar, BodyPart::Head) => false,
            (ArmorType::KevlarAndHelmet, BodyPart::Head) => true,
            (_, BodyPart::Chest | BodyPart::Stomach | BodyPart::Arms) => true,
        }
    }
}

/// Per-weapon damage numbers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageProfile {
    pub base_damage: f32,
    pub head_multiplier: f32,
    pub chest_multiplier: f32,
    pub stomach_multiplier: f32,
    pub legs_multiplier: f32,
    pub arms_multiplier: f32,
    /// Share of armor protection ignored, in `[0, 1]`.
    pub armor_penetration: f32,
}

impl DamageProfile {
    /// Profile with the usual body multipliers.
    pub fn new(base_damage: f32, armor_penetration: f32) -> Self {
        Self {
            base_damage,
            head_multiplier: 4.0,
            chest_multiplier: 1.0,
            stomach_multiplier: 0.8,
            legs_multiplier: 0.75,
            arms_multiplier: 0.75,
            armor_penetration: armor_penetration.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn multiplier(&self, part: BodyPart) -> f32 {
        match part {
            BodyPart::Head => self.head_multiplier,
            BodyPart::Chest => self.chest_multiplier,
            BodyPart::Stomach => self.stomach_multiplier,
            BodyPart::Legs => self.legs_multiplier,
            BodyPart::Arms => self.arms_multiplier,
        }
    }

    /// Health lost by a target struck on `part`.
    ///
    /// `power_fraction` is the share of the shot's penetration power still left when it
    /// reaches the target (`1.0` for an unobstructed shot).
    pub fn damage(&self, part: BodyPart, armor: ArmorType, power_fraction: f32) -> i32 {
        let raw = self.base_damage * self.multiplier(part) * power_fraction.clamp(0.0, 1.0);
        let dealt = if armor.covers(part) {
            raw * (1.0 - armor_absorption(raw, self.armor_penetration))
        } else {
            raw
        };
        dealt.round().max(0.0) as i32
    }
}

/// Share of `damage` absorbed by armor. Falls toward zero as damage grows.
#[inline]
pub fn armor_absorption(damage: f32, armor_penetration: f32) -> f32 {
    if damage <= 0.0 {
        return 0.0;
    }
    (1.0 - armor_penetration.clamp(0.0, 1.0)) * ARMOR_MITIGATION_KNEE
        / (ARMOR_MITIGATION_KNEE + damage)
}

/// Damage dealt by an explosion to a player `distance_squared` away from it.
pub fn blast_damage(distance_squared: f32) -> i32 {
    const BANDS: [(f32, i32); 9] = [
        (0.9, 4),
        (0.8, 7),
        (0.7, 12),
        (0.6, 26),
        (0.5, 49),
        (0.4, 61),
        (0.3, 74),
        (0.2, 84),
        (0.1, 92),
    ];
    const POINT_BLANK: i32 = 500;

    let max = MAX_BLAST_DISTANCE * MAX_BLAST_DISTANCE;
    if distance_squared > max {
        return 0;
    }
    BANDS
        .iter()
        .find(|(fraction, _)| distance_squared > max * fraction)
        .map_or(POINT_BLANK, |(_, damage)| *damage)
}
