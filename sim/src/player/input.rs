use serde::{Deserialize, Serialize};

use crate::geometry::Vec3;
use crate::settings::SimSettings;
use crate::utils::horizontal_basis;

/// Requested look change for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LookChange {
    /// Absolute angles in degrees.
    At { horizontal: f32, vertical: f32 },
    /// Horizontal turn relative to the current angle.
    Turn { degrees: f32 },
}

/// Everything a client may ask of its player during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub crouch: bool,
    pub walk: bool,
    pub attack: bool,
    pub look: Option<LookChange>,
}

impl PlayerInput {
    pub fn is_moving(&self) -> bool {
        (self.forward != self.backward) || (self.left != self.right)
    }

    /// Horizontal displacement requested for one tick.
    ///
    /// Opposite keys cancel; diagonal intent is normalized so it never outruns a straight
    /// one. `slowed` applies the crouch multiplier.
    pub fn horizontal_delta(&self, horizontal_deg: f32, slowed: bool, settings: &SimSettings) -> Vec3 {
        let (forward, right) = horizontal_basis(horizontal_deg);
        let axis = |pos: bool, neg: bool| match (pos, neg) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        let intent = forward * axis(self.forward, self.backward) + right * axis(self.right, self.left);
        let Some(direction) = intent.try_normalize(f32::EPSILON) else {
            return Vec3::zeros();
        };

        let mut distance = settings.move_distance_per_tick;
        if slowed {
            distance *= settings.crouch_multiplier;
        }
        if self.walk {
            distance *= settings.walk_multiplier;
        }
        direction * distance
    }
}
