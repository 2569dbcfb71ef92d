use serde::{Deserialize, Serialize};

use crate::settings::SimSettings;

/// Crouch state with a linear transition.
///
/// `progress` counts transition ticks: `0` is fully standing, `crouch_ticks` fully crouched.
/// Each tick moves it one step toward the requested posture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stance {
    progress: u32,
    crouch_requested: bool,
}

impl Stance {
    #[inline]
    pub fn request_crouch(&mut self, crouch: bool) {
        self.crouch_requested = crouch;
    }

    #[inline]
    pub fn crouch_requested(&self) -> bool {
        self.crouch_requested
    }

    /// Advance one tick toward the requested posture.
    pub fn advance(&mut self, settings: &SimSettings) {
        if self.crouch_requested {
            self.progress = (self.progress + 1).min(settings.crouch_ticks);
        } else {
            self.progress = self.progress.saturating_sub(1);
        }
    }

    #[inline]
    pub fn progress(&self) -> u32 {
        self.progress
    }

    #[inline]
    pub fn is_standing(&self) -> bool {
        self.progress == 0 && !self.crouch_requested
    }

    #[inline]
    pub fn is_fully_crouched(&self, settings: &SimSettings) -> bool {
        self.progress >= settings.crouch_ticks
    }

    /// Crouched or on the way down: movement uses the crouch speed.
    #[inline]
    pub fn slows_movement(&self) -> bool {
        self.crouch_requested || self.progress > 0
    }

    /// Height of the top of the head above the feet.
    pub fn head_height(&self, settings: &SimSettings) -> f32 {
        if self.is_fully_crouched(settings) {
            return settings.head_height_crouch;
        }
        settings.head_height_stand - self.progress as f32 * settings.crouch_distance_per_tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_height_interpolates_over_transition() {
        let settings = SimSettings::default();
        let mut stance = Stance::default();
        assert_eq!(stance.head_height(&settings), settings.head_height_stand);

        stance.request_crouch(true);
        let mut heights = Vec::new();
        for _ in 0..settings.crouch_ticks {
            stance.advance(&settings);
            heights.push(stance.head_height(&settings));
        }
        assert!(heights.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(*heights.last().unwrap(), settings.head_height_crouch);
        assert!(stance.is_fully_crouched(&settings));

        stance.advance(&settings);
        assert_eq!(stance.head_height(&settings), settings.head_height_crouch);
    }

    #[test]
    fn standing_up_reverses_from_current_progress() {
        let settings = SimSettings::default();
        let mut stance = Stance::default();
        stance.request_crouch(true);
        stance.advance(&settings);
        stance.advance(&settings);

        stance.request_crouch(false);
        stance.advance(&settings);
        assert_eq!(stance.progress(), 1);
        assert!(stance.slows_movement());
        stance.advance(&settings);
        stance.advance(&settings);
        assert!(stance.is_standing());
        assert_eq!(stance.head_height(&settings), settings.head_height_stand);
    }
}
