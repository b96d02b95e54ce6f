//! Player-facing settings
//!
//! Settings are host-persisted preferences, distinct from the tuning tables
//! in [`crate::config`]: the host may change them between (or during) runs
//! and they survive restarts untouched.

use serde::{Deserialize, Serialize};

use crate::season::Season;

pub const SPEED_MULTIPLIER_MIN: f32 = 0.5;
pub const SPEED_MULTIPLIER_MAX: f32 = 2.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub season: Season,
    pub speed_multiplier: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            season: Season::Spring,
            speed_multiplier: 1.0,
        }
    }
}

impl Settings {
    /// Clamp the multiplier into its supported range; non-finite values
    /// fall back to 1.0.
    pub fn sanitized(mut self) -> Self {
        if !self.speed_multiplier.is_finite() {
            self.speed_multiplier = 1.0;
        }
        self.speed_multiplier = self
            .speed_multiplier
            .clamp(SPEED_MULTIPLIER_MIN, SPEED_MULTIPLIER_MAX);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let s = Settings::default();
        assert_eq!(s.season, Season::Spring);
        assert_eq!(s.speed_multiplier, 1.0);
    }

    #[test]
    fn test_sanitize_clamps_multiplier() {
        let s = Settings {
            speed_multiplier: 9.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(s.speed_multiplier, SPEED_MULTIPLIER_MAX);

        let s = Settings {
            speed_multiplier: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(s.speed_multiplier, 1.0);
    }
}
