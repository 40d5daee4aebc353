//! Volume level handling
//!
//! The controller works with a linear output level in `0.0..=1.0`, the same
//! scale the media resource takes. Out-of-range input is clamped and
//! non-finite input is ignored so NaN can never reach the backend.

use serde::{Deserialize, Serialize};

/// Default output level (80%)
pub const DEFAULT_VOLUME: f64 = 0.8;

/// Output level in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volume {
    level: f64,
}

impl Volume {
    /// Create a volume level, clamped to `0.0..=1.0`
    ///
    /// Non-finite input falls back to [`DEFAULT_VOLUME`].
    pub fn new(level: f64) -> Self {
        let level = if level.is_finite() {
            level.clamp(0.0, 1.0)
        } else {
            DEFAULT_VOLUME
        };
        Self { level }
    }

    /// Set the level, clamped to `0.0..=1.0`
    ///
    /// Returns `false` (leaving the level unchanged) for NaN or infinite input.
    pub fn set_level(&mut self, level: f64) -> bool {
        if !level.is_finite() {
            return false;
        }
        self.level = level.clamp(0.0, 1.0);
        true
    }

    /// Current level
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Whether output is silent
    pub fn is_silent(&self) -> bool {
        self.level == 0.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}
