//! Core types for playback management

use crate::error::{PlaybackError, Result};
use crate::volume::DEFAULT_VOLUME;
use serde::{Deserialize, Serialize};

/// Controller state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerState {
    /// No track (or no playable track) selected
    Idle,

    /// Source assigned, waiting for the media to become ready
    Loading,

    /// Media ready, not playing
    ReadyPaused,

    /// Playing, or a play request is in flight
    ReadyPlaying,

    /// Loading or starting playback failed
    Error,
}

/// Live playback facts derived from the media resource
///
/// Invariants: `has_error` and `is_loading` are never both true, and
/// `is_playing` is false whenever either of them is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerSnapshot {
    /// Playback is running (or a play request is in flight)
    pub is_playing: bool,

    /// Position as a fraction of the duration, `0.0..=1.0`
    pub progress: f64,

    /// Duration in seconds, 0 until known
    pub duration: f64,

    /// Output level, `0.0..=1.0`
    pub volume: f64,

    /// A load is in flight for the current track
    pub is_loading: bool,

    /// The last load or play attempt failed
    pub has_error: bool,

    /// Human-readable failure, present only with `has_error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Default for ControllerSnapshot {
    fn default() -> Self {
        Self {
            is_playing: false,
            progress: 0.0,
            duration: 0.0,
            volume: DEFAULT_VOLUME,
            is_loading: false,
            has_error: false,
            error_message: None,
        }
    }
}

/// Configuration for the player session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 0.8)
    #[serde(default = "default_volume")]
    pub volume: f64,

    /// Initial shuffle flag (default: false)
    #[serde(default)]
    pub shuffle: bool,

    /// Initial repeat flag (default: false)
    #[serde(default)]
    pub repeat: bool,
}

fn default_volume() -> f64 {
    DEFAULT_VOLUME
}

impl PlaybackConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.volume.is_finite() || !(0.0..=1.0).contains(&self.volume) {
            return Err(PlaybackError::InvalidConfig(format!(
                "volume must be between 0.0 and 1.0, got {}",
                self.volume
            )));
        }
        Ok(())
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            shuffle: false,
            repeat: false,
        }
    }
}
