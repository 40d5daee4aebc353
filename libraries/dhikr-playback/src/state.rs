//! Player session state
//!
//! Selection facts (current track, playlist, shuffle and repeat) live here.
//! Playback facts are copied in from the controller snapshot, never set directly.

use crate::types::{ControllerSnapshot, PlaybackConfig};
use dhikr_core::{Playlist, Track, TrackId};
use serde::{Deserialize, Serialize};

/// Presentable player state
///
/// Invariant: with no current track, `is_playing` is false and `progress` is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    /// Selected track
    pub current_track: Option<Track>,

    /// Playlist the track was selected from
    pub current_playlist: Option<Playlist>,

    /// Copied from the controller snapshot
    pub is_playing: bool,

    /// Copied from the controller snapshot, `0.0..=1.0`
    pub progress: f64,

    /// Copied from the controller snapshot, `0.0..=1.0`
    pub volume: f64,

    /// Shuffle flag
    pub is_shuffle: bool,

    /// Repeat flag
    pub is_repeat: bool,

    /// Shuffled walk over the current playlist, empty while shuffle is off
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shuffle_order: Vec<TrackId>,
}

impl PlayerState {
    /// Initial state from configuration
    pub fn from_config(config: &PlaybackConfig) -> Self {
        Self {
            current_track: None,
            current_playlist: None,
            is_playing: false,
            progress: 0.0,
            volume: config.volume,
            is_shuffle: config.shuffle,
            is_repeat: config.repeat,
            shuffle_order: Vec::new(),
        }
    }

    /// ID of the selected track
    pub fn current_track_id(&self) -> Option<&TrackId> {
        self.current_track.as_ref().map(|track| &track.id)
    }

    /// Position of the selected track in the current playlist
    pub fn current_index(&self) -> Option<usize> {
        let id = self.current_track_id()?;
        self.current_playlist.as_ref()?.position_of(id)
    }

    /// Copy `is_playing`, `progress` and `volume` from a controller snapshot
    pub fn apply_snapshot(&mut self, snapshot: &ControllerSnapshot) {
        self.volume = snapshot.volume;
        if self.current_track.is_some() {
            self.is_playing = snapshot.is_playing;
            self.progress = snapshot.progress;
        } else {
            self.is_playing = false;
            self.progress = 0.0;
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::from_config(&PlaybackConfig::default())
    }
}
