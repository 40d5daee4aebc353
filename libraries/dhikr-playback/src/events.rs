//! Controller Events
//!
//! Event-based communication for UI synchronization. The controller queues an
//! event at every visible change; callers drain them after each command or pump:
//! - State changes (loading, ready, playing, error)
//! - Duration discovered and progress updates
//! - Natural end of track
//! - Failures with their user-facing message

use crate::error::PlaybackFailure;
use crate::media::LoadId;
use crate::types::ControllerState;
use dhikr_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControllerEvent {
    /// Controller state changed
    StateChanged {
        /// The new state
        state: ControllerState,
    },

    /// A new load was issued for a track
    TrackLoading {
        /// Track being loaded
        track_id: TrackId,
        /// Tag of the load
        load: LoadId,
    },

    /// Media reported its real duration
    DurationKnown {
        /// Duration in seconds
        duration: f64,
    },

    /// Progress moved (time update or seek)
    ProgressChanged {
        /// Fraction of the duration, `0.0..=1.0`
        progress: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New level, `0.0..=1.0`
        volume: f64,
    },

    /// Track played through to its end
    TrackEnded {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Loading or starting playback failed
    Failed {
        /// Failure kind
        failure: PlaybackFailure,
        /// User-facing message
        message: String,
    },
}

impl ControllerEvent {
    /// Failure event carrying the failure's display message
    pub fn failed(failure: PlaybackFailure) -> Self {
        ControllerEvent::Failed {
            failure,
            message: failure.to_string(),
        }
    }
}
