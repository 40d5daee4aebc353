//! Error types for playback management

use crate::media::MediaErrorReason;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Playback command errors
///
/// These are returned to the caller of a command that could not be applied.
/// Failures of the media itself are never returned this way; they surface as a
/// [`PlaybackFailure`] in the controller snapshot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Seek requested before the media reported its duration; the request is dropped
    #[error("Duration not known yet, seek dropped")]
    DurationUnknown,

    /// Invalid seek position (fraction outside 0..=1 after clamping, e.g. NaN)
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The controller was shut down and no longer owns its media resource
    #[error("Playback controller has been shut down")]
    Released,

    /// Platform media backend could not be created
    #[error("Media backend error: {0}")]
    Backend(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// User-visible playback failure
///
/// The `Display` text is the `errorMessage` shown next to the retry affordance.
/// The view layer renders it as-is and never interprets the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackFailure {
    /// Loading stopped before completion
    #[error("Loading was aborted before the audio finished loading.")]
    Aborted,

    /// Fetch failed, or a cross-origin policy blocked it
    #[error("Network error while loading audio. The server may be unreachable or blocking cross-origin requests.")]
    Network,

    /// Fetched but undecodable (corrupt file or unsupported codec)
    #[error("The audio file could not be decoded. It may be corrupt or use an unsupported codec.")]
    Decode,

    /// Format/CORS combination the runtime refuses to play
    #[error("This audio format is not supported, or cross-origin policy prevents playing it.")]
    Unsupported,

    /// The platform requires a direct user gesture before playback may start
    #[error("Playback was blocked until you interact with the page. Press play to start the audio.")]
    AutoplayRejected,

    /// No specific reason available
    #[error("Unable to load this audio source.")]
    Unknown,
}

impl PlaybackFailure {
    /// Whether this failure happened while loading (recover with `retry_loading`)
    pub fn is_load_failure(self) -> bool {
        !matches!(self, PlaybackFailure::AutoplayRejected)
    }
}

impl From<MediaErrorReason> for PlaybackFailure {
    fn from(reason: MediaErrorReason) -> Self {
        match reason {
            MediaErrorReason::Aborted => PlaybackFailure::Aborted,
            MediaErrorReason::Network => PlaybackFailure::Network,
            MediaErrorReason::Decode => PlaybackFailure::Decode,
            MediaErrorReason::Unsupported => PlaybackFailure::Unsupported,
            MediaErrorReason::Unknown => PlaybackFailure::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_message_mentions_cross_origin() {
        let message = PlaybackFailure::from(MediaErrorReason::Network).to_string();
        assert!(message.contains("Network"));
        assert!(message.contains("cross-origin"));
    }

    #[test]
    fn autoplay_is_not_a_load_failure() {
        assert!(!PlaybackFailure::AutoplayRejected.is_load_failure());
        assert!(PlaybackFailure::Decode.is_load_failure());
    }

    #[test]
    fn failure_serializes_kebab_case() {
        let json = serde_json::to_string(&PlaybackFailure::AutoplayRejected).unwrap();
        assert_eq!(json, "\"autoplay-rejected\"");
    }
}
