//! Platform-agnostic media resource trait
//!
//! Abstracts the single playable-media handle (an HTML audio element in the
//! browser, a native player elsewhere) that the controller drives.
//!
//! Every asynchronous outcome comes back as a [`MediaNotice`] tagged with the
//! [`LoadId`] the controller passed to [`MediaResource::load`]. The controller
//! uses the tag to throw away notices from loads it has already superseded.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag for one load attempt
///
/// Issued by the controller, strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoadId(u64);

impl LoadId {
    /// Create a load tag from its raw value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// Tag for one `play()` request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayId(u64);

impl PlayId {
    /// Create a play tag from its raw value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "play#{}", self.0)
    }
}

/// Coarse reason attached to a media error
///
/// Adapters normalize whatever error object their platform produces into one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaErrorReason {
    /// Fetch aborted before completion
    Aborted,
    /// Network failure or cross-origin block
    Network,
    /// Source fetched but could not be decoded
    Decode,
    /// Format/CORS combination the runtime refuses to play
    Unsupported,
    /// No specific reason available
    Unknown,
}

impl MediaErrorReason {
    /// Map a platform media-error code
    ///
    /// 1 = aborted, 2 = network, 3 = decode, 4 = source not supported.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => MediaErrorReason::Aborted,
            2 => MediaErrorReason::Network,
            3 => MediaErrorReason::Decode,
            4 => MediaErrorReason::Unsupported,
            _ => MediaErrorReason::Unknown,
        }
    }
}

/// Lifecycle event reported by a media resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Metadata loaded; duration (seconds) is known but decoding is not yet guaranteed
    Ready {
        /// Media duration in seconds
        duration: f64,
    },

    /// Enough data is decodable to start playback
    CanPlay,

    /// Periodic position report
    TimeUpdate {
        /// Current position in seconds
        position: f64,
    },

    /// Playback reached the end of the media
    Ended,

    /// Loading or playback failed
    Error {
        /// Normalized error reason
        reason: MediaErrorReason,
    },

    /// A `play()` request was accepted by the runtime
    PlayStarted {
        /// The request this outcome belongs to
        play: PlayId,
    },

    /// A `play()` request was refused (autoplay policy, missing user gesture)
    PlayRejected {
        /// The request this outcome belongs to
        play: PlayId,
    },
}

/// Media event tagged with the load it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaNotice {
    /// Load attempt that produced the event
    pub load: LoadId,
    /// The event
    pub event: MediaEvent,
}

impl MediaNotice {
    /// Tag an event with its load
    pub fn new(load: LoadId, event: MediaEvent) -> Self {
        Self { load, event }
    }
}

/// Single playable-media handle
///
/// Implementors wrap exactly one underlying player. All methods are called from
/// one logical thread; none may block. Anything slow (fetch, decode, the
/// runtime's verdict on `play`) is reported later through [`drain_notices`].
///
/// [`drain_notices`]: MediaResource::drain_notices
pub trait MediaResource {
    /// Start loading a new source
    ///
    /// Discards any pending load, resets ready/duration state and begins fetching
    /// `url`. May be called again before the previous load settles; the last call
    /// wins. Every later notice produced for this source must carry `load`.
    fn load(&mut self, url: &str, load: LoadId);

    /// Request playback
    ///
    /// Must not fail synchronously. The runtime's decision arrives as
    /// [`MediaEvent::PlayStarted`] or [`MediaEvent::PlayRejected`] carrying `play`.
    fn play(&mut self, play: PlayId);

    /// Pause playback (idempotent, always succeeds)
    fn pause(&mut self);

    /// Set the playback position in seconds
    ///
    /// No-op (or clamped) when the duration is unknown.
    fn seek(&mut self, seconds: f64);

    /// Set the output level in `0.0..=1.0`, effective immediately
    fn set_volume(&mut self, level: f64);

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Duration in seconds, once known
    fn duration(&self) -> Option<f64>;

    /// Take every notice produced since the last call, oldest first
    fn drain_notices(&mut self) -> Vec<MediaNotice>;

    /// Pause and release the underlying handle
    ///
    /// After this returns no further notices may be produced.
    fn release(&mut self);
}
