//! Dhikr Player Core
//!
//! Platform-agnostic catalog types and helpers shared by every Dhikr Player crate.
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `TrackId`, `PlaylistId`
//! - **Title fallback**: deriving a display title from an uploaded filename
//! - **Share links**: deep links and QR download names for individual tracks
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use dhikr_core::types::{Playlist, Track};
//!
//! let track = Track::new("1", "Morning Dhikr")
//!     .with_artist("Daily Dzikir")
//!     .with_duration(218.0)
//!     .with_audio_url("https://cdn.example.com/audio/morning.mp3");
//!
//! let playlist = Playlist::new("p1", "Mornings", vec![track.clone()]);
//! assert_eq!(playlist.position_of(&track.id), Some(0));
//!
//! let link = dhikr_core::share::track_link("https://dhikr.example.com/", &track.id).unwrap();
//! assert_eq!(link, "https://dhikr.example.com/track/1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod share;
pub mod title;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{Playlist, PlaylistId, Track, TrackId};
