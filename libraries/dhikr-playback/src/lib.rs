//! Dhikr Player Playback
//!
//! Platform-agnostic playback control for a single audio element.
//!
//! # Layers
//!
//! - [`MediaResource`]: the one playable-media handle (an `HTMLAudioElement`
//!   in the browser behind the `web` feature, a scripted fake in tests)
//! - [`PlaybackController`]: state machine over the media that turns commands
//!   and asynchronous media notices into a consistent [`ControllerSnapshot`]
//! - [`PlayerSession`]: selection state (track, playlist, shuffle, repeat)
//!   layered over the controller, with end-of-track policy
//! - [`navigation`]: pure next/previous/select transformations
//!
//! # Example
//!
//! ```rust,ignore
//! use dhikr_playback::{PlaybackConfig, PlayerSession};
//! use dhikr_playback::web::HtmlAudioResource;
//!
//! let media = HtmlAudioResource::new()?;
//! let mut session = PlayerSession::new(media, PlaybackConfig::default())?;
//!
//! session.select_track(track, playlist);
//! session.play();
//!
//! // On every animation frame / timer tick
//! for event in session.pump() {
//!     render(&event);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod controller;
pub mod error;
pub mod events;
pub mod media;
pub mod navigation;
pub mod session;
pub mod shuffle;
pub mod state;
pub mod types;
pub mod volume;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use controller::PlaybackController;
pub use error::{PlaybackError, PlaybackFailure, Result};
pub use events::ControllerEvent;
pub use media::{LoadId, MediaErrorReason, MediaEvent, MediaNotice, MediaResource, PlayId};
pub use navigation::EndAction;
pub use session::PlayerSession;
pub use state::PlayerState;
pub use types::{ControllerSnapshot, ControllerState, PlaybackConfig};
pub use volume::Volume;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::HtmlAudioResource;
