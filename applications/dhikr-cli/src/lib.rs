//! Dhikr Player CLI
//!
//! Operator tool for the remote catalog: list tracks and playlists, print
//! share links, and register uploaded audio files.
//!
//! This library exposes configuration loading and output formatting for testing.

pub mod config;
pub mod error;
pub mod output;

pub use config::AppConfig;
pub use error::{CliError, Result};
