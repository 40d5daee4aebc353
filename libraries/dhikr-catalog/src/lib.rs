//! Dhikr Player Catalog
//!
//! Client for the remote data store that holds the audio catalog.
//!
//! # Features
//!
//! - **Tracks**: Fetch the `dzikiraudio` table as domain [`Track`](dhikr_core::Track)s
//! - **Playlists**: Fetch playlists with their tracks in item order
//! - **Storage sync**: Register audio files uploaded to a storage bucket
//!
//! # Example
//!
//! ```ignore
//! use dhikr_catalog::{CatalogClient, CatalogConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(CatalogConfig::new("https://xyz.supabase.co", "anon-key"))?;
//!
//!     let tracks = client.fetch_tracks().await?;
//!     println!("Found {} tracks", tracks.len());
//!
//!     let report = client.sync_bucket("audio").await?;
//!     println!("Added {} new tracks", report.inserted());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod ingest;
mod playlists;
mod types;

pub use client::{CatalogClient, PLAYLISTS_TABLE, PLAYLIST_ITEMS_TABLE, TRACKS_TABLE};
pub use error::{CatalogError, Result};
pub use ingest::{
    classify, is_audio_file, new_track_row, public_object_url, Category, FileReport, FileStatus,
    IngestOutcome, SyncReport, AUDIO_EXTENSIONS, DEFAULT_BUCKET,
};
pub use playlists::assemble_playlists;
pub use types::{CatalogConfig, NewTrackRow, PlaylistItemRow, PlaylistRow, StorageObject, TrackRow};
