/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// A single playable audio item
///
/// Tracks are built by the catalog layer and are read-only to playback.
/// `duration` is the catalog's hint in seconds; the playback controller
/// replaces it with the media's real duration once that is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist (or reciter/category) name
    #[serde(default)]
    pub artist: String,

    /// Album name
    #[serde(default)]
    pub album: String,

    /// Album art image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_art: Option<String>,

    /// Catalog-supplied duration in seconds (display hint)
    #[serde(default)]
    pub duration: f64,

    /// Audio source URL; `None` means the track is not playable yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: String::new(),
            album: String::new(),
            album_art: None,
            duration: 0.0,
            audio_url: None,
        }
    }

    /// Set the artist name
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Set the album name
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Set the album art reference
    #[must_use]
    pub fn with_album_art(mut self, album_art: impl Into<String>) -> Self {
        self.album_art = Some(album_art.into());
        self
    }

    /// Set the catalog duration hint (seconds)
    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    /// Set the audio source URL
    ///
    /// Blank URLs are treated as absent.
    #[must_use]
    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.audio_url = if url.trim().is_empty() {
            None
        } else {
            Some(url)
        };
        self
    }

    /// Audio URL if the track can be loaded
    pub fn playable_url(&self) -> Option<&str> {
        self.audio_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Whether the track has a loadable source
    pub fn is_playable(&self) -> bool {
        self.playable_url().is_some()
    }

    /// Raw audio URL for the "open directly" fallback when playback fails
    pub fn direct_link(&self) -> Option<&str> {
        self.playable_url()
    }
}
