//! Row types exchanged with the remote data store.
//!
//! Field names follow the store's column names (`albumart`, `audiourl`,
//! `coverart`, `dzikir_id`). Conversions into the domain types live here too.

use chrono::{DateTime, Utc};
use dhikr_core::title::{filename_from_url, title_from_filename};
use dhikr_core::{Track, TrackId};
use serde::{Deserialize, Deserializer, Serialize};

/// Connection settings for the data store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,

    /// API key sent as `apikey` and bearer token
    pub api_key: String,
}

impl CatalogConfig {
    /// Create a new config.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

/// A row of the `dzikiraudio` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub albumart: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub audiourl: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TrackRow {
    /// Convert into a domain track.
    ///
    /// A missing or blank title falls back to one derived from the audio
    /// file name. A blank `audiourl` leaves the track unplayable.
    pub fn into_track(self) -> Track {
        let audio_url = self.audiourl.unwrap_or_default();
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => title_from_filename(filename_from_url(&audio_url)),
        };

        let mut track = Track::new(self.id, title)
            .with_artist(self.artist.unwrap_or_default())
            .with_album(self.album.unwrap_or_default())
            .with_duration(self.duration.unwrap_or(0.0))
            .with_audio_url(audio_url);

        if let Some(art) = self.albumart.filter(|art| !art.trim().is_empty()) {
            track = track.with_album_art(art);
        }
        track
    }
}

/// A row of the `playlists` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub coverart: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A row of the `playlist_items` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItemRow {
    #[serde(deserialize_with = "id_string")]
    pub playlist_id: String,
    #[serde(deserialize_with = "id_string")]
    pub dzikir_id: String,
    #[serde(default)]
    pub position: i64,
}

impl PlaylistItemRow {
    /// ID of the referenced track.
    pub fn track_id(&self) -> TrackId {
        TrackId::new(self.dzikir_id.clone())
    }
}

/// Insert payload for a new `dzikiraudio` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrackRow {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub audiourl: String,
    pub duration: f64,
}

/// Entry returned by the storage list endpoint.
///
/// Folders come back with a null `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageObject {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StorageObject {
    /// Whether this entry is a folder placeholder.
    pub fn is_folder(&self) -> bool {
        self.id.is_none()
    }
}

/// Accept both numeric and string primary keys.
pub(crate) fn id_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
