/// Playlist domain type
use crate::types::{PlaylistId, Track, TrackId};
use serde::{Deserialize, Serialize};

/// Ordered collection of tracks
///
/// Order is meaningful: it defines next/previous navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Cover art image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,

    /// Tracks in playback order
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Create a new playlist
    pub fn new(id: impl Into<PlaylistId>, name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cover_art: None,
            tracks,
        }
    }

    /// Set the cover art reference
    #[must_use]
    pub fn with_cover_art(mut self, cover_art: impl Into<String>) -> Self {
        self.cover_art = Some(cover_art.into());
        self
    }

    /// Single-track playlist used when a track is opened through its deep link
    pub fn single(track: Track) -> Self {
        Self {
            id: PlaylistId::new("single-track"),
            name: track.title.clone(),
            cover_art: track.album_art.clone(),
            tracks: vec![track],
        }
    }

    /// Index of the first track with the given id
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|track| &track.id == id)
    }

    /// Track with the given id
    pub fn track(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|track| &track.id == id)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist() -> Playlist {
        Playlist::new(
            "1",
            "Chill Vibes",
            vec![
                Track::new("1", "Daydreamer"),
                Track::new("3", "Mountain Echo"),
                Track::new("5", "Ocean Breeze"),
            ],
        )
    }

    #[test]
    fn position_of_uses_identity() {
        let playlist = playlist();
        assert_eq!(playlist.position_of(&TrackId::new("3")), Some(1));
        assert_eq!(playlist.position_of(&TrackId::new("2")), None);
    }

    #[test]
    fn single_track_playlist_mirrors_track() {
        let track = Track::new("9", "Evening Dua").with_album_art("dua.jpg");
        let playlist = Playlist::single(track.clone());

        assert_eq!(playlist.name, "Evening Dua");
        assert_eq!(playlist.cover_art.as_deref(), Some("dua.jpg"));
        assert_eq!(playlist.tracks, vec![track]);
    }

    #[test]
    fn deserializes_inbound_shape() {
        let json = r#"{"id": "2", "name": "Evening Mix", "coverArt": null, "tracks": []}"#;
        let playlist: Playlist = serde_json::from_str(json).unwrap();
        assert_eq!(playlist.name, "Evening Mix");
        assert!(playlist.is_empty());
    }
}
