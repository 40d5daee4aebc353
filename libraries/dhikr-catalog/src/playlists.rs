//! Playlist assembly from header rows, membership rows and tracks.

use crate::types::{PlaylistItemRow, PlaylistRow};
use dhikr_core::{Playlist, Track, TrackId};
use std::collections::HashMap;
use tracing::trace;

/// Build playlists from their rows.
///
/// Each playlist's tracks follow item `position`. Items pointing at tracks
/// that are not in `tracks` are skipped. Playlist order is kept as given.
pub fn assemble_playlists(
    playlists: Vec<PlaylistRow>,
    mut items: Vec<PlaylistItemRow>,
    tracks: &[Track],
) -> Vec<Playlist> {
    let by_id: HashMap<&TrackId, &Track> = tracks.iter().map(|track| (&track.id, track)).collect();

    // stable, so equal positions keep their fetch order
    items.sort_by_key(|item| item.position);

    playlists
        .into_iter()
        .map(|row| {
            let members: Vec<Track> = items
                .iter()
                .filter(|item| item.playlist_id == row.id)
                .filter_map(|item| {
                    let found = by_id.get(&item.track_id()).map(|track| (*track).clone());
                    if found.is_none() {
                        trace!(playlist_id = %row.id, track_id = %item.dzikir_id, "skipping unknown track");
                    }
                    found
                })
                .collect();

            let playlist = Playlist::new(row.id, row.name, members);
            match row.coverart.filter(|art| !art.trim().is_empty()) {
                Some(art) => playlist.with_cover_art(art),
                None => playlist,
            }
        })
        .collect()
}
