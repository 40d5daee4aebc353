//! Shuffle order for playlist navigation
//!
//! A shuffled walk is a random permutation of the playlist's track ids with
//! the current track pinned first, so the walk starts where the listener is.

use dhikr_core::{Track, TrackId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Draw a shuffled walk over `tracks`
///
/// `first`, when present in `tracks`, is placed at index 0. Duplicate ids
/// keep only their first occurrence.
pub fn shuffled_order<R: Rng + ?Sized>(
    tracks: &[Track],
    first: Option<&TrackId>,
    rng: &mut R,
) -> Vec<TrackId> {
    let mut ids: Vec<TrackId> = Vec::with_capacity(tracks.len());
    for track in tracks {
        if !ids.contains(&track.id) {
            ids.push(track.id.clone());
        }
    }

    ids.shuffle(rng);

    if let Some(first) = first {
        if let Some(pos) = ids.iter().position(|id| id == first) {
            ids.swap(0, pos);
        }
    }

    ids
}

/// Whether `order` is a walk over exactly the ids in `tracks`
pub fn covers(order: &[TrackId], tracks: &[Track]) -> bool {
    order.len() <= tracks.len()
        && tracks.iter().all(|track| order.contains(&track.id))
        && order.iter().all(|id| tracks.iter().any(|track| &track.id == id))
}
