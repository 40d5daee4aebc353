//! Navigation helpers
//!
//! Pure transformations over [`PlayerState`]. None of them touch playback;
//! the session applies the new selection to the controller afterwards.
//!
//! `next` and `previous` look the current track up by identity and wrap at
//! both ends. With shuffle on they walk `shuffle_order` instead of the
//! playlist order. A selection that cannot be located is a silent no-op
//! (`None`).

use crate::shuffle::{covers, shuffled_order};
use crate::state::PlayerState;
use dhikr_core::{Playlist, Track};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What to do when the current track ends on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndAction {
    /// Play the same track again from position 0
    Restart,
    /// Select the next track and play it
    Advance,
    /// Nothing to advance to
    Stop,
}

/// Select `track` from `playlist`
///
/// Resets progress and leaves `is_playing` alone. With shuffle on, a new walk
/// is drawn when the playlist changed or the old walk no longer matches it.
pub fn select_track<R: Rng + ?Sized>(
    state: &PlayerState,
    track: Track,
    playlist: Playlist,
    rng: &mut R,
) -> PlayerState {
    let same_playlist = state
        .current_playlist
        .as_ref()
        .is_some_and(|current| current.id == playlist.id);

    let mut next = state.clone();
    next.progress = 0.0;

    if next.is_shuffle {
        if !same_playlist || !covers(&next.shuffle_order, &playlist.tracks) {
            next.shuffle_order = shuffled_order(&playlist.tracks, Some(&track.id), rng);
        }
    } else {
        next.shuffle_order.clear();
    }

    next.current_track = Some(track);
    next.current_playlist = Some(playlist);
    next
}

/// Move to the following track, wrapping to the start
pub fn next(state: &PlayerState) -> Option<PlayerState> {
    step(state, true)
}

/// Move to the preceding track, wrapping to the end
pub fn previous(state: &PlayerState) -> Option<PlayerState> {
    step(state, false)
}

/// Flip shuffle
///
/// Turning it on draws a walk with the current track first. Turning it off
/// discards the walk.
pub fn toggle_shuffle<R: Rng + ?Sized>(state: &PlayerState, rng: &mut R) -> PlayerState {
    let mut next = state.clone();
    next.is_shuffle = !state.is_shuffle;

    next.shuffle_order = match (&next.current_playlist, next.is_shuffle) {
        (Some(playlist), true) => shuffled_order(&playlist.tracks, next.current_track_id(), rng),
        _ => Vec::new(),
    };
    next
}

/// Flip repeat
pub fn toggle_repeat(state: &PlayerState) -> PlayerState {
    let mut next = state.clone();
    next.is_repeat = !state.is_repeat;
    next
}

/// Decide what follows a natural end of track
pub fn on_track_ended(state: &PlayerState) -> EndAction {
    if state.current_track.is_none() {
        EndAction::Stop
    } else if state.is_repeat {
        EndAction::Restart
    } else if state.current_index().is_some() {
        EndAction::Advance
    } else {
        EndAction::Stop
    }
}

fn step(state: &PlayerState, forward: bool) -> Option<PlayerState> {
    let playlist = state.current_playlist.as_ref()?;
    let current = state.current_track_id()?;

    let target = if state.is_shuffle && covers(&state.shuffle_order, &playlist.tracks) {
        let index = state.shuffle_order.iter().position(|id| id == current)?;
        let id = &state.shuffle_order[wrap(index, state.shuffle_order.len(), forward)];
        playlist.track(id)?
    } else {
        let index = playlist.position_of(current)?;
        &playlist.tracks[wrap(index, playlist.len(), forward)]
    };

    let mut next = state.clone();
    next.current_track = Some(target.clone());
    next.progress = 0.0;
    Some(next)
}

fn wrap(index: usize, len: usize, forward: bool) -> usize {
    if forward {
        (index + 1) % len
    } else if index == 0 {
        len - 1
    } else {
        index - 1
    }
}
