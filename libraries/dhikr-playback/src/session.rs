//! Player session - selection state layered over the controller
//!
//! The session is the command surface the view layer talks to. It keeps the
//! selection facts in a [`PlayerState`], forwards playback commands to the
//! [`PlaybackController`], and copies the controller snapshot back into the
//! state after every command and pump.

use crate::{
    controller::PlaybackController,
    error::Result,
    events::ControllerEvent,
    media::MediaResource,
    navigation::{self, EndAction},
    state::PlayerState,
    types::{ControllerSnapshot, PlaybackConfig},
};
use dhikr_core::{Playlist, Track};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Player session
pub struct PlayerSession<M: MediaResource> {
    controller: PlaybackController<M>,
    state: PlayerState,
    rng: StdRng,
}

impl<M: MediaResource> PlayerSession<M> {
    /// Create a session around a media resource
    pub fn new(media: M, config: PlaybackConfig) -> Result<Self> {
        Self::with_rng(media, config, StdRng::from_entropy())
    }

    /// Create a session with a fixed shuffle seed
    pub fn with_seed(media: M, config: PlaybackConfig, seed: u64) -> Result<Self> {
        Self::with_rng(media, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(media: M, config: PlaybackConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;

        let controller = PlaybackController::new(media, config.volume);
        let mut state = PlayerState::from_config(&config);
        state.apply_snapshot(&controller.snapshot());

        Ok(Self {
            controller,
            state,
            rng,
        })
    }

    // ===== Selection =====

    /// Select `track` from `playlist`
    ///
    /// Resets progress and loads the track. Does not start playback.
    /// Selecting the track that is already loaded restarts it from 0.
    pub fn select_track(&mut self, track: Track, playlist: Playlist) {
        debug!(track_id = %track.id, playlist_id = %playlist.id, "selecting track");

        self.state = navigation::select_track(&self.state, track, playlist, &mut self.rng);
        self.load_current();
        self.sync();
    }

    /// Advance to the next track
    ///
    /// Returns `false` (and changes nothing) when the current track cannot be
    /// located in the current playlist. Playback continues on the new track
    /// only if it was running or requested before.
    pub fn next(&mut self) -> bool {
        let target = navigation::next(&self.state);
        self.navigate(target)
    }

    /// Go back to the previous track
    pub fn previous(&mut self) -> bool {
        let target = navigation::previous(&self.state);
        self.navigate(target)
    }

    /// Flip the shuffle flag
    pub fn toggle_shuffle(&mut self) {
        self.state = navigation::toggle_shuffle(&self.state, &mut self.rng);
    }

    /// Flip the repeat flag
    pub fn toggle_repeat(&mut self) {
        self.state = navigation::toggle_repeat(&self.state);
    }

    // ===== Playback =====

    /// Toggle between play and pause
    pub fn play_pause(&mut self) {
        self.controller.toggle();
        self.sync();
    }

    /// Request playback
    pub fn play(&mut self) {
        self.controller.play();
        self.sync();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.controller.pause();
        self.sync();
    }

    /// Seek to a fraction (0.0-1.0) of the current track
    pub fn seek(&mut self, fraction: f64) -> Result<()> {
        let result = self.controller.seek(fraction);
        self.sync();
        result
    }

    /// Set output volume (0.0-1.0)
    pub fn set_volume(&mut self, level: f64) {
        self.controller.set_volume(level);
        self.sync();
    }

    /// Reload the current track after a failure
    pub fn retry_loading(&mut self) {
        self.controller.retry_loading();
        self.sync();
    }

    /// Apply pending media notices and react to the end of a track
    ///
    /// Returns every controller event produced, including those caused by
    /// the end-of-track reaction.
    pub fn pump(&mut self) -> Vec<ControllerEvent> {
        let mut events = self.controller.pump();

        let ended = events
            .iter()
            .any(|event| matches!(event, ControllerEvent::TrackEnded { .. }));
        if ended {
            self.handle_track_ended();
            events.extend(self.controller.drain_events());
        }

        self.sync();
        events
    }

    /// Release the media resource
    pub fn shutdown(&mut self) {
        self.controller.shutdown();
        self.sync();
    }

    // ===== Queries =====

    /// Presentable player state
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Loading and error facts for the view layer
    pub fn snapshot(&self) -> ControllerSnapshot {
        self.controller.snapshot()
    }

    /// The underlying controller
    pub fn controller(&self) -> &PlaybackController<M> {
        &self.controller
    }

    // ===== Internal =====

    fn navigate(&mut self, target: Option<PlayerState>) -> bool {
        let Some(target) = target else {
            debug!("current track not in playlist, navigation ignored");
            return false;
        };

        let resume = self.controller.is_play_requested();
        self.state = target;
        self.load_current();
        if resume {
            self.controller.play();
        }
        self.sync();
        true
    }

    fn handle_track_ended(&mut self) {
        match navigation::on_track_ended(&self.state) {
            EndAction::Restart => {
                debug!("repeat on, restarting track");
                self.restart();
                self.controller.play();
            }
            EndAction::Advance => {
                if let Some(target) = navigation::next(&self.state) {
                    self.state = target;
                    self.load_current();
                    self.controller.play();
                }
            }
            EndAction::Stop => {}
        }
    }

    /// Hand the selected track to the controller, restarting it if unchanged
    fn load_current(&mut self) {
        if !self.controller.set_track(self.state.current_track.as_ref()) {
            self.restart();
        }
    }

    fn restart(&mut self) {
        // Seek errors only mean the duration is not known yet; progress is 0 then anyway
        let _ = self.controller.seek(0.0);
    }

    fn sync(&mut self) {
        self.state.apply_snapshot(&self.controller.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::fake::{fake_media, Call, FakeHandle, FakeMedia};
    use crate::types::ControllerState;

    fn track(id: &str) -> Track {
        Track::new(id, id.to_uppercase()).with_audio_url(format!("https://cdn.test/{id}.mp3"))
    }

    fn playlist(ids: &[&str]) -> Playlist {
        Playlist::new("p", "Playlist", ids.iter().map(|id| track(id)).collect())
    }

    fn session() -> (PlayerSession<FakeMedia>, FakeHandle) {
        let (media, handle) = fake_media();
        let session = PlayerSession::with_seed(media, PlaybackConfig::default(), 1).unwrap();
        (session, handle)
    }

    fn current(session: &PlayerSession<FakeMedia>) -> &str {
        session.state().current_track_id().unwrap().as_str()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let (media, _handle) = fake_media();
        let config = PlaybackConfig {
            volume: 2.0,
            ..PlaybackConfig::default()
        };
        assert!(PlayerSession::new(media, config).is_err());
    }

    #[test]
    fn select_loads_without_playing() {
        let (mut session, handle) = session();
        session.select_track(track("a"), playlist(&["a", "b"]));

        assert_eq!(current(&session), "a");
        assert_eq!(handle.load_count(), 1);
        assert_eq!(handle.play_count(), 0);
        assert!(!session.state().is_playing);
        assert!(session.snapshot().is_loading);
    }

    #[test]
    fn next_keeps_playing_when_active() {
        let (mut session, handle) = session();
        session.select_track(track("a"), playlist(&["a", "b"]));
        handle.ready(100.0);
        session.pump();
        session.play();
        assert!(session.state().is_playing);

        assert!(session.next());
        assert_eq!(current(&session), "b");
        assert!(!session.state().is_playing);

        handle.ready(80.0);
        session.pump();
        assert!(session.state().is_playing);
    }

    #[test]
    fn next_while_paused_stays_paused() {
        let (mut session, handle) = session();
        session.select_track(track("a"), playlist(&["a", "b"]));
        handle.ready(100.0);
        session.pump();

        session.next();
        handle.ready(80.0);
        session.pump();

        assert_eq!(current(&session), "b");
        assert_eq!(session.controller().state(), ControllerState::ReadyPaused);
    }

    #[test]
    fn reselecting_current_track_restarts_it() {
        let (mut session, handle) = session();
        let list = playlist(&["a", "b"]);
        session.select_track(track("a"), list.clone());
        handle.ready(100.0);
        handle.time(60.0);
        session.pump();

        session.select_track(track("a"), list);
        assert_eq!(handle.load_count(), 1);
        assert_eq!(handle.calls().last(), Some(&Call::Seek(0.0)));
        assert_eq!(session.state().progress, 0.0);
    }

    #[test]
    fn ended_with_repeat_restarts_same_track() {
        let (mut session, handle) = session();
        session.select_track(track("a"), playlist(&["a", "b"]));
        session.toggle_repeat();
        handle.ready(100.0);
        session.pump();
        session.play();

        handle.ended();
        session.pump();

        assert_eq!(current(&session), "a");
        assert_eq!(session.state().progress, 0.0);
        assert_eq!(handle.play_count(), 2);
        assert!(session.state().is_playing);
        assert_eq!(handle.load_count(), 1);
    }

    #[test]
    fn ended_without_repeat_advances() {
        let (mut session, handle) = session();
        session.select_track(track("b"), playlist(&["a", "b"]));
        handle.ready(100.0);
        session.pump();
        session.play();

        handle.ended();
        session.pump();

        assert_eq!(current(&session), "a");
        assert_eq!(handle.load_count(), 2);

        handle.ready(50.0);
        session.pump();
        assert!(session.state().is_playing);
    }

    #[test]
    fn clearing_selection_keeps_state_invariant() {
        let (mut session, handle) = session();
        session.select_track(track("a"), playlist(&["a"]));
        handle.ready(10.0);
        session.pump();
        session.play();

        session.state.current_track = None;
        session.load_current();
        session.sync();

        assert!(!session.state().is_playing);
        assert_eq!(session.state().progress, 0.0);
        assert_eq!(session.controller().state(), ControllerState::Idle);
    }
}
