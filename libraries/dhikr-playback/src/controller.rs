//! Playback controller - the state machine around one media resource
//!
//! The controller owns the only [`MediaResource`] and is the single place that
//! mutates it. User commands and adapter notices are applied one at a time;
//! every visible change is queued as a [`ControllerEvent`] for the caller to
//! drain with [`PlaybackController::pump`].
//!
//! Each load is tagged with a fresh [`LoadId`] and each play request with a
//! fresh [`PlayId`]. Notices carrying any other tag belong to a superseded
//! attempt and are dropped before they can touch state.

use crate::{
    error::{PlaybackError, PlaybackFailure, Result},
    events::ControllerEvent,
    media::{LoadId, MediaEvent, MediaNotice, MediaResource, PlayId},
    types::{ControllerSnapshot, ControllerState},
    volume::Volume,
};
use dhikr_core::{Track, TrackId};
use tracing::{debug, trace, warn};

/// Callback invoked once per natural end of track
pub type EndedCallback = Box<dyn FnMut(&TrackId)>;

/// Source the controller should be showing
#[derive(Debug, Clone, PartialEq)]
struct Source {
    track_id: TrackId,
    url: String,
}

/// Playback controller
pub struct PlaybackController<M: MediaResource> {
    media: M,
    state: ControllerState,

    // Selected source and the (source, attempt) pair last handed to the media
    desired: Option<Source>,
    loaded: Option<(Source, u64)>,
    attempt: u64,

    active_load: Option<LoadId>,
    next_load: u64,
    pending_play: Option<PlayId>,
    next_play: u64,

    /// Play was requested before the media became ready
    play_intent: bool,

    /// Media reached ready for the active load and has not failed since
    media_ready: bool,

    duration: f64,
    progress: f64,
    volume: Volume,
    failure: Option<PlaybackFailure>,

    pending_events: Vec<ControllerEvent>,
    on_ended: Option<EndedCallback>,
    released: bool,
}

impl<M: MediaResource> PlaybackController<M> {
    /// Create a controller around a media resource
    ///
    /// The initial volume is applied to the media immediately.
    pub fn new(mut media: M, volume: f64) -> Self {
        let volume = Volume::new(volume);
        media.set_volume(volume.level());

        Self {
            media,
            state: ControllerState::Idle,
            desired: None,
            loaded: None,
            attempt: 0,
            active_load: None,
            next_load: 0,
            pending_play: None,
            next_play: 0,
            play_intent: false,
            media_ready: false,
            duration: 0.0,
            progress: 0.0,
            volume,
            failure: None,
            pending_events: Vec::new(),
            on_ended: None,
            released: false,
        }
    }

    // ===== Commands =====

    /// Make `track` the current track
    ///
    /// A track without a playable URL (or `None`) sends the controller to
    /// `Idle`. Selecting the track that is already loaded is a no-op.
    ///
    /// Returns `true` if a new load was issued or the controller went idle.
    pub fn set_track(&mut self, track: Option<&Track>) -> bool {
        if self.released {
            return false;
        }

        self.desired = track.and_then(|t| {
            t.playable_url().map(|url| Source {
                track_id: t.id.clone(),
                url: url.to_string(),
            })
        });

        if track.is_some() && self.desired.is_none() {
            debug!(track_id = ?track.map(|t| t.id.as_str()), "track has no audio url, staying idle");
        }

        self.sync_source(false)
    }

    /// Request playback
    ///
    /// While loading, the request is remembered and honored once the media is
    /// ready. From `Error`, the error is cleared first: an autoplay rejection
    /// retries playback directly, a load failure reloads the source.
    pub fn play(&mut self) {
        if self.released {
            return;
        }

        match self.state {
            ControllerState::Idle => {
                trace!("play ignored, no track loaded");
            }
            ControllerState::Loading => {
                self.play_intent = true;
            }
            ControllerState::ReadyPaused => self.start_playback(),
            ControllerState::ReadyPlaying => {}
            ControllerState::Error => {
                self.failure = None;
                if self.media_ready {
                    self.start_playback();
                } else if let Some(source) = self.desired.clone() {
                    self.begin_load(source, true);
                }
            }
        }
    }

    /// Pause playback
    ///
    /// Safe from any state. Drops a pending play intent and any in-flight play
    /// request, so a late rejection of that request is ignored.
    pub fn pause(&mut self) {
        if self.released {
            return;
        }

        self.media.pause();
        self.play_intent = false;
        self.pending_play = None;

        if self.state == ControllerState::ReadyPlaying {
            self.set_state(ControllerState::ReadyPaused);
        }
    }

    /// Toggle between play and pause
    pub fn toggle(&mut self) {
        if self.is_play_requested() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Seek to a fraction (0.0-1.0) of the track
    ///
    /// Out-of-range fractions are clamped. Before the media has reported a
    /// duration the request is dropped and `Err(DurationUnknown)` is returned.
    pub fn seek(&mut self, fraction: f64) -> Result<()> {
        if self.released {
            return Err(PlaybackError::Released);
        }
        if fraction.is_nan() {
            return Err(PlaybackError::InvalidSeekPosition(fraction));
        }
        if self.state == ControllerState::Idle {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if !self.has_duration() {
            debug!(fraction, "seek dropped, duration unknown");
            return Err(PlaybackError::DurationUnknown);
        }

        let fraction = fraction.clamp(0.0, 1.0);
        self.media.seek(fraction * self.duration);
        self.set_progress(fraction);
        Ok(())
    }

    /// Set output volume (0.0-1.0)
    ///
    /// Applied immediately in every state. Non-finite levels are ignored.
    pub fn set_volume(&mut self, level: f64) {
        if self.released || !self.volume.set_level(level) {
            return;
        }

        self.media.set_volume(self.volume.level());
        self.emit_volume_changed();
    }

    /// Force a reload of the current source
    ///
    /// Reloads even when the URL did not change. Does not request playback.
    pub fn retry_loading(&mut self) {
        if self.released {
            return;
        }

        self.attempt += 1;
        self.sync_source(false);
    }

    /// Register the end-of-track hook, replacing any previous one
    pub fn set_on_ended<F>(&mut self, callback: F)
    where
        F: FnMut(&TrackId) + 'static,
    {
        self.on_ended = Some(Box::new(callback));
    }

    /// Apply every queued media notice and drain pending events
    pub fn pump(&mut self) -> Vec<ControllerEvent> {
        if !self.released {
            for notice in self.media.drain_notices() {
                self.handle_notice(notice);
            }
        }
        self.drain_events()
    }

    /// Drain pending events without polling the media
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Pause and release the media resource
    ///
    /// Every later command and notice is ignored. Also run on drop.
    pub fn shutdown(&mut self) {
        if self.released {
            return;
        }

        debug!("releasing media resource");
        self.media.pause();
        self.media.release();
        self.released = true;
        self.on_ended = None;
        self.clear_source();
        self.set_state(ControllerState::Idle);
    }

    // ===== Queries =====

    /// Current state
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Live playback facts
    pub fn snapshot(&self) -> ControllerSnapshot {
        let has_error = self.state == ControllerState::Error;
        ControllerSnapshot {
            is_playing: self.is_playing(),
            progress: self.progress,
            duration: self.duration,
            volume: self.volume.level(),
            is_loading: self.state == ControllerState::Loading,
            has_error,
            error_message: self
                .failure
                .filter(|_| has_error)
                .map(|failure| failure.to_string()),
        }
    }

    /// Whether playback is running (or a play request is in flight)
    pub fn is_playing(&self) -> bool {
        self.state == ControllerState::ReadyPlaying
    }

    /// Whether playback is running or will start once loading finishes
    pub fn is_play_requested(&self) -> bool {
        self.is_playing() || (self.state == ControllerState::Loading && self.play_intent)
    }

    /// Current failure, present only in `Error`
    pub fn failure(&self) -> Option<PlaybackFailure> {
        self.failure
    }

    /// ID of the track the controller is showing
    pub fn current_track_id(&self) -> Option<&TrackId> {
        self.desired.as_ref().map(|source| &source.track_id)
    }

    /// Tag of the load whose notices are currently accepted
    pub fn active_load(&self) -> Option<LoadId> {
        self.active_load
    }

    /// Whether the media resource has been released
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Borrow the media resource
    pub fn media(&self) -> &M {
        &self.media
    }

    // ===== Source handling =====

    /// Bring the media in line with the desired source and attempt
    fn sync_source(&mut self, play_intent: bool) -> bool {
        match self.desired.clone() {
            None => {
                if self.state == ControllerState::Idle && self.loaded.is_none() {
                    return false;
                }
                self.media.pause();
                self.set_progress(0.0);
                self.clear_source();
                self.set_state(ControllerState::Idle);
                true
            }
            Some(source) => {
                let unchanged = self
                    .loaded
                    .as_ref()
                    .is_some_and(|(loaded, attempt)| *loaded == source && *attempt == self.attempt);
                if unchanged {
                    return false;
                }
                self.begin_load(source, play_intent);
                true
            }
        }
    }

    fn begin_load(&mut self, source: Source, play_intent: bool) {
        self.next_load += 1;
        let load = LoadId::new(self.next_load);

        debug!(
            track_id = %source.track_id,
            url = %source.url,
            %load,
            attempt = self.attempt,
            "loading track"
        );

        self.active_load = Some(load);
        self.pending_play = None;
        self.play_intent = play_intent;
        self.media_ready = false;
        self.failure = None;
        self.duration = 0.0;
        self.set_progress(0.0);

        self.media.load(&source.url, load);
        self.pending_events.push(ControllerEvent::TrackLoading {
            track_id: source.track_id.clone(),
            load,
        });
        self.loaded = Some((source, self.attempt));
        self.set_state(ControllerState::Loading);
    }

    fn clear_source(&mut self) {
        self.loaded = None;
        self.active_load = None;
        self.pending_play = None;
        self.play_intent = false;
        self.media_ready = false;
        self.failure = None;
        self.duration = 0.0;
        self.progress = 0.0;
    }

    fn start_playback(&mut self) {
        self.next_play += 1;
        let play = PlayId::new(self.next_play);

        trace!(%play, "requesting playback");
        self.play_intent = false;
        self.pending_play = Some(play);
        self.media.play(play);
        self.set_state(ControllerState::ReadyPlaying);
    }

    // ===== Media notices =====

    fn handle_notice(&mut self, notice: MediaNotice) {
        if self.active_load != Some(notice.load) {
            trace!(load = %notice.load, event = ?notice.event, "discarding stale media notice");
            return;
        }

        match notice.event {
            MediaEvent::Ready { duration } => {
                self.record_duration(duration);
                if self.state == ControllerState::Loading {
                    self.become_ready();
                }
            }
            MediaEvent::CanPlay => {
                if self.state == ControllerState::Loading {
                    if !self.has_duration() {
                        if let Some(duration) = self.media.duration() {
                            self.record_duration(duration);
                        }
                    }
                    self.become_ready();
                }
            }
            MediaEvent::TimeUpdate { position } => {
                if self.has_duration() && position.is_finite() {
                    self.set_progress((position / self.duration).clamp(0.0, 1.0));
                }
            }
            MediaEvent::Ended => self.handle_ended(),
            MediaEvent::Error { reason } => {
                if self.state != ControllerState::Idle {
                    self.fail(reason.into());
                }
            }
            MediaEvent::PlayStarted { play } => {
                if self.pending_play == Some(play) {
                    trace!(%play, "playback started");
                    self.pending_play = None;
                }
            }
            MediaEvent::PlayRejected { play } => {
                if self.pending_play == Some(play) && self.state == ControllerState::ReadyPlaying {
                    self.pending_play = None;
                    self.fail(PlaybackFailure::AutoplayRejected);
                } else {
                    trace!(%play, "ignoring rejection of superseded play request");
                }
            }
        }
    }

    fn become_ready(&mut self) {
        self.media_ready = true;
        self.set_state(ControllerState::ReadyPaused);
        if self.play_intent {
            self.start_playback();
        }
    }

    fn handle_ended(&mut self) {
        if self.state != ControllerState::ReadyPlaying {
            return;
        }

        self.pending_play = None;
        self.set_state(ControllerState::ReadyPaused);
        self.set_progress(0.0);

        if let Some(track_id) = self.current_track_id().cloned() {
            debug!(track_id = %track_id, "track ended");
            self.pending_events.push(ControllerEvent::TrackEnded {
                track_id: track_id.clone(),
            });
            if let Some(callback) = self.on_ended.as_mut() {
                callback(&track_id);
            }
        }
    }

    fn fail(&mut self, failure: PlaybackFailure) {
        warn!(
            track_id = ?self.current_track_id().map(TrackId::as_str),
            ?failure,
            "playback failed"
        );

        if failure.is_load_failure() {
            self.media_ready = false;
        }
        self.play_intent = false;
        self.pending_play = None;
        self.failure = Some(failure);
        self.set_state(ControllerState::Error);
        self.pending_events.push(ControllerEvent::failed(failure));
    }

    // ===== Helpers =====

    fn has_duration(&self) -> bool {
        self.duration.is_finite() && self.duration > 0.0
    }

    fn record_duration(&mut self, duration: f64) {
        if duration.is_finite() && duration > 0.0 && duration != self.duration {
            self.duration = duration;
            self.pending_events
                .push(ControllerEvent::DurationKnown { duration });
        }
    }

    fn set_progress(&mut self, progress: f64) {
        if progress != self.progress {
            self.progress = progress;
            self.pending_events
                .push(ControllerEvent::ProgressChanged { progress });
        }
    }

    fn set_state(&mut self, state: ControllerState) {
        if state != self.state {
            trace!(from = ?self.state, to = ?state, "state changed");
            self.state = state;
            self.pending_events
                .push(ControllerEvent::StateChanged { state });
        }
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(ControllerEvent::VolumeChanged {
            volume: self.volume.level(),
        });
    }
}

impl<M: MediaResource> Drop for PlaybackController<M> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
