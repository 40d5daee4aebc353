//! Integration tests for the playback controller
//!
//! Tests controller behavior including:
//! - Load / ready / play / pause transitions
//! - Stale load discard across rapid track switches
//! - Error taxonomy and recovery (retry, direct play)
//! - Event stream contents


use dhikr_playback::{
    ControllerEvent, ControllerState, MediaErrorReason, MediaEvent, PlaybackError,
    PlaybackFailure,
};
use test_helpers::*;

// ============================================================================
// LOADING
// ============================================================================

#[test]
fn test_unplayable_track_never_leaves_idle() {
    let (mut ctl, script) = controller();

    ctl.set_track(Some(&unplayable("x")));
    ctl.play();
    ctl.toggle();
    ctl.retry_loading();
    ctl.pump();

    assert_eq!(ctl.state(), ControllerState::Idle);
    assert_eq!(script.load_count(), 0);
    assert!(!ctl.snapshot().is_playing);
}

#[test]
fn test_load_emits_events_in_order() {
    let (mut ctl, script) = controller();
    ctl.set_track(Some(&track("a")));
    script.ready(200.0);
    let events = ctl.pump();

    let load = script.last_load();
    assert_eq!(
        events,
        vec![
            ControllerEvent::TrackLoading {
                track_id: "a".into(),
                load,
            },
            ControllerEvent::StateChanged {
                state: ControllerState::Loading
            },
            ControllerEvent::DurationKnown { duration: 200.0 },
            ControllerEvent::StateChanged {
                state: ControllerState::ReadyPaused
            },
        ]
    );
    assert_eq!(
        script.last_url().as_deref(),
        Some("https://cdn.example.com/audio/a.mp3")
    );
}

#[test]
fn test_progress_is_fraction_of_duration() {
    let (mut ctl, script) = controller();
    ctl.set_track(Some(&track("a")));
    script.ready(200.0);
    ctl.pump();
    ctl.play();

    script.time(50.0);
    ctl.pump();

    assert!((ctl.snapshot().progress - 0.25).abs() < 1e-9);
}

#[test]
fn test_progress_stays_finite_for_zero_duration() {
    let (mut ctl, script) = controller();
    ctl.set_track(Some(&track("a")));
    script.ready(0.0);
    script.time(12.0);
    ctl.pump();

    let snapshot = ctl.snapshot();
    assert!(snapshot.progress.is_finite());
    assert_eq!(snapshot.progress, 0.0);
    assert_eq!(snapshot.duration, 0.0);
}

// ============================================================================
// STALE LOADS
// ============================================================================

#[test]
fn test_slow_response_for_previous_track_is_ignored() {
    let (mut ctl, script) = controller();

    ctl.set_track(Some(&track("a")));
    let load_a = script.last_load();
    ctl.play();

    ctl.set_track(Some(&track("b")));
    let load_b = script.last_load();

    // A finally answers after the user moved to B
    script.send(load_a, MediaEvent::Ready { duration: 999.0 });
    ctl.pump();

    assert_eq!(ctl.state(), ControllerState::Loading);
    assert_eq!(ctl.snapshot().duration, 0.0);
    assert_eq!(script.play_count(), 0);

    script.send(load_b, MediaEvent::Ready { duration: 120.0 });
    ctl.pump();
    assert_eq!(ctl.state(), ControllerState::ReadyPaused);
    assert_eq!(ctl.snapshot().duration, 120.0);
}

#[test]
fn test_stale_error_does_not_flicker() {
    let (mut ctl, script) = controller();
    ctl.set_track(Some(&track("a")));
    let load_a = script.last_load();
    ctl.set_track(Some(&track("b")));
    script.ready(60.0);
    ctl.pump();

    script.send(
        load_a,
        MediaEvent::Error {
            reason: MediaErrorReason::Network,
        },
    );
    let events = ctl.pump();

    assert!(events.is_empty());
    assert!(!ctl.snapshot().has_error);
    assert_eq!(ctl.state(), ControllerState::ReadyPaused);
}

#[test]
fn test_retry_supersedes_failed_attempt() {
    let (mut ctl, script) = controller();
    ctl.set_track(Some(&track("a")));
    let first = script.last_load();
    script.fail(MediaErrorReason::Decode);
    ctl.pump();

    ctl.retry_loading();
    let second = script.last_load();
    assert_ne!(first, second);
    assert_eq!(
        script.last_url().as_deref(),
        Some("https://cdn.example.com/audio/a.mp3")
    );

    // a second error from the first attempt must not land on the retry
    script.send(
        first,
        MediaEvent::Error {
            reason: MediaErrorReason::Decode,
        },
    );
    ctl.pump();
    assert_eq!(ctl.state(), ControllerState::Loading);
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_each_reason_maps_to_its_message() {
    let cases = [
        (MediaErrorReason::Aborted, PlaybackFailure::Aborted),
        (MediaErrorReason::Network, PlaybackFailure::Network),
        (MediaErrorReason::Decode, PlaybackFailure::Decode),
        (MediaErrorReason::Unsupported, PlaybackFailure::Unsupported),
        (MediaErrorReason::Unknown, PlaybackFailure::Unknown),
    ];

    for (reason, failure) in cases {
        let (mut ctl, script) = controller();
        ctl.set_track(Some(&track("a")));
        script.fail(reason);
        let events = ctl.pump();

        let snapshot = ctl.snapshot();
        assert!(snapshot.has_error);
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.error_message, Some(failure.to_string()));
        assert!(events.contains(&ControllerEvent::failed(failure)));
    }
}

#[test]
fn test_network_failure_then_successful_retry() {
    let (mut ctl, script) = controller();
    ctl.set_track(Some(&track("a")));
    script.fail(MediaErrorReason::Network);
    ctl.pump();

    let message = ctl.snapshot().error_message.unwrap_or_default();
    assert!(message.contains("Network"));
    assert!(message.contains("cross-origin"));

    ctl.retry_loading();
    script.ready(240.0);
    ctl.pump();

    let snapshot = ctl.snapshot();
    assert!(!snapshot.has_error);
    assert!(snapshot.error_message.is_none());
    assert_eq!(snapshot.duration, 240.0);
}

#[test]
fn test_autoplay_rejection_needs_user_play() {
    let (mut ctl, script) = controller();
    ctl.set_track(Some(&track("a")));
    ctl.play();
    script.ready(100.0);
    ctl.pump();
    assert_eq!(ctl.state(), ControllerState::ReadyPlaying);

    script.reject_play();
    ctl.pump();

    let snapshot = ctl.snapshot();
    assert!(snapshot.has_error);
    assert!(!snapshot.is_playing);
    assert_eq!(
        snapshot.error_message,
        Some(PlaybackFailure::AutoplayRejected.to_string())
    );

    // nothing retries on its own
    ctl.pump();
    assert_eq!(script.play_count(), 1);

    ctl.play();
    script.accept_play();
    ctl.pump();
    assert_eq!(ctl.state(), ControllerState::ReadyPlaying);
    assert!(!ctl.snapshot().has_error);
}

#[test]
fn test_volume_and_seek_leave_error_in_place() {
    let (mut ctl, script) = controller();
    ctl.set_track(Some(&track("a")));
    script.fail(MediaErrorReason::Unsupported);
    ctl.pump();

    ctl.set_volume(0.1);
    assert_eq!(ctl.seek(0.5), Err(PlaybackError::DurationUnknown));

    assert!(ctl.snapshot().has_error);
    assert_eq!(ctl.snapshot().volume, 0.1);
    assert_eq!(script.volumes().last(), Some(&0.1));
}

// ============================================================================
// COMMANDS
// ============================================================================

#[test]
fn test_seek_is_idempotent() {
    let (mut ctl, script) = controller();
    ctl.set_track(Some(&track("a")));
    script.ready(300.0);
    ctl.pump();

    ctl.seek(0.5).unwrap();
    let first = ctl.snapshot().progress;
    ctl.seek(0.5).unwrap();
    let second = ctl.snapshot().progress;

    assert!((first - second).abs() < 1e-9);
    assert_eq!(script.seeks(), vec![150.0, 150.0]);
}

#[test]
fn test_volume_applies_in_every_state() {
    let (mut ctl, script) = controller();
    ctl.set_volume(0.5);
    ctl.set_track(Some(&track("a")));
    ctl.set_volume(0.6);
    ctl.set_volume(f64::NAN);

    assert_eq!(script.volumes(), vec![0.8, 0.5, 0.6]);
    assert_eq!(ctl.snapshot().volume, 0.6);
}

#[test]
fn test_pause_during_load_cancels_intent() {
    let (mut ctl, script) = controller();
    ctl.set_track(Some(&track("a")));
    ctl.play();
    ctl.pause();
    script.ready(100.0);
    ctl.pump();

    assert_eq!(ctl.state(), ControllerState::ReadyPaused);
    assert_eq!(script.play_count(), 0);
}

#[test]
fn test_track_change_drops_play_intent() {
    let (mut ctl, script) = controller();
    ctl.set_track(Some(&track("a")));
    ctl.play();
    ctl.set_track(Some(&track("b")));
    script.ready(100.0);
    ctl.pump();

    assert_eq!(ctl.state(), ControllerState::ReadyPaused);
    assert_eq!(script.play_count(), 0);
}

#[test]
fn test_ended_only_fires_while_playing() {
    let (mut ctl, script) = controller();
    ctl.set_track(Some(&track("a")));
    script.ready(100.0);
    ctl.pump();

    script.ended();
    let events = ctl.pump();
    assert!(!events
        .iter()
        .any(|e| matches!(e, ControllerEvent::TrackEnded { .. })));

    ctl.play();
    script.ended();
    let events = ctl.pump();
    assert!(events.contains(&ControllerEvent::TrackEnded {
        track_id: "a".into()
    }));
}

#[test]
fn test_shutdown_silences_media() {
    let (mut ctl, script) = controller();
    ctl.set_track(Some(&track("a")));
    let pauses = script.pause_count();
    ctl.shutdown();

    assert!(script.is_released());
    assert_eq!(script.pause_count(), pauses + 1);

    script.ready(10.0);
    ctl.pump();
    ctl.set_track(Some(&track("b")));
    assert_eq!(ctl.state(), ControllerState::Idle);
    assert_eq!(script.load_count(), 1);
    assert_eq!(ctl.seek(0.5), Err(PlaybackError::Released));
}
