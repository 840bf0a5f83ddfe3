// Host-side tests for the shake/playback controller.
// The main crate is wasm-only, so the pure-Rust core is pulled in by path.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod bell_core;
mod common;

use bell_core::*;
use common::*;

#[test]
fn shake_above_threshold_starts_looping_playback_once() {
    let mut c = controller();
    c.on_delta(13.0);
    assert_eq!(c.state(), ShakeState::Shaking);
    assert_eq!(c.rings(), 1);
    assert!(c.ripple());
    assert_eq!(c.playback().plays.len(), 1);
    assert!(c.playback().plays[0].1, "motion playback loops");
    assert!(c.playback().looping);

    c.on_delta(13.0);
    assert_eq!(c.state(), ShakeState::Shaking);
    assert_eq!(c.rings(), 1);
    assert_eq!(c.playback().plays.len(), 1);
}

#[test]
fn deltas_at_or_below_threshold_are_ignored() {
    let mut c = controller();
    for delta in [0.0, 5.0, 11.99, 12.0, f64::NAN] {
        c.on_delta(delta);
    }
    assert_eq!(c.state(), ShakeState::Idle);
    assert_eq!(c.rings(), 0);
    assert!(c.playback().plays.is_empty());
    assert_eq!(c.scheduler().pending(), 0);
}

#[test]
fn starting_while_shaking_never_overlaps_sessions() {
    let mut c = controller();
    for _ in 0..50 {
        c.on_delta(20.0);
    }
    assert_eq!(c.playback().overlapping_starts, 0);
    assert_eq!(c.playback().plays.len(), 1);
    assert_eq!(c.active_session(), Some(PlaybackSession(1)));
}

#[test]
fn continuous_shaking_keeps_ringing() {
    let mut c = controller();
    c.on_delta(13.0);
    for _ in 0..10 {
        advance(&mut c, 500);
        c.on_delta(13.0);
    }
    assert_eq!(c.state(), ShakeState::Shaking);
    assert_eq!(c.playback().stops, 0);
    assert_eq!(c.rings(), 1);
    // Each re-arm replaces the previous timer
    assert_eq!(c.scheduler().pending(), 1);
}

#[test]
fn quiet_period_stops_exactly_once() {
    let mut c = controller();
    c.on_delta(13.0);
    advance(&mut c, 600);
    c.on_delta(13.0);

    advance(&mut c, 999);
    assert_eq!(c.state(), ShakeState::Shaking);
    assert_eq!(c.playback().stops, 0);

    advance(&mut c, 1);
    assert_eq!(c.state(), ShakeState::Idle);
    assert!(!c.is_playing());
    assert!(!c.ripple());
    assert!(!c.playback().looping);
    assert_eq!(c.playback().stops, 1);

    advance(&mut c, 10_000);
    assert_eq!(c.playback().stops, 1);
}

#[test]
fn shaking_again_after_idle_is_a_new_ring() {
    let mut c = controller();
    c.on_delta(13.0);
    advance(&mut c, 1000);
    assert_eq!(c.state(), ShakeState::Idle);

    c.on_delta(13.0);
    assert_eq!(c.state(), ShakeState::Shaking);
    assert_eq!(c.rings(), 2);
    assert_eq!(c.playback().plays.len(), 2);
    assert_eq!(c.active_session(), Some(PlaybackSession(2)));
}

#[test]
fn tap_rings_for_fixed_duration_without_motion() {
    let mut c = controller();
    assert_eq!(c.tap(), TapOutcome::Started);
    assert_eq!(c.state(), ShakeState::Idle);
    assert!(c.is_playing());
    assert_eq!(c.rings(), 1);
    assert!(!c.playback().plays[0].1, "tapped playback does not loop");

    advance(&mut c, 1499);
    assert!(c.is_playing());
    advance(&mut c, 1);
    assert!(!c.is_playing());
    assert_eq!(c.playback().stops, 1);
    assert_eq!(c.scheduler().pending(), 0);
}

#[test]
fn tap_while_shaking_stops_immediately() {
    let mut c = controller();
    c.on_delta(13.0);
    assert_eq!(c.tap(), TapOutcome::Stopped);
    assert_eq!(c.state(), ShakeState::Idle);
    assert!(!c.is_playing());
    assert!(!c.ripple());
    assert_eq!(c.playback().stops, 1);
    assert_eq!(c.scheduler().pending(), 0);
    assert_eq!(c.rings(), 1);

    advance(&mut c, 5000);
    assert_eq!(c.playback().stops, 1);
}

#[test]
fn tap_while_tap_ringing_stops_immediately() {
    let mut c = controller();
    c.tap();
    advance(&mut c, 200);
    assert_eq!(c.tap(), TapOutcome::Stopped);
    assert!(!c.is_playing());
    assert_eq!(c.rings(), 1);
    advance(&mut c, 5000);
    assert_eq!(c.playback().stops, 1);
}

#[test]
fn shake_during_tap_ring_takes_over_the_session() {
    let mut c = controller();
    c.tap();
    advance(&mut c, 200);
    c.on_delta(13.0);

    assert_eq!(c.state(), ShakeState::Shaking);
    assert_eq!(c.playback().plays.len(), 1, "no restart");
    assert!(c.playback().looping);
    assert_eq!(c.rings(), 2);
    assert_eq!(c.scheduler().pending(), 1, "tap timer cancelled");

    advance(&mut c, 999);
    assert_eq!(c.state(), ShakeState::Shaking);
    advance(&mut c, 1);
    assert_eq!(c.state(), ShakeState::Idle);
    assert_eq!(c.playback().stops, 1);
}

#[test]
fn stale_timer_token_does_not_stop_newer_session() {
    let mut c = controller();
    c.tap();
    let old = c.scheduler().tokens()[0];
    c.tap();
    c.tap();
    assert!(c.is_playing());

    c.on_timer(old);
    assert!(c.is_playing());
    assert_eq!(c.playback().stops, 1);
}

#[test]
fn synchronous_start_failure_rolls_back() {
    let mut c = controller();
    c.playback_mut()
        .fail_next
        .replace(BellError::PlaybackStart("blocked".into()));
    c.on_delta(13.0);
    assert_eq!(c.state(), ShakeState::Idle);
    assert!(!c.is_playing());
    assert!(!c.ripple());
    assert_eq!(c.rings(), 0);
    assert_eq!(c.scheduler().pending(), 0);

    // The next qualifying sample retries
    c.on_delta(13.0);
    assert_eq!(c.state(), ShakeState::Shaking);
    assert_eq!(c.rings(), 1);
}

#[test]
fn tap_start_failure_rolls_back() {
    let mut c = controller();
    c.playback_mut()
        .fail_next
        .replace(BellError::PlaybackStart("no source".into()));
    assert_eq!(c.tap(), TapOutcome::Failed);
    assert!(!c.is_playing());
    assert_eq!(c.rings(), 0);
    assert_eq!(c.tap(), TapOutcome::Started);
}

#[test]
fn asynchronous_failure_returns_to_idle() {
    let mut c = controller();
    c.on_delta(13.0);
    let session = c.active_session().unwrap();
    c.playback_failed(session, &BellError::PlaybackStart("NotAllowedError".into()));

    assert_eq!(c.state(), ShakeState::Idle);
    assert!(!c.is_playing());
    assert!(!c.ripple());
    assert_eq!(c.scheduler().pending(), 0);
}

#[test]
fn failure_of_finished_session_is_ignored() {
    let mut c = controller();
    c.tap();
    let first = c.active_session().unwrap();
    c.tap();
    c.tap();
    let second = c.active_session().unwrap();
    assert_ne!(first, second);

    c.playback_failed(first, &BellError::PlaybackStart("late".into()));
    assert_eq!(c.active_session(), Some(second));
}

#[test]
fn teardown_cancels_timers_and_silences() {
    let mut c = controller();
    c.on_delta(13.0);
    c.teardown();
    assert_eq!(c.state(), ShakeState::Idle);
    assert!(!c.is_playing());
    assert_eq!(c.scheduler().pending(), 0);
    assert_eq!(c.playback().stops, 1);

    // Idempotent when nothing is active
    c.teardown();
    assert_eq!(c.playback().stops, 1);
}
