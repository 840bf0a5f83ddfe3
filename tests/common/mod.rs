// Host-side fakes for the browser adapters: a recording audio resource, a
// manual clock standing in for setTimeout, and a motion stream switch.

use crate::bell_core::*;
use std::time::Duration;

pub fn test_config() -> BellConfig {
    BellConfig {
        shake_threshold: 12.0,
        stop_delay: Duration::from_millis(1000),
        tap_duration: Duration::from_millis(1500),
        ..BellConfig::default()
    }
}

#[derive(Default)]
pub struct FakePlayback {
    pub plays: Vec<(PlaybackSession, bool)>,
    pub stops: usize,
    pub looping: bool,
    pub playing: bool,
    // starts issued while already playing
    pub overlapping_starts: usize,
    pub fail_next: Option<BellError>,
}

impl Playback for FakePlayback {
    fn play(&mut self, session: PlaybackSession, looping: bool) -> Result<(), BellError> {
        if let Some(e) = self.fail_next.take() {
            return Err(e);
        }
        if self.playing {
            self.overlapping_starts += 1;
        }
        self.plays.push((session, looping));
        self.looping = looping;
        self.playing = true;
        Ok(())
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn stop(&mut self) {
        self.stops += 1;
        self.playing = false;
        self.looping = false;
    }
}

#[derive(Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_handle: u32,
    pending: Vec<(u32, u64, TimerToken)>,
    pub cancelled: usize,
}

impl Scheduler for ManualScheduler {
    type Handle = u32;

    fn schedule(&mut self, delay: Duration, token: TimerToken) -> u32 {
        self.next_handle += 1;
        let deadline = self.now_ms + delay.as_millis() as u64;
        self.pending.push((self.next_handle, deadline, token));
        self.next_handle
    }

    fn cancel(&mut self, handle: u32) {
        let before = self.pending.len();
        self.pending.retain(|(h, _, _)| *h != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

impl ManualScheduler {
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn tokens(&self) -> Vec<TimerToken> {
        self.pending.iter().map(|(_, _, t)| *t).collect()
    }

    // Remove and return the earliest timer due at or before `until_ms`,
    // moving the clock to its deadline.
    fn pop_due(&mut self, until_ms: u64) -> Option<TimerToken> {
        let (idx, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (_, deadline, _))| *deadline <= until_ms)
            .min_by_key(|(_, (h, deadline, _))| (*deadline, *h))?;
        let (_, deadline, token) = self.pending.remove(idx);
        self.now_ms = deadline;
        Some(token)
    }

    fn settle(&mut self, until_ms: u64) {
        self.now_ms = until_ms;
    }
}

#[derive(Default)]
pub struct FakeMotion {
    pub subscribed: bool,
    pub subscribe_calls: usize,
    pub unsubscribe_calls: usize,
}

impl MotionSource for FakeMotion {
    fn subscribe(&mut self) {
        self.subscribe_calls += 1;
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        self.unsubscribe_calls += 1;
        self.subscribed = false;
    }
}

pub type TestController = ShakeController<FakePlayback, ManualScheduler>;
pub type TestSession = BellSession<FakePlayback, ManualScheduler, FakeMotion>;

pub fn controller() -> TestController {
    ShakeController::new(
        test_config(),
        FakePlayback::default(),
        ManualScheduler::default(),
    )
}

pub fn session(support: MotionSupport) -> TestSession {
    BellSession::new(
        test_config(),
        support,
        FakePlayback::default(),
        ManualScheduler::default(),
        FakeMotion::default(),
    )
}

/// Let `ms` of wall time pass, firing due timers in deadline order.
pub fn advance(c: &mut TestController, ms: u64) {
    let until = c.scheduler().now_ms() + ms;
    while let Some(token) = c.scheduler_mut().pop_due(until) {
        c.on_timer(token);
    }
    c.scheduler_mut().settle(until);
}

pub fn advance_session(s: &mut TestSession, ms: u64) {
    let until = s.controller().scheduler().now_ms() + ms;
    while let Some(token) = s.controller_mut().scheduler_mut().pop_due(until) {
        s.on_timer(token);
    }
    s.controller_mut().scheduler_mut().settle(until);
}
