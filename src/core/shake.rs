use super::config::BellConfig;
use super::error::BellError;
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShakeState {
    #[default]
    Idle,
    Shaking,
}

/// Identifies one start-to-stop lifecycle of the playback resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlaybackSession(pub u64);

/// The single audio resource the bell plays through.
pub trait Playback {
    /// Rewind to the start and begin playing. Failures may be returned here
    /// or reported later through `BellSession::playback_failed`.
    fn play(&mut self, session: PlaybackSession, looping: bool) -> Result<(), BellError>;
    fn set_looping(&mut self, looping: bool);
    /// Pause and clear the loop flag.
    fn stop(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Ends motion-driven ringing after a quiet period.
    ShakeStop,
    /// Ends a tapped ring.
    TapStop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

/// Single-shot timers. When a timer fires the host hands its token back to
/// `BellSession::on_timer`.
pub trait Scheduler {
    type Handle;
    fn schedule(&mut self, delay: Duration, token: TimerToken) -> Self::Handle;
    fn cancel(&mut self, handle: Self::Handle);
}

struct Armed<H> {
    token: TimerToken,
    handle: H,
}

/// What a tap did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    Started,
    Stopped,
    Failed,
}

/// Debounced shake detector driving one playback resource.
pub struct ShakeController<P: Playback, S: Scheduler> {
    config: BellConfig,
    playback: P,
    scheduler: S,
    state: ShakeState,
    // The single "is playing" guard shared by motion and tap
    playing: Option<PlaybackSession>,
    next_session: u64,
    next_timer: u64,
    rings: u64,
    ripple: bool,
    stop_timer: Option<Armed<S::Handle>>,
    tap_timer: Option<Armed<S::Handle>>,
    shaking_since: Option<Instant>,
}

impl<P: Playback, S: Scheduler> ShakeController<P, S> {
    pub fn new(config: BellConfig, playback: P, scheduler: S) -> Self {
        Self {
            config,
            playback,
            scheduler,
            state: ShakeState::Idle,
            playing: None,
            next_session: 0,
            next_timer: 0,
            rings: 0,
            ripple: false,
            stop_timer: None,
            tap_timer: None,
            shaking_since: None,
        }
    }

    pub fn config(&self) -> &BellConfig {
        &self.config
    }

    pub fn state(&self) -> ShakeState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.playing.is_some()
    }

    pub fn active_session(&self) -> Option<PlaybackSession> {
        self.playing
    }

    pub fn rings(&self) -> u64 {
        self.rings
    }

    pub fn ripple(&self) -> bool {
        self.ripple
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut P {
        &mut self.playback
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Feed one sample delta.
    pub fn on_delta(&mut self, delta: f64) {
        if delta.is_nan() || delta <= self.config.shake_threshold {
            return;
        }
        match self.state {
            ShakeState::Idle => {
                if !self.start_playback(true) {
                    return;
                }
                // A tapped ring that turns into a shake is owned by the stop timer now
                self.cancel_timer(TimerKind::TapStop);
                self.state = ShakeState::Shaking;
                self.rings += 1;
                self.ripple = true;
                self.shaking_since = Some(Instant::now());
                log::info!("[shake] start delta={:.2} rings={}", delta, self.rings);
                self.arm_timer(TimerKind::ShakeStop);
            }
            ShakeState::Shaking => {
                self.arm_timer(TimerKind::ShakeStop);
            }
        }
    }

    /// Tap/click toggle, independent of the sample stream.
    pub fn tap(&mut self) -> TapOutcome {
        if self.playing.is_some() {
            log::info!("[tap] stop");
            self.finish();
            return TapOutcome::Stopped;
        }
        if !self.start_playback(false) {
            return TapOutcome::Failed;
        }
        self.rings += 1;
        self.ripple = true;
        log::info!("[tap] ring rings={}", self.rings);
        self.arm_timer(TimerKind::TapStop);
        TapOutcome::Started
    }

    /// A timer fired. Tokens that are no longer armed are ignored.
    pub fn on_timer(&mut self, token: TimerToken) {
        let slot = match token.kind {
            TimerKind::ShakeStop => &mut self.stop_timer,
            TimerKind::TapStop => &mut self.tap_timer,
        };
        if slot.as_ref().map(|armed| armed.token) != Some(token) {
            log::debug!("[timer] stale {:?}", token);
            return;
        }
        *slot = None;
        if let (TimerKind::ShakeStop, Some(since)) = (token.kind, self.shaking_since) {
            log::info!("[shake] quiet, stopping after {:?}", since.elapsed());
        }
        self.finish();
    }

    /// The resource reported that `session` never started.
    pub fn playback_failed(&mut self, session: PlaybackSession, error: &BellError) {
        if self.playing != Some(session) {
            log::debug!("[audio] ignoring failure of finished {:?}", session);
            return;
        }
        log::warn!("[audio] {:?}: {}", session, error);
        self.finish();
    }

    /// Cancel pending timers and silence the resource.
    pub fn teardown(&mut self) {
        self.finish();
    }

    fn start_playback(&mut self, looping: bool) -> bool {
        if self.playing.is_some() {
            if looping {
                self.playback.set_looping(true);
            }
            return true;
        }
        self.next_session += 1;
        let session = PlaybackSession(self.next_session);
        self.playing = Some(session);
        match self.playback.play(session, looping) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[audio] {:?}: {}", session, e);
                self.playing = None;
                false
            }
        }
    }

    // End the active session, whichever trigger started it
    fn finish(&mut self) {
        if self.playing.take().is_some() {
            self.playback.stop();
        }
        self.reset_flags();
    }

    fn reset_flags(&mut self) {
        self.cancel_timer(TimerKind::ShakeStop);
        self.cancel_timer(TimerKind::TapStop);
        self.state = ShakeState::Idle;
        self.ripple = false;
        self.shaking_since = None;
    }

    fn arm_timer(&mut self, kind: TimerKind) {
        self.cancel_timer(kind);
        self.next_timer += 1;
        let token = TimerToken {
            kind,
            generation: self.next_timer,
        };
        let delay = match kind {
            TimerKind::ShakeStop => self.config.stop_delay,
            TimerKind::TapStop => self.config.tap_duration,
        };
        let handle = self.scheduler.schedule(delay, token);
        let armed = Some(Armed { token, handle });
        match kind {
            TimerKind::ShakeStop => self.stop_timer = armed,
            TimerKind::TapStop => self.tap_timer = armed,
        }
    }

    fn cancel_timer(&mut self, kind: TimerKind) {
        let slot = match kind {
            TimerKind::ShakeStop => self.stop_timer.take(),
            TimerKind::TapStop => self.tap_timer.take(),
        };
        if let Some(armed) = slot {
            self.scheduler.cancel(armed.handle);
        }
    }
}
