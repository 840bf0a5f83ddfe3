use super::config::BellConfig;
use super::error::BellError;
use super::motion::{MotionSampler, RawAcceleration};
use super::permission::{MotionPermission, MotionSupport, PermissionState};
use super::shake::{
    Playback, PlaybackSession, Scheduler, ShakeController, ShakeState, TapOutcome, TimerToken,
};

/// Attach/detach the platform's motion stream.
pub trait MotionSource {
    fn subscribe(&mut self);
    fn unsubscribe(&mut self);
}

/// Everything the page needs to draw the bell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BellView {
    pub shake: ShakeState,
    /// Any playback session is active (drives the swing animation).
    pub ringing: bool,
    pub rings: u64,
    pub ripple: bool,
    pub permission_dialog: bool,
    /// Offer the "enable shake to ring" button.
    pub motion_prompt: bool,
    pub loading: bool,
}

impl BellView {
    /// Counter text under the bell.
    pub fn ring_label(&self) -> String {
        match self.rings {
            0 => "Tap to ring".to_string(),
            1 => "Rang 1 time".to_string(),
            n => format!("Rang {} times", n),
        }
    }
}

/// One bell per page: permission, sampler, controller and the motion
/// subscription, with an explicit start/stop lifecycle.
pub struct BellSession<P: Playback, S: Scheduler, M: MotionSource> {
    permission: MotionPermission,
    sampler: MotionSampler,
    controller: ShakeController<P, S>,
    motion: M,
    started: bool,
    subscribed: bool,
    loading: bool,
}

impl<P: Playback, S: Scheduler, M: MotionSource> BellSession<P, S, M> {
    pub fn new(
        config: BellConfig,
        support: MotionSupport,
        playback: P,
        scheduler: S,
        motion: M,
    ) -> Self {
        Self {
            permission: MotionPermission::new(support),
            sampler: MotionSampler::new(),
            controller: ShakeController::new(config, playback, scheduler),
            motion,
            started: false,
            subscribed: false,
            loading: true,
        }
    }

    pub fn controller(&self) -> &ShakeController<P, S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ShakeController<P, S> {
        &mut self.controller
    }

    pub fn motion(&self) -> &M {
        &self.motion
    }

    pub fn sampler(&self) -> &MotionSampler {
        &self.sampler
    }

    pub fn permission_state(&self) -> PermissionState {
        self.permission.state()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        log::info!(
            "[session] start support={:?} permission={:?}",
            self.permission.support(),
            self.permission.state()
        );
        self.sync_subscription();
    }

    /// Detach from motion, cancel every timer and silence the bell. Later
    /// callbacks are ignored.
    pub fn stop(&mut self) {
        if !self.started {
            return;
        }
        self.started = false;
        self.sync_subscription();
        self.controller.teardown();
        log::info!("[session] stopped rings={}", self.controller.rings());
    }

    pub fn on_motion(&mut self, sample: Option<RawAcceleration>) {
        if !self.subscribed {
            log::trace!("[motion] sample while unsubscribed");
            return;
        }
        match self.sampler.on_sample(sample) {
            Ok(delta) => self.controller.on_delta(delta),
            Err(e) => log::trace!("[motion] dropped: {}", e),
        }
    }

    pub fn tap(&mut self) -> Option<TapOutcome> {
        if !self.started {
            return None;
        }
        Some(self.controller.tap())
    }

    pub fn on_timer(&mut self, token: TimerToken) {
        if !self.started {
            return;
        }
        self.controller.on_timer(token);
    }

    pub fn playback_failed(&mut self, session: PlaybackSession, error: BellError) {
        self.controller.playback_failed(session, &error);
    }

    pub fn audio_ready(&mut self) {
        if self.loading {
            log::info!("[audio] ready");
        }
        self.loading = false;
    }

    /// "Allow motion" pressed. Returns true when the platform should be asked.
    pub fn request_permission(&mut self) -> bool {
        self.permission.begin_request()
    }

    pub fn permission_resolved(&mut self, outcome: Result<(), BellError>) {
        self.permission.resolve(outcome);
        self.sync_subscription();
    }

    pub fn show_permission_dialog(&mut self) {
        self.permission.show_dialog();
    }

    pub fn dismiss_permission_dialog(&mut self) {
        self.permission.dismiss_dialog();
    }

    pub fn view(&self) -> BellView {
        BellView {
            shake: self.controller.state(),
            ringing: self.controller.is_playing(),
            rings: self.controller.rings(),
            ripple: self.controller.ripple(),
            permission_dialog: self.permission.dialog_visible(),
            motion_prompt: self.permission.offers_prompt(),
            loading: self.loading,
        }
    }

    fn sync_subscription(&mut self) {
        let want = self.started && self.permission.allows_sampling();
        if want == self.subscribed {
            return;
        }
        if want {
            self.motion.subscribe();
            log::info!("[motion] subscribed");
        } else {
            self.motion.unsubscribe();
            log::info!("[motion] unsubscribed");
        }
        self.subscribed = want;
    }
}
