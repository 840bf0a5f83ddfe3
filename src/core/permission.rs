use super::error::BellError;

/// What the host offers for device motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionSupport {
    /// No `DeviceMotionEvent` at all (desktop browsers, old webviews).
    Unsupported,
    /// Motion events exist but are gated behind `requestPermission`.
    NeedsPermission,
    /// Motion events are delivered without asking.
    Available,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionState {
    Unknown,
    NotRequired,
    Requested,
    Granted,
    Denied,
}

/// Permission flow plus the visibility of the consent dialog.
#[derive(Clone, Debug)]
pub struct MotionPermission {
    support: MotionSupport,
    state: PermissionState,
    dialog_visible: bool,
}

impl MotionPermission {
    pub fn new(support: MotionSupport) -> Self {
        let (state, dialog_visible) = match support {
            MotionSupport::Available => (PermissionState::NotRequired, false),
            MotionSupport::NeedsPermission => (PermissionState::Unknown, true),
            MotionSupport::Unsupported => (PermissionState::Unknown, false),
        };
        Self {
            support,
            state,
            dialog_visible,
        }
    }

    pub fn support(&self) -> MotionSupport {
        self.support
    }

    pub fn state(&self) -> PermissionState {
        self.state
    }

    pub fn dialog_visible(&self) -> bool {
        self.dialog_visible
    }

    #[inline]
    pub fn allows_sampling(&self) -> bool {
        matches!(
            self.state,
            PermissionState::Granted | PermissionState::NotRequired
        )
    }

    /// Whether the "enable shake to ring" prompt should be offered.
    pub fn offers_prompt(&self) -> bool {
        self.support == MotionSupport::NeedsPermission
            && matches!(
                self.state,
                PermissionState::Unknown | PermissionState::Denied
            )
    }

    /// Move to `Requested`. Returns false when there is nothing to ask for,
    /// or a request is already in flight.
    pub fn begin_request(&mut self) -> bool {
        if self.support != MotionSupport::NeedsPermission {
            return false;
        }
        match self.state {
            PermissionState::Unknown | PermissionState::Denied => {
                self.state = PermissionState::Requested;
                log::info!("[permission] requested");
                true
            }
            _ => false,
        }
    }

    /// Settle an in-flight request. Results arriving when no request is
    /// pending are ignored.
    pub fn resolve(&mut self, outcome: Result<(), BellError>) {
        if self.state != PermissionState::Requested {
            log::debug!("[permission] ignoring result with no request pending");
            return;
        }
        self.dialog_visible = false;
        match outcome {
            Ok(()) => {
                self.state = PermissionState::Granted;
                log::info!("[permission] granted");
            }
            Err(e) => {
                self.state = PermissionState::Denied;
                log::warn!("[permission] {}", e);
            }
        }
    }

    pub fn show_dialog(&mut self) {
        if self.offers_prompt() {
            self.dialog_visible = true;
        }
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog_visible = false;
    }
}
