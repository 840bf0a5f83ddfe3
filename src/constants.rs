// DOM contract with index.html. Every id below must exist on the page;
// missing optional elements are skipped when rendering.

// Root element; its `data-*` attributes carry config overrides
pub const APP_ROOT_ID: &str = "bell-app";

// The bell itself: click/Enter target and swing animation host
pub const BELL_ID: &str = "bell";
pub const RIPPLE_ID: &str = "ripple";
pub const RING_COUNT_ID: &str = "ring-count";
pub const LOADING_ID: &str = "loading";

// Motion permission dialog and the persistent "enable" affordance
pub const PERMISSION_DIALOG_ID: &str = "permission-dialog";
pub const PERMISSION_ALLOW_ID: &str = "permission-allow";
pub const PERMISSION_LATER_ID: &str = "permission-later";
pub const MOTION_PROMPT_ID: &str = "motion-prompt";

// Classes toggled by the renderer
pub const HIDDEN_CLASS: &str = "hidden";
pub const RINGING_CLASS: &str = "ringing";
pub const SHAKING_CLASS: &str = "shaking";
