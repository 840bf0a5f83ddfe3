// Shake detection and playback tuning shared by the web frontend.

// Summed per-axis change (m/s^2) between two samples that counts as a shake
pub const SHAKE_THRESHOLD: f64 = 15.0;

// Quiet period after the last qualifying shake before the bell stops
pub const STOP_DELAY_MS: u64 = 1000;

// A tapped ring plays for this long unless tapped again
pub const TAP_RING_DURATION_MS: u64 = 1500;

// Bell recording, a single encoding every target browser can decode
pub const DEFAULT_SOUND_URL: &str = "assets/bell.mp4";

// Starting point for the first delta (no sample seen yet)
pub const INITIAL_ACCELERATION: [f64; 3] = [0.0, 0.0, 0.0];
