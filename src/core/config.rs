use super::constants::{DEFAULT_SOUND_URL, SHAKE_THRESHOLD, STOP_DELAY_MS, TAP_RING_DURATION_MS};
use std::str::FromStr;
use std::time::Duration;

// Keys accepted by `BellConfig::with_overrides` (read from `data-*` attributes)
pub const KEY_SHAKE_THRESHOLD: &str = "shake-threshold";
pub const KEY_STOP_DELAY_MS: &str = "stop-delay-ms";
pub const KEY_TAP_DURATION_MS: &str = "tap-duration-ms";
pub const KEY_SOUND_URL: &str = "sound-url";
pub const KEY_LOG_LEVEL: &str = "log-level";

/// Runtime tuning for one bell session.
#[derive(Clone, Debug, PartialEq)]
pub struct BellConfig {
    /// Deltas strictly above this count as a shake.
    pub shake_threshold: f64,
    /// Quiet period after which motion-driven ringing stops.
    pub stop_delay: Duration,
    /// How long a tapped ring plays.
    pub tap_duration: Duration,
    pub sound_url: String,
    pub log_level: log::Level,
}

impl Default for BellConfig {
    fn default() -> Self {
        Self {
            shake_threshold: SHAKE_THRESHOLD,
            stop_delay: Duration::from_millis(STOP_DELAY_MS),
            tap_duration: Duration::from_millis(TAP_RING_DURATION_MS),
            sound_url: DEFAULT_SOUND_URL.to_string(),
            log_level: log::Level::Info,
        }
    }
}

impl BellConfig {
    /// Apply overrides looked up by key. Values that fail to parse or are out
    /// of range are logged and the current value is kept.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(KEY_SHAKE_THRESHOLD) {
            match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => self.shake_threshold = v,
                _ => log::warn!("[config] ignoring {}={:?}", KEY_SHAKE_THRESHOLD, raw),
            }
        }
        if let Some(d) = parse_millis(&lookup, KEY_STOP_DELAY_MS) {
            self.stop_delay = d;
        }
        if let Some(d) = parse_millis(&lookup, KEY_TAP_DURATION_MS) {
            self.tap_duration = d;
        }
        if let Some(raw) = lookup(KEY_SOUND_URL) {
            let url = raw.trim();
            if url.is_empty() {
                log::warn!("[config] ignoring empty {}", KEY_SOUND_URL);
            } else {
                self.sound_url = url.to_string();
            }
        }
        if let Some(raw) = lookup(KEY_LOG_LEVEL) {
            match log::Level::from_str(raw.trim()) {
                Ok(level) => self.log_level = level,
                Err(_) => log::warn!("[config] ignoring {}={:?}", KEY_LOG_LEVEL, raw),
            }
        }
        self
    }
}

fn parse_millis(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
        _ => {
            log::warn!("[config] ignoring {}={:?}", key, raw);
            None
        }
    }
}
