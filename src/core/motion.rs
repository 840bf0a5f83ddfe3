use super::constants::INITIAL_ACCELERATION;
use super::error::BellError;
use glam::DVec3;

/// Acceleration including gravity exactly as the platform delivered it.
/// Each axis may be absent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawAcceleration {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl RawAcceleration {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }
}

/// Turns successive acceleration samples into L1 deltas.
#[derive(Clone, Debug)]
pub struct MotionSampler {
    prev: DVec3,
}

impl Default for MotionSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionSampler {
    pub fn new() -> Self {
        Self {
            prev: DVec3::from_array(INITIAL_ACCELERATION),
        }
    }

    /// Last stored sample.
    pub fn previous(&self) -> DVec3 {
        self.prev
    }

    /// Feed one platform callback. `None` means the event carried no
    /// gravity-inclusive acceleration at all; nothing is stored in that case.
    ///
    /// Every usable axis overwrites the stored one even when the sample as a
    /// whole is rejected, so a gap never accumulates drift.
    pub fn on_sample(&mut self, sample: Option<RawAcceleration>) -> Result<f64, BellError> {
        let sample = sample.ok_or(BellError::SensorDataMissing)?;
        let axes = [sample.x, sample.y, sample.z].map(|a| a.filter(|v| v.is_finite()));

        let mut next = self.prev;
        for (i, axis) in axes.iter().enumerate() {
            if let Some(v) = axis {
                next[i] = *v;
            }
        }
        let delta = l1_delta(self.prev, next);
        self.prev = next;

        if axes.iter().all(Option::is_some) {
            Ok(delta)
        } else {
            Err(BellError::SensorDataMissing)
        }
    }
}

/// `|dx| + |dy| + |dz|`
#[inline]
pub fn l1_delta(prev: DVec3, next: DVec3) -> f64 {
    (next - prev).abs().element_sum()
}
