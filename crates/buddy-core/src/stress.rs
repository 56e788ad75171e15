//! Biometric stress readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Heart rate above which a reading can be a spike.
const SPIKE_HEART_RATE: f64 = 95.0;

/// HRV below which a reading can be a spike.
const SPIKE_HRV: f64 = 30.0;

/// One synthetic biometric reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressSignal {
    pub heart_rate: u32,
    pub hrv: u32,
    pub timestamp: DateTime<Utc>,
    pub is_spike: bool,
}

impl StressSignal {
    /// Build a reading from raw sensor values.
    ///
    /// The spike decision uses the raw values; the stored values are rounded.
    pub fn from_readings(heart_rate: f64, hrv: f64) -> Self {
        Self {
            heart_rate: heart_rate.round().max(0.0) as u32,
            hrv: hrv.round().max(0.0) as u32,
            timestamp: Utc::now(),
            is_spike: heart_rate > SPIKE_HEART_RATE && hrv < SPIKE_HRV,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spike_requires_both_conditions() {
        assert!(StressSignal::from_readings(98.0, 25.0).is_spike);
        assert!(!StressSignal::from_readings(98.0, 45.0).is_spike);
        assert!(!StressSignal::from_readings(70.0, 25.0).is_spike);
    }

    #[test]
    fn test_spike_uses_raw_values() {
        // Rounds to 95 but the raw value is above the threshold.
        let signal = StressSignal::from_readings(95.4, 29.6);
        assert!(signal.is_spike);
        assert_eq!(signal.heart_rate, 95);
        assert_eq!(signal.hrv, 30);
    }
}
