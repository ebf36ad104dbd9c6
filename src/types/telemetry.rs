//! Telemetry sample and series types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Telemetry Sample
// ============================================================================

/// One row of flight telemetry as recorded by the flight computer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub timestamp: NaiveDateTime,
    /// Altitude above ground level (m)
    pub altitude: f64,
    /// Vertical velocity (m/s), positive when ascending
    pub velocity: f64,
    /// Acceleration (m/s²)
    pub acceleration: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Recovery system reported as deployed
    pub recovery_deployed: bool,
    /// Motor reported as burning
    #[serde(default)]
    pub motor_burning: bool,
}

impl TelemetrySample {
    /// True when every numeric channel is a finite number.
    pub fn is_finite(&self) -> bool {
        self.altitude.is_finite()
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
            && self.latitude.is_finite()
            && self.longitude.is_finite()
    }
}

impl std::fmt::Display for TelemetrySample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Time: {}, Alt: {:.2}, Vel: {:.2}",
            self.timestamp, self.altitude, self.velocity
        )
    }
}

// ============================================================================
// Telemetry Series
// ============================================================================

/// Rejection reasons for [`TelemetrySeries::try_new`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("sample {index} timestamp {timestamp} precedes the previous sample ({previous})")]
    Unordered {
        index: usize,
        timestamp: NaiveDateTime,
        previous: NaiveDateTime,
    },

    #[error("sample {index} contains a non-finite value")]
    NonFinite { index: usize },
}

/// Ordered, read-only sequence of telemetry samples.
///
/// Samples are addressed by position. All phase detectors report indices
/// into this sequence, never sample values, so numerically identical
/// samples stay distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TelemetrySeries {
    samples: Vec<TelemetrySample>,
}

impl TelemetrySeries {
    /// Wrap samples that the caller already guarantees are time-ordered.
    pub fn new(samples: Vec<TelemetrySample>) -> Self {
        Self { samples }
    }

    /// Wrap samples after checking ordering and finiteness.
    ///
    /// Equal consecutive timestamps are accepted.
    pub fn try_new(samples: Vec<TelemetrySample>) -> Result<Self, SeriesError> {
        for (index, sample) in samples.iter().enumerate() {
            if !sample.is_finite() {
                return Err(SeriesError::NonFinite { index });
            }
            if index > 0 {
                let previous = samples[index - 1].timestamp;
                if sample.timestamp < previous {
                    return Err(SeriesError::Unordered {
                        index,
                        timestamp: sample.timestamp,
                        previous,
                    });
                }
            }
        }
        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TelemetrySample> {
        self.samples.get(index)
    }

    pub fn first(&self) -> Option<&TelemetrySample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&TelemetrySample> {
        self.samples.last()
    }

    /// Index of the final sample, `None` for an empty series.
    pub fn last_index(&self) -> Option<usize> {
        self.samples.len().checked_sub(1)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TelemetrySample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[TelemetrySample] {
        &self.samples
    }
}

impl std::ops::Index<usize> for TelemetrySeries {
    type Output = TelemetrySample;

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

impl<'a> IntoIterator for &'a TelemetrySeries {
    type Item = &'a TelemetrySample;
    type IntoIter = std::slice::Iter<'a, TelemetrySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl From<Vec<TelemetrySample>> for TelemetrySeries {
    fn from(samples: Vec<TelemetrySample>) -> Self {
        Self::new(samples)
    }
}

impl FromIterator<TelemetrySample> for TelemetrySeries {
    fn from_iter<I: IntoIterator<Item = TelemetrySample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(secs: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, secs)
            .unwrap()
    }

    fn sample(secs: u32, altitude: f64) -> TelemetrySample {
        TelemetrySample {
            timestamp: at(secs),
            altitude,
            velocity: 0.0,
            acceleration: 0.0,
            latitude: 0.0,
            longitude: 0.0,
            recovery_deployed: false,
            motor_burning: false,
        }
    }

    #[test]
    fn test_try_new_accepts_ordered_samples() {
        let series = TelemetrySeries::try_new(vec![sample(0, 0.0), sample(0, 1.0), sample(1, 2.0)])
            .expect("ordered samples should be accepted");
        assert_eq!(series.len(), 3);
        assert_eq!(series.last_index(), Some(2));
    }

    #[test]
    fn test_try_new_rejects_unordered_timestamps() {
        let result = TelemetrySeries::try_new(vec![sample(5, 0.0), sample(3, 1.0)]);
        assert!(matches!(result, Err(SeriesError::Unordered { index: 1, .. })));
    }

    #[test]
    fn test_try_new_rejects_nan() {
        let result = TelemetrySeries::try_new(vec![sample(0, 0.0), sample(1, f64::NAN)]);
        assert_eq!(result, Err(SeriesError::NonFinite { index: 1 }));
    }

    #[test]
    fn test_empty_series() {
        let series = TelemetrySeries::default();
        assert!(series.is_empty());
        assert_eq!(series.last_index(), None);
        assert!(series.first().is_none());
    }

    #[test]
    fn test_display_matches_log_format() {
        let s = sample(7, 12.5);
        assert_eq!(s.to_string(), "Time: 2024-06-01 12:00:07, Alt: 12.50, Vel: 0.00");
    }
}
