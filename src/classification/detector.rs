//! Point-phase detectors
//!
//! Four independent forward/backward scans, each locating one milestone by
//! index. Scans assume the series is time-ordered and never mutate it.

use tracing::debug;

use crate::config::PhaseThresholds;
use crate::types::TelemetrySeries;

/// Locates launch, apogee, parachute deployment and landing.
#[derive(Debug, Clone, Default)]
pub struct PhaseDetector {
    thresholds: PhaseThresholds,
}

impl PhaseDetector {
    pub fn new(thresholds: PhaseThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &PhaseThresholds {
        &self.thresholds
    }

    /// First sample whose velocity exceeds the launch threshold.
    ///
    /// Falls back to index 0 when no sample does. `None` only for an empty
    /// series.
    pub fn find_launch(&self, series: &TelemetrySeries) -> Option<usize> {
        if series.is_empty() {
            return None;
        }

        let found = series
            .iter()
            .position(|s| s.velocity > self.thresholds.launch_velocity_mps);
        debug!(index = ?found, "launch scan");
        Some(found.unwrap_or(0))
    }

    /// First index whose successor has a lower altitude.
    ///
    /// This is the onset of the first altitude decrease, not the global
    /// maximum; a downward jitter during the climb fires early. Falls back
    /// to the last index when altitude never decreases.
    pub fn find_apogee(&self, series: &TelemetrySeries) -> Option<usize> {
        let last = series.last_index()?;

        let found = series
            .as_slice()
            .windows(2)
            .position(|w| w[1].altitude < w[0].altitude);
        debug!(index = ?found, "apogee scan");
        Some(found.unwrap_or(last))
    }

    /// Sample immediately after the first sharp velocity drop past apogee.
    ///
    /// Scans pairs `(i, i+1)` for `i` from `apogee + 1` and reports `i + 1`
    /// when `v[i+1] - v[i]` is strictly below the drop threshold. There is
    /// no fallback: `None` means no deployment was seen.
    pub fn find_parachute(&self, series: &TelemetrySeries, apogee: usize) -> Option<usize> {
        let start = apogee.checked_add(1)?;
        let tail = series.as_slice().get(start..)?;

        let found = tail
            .windows(2)
            .position(|w| w[1].velocity - w[0].velocity < self.thresholds.parachute_velocity_drop_mps)
            .map(|offset| start + offset + 1);
        debug!(apogee, index = ?found, "parachute scan");
        found
    }

    /// Last sample that is both slow and near the ground.
    ///
    /// Scans backward from the end for `|v| < landing_velocity` and
    /// `altitude <= landing_altitude`. Falls back to the last index.
    pub fn find_landing(&self, series: &TelemetrySeries) -> Option<usize> {
        let last = series.last_index()?;

        let found = series.iter().rposition(|s| {
            s.velocity.abs() < self.thresholds.landing_velocity_mps
                && s.altitude <= self.thresholds.landing_altitude_m
        });
        debug!(index = ?found, "landing scan");
        Some(found.unwrap_or(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TelemetrySample;
    use chrono::{Duration, NaiveDate};

    fn series(profile: &[(f64, f64)]) -> TelemetrySeries {
        let t0 = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        profile
            .iter()
            .enumerate()
            .map(|(i, &(altitude, velocity))| TelemetrySample {
                timestamp: t0 + Duration::milliseconds(100 * i as i64),
                altitude,
                velocity,
                acceleration: 0.0,
                latitude: 43.26,
                longitude: -79.92,
                recovery_deployed: false,
                motor_burning: false,
            })
            .collect()
    }

    fn velocities(vs: &[f64]) -> TelemetrySeries {
        series(&vs.iter().map(|&v| (100.0, v)).collect::<Vec<_>>())
    }

    fn altitudes(alts: &[f64]) -> TelemetrySeries {
        series(&alts.iter().map(|&a| (a, 0.0)).collect::<Vec<_>>())
    }

    #[test]
    fn test_empty_series_finds_nothing() {
        let d = PhaseDetector::default();
        let s = TelemetrySeries::default();
        assert_eq!(d.find_launch(&s), None);
        assert_eq!(d.find_apogee(&s), None);
        assert_eq!(d.find_parachute(&s, 0), None);
        assert_eq!(d.find_landing(&s), None);
    }

    #[test]
    fn test_launch_first_velocity_above_threshold() {
        let d = PhaseDetector::default();
        assert_eq!(d.find_launch(&velocities(&[0.0, 0.1, 0.11, 5.0])), Some(2));
    }

    #[test]
    fn test_launch_falls_back_to_first_sample() {
        let d = PhaseDetector::default();
        assert_eq!(d.find_launch(&velocities(&[0.0, 0.05, 0.1, -3.0])), Some(0));
        assert_eq!(d.find_launch(&velocities(&[0.0])), Some(0));
    }

    #[test]
    fn test_apogee_at_single_peak() {
        let d = PhaseDetector::default();
        let s = altitudes(&[0.0, 10.0, 50.0, 120.0, 80.0, 30.0, 0.0]);
        assert_eq!(d.find_apogee(&s), Some(3));
    }

    #[test]
    fn test_apogee_fires_on_first_jitter() {
        let d = PhaseDetector::default();
        let s = altitudes(&[0.0, 10.0, 9.5, 50.0, 120.0, 30.0]);
        assert_eq!(d.find_apogee(&s), Some(1));
    }

    #[test]
    fn test_apogee_falls_back_to_last_index() {
        let d = PhaseDetector::default();
        assert_eq!(d.find_apogee(&altitudes(&[0.0, 5.0, 5.0, 9.0])), Some(3));
        assert_eq!(d.find_apogee(&altitudes(&[42.0])), Some(0));
    }

    #[test]
    fn test_parachute_reports_sample_after_drop() {
        let d = PhaseDetector::default();
        let s = velocities(&[10.0, 0.0, -5.0, -30.0, -8.0]);
        assert_eq!(d.find_parachute(&s, 0), Some(3));
    }

    #[test]
    fn test_parachute_drop_of_exactly_threshold_is_ignored() {
        let d = PhaseDetector::default();
        let s = velocities(&[0.0, -1.0, -21.0, -21.0]);
        assert_eq!(d.find_parachute(&s, 0), None);

        let s = velocities(&[0.0, -1.0, -21.01, -21.01]);
        assert_eq!(d.find_parachute(&s, 0), Some(2));
    }

    #[test]
    fn test_parachute_only_searched_after_apogee() {
        let d = PhaseDetector::default();
        // Drop between indices 1 and 2 lies before the scan start at apogee + 1
        let s = velocities(&[5.0, 0.0, -40.0, -41.0, -42.0]);
        assert_eq!(d.find_parachute(&s, 1), None);
        assert_eq!(d.find_parachute(&s, 0), Some(2));
    }

    #[test]
    fn test_parachute_apogee_at_end() {
        let d = PhaseDetector::default();
        let s = velocities(&[5.0, -40.0]);
        assert_eq!(d.find_parachute(&s, 1), None);
        assert_eq!(d.find_parachute(&s, 5), None);
        assert_eq!(d.find_parachute(&s, usize::MAX), None);
    }

    #[test]
    fn test_landing_scans_backward() {
        let d = PhaseDetector::default();
        let s = series(&[(0.0, 0.0), (100.0, 20.0), (4.0, -0.5), (5.0, 0.9), (30.0, -6.0)]);
        assert_eq!(d.find_landing(&s), Some(3));
    }

    #[test]
    fn test_landing_requires_both_conditions() {
        let d = PhaseDetector::default();
        // slow but high, then low but fast
        let s = series(&[(50.0, 0.0), (2.0, -7.0), (1.0, -1.0)]);
        assert_eq!(d.find_landing(&s), Some(2));
        let s = series(&[(0.0, 0.0), (50.0, 0.0), (2.0, -7.0)]);
        assert_eq!(d.find_landing(&s), Some(0));
    }

    #[test]
    fn test_landing_falls_back_to_last_index() {
        let d = PhaseDetector::default();
        let s = series(&[(50.0, 20.0), (40.0, -10.0), (12.0, -9.0)]);
        assert_eq!(d.find_landing(&s), Some(2));
    }

    #[test]
    fn test_custom_thresholds() {
        let d = PhaseDetector::new(PhaseThresholds {
            launch_velocity_mps: 2.0,
            parachute_velocity_drop_mps: -5.0,
            ..PhaseThresholds::default()
        });
        let s = velocities(&[0.0, 1.5, 3.0, -3.0]);
        assert_eq!(d.find_launch(&s), Some(2));
        assert_eq!(d.find_parachute(&s, 1), Some(3));
    }
}
