//! Phase classification entry point

use tracing::{debug, info};

use super::{PhaseDetector, RangeStageBuilder};
use crate::config::PhaseThresholds;
use crate::types::{Phase, PhaseMap, TelemetrySeries};

/// Runs the point detectors and the range builder into one [`PhaseMap`].
#[derive(Debug, Clone, Default)]
pub struct PhaseClassifier {
    detector: PhaseDetector,
    ranges: RangeStageBuilder,
}

impl PhaseClassifier {
    pub fn new(thresholds: PhaseThresholds) -> Self {
        Self {
            detector: PhaseDetector::new(thresholds),
            ranges: RangeStageBuilder,
        }
    }

    pub fn detector(&self) -> &PhaseDetector {
        &self.detector
    }

    /// Classify every phase of the flight.
    ///
    /// Never fails. An empty series yields an empty map.
    pub fn classify(&self, series: &TelemetrySeries) -> PhaseMap {
        if series.is_empty() {
            debug!("empty series, no phases");
            return PhaseMap::default();
        }

        let launch = self.detector.find_launch(series);
        let apogee = self.detector.find_apogee(series);
        let parachute = apogee.and_then(|a| self.detector.find_parachute(series, a));
        let landing = self.detector.find_landing(series);

        let stages = self.ranges.build(launch, apogee, landing).unwrap_or_default();

        let map = PhaseMap::from_entries([
            (Phase::Launch, launch.into_iter().collect()),
            (Phase::Apogee, apogee.into_iter().collect()),
            (Phase::ParachuteDeployed, parachute.into_iter().collect()),
            (Phase::Landing, landing.into_iter().collect()),
            (Phase::Ascent, stages.ascent),
            (Phase::Descent, stages.descent),
        ]);

        info!(
            samples = series.len(),
            phases = map.len(),
            launch = ?launch,
            apogee = ?apogee,
            parachute = ?parachute,
            landing = ?landing,
            "Flight phases classified"
        );
        map
    }
}

/// Classify phases with the built-in thresholds.
pub fn classify_phases(series: &TelemetrySeries) -> PhaseMap {
    PhaseClassifier::default().classify(series)
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
                timestamp: t0 + Duration::seconds(i as i64),
                altitude,
                velocity,
                acceleration: 0.0,
                latitude: 0.0,
                longitude: 0.0,
                recovery_deployed: false,
                motor_burning: false,
            })
            .collect()
    }

    #[test]
    fn test_empty_series_empty_map() {
        assert!(classify_phases(&TelemetrySeries::default()).is_empty());
    }

    #[test]
    fn test_single_sample() {
        let map = classify_phases(&series(&[(0.0, 0.0)]));
        let phases: Vec<Phase> = map.phases().collect();
        assert_eq!(
            phases,
            vec![Phase::Launch, Phase::Apogee, Phase::Landing, Phase::Ascent, Phase::Descent]
        );
        assert_eq!(map.indices(Phase::Ascent), &[0]);
        assert_eq!(map.indices(Phase::Descent), &[0]);
    }

    #[test]
    fn test_full_flight_phase_order() {
        let s = series(&[
            (0.0, 0.0),
            (10.0, 30.0),
            (60.0, 40.0),
            (90.0, 10.0),
            (85.0, -5.0),
            (70.0, -40.0),
            (40.0, -8.0),
            (3.0, -0.2),
        ]);
        let map = classify_phases(&s);

        let phases: Vec<Phase> = map.phases().collect();
        assert_eq!(phases, Phase::ALL.to_vec());
        assert_eq!(map.first_index(Phase::Launch), Some(1));
        assert_eq!(map.first_index(Phase::Apogee), Some(3));
        assert_eq!(map.first_index(Phase::ParachuteDeployed), Some(5));
        assert_eq!(map.first_index(Phase::Landing), Some(7));
        assert_eq!(map.indices(Phase::Ascent), &[1, 2, 3]);
        assert_eq!(map.indices(Phase::Descent), &[4, 5, 6, 3]);
    }

    #[test]
    fn test_duplicate_samples_keep_distinct_indices() {
        // Samples 1 and 2 are identical; the peak is the second copy
        let mut samples: Vec<TelemetrySample> =
            series(&[(0.0, 0.0), (50.0, 0.0), (50.0, 0.0), (40.0, 0.0)])
                .iter()
                .copied()
                .collect();
        samples[2].timestamp = samples[1].timestamp;
        assert_eq!(samples[1], samples[2]);
        let s = TelemetrySeries::try_new(samples).unwrap();

        let map = classify_phases(&s);
        assert_eq!(map.first_index(Phase::Apogee), Some(2));
        assert_eq!(map.indices(Phase::Ascent), &[0, 1, 2]);
    }
}
