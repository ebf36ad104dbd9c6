//! Launch-site weather history
//!
//! The debrief asks a [`WeatherSource`] for the hourly conditions leading up
//! to launch. [`SimulatedWeather`] is the only built-in source: it draws
//! plausible values from a seedable RNG so reports stay reproducible when a
//! seed is configured.

use chrono::{Duration, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::defaults::WEATHER_HISTORY_HOURS;
use crate::config::WeatherConfig;
use crate::types::WeatherSample;

/// Provider of historical weather for a launch site.
pub trait WeatherSource {
    /// Hourly samples before `launch_time`, oldest first.
    fn historical(&mut self, location: &str, launch_time: NaiveDateTime) -> Vec<WeatherSample>;
}

/// Random weather within fixed climatological ranges.
pub struct SimulatedWeather {
    rng: StdRng,
}

impl SimulatedWeather {
    /// Deterministic source: the same seed always yields the same history.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when the config carries a seed, random otherwise.
    pub fn from_config(config: &WeatherConfig) -> Self {
        config.seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl WeatherSource for SimulatedWeather {
    fn historical(&mut self, location: &str, launch_time: NaiveDateTime) -> Vec<WeatherSample> {
        let samples: Vec<WeatherSample> = (0..WEATHER_HISTORY_HOURS)
            .map(|i| WeatherSample {
                timestamp: launch_time - Duration::hours(WEATHER_HISTORY_HOURS - i),
                temperature_c: self.rng.gen_range(15.0..35.0),
                pressure_hpa: self.rng.gen_range(1003.0..1023.0),
                wind_speed_kmh: self.rng.gen_range(0.0..30.0),
                wind_direction_deg: self.rng.gen_range(0.0..360.0),
                humidity_percent: self.rng.gen_range(30.0..100.0),
            })
            .collect();

        debug!(location, hours = samples.len(), "Simulated weather history");
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn launch() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_same_seed_same_history() {
        let a = SimulatedWeather::seeded(42).historical("Pad 39A", launch());
        let b = SimulatedWeather::seeded(42).historical("Pad 39A", launch());
        assert_eq!(a, b);

        let c = SimulatedWeather::seeded(43).historical("Pad 39A", launch());
        assert_ne!(a, c);
    }

    #[test]
    fn test_hourly_timestamps_before_launch() {
        let history = SimulatedWeather::seeded(7).historical("site", launch());
        assert_eq!(history.len(), 24);
        assert_eq!(history[0].timestamp, launch() - Duration::hours(24));
        assert_eq!(history[23].timestamp, launch() - Duration::hours(1));
        for pair in history.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
        }
    }

    #[test]
    fn test_values_in_range() {
        let history = SimulatedWeather::from_entropy().historical("site", launch());
        for w in &history {
            assert!((15.0..35.0).contains(&w.temperature_c));
            assert!((1003.0..1023.0).contains(&w.pressure_hpa));
            assert!((0.0..30.0).contains(&w.wind_speed_kmh));
            assert!((0.0..360.0).contains(&w.wind_direction_deg));
            assert!((30.0..100.0).contains(&w.humidity_percent));
        }
    }

    #[test]
    fn test_from_config_uses_seed() {
        let config = WeatherConfig {
            enabled: true,
            seed: Some(9),
        };
        let a = SimulatedWeather::from_config(&config).historical("x", launch());
        let b = SimulatedWeather::seeded(9).historical("x", launch());
        assert_eq!(a, b);
    }
}
