//! Post-flight debrief types

use serde::{Deserialize, Serialize};

use super::{Anomaly, Phase, WeatherSample};

/// Complete post-flight debrief report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightDebrief {
    pub flight_name: String,
    pub launch_site: String,
    /// Unix timestamp when the debrief was generated
    pub generated_at: u64,
    pub statistics: FlightStatistics,
    pub phases: Vec<PhaseSummary>,
    pub anomalies: Vec<Anomaly>,
    pub weather: Vec<WeatherSample>,
}

/// Headline numbers for a flight
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlightStatistics {
    /// Highest recorded altitude (m)
    pub max_altitude_m: f64,
    /// Velocity of largest magnitude, sign preserved (m/s)
    pub max_velocity_mps: f64,
    /// Acceleration of largest magnitude, sign preserved (m/s²)
    pub max_acceleration_mps2: f64,
    pub sample_count: usize,
    /// First to last timestamp (s)
    pub duration_secs: f64,
}

/// One phase as shown in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSummary {
    pub phase: Phase,
    pub sample_count: usize,
    pub first_index: usize,
    /// Altitude of the first sample in the phase (m)
    pub start_altitude_m: f64,
}
