//! Rocket flight telemetry analysis
//!
//! Classifies a recorded flight into phases and flags anomalies in how it
//! unfolded.
//!
//! ## Architecture
//!
//! - **Acquisition**: flight computer CSV into a validated `TelemetrySeries`
//! - **Classification**: Launch, Apogee, ParachuteDeployed and Landing
//!   milestones plus Ascent and Descent ranges
//! - **Anomaly**: independent rules over the classified flight
//! - **Weather**: launch-site history from a pluggable source
//! - **Debrief**: statistics and the text/JSON flight report

pub mod config;
pub mod types;
pub mod acquisition;
pub mod classification;
pub mod anomaly;
pub mod weather;
pub mod debrief;

// Re-export flight configuration
pub use config::FlightConfig;

// Re-export commonly used types
pub use types::{
    Anomaly, FlightDebrief, FlightStatistics, Phase, PhaseMap, PhaseSpan, TelemetrySample,
    TelemetrySeries, WeatherSample,
};

// Re-export the analysis entry points
pub use classification::{classify_phases, PhaseClassifier};
pub use anomaly::{detect_anomalies, AnomalyDetector, AnomalyRule};
pub use acquisition::{read_csv, TelemetryLog};
pub use weather::{SimulatedWeather, WeatherSource};
pub use debrief::{generate_debrief, write_report, ReportFormat};
