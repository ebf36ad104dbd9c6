//! Shared data structures for flight telemetry analysis
//!
//! - TelemetrySample / TelemetrySeries: validated input from the acquisition layer
//! - Phase / PhaseMap: output of phase classification
//! - Anomaly: output of the anomaly rule engine
//! - WeatherSample: launch-site weather from a `WeatherSource`
//! - FlightDebrief: everything the report generator renders

mod telemetry;
mod phase;
mod anomaly;
mod weather;
mod debrief;

pub use telemetry::*;
pub use phase::*;
pub use anomaly::*;
pub use weather::*;
pub use debrief::*;
