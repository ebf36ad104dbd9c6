//! Telemetry data acquisition module
//!
//! Handles ingestion of flight computer CSV logs.

pub mod csv_reader;

pub use csv_reader::{read_csv, AcquisitionError, TelemetryLog, TelemetryLogInfo};
