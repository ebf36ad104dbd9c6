//! Flight Configuration Module
//!
//! Provides flight analysis configuration loaded from TOML files, exposing
//! every phase-detection and anomaly threshold as a tunable value.
//!
//! ## Loading Order
//!
//! 1. `ROCKET_CONFIG` environment variable (path to TOML file)
//! 2. `flight_config.toml` in the current working directory
//! 3. Built-in defaults (see [`defaults`])
//!
//! ## Usage
//!
//! ```ignore
//! let config = FlightConfig::load();
//! let classifier = PhaseClassifier::new(config.thresholds.phase.clone());
//! ```
//!
//! The configuration is passed explicitly to the classifier and anomaly
//! detector; nothing in the analysis path reads global state.

mod flight_config;
pub mod defaults;
pub mod validation;

pub use flight_config::*;
