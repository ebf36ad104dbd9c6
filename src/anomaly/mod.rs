//! Anomaly rule engine
//!
//! Each rule is an independent predicate over the classified flight. Every
//! rule is evaluated on every run and all findings are kept, in rule order.
//!
//! ## Default rules
//!
//! 1. **PrematureDeployment**: parachute index before apogee index
//! 2. **MissingDeployment**: no ParachuteDeployed phase
//! 3. **HardLanding**: |landing velocity| above threshold

pub mod rules;

pub use rules::{HardLandingRule, MissingDeploymentRule, PrematureDeploymentRule};

use tracing::{debug, info};

use crate::classification::PhaseClassifier;
use crate::config::{AnomalyThresholds, FlightConfig};
use crate::types::{Anomaly, PhaseMap, TelemetrySeries};

/// A single anomaly check.
///
/// Rules see the series and the phase map classified from it, and return at
/// most one finding.
pub trait AnomalyRule: Send + Sync {
    /// Rule name for logging
    fn name(&self) -> &str;

    fn evaluate(&self, series: &TelemetrySeries, phases: &PhaseMap) -> Option<Anomaly>;
}

/// Create the default rule set in evaluation order
pub fn default_rules(thresholds: &AnomalyThresholds) -> Vec<Box<dyn AnomalyRule>> {
    vec![
        Box::new(PrematureDeploymentRule),
        Box::new(MissingDeploymentRule),
        Box::new(HardLandingRule {
            max_velocity_mps: thresholds.hard_landing_velocity_mps,
        }),
    ]
}

/// Classifies a flight and runs every rule against it.
pub struct AnomalyDetector {
    classifier: PhaseClassifier,
    rules: Vec<Box<dyn AnomalyRule>>,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new(PhaseClassifier::default(), default_rules(&AnomalyThresholds::default()))
    }
}

impl AnomalyDetector {
    pub fn new(classifier: PhaseClassifier, rules: Vec<Box<dyn AnomalyRule>>) -> Self {
        Self { classifier, rules }
    }

    /// Detector using the thresholds from a loaded config.
    pub fn from_config(config: &FlightConfig) -> Self {
        Self::new(
            PhaseClassifier::new(config.thresholds.phase.clone()),
            default_rules(&config.thresholds.anomaly),
        )
    }

    /// Register an additional rule, evaluated after the existing ones.
    pub fn with_rule(mut self, rule: Box<dyn AnomalyRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn classifier(&self) -> &PhaseClassifier {
        &self.classifier
    }

    /// Classify the flight and collect every finding.
    ///
    /// The phase map is recomputed here so findings always reflect the same
    /// classification logic. An empty series yields no findings.
    pub fn detect(&self, series: &TelemetrySeries) -> Vec<Anomaly> {
        if series.is_empty() {
            return Vec::new();
        }

        let phases = self.classifier.classify(series);
        self.evaluate(series, &phases)
    }

    /// Run every rule against an already classified flight.
    pub fn evaluate(&self, series: &TelemetrySeries, phases: &PhaseMap) -> Vec<Anomaly> {
        if series.is_empty() {
            return Vec::new();
        }

        let anomalies: Vec<Anomaly> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let finding = rule.evaluate(series, phases);
                debug!(rule = rule.name(), fired = finding.is_some(), "anomaly rule evaluated");
                finding
            })
            .collect();

        info!(count = anomalies.len(), "Anomaly detection complete");
        anomalies
    }
}

/// Detect anomalies with the built-in thresholds.
pub fn detect_anomalies(series: &TelemetrySeries) -> Vec<Anomaly> {
    AnomalyDetector::default().detect(series)
}
