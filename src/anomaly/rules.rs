//! Built-in anomaly rules

use super::AnomalyRule;
use crate::types::{Anomaly, Phase, PhaseMap, TelemetrySeries};

/// Parachute deployed at an earlier sample than apogee.
pub struct PrematureDeploymentRule;

impl AnomalyRule for PrematureDeploymentRule {
    fn name(&self) -> &str {
        "PrematureDeployment"
    }

    fn evaluate(&self, _series: &TelemetrySeries, phases: &PhaseMap) -> Option<Anomaly> {
        let parachute = phases.first_index(Phase::ParachuteDeployed)?;
        let apogee = phases.first_index(Phase::Apogee)?;

        (parachute < apogee).then(|| {
            Anomaly::new("Premature parachute deployment detected! Parachute deployed before apogee.")
        })
    }
}

/// No parachute deployment found anywhere in the flight.
pub struct MissingDeploymentRule;

impl AnomalyRule for MissingDeploymentRule {
    fn name(&self) -> &str {
        "MissingDeployment"
    }

    fn evaluate(&self, _series: &TelemetrySeries, phases: &PhaseMap) -> Option<Anomaly> {
        (!phases.contains(Phase::ParachuteDeployed))
            .then(|| Anomaly::new("No parachute deployment detected during descent."))
    }
}

/// Landing speed above the hard-landing threshold.
pub struct HardLandingRule {
    pub max_velocity_mps: f64,
}

impl AnomalyRule for HardLandingRule {
    fn name(&self) -> &str {
        "HardLanding"
    }

    fn evaluate(&self, series: &TelemetrySeries, phases: &PhaseMap) -> Option<Anomaly> {
        let landing = series.get(phases.first_index(Phase::Landing)?)?;

        (landing.velocity.abs() > self.max_velocity_mps).then(|| {
            Anomaly::new(format!(
                "Hard landing detected! High velocity ({} m/s) at landing.",
                format_half_up(landing.velocity, 1)
            ))
        })
    }
}

/// Format `value` with `decimals` fraction digits, rounding half away from
/// zero on its shortest decimal representation.
///
/// `format!("{:.1}")` rounds the exact binary value, so `-7.25` (stored as
/// -7.24999...) prints as `-7.2`. Report text expects `-7.3`.
pub(crate) fn format_half_up(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{value:.decimals$}");
    }

    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(decimals))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes().get(decimals).is_some_and(|&d| d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let int_len = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    for (i, d) in digits.iter().enumerate() {
        if i == int_len {
            out.push('.');
        }
        out.push(char::from(b'0' + d));
    }
    out
}
