//! Flight statistics and playback interpolation

use crate::config::defaults::INTERPOLATION_EPSILON;
use crate::types::{FlightStatistics, TelemetrySeries};

impl FlightStatistics {
    /// Compute headline numbers for a series. An empty series yields zeros.
    ///
    /// Maximum altitude is floored at 0 m, the pad reference.
    pub fn from_series(series: &TelemetrySeries) -> Self {
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return Self::default();
        };

        let max_altitude_m = series
            .iter()
            .map(|s| s.altitude)
            .fold(0.0, f64::max);

        let duration_ms = (last.timestamp - first.timestamp).num_milliseconds();

        Self {
            max_altitude_m,
            max_velocity_mps: signed_peak(series.iter().map(|s| s.velocity)),
            max_acceleration_mps2: signed_peak(series.iter().map(|s| s.acceleration)),
            sample_count: series.len(),
            duration_secs: duration_ms as f64 / 1000.0,
        }
    }
}

/// Value with the largest magnitude, sign preserved. The first one wins ties.
fn signed_peak(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |peak, v| if v.abs() > peak.abs() { v } else { peak })
}

/// Evaluate the parabola through three points at `x`.
///
/// Used to smooth altitude between samples during playback. Falls back to
/// `y2` when the points are (nearly) collinear in x.
pub fn parabolic_interpolation(x: f64, p1: (f64, f64), p2: (f64, f64), p3: (f64, f64)) -> f64 {
    let (x1, y1) = p1;
    let (x2, y2) = p2;
    let (x3, y3) = p3;

    let denom = (x1 - x2) * (x1 - x3) * (x2 - x3);
    if denom.abs() < INTERPOLATION_EPSILON {
        return y2;
    }

    let a = (x3 * (y2 - y1) + x2 * (y1 - y3) + x1 * (y3 - y2)) / denom;
    let b = (x3 * x3 * (y1 - y2) + x2 * x2 * (y3 - y1) + x1 * x1 * (y2 - y3)) / denom;
    let c = (x2 * x3 * (x2 - x3) * y1 + x3 * x1 * (x3 - x1) * y2 + x1 * x2 * (x1 - x2) * y3)
        / denom;

    a * x * x + b * x + c
}
