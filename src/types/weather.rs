//! Launch-site weather types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Hourly weather observation at the launch site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub timestamp: NaiveDateTime,
    /// Air temperature (°C)
    pub temperature_c: f64,
    /// Barometric pressure (hPa)
    pub pressure_hpa: f64,
    /// Wind speed (km/h)
    pub wind_speed_kmh: f64,
    /// Wind direction (degrees from north)
    pub wind_direction_deg: f64,
    /// Relative humidity (%)
    pub humidity_percent: f64,
}

impl std::fmt::Display for WeatherSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Weather: {:.1}°C, {:.1}km/h wind",
            self.temperature_c, self.wind_speed_kmh
        )
    }
}
