//! Plain-text rendering of a flight debrief

use crate::types::FlightDebrief;

const TITLE: &str = "ROCKET FLIGHT ANALYSIS REPORT";

/// Render the debrief as a human-readable report.
///
/// Sections: header, flight statistics, flight stages, anomalies, and launch
/// weather when any was collected.
pub fn render_text(debrief: &FlightDebrief) -> String {
    let mut sections = Vec::new();

    // 1. Header
    sections.push(format!(
        "{TITLE}\n{}\n\nFlight: {}\nLaunch site: {}",
        "=".repeat(TITLE.len()),
        debrief.flight_name,
        debrief.launch_site,
    ));

    // 2. Statistics
    let stats = &debrief.statistics;
    sections.push(format!(
        "FLIGHT STATISTICS:\n\
         Maximum Altitude: {:.2} meters\n\
         Maximum Velocity: {:.2} m/s\n\
         Maximum Acceleration: {:.2} m/s²\n\
         Flight Duration: {:.2} s ({} data points)",
        stats.max_altitude_m,
        stats.max_velocity_mps,
        stats.max_acceleration_mps2,
        stats.duration_secs,
        stats.sample_count,
    ));

    // 3. Stages
    if !debrief.phases.is_empty() {
        let mut lines = vec!["FLIGHT STAGES:".to_string()];
        for summary in &debrief.phases {
            lines.push(format!(
                "{}: {} data points",
                summary.phase.display_name(),
                summary.sample_count
            ));
        }
        sections.push(lines.join("\n"));
    }

    // 4. Anomalies
    if debrief.anomalies.is_empty() {
        sections.push("ANOMALIES: None detected".to_string());
    } else {
        let mut lines = vec!["DETECTED ANOMALIES:".to_string()];
        lines.extend(debrief.anomalies.iter().map(|a| format!("• {a}")));
        sections.push(lines.join("\n"));
    }

    // 5. Weather
    if let Some(latest) = debrief.weather.last() {
        let (t_min, t_max) = debrief
            .weather
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), w| {
                (lo.min(w.temperature_c), hi.max(w.temperature_c))
            });
        let peak_wind = debrief
            .weather
            .iter()
            .map(|w| w.wind_speed_kmh)
            .fold(0.0, f64::max);

        sections.push(format!(
            "LAUNCH WEATHER ({} h before launch):\n\
             Temperature range: {:.1}°C to {:.1}°C\n\
             Peak wind: {:.1} km/h\n\
             Last reading ({}): {}, {:.0} hPa, {:.0}% humidity",
            debrief.weather.len(),
            t_min,
            t_max,
            peak_wind,
            latest.timestamp.format("%Y-%m-%d %H:%M"),
            latest,
            latest.pressure_hpa,
            latest.humidity_percent,
        ));
    }

    let mut report = sections.join("\n\n");
    report.push('\n');
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Anomaly, FlightStatistics, Phase, PhaseSummary, WeatherSample};
    use chrono::NaiveDate;

    fn debrief() -> FlightDebrief {
        FlightDebrief {
            flight_name: "HOP-3".to_string(),
            launch_site: "Spaceport".to_string(),
            generated_at: 0,
            statistics: FlightStatistics {
                max_altitude_m: 175.0,
                max_velocity_mps: -30.0,
                max_acceleration_mps2: 9.81,
                sample_count: 11,
                duration_secs: 10.0,
            },
            phases: vec![
                PhaseSummary {
                    phase: Phase::Launch,
                    sample_count: 1,
                    first_index: 1,
                    start_altitude_m: 1.0,
                },
                PhaseSummary {
                    phase: Phase::Ascent,
                    sample_count: 5,
                    first_index: 1,
                    start_altitude_m: 1.0,
                },
            ],
            anomalies: Vec::new(),
            weather: Vec::new(),
        }
    }

    #[test]
    fn test_sections_present() {
        let text = render_text(&debrief());
        assert!(text.starts_with("ROCKET FLIGHT ANALYSIS REPORT\n"));
        assert!(text.contains("FLIGHT STATISTICS:\nMaximum Altitude: 175.00 meters"));
        assert!(text.contains("Maximum Velocity: -30.00 m/s"));
        assert!(text.contains("FLIGHT STAGES:\nLaunch: 1 data points\nAscent: 5 data points"));
        assert!(text.contains("ANOMALIES: None detected"));
        assert!(!text.contains("LAUNCH WEATHER"));
    }

    #[test]
    fn test_anomaly_bullets() {
        let mut d = debrief();
        d.anomalies = vec![
            Anomaly::new("No parachute deployment detected during descent."),
            Anomaly::new("Hard landing detected! High velocity (-7.3 m/s) at landing."),
        ];
        let text = render_text(&d);
        assert!(text.contains(
            "DETECTED ANOMALIES:\n• No parachute deployment detected during descent.\n• Hard landing"
        ));
        assert!(!text.contains("None detected"));
    }

    #[test]
    fn test_weather_summary() {
        let t = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap();
        let mut d = debrief();
        d.weather = vec![
            WeatherSample {
                timestamp: t - chrono::Duration::hours(1),
                temperature_c: 18.0,
                pressure_hpa: 1010.0,
                wind_speed_kmh: 22.5,
                wind_direction_deg: 90.0,
                humidity_percent: 40.0,
            },
            WeatherSample {
                timestamp: t,
                temperature_c: 24.0,
                pressure_hpa: 1012.0,
                wind_speed_kmh: 8.0,
                wind_direction_deg: 180.0,
                humidity_percent: 55.0,
            },
        ];
        let text = render_text(&d);
        assert!(text.contains("Temperature range: 18.0°C to 24.0°C"));
        assert!(text.contains("Peak wind: 22.5 km/h"));
        assert!(text.contains("Weather: 24.0°C, 8.0km/h wind"));
    }
}
