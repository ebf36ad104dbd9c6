//! Debrief Report Tests
//!
//! Full pipeline from telemetry to a written report, with seeded weather.

use chrono::{Duration, NaiveDate};
use rocket_telemetry::config::FlightConfig;
use rocket_telemetry::debrief::{generate_debrief, render_text, write_report, ReportFormat};
use rocket_telemetry::{
    classify_phases, detect_anomalies, FlightDebrief, SimulatedWeather, TelemetrySample,
    TelemetrySeries, WeatherSource,
};

fn no_parachute_flight() -> TelemetrySeries {
    let t0 = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    [
        (6.0, 0.0, 0.0),
        (40.0, 30.0, 25.0),
        (90.0, 12.0, -9.8),
        (70.0, -10.0, -9.8),
        (30.0, -18.0, -9.8),
        (2.0, -9.0, 40.0),
    ]
    .iter()
    .enumerate()
    .map(|(i, &(altitude, velocity, acceleration))| TelemetrySample {
        timestamp: t0 + Duration::milliseconds(500 * i as i64),
        altitude,
        velocity,
        acceleration,
        latitude: 0.0,
        longitude: 0.0,
        recovery_deployed: false,
        motor_burning: false,
    })
    .collect()
}

fn build_debrief(seed: u64) -> FlightDebrief {
    let mut config = FlightConfig::default();
    config.flight.name = "HOP-4".to_string();
    config.weather.seed = Some(seed);

    let series = no_parachute_flight();
    let phases = classify_phases(&series);
    let anomalies = detect_anomalies(&series);
    let launch = series.first().unwrap().timestamp;
    let weather = SimulatedWeather::from_config(&config.weather).historical(&config.flight.site, launch);

    generate_debrief(&config.flight, &series, &phases, anomalies, weather)
}

#[test]
fn text_report_lists_every_section() {
    let text = render_text(&build_debrief(1));

    assert!(text.starts_with("ROCKET FLIGHT ANALYSIS REPORT"));
    assert!(text.contains("Flight: HOP-4"));
    assert!(text.contains("Maximum Altitude: 90.00 meters"));
    assert!(text.contains("Maximum Velocity: 30.00 m/s"));
    assert!(text.contains("Flight Duration: 2.50 s (6 data points)"));
    assert!(text.contains("FLIGHT STAGES:\nLaunch: 1 data points\nApogee: 1 data points"));
    assert!(text.contains("• No parachute deployment detected during descent."));
    assert!(text.contains("• Hard landing detected! High velocity (-9.0 m/s) at landing."));
    assert!(text.contains("LAUNCH WEATHER (24 h before launch)"));
}

#[test]
fn seeded_weather_makes_reports_reproducible() {
    let a = build_debrief(5);
    let b = build_debrief(5);
    assert_eq!(a.weather, b.weather);
    assert_eq!(render_text(&a), render_text(&b));
}

#[test]
fn json_report_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flight.json");
    let debrief = build_debrief(2);

    write_report(&path, &debrief, ReportFormat::Json).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["flight_name"], "HOP-4");
    assert_eq!(value["anomalies"].as_array().unwrap().len(), 2);
    assert_eq!(value["weather"].as_array().unwrap().len(), 24);
    assert_eq!(value["phases"][0]["phase"], "Launch");
}

#[test]
fn text_report_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flight.txt");
    let debrief = build_debrief(3);

    write_report(&path, &debrief, ReportFormat::Text).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), render_text(&debrief));
}
