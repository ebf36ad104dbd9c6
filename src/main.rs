//! rocket-telemetry - post-flight telemetry analysis
//!
//! Loads a flight computer CSV log, classifies the flight phases, runs the
//! anomaly rules and optionally writes a debrief report.
//!
//! # Usage
//!
//! ```bash
//! # Analyse a flight and log the result
//! rocket-telemetry --csv flight.csv
//!
//! # Write a JSON report with reproducible weather
//! rocket-telemetry --csv flight.csv --report flight.json --format json --weather-seed 7
//!
//! # Show the effective configuration
//! rocket-telemetry print-config
//! ```
//!
//! # Environment Variables
//!
//! - `ROCKET_CONFIG`: Path to a flight config TOML (default: ./flight_config.toml)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use rocket_telemetry::config::FlightConfig;
use rocket_telemetry::debrief::{self, ReportFormat};
use rocket_telemetry::{AnomalyDetector, SimulatedWeather, TelemetryLog, WeatherSource};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "rocket-telemetry")]
#[command(about = "Rocket flight phase classification and anomaly detection")]
#[command(version)]
struct CliArgs {
    /// Path to the flight computer CSV log
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Flight config TOML (overrides ROCKET_CONFIG and ./flight_config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the debrief report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Report format: text or json
    #[arg(long, default_value = "text")]
    format: ReportFormat,

    /// Fixed seed for simulated launch weather
    #[arg(long)]
    weather_seed: Option<u64>,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Print the effective configuration as TOML and exit
    PrintConfig,
}

// ============================================================================
// Helpers
// ============================================================================

fn load_config(path: Option<&PathBuf>) -> Result<FlightConfig> {
    match path {
        Some(p) => FlightConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(FlightConfig::load()),
    }
}

fn analyse(args: &CliArgs, mut config: FlightConfig, csv: &Path) -> Result<()> {
    if args.weather_seed.is_some() {
        config.weather.seed = args.weather_seed;
    }

    let log = TelemetryLog::load(csv)
        .with_context(|| format!("Failed to load telemetry from {}", csv.display()))?;
    if log.series.is_empty() {
        warn!(path = %csv.display(), "Telemetry log contains no samples");
    }

    let detector = AnomalyDetector::from_config(&config);
    let phases = detector.classifier().classify(&log.series);
    let anomalies = detector.evaluate(&log.series, &phases);

    for span in phases.iter() {
        info!(
            phase = %span.phase,
            samples = span.indices.len(),
            first = ?span.indices.first(),
            "Phase"
        );
    }
    if anomalies.is_empty() {
        info!("No anomalies detected");
    }
    for anomaly in &anomalies {
        warn!("Anomaly: {}", anomaly);
    }

    let Some(report_path) = &args.report else {
        return Ok(());
    };

    let weather = match (config.weather.enabled, log.series.first()) {
        (true, Some(first)) => {
            SimulatedWeather::from_config(&config.weather).historical(&config.flight.site, first.timestamp)
        }
        _ => Vec::new(),
    };

    let report = debrief::generate_debrief(&config.flight, &log.series, &phases, anomalies, weather);
    debrief::write_report(report_path, &report, args.format)
        .with_context(|| format!("Failed to write report {}", report_path.display()))?;

    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    let config = load_config(args.config.as_ref())?;

    if let Some(SubCommand::PrintConfig) = &args.command {
        let toml = config.to_toml().context("Failed to serialize config")?;
        print!("{toml}");
        return Ok(());
    }

    let Some(csv) = args.csv.clone() else {
        return Err(anyhow::anyhow!("No telemetry input. Pass --csv <FILE>"));
    };

    info!(flight = %config.flight.name, site = %config.flight.site, "Analysing flight");
    analyse(&args, config, &csv)?;

    info!("✓ Analysis complete");
    Ok(())
}
