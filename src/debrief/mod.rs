//! Post-flight debrief: statistics, phase summary, anomalies and launch
//! weather, rendered as a text or JSON report.

pub mod narrative;
pub mod statistics;

pub use narrative::render_text;
pub use statistics::parabolic_interpolation;

use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::config::FlightInfo;
use crate::types::{
    Anomaly, FlightDebrief, FlightStatistics, PhaseMap, PhaseSummary, TelemetrySeries,
    WeatherSample,
};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format for [`write_report`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format '{other}' (expected text or json)")),
        }
    }
}

/// Assemble a debrief from an analysed flight.
pub fn generate_debrief(
    flight: &FlightInfo,
    series: &TelemetrySeries,
    phases: &PhaseMap,
    anomalies: Vec<Anomaly>,
    weather: Vec<WeatherSample>,
) -> FlightDebrief {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let phase_summaries = phases
        .iter()
        .filter_map(|span| {
            let first_index = *span.indices.first()?;
            Some(PhaseSummary {
                phase: span.phase,
                sample_count: span.indices.len(),
                first_index,
                start_altitude_m: series.get(first_index).map_or(0.0, |s| s.altitude),
            })
        })
        .collect();

    FlightDebrief {
        flight_name: flight.name.clone(),
        launch_site: flight.site.clone(),
        generated_at: now,
        statistics: FlightStatistics::from_series(series),
        phases: phase_summaries,
        anomalies,
        weather,
    }
}

/// Render the debrief in `format`.
pub fn render(debrief: &FlightDebrief, format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Text => Ok(render_text(debrief)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(debrief)?),
    }
}

/// Write the rendered debrief to `path`, replacing any existing file.
pub fn write_report(
    path: impl AsRef<Path>,
    debrief: &FlightDebrief,
    format: ReportFormat,
) -> Result<(), ReportError> {
    let path = path.as_ref();
    let body = render(debrief, format)?;

    std::fs::write(path, body).map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    info!(path = %path.display(), ?format, "Flight report written");
    Ok(())
}
