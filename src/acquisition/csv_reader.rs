//! Flight computer CSV reader
//!
//! Parses the telemetry log exported by the flight computer into a
//! validated [`TelemetrySeries`].
//!
//! # Format
//!
//! ```text
//! timestamp,altitude,velocity,acceleration,latitude,longitude,recovery_deployed,motor_burning
//! 2024-06-01 12:00:00.000,0.0,0.0,0.0,43.2617,-79.9228,false,false
//! ```
//!
//! - The first line is a header and is skipped without inspection
//! - Rows with fewer than 7 fields are skipped with a warning
//! - `motor_burning` is optional and defaults to `false`
//! - Booleans are true only for a case-insensitive `true`
//!
//! # Usage
//!
//! ```ignore
//! use rocket_telemetry::acquisition::TelemetryLog;
//!
//! let log = TelemetryLog::load("flight.csv")?;
//! let phases = rocket_telemetry::classify_phases(&log.series);
//! ```

use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::defaults::{CSV_MIN_FIELDS, CSV_TIMESTAMP_FORMAT};
use crate::types::{SeriesError, TelemetrySample, TelemetrySeries};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: invalid {field} value '{value}'")]
    Parse {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Invalid telemetry series: {0}")]
    Series(#[from] SeriesError),
}

// ============================================================================
// CSV Quote-Aware Parsing
// ============================================================================

/// Split a row on commas, keeping commas inside double-quoted fields.
///
/// Trailing empty fields are dropped, so `a,b,,` yields two fields.
fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut open: Option<String> = None;

    for piece in line.split(',') {
        let field = match open.take() {
            Some(mut head) => {
                head.push(',');
                head.push_str(piece);
                head
            }
            None => piece.to_string(),
        };

        // Odd quote count: the comma was inside a quoted field
        if field.matches('"').count() % 2 == 1 {
            open = Some(field);
        } else {
            fields.push(unquote(&field));
        }
    }
    if let Some(unterminated) = open {
        fields.push(unquote(&unterminated));
    }

    while fields.last().is_some_and(String::is_empty) {
        fields.pop();
    }
    fields
}

fn unquote(field: &str) -> String {
    let inner = field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field);
    inner.replace("\"\"", "\"")
}

fn parse_f64(raw: &str, line: usize, field: &'static str) -> Result<f64, AcquisitionError> {
    raw.trim().parse::<f64>().map_err(|_| AcquisitionError::Parse {
        line,
        field,
        value: raw.to_string(),
    })
}

fn parse_bool(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

fn parse_timestamp(raw: &str, line: usize) -> Result<NaiveDateTime, AcquisitionError> {
    NaiveDateTime::parse_from_str(raw.trim(), CSV_TIMESTAMP_FORMAT).map_err(|_| {
        AcquisitionError::Parse {
            line,
            field: "timestamp",
            value: raw.to_string(),
        }
    })
}

/// Parse one data row. `line` is 1-based and only used in errors.
fn parse_row(fields: &[String], line: usize) -> Result<TelemetrySample, AcquisitionError> {
    Ok(TelemetrySample {
        timestamp: parse_timestamp(&fields[0], line)?,
        altitude: parse_f64(&fields[1], line, "altitude")?,
        velocity: parse_f64(&fields[2], line, "velocity")?,
        acceleration: parse_f64(&fields[3], line, "acceleration")?,
        latitude: parse_f64(&fields[4], line, "latitude")?,
        longitude: parse_f64(&fields[5], line, "longitude")?,
        recovery_deployed: parse_bool(&fields[6]),
        motor_burning: fields.get(7).is_some_and(|f| parse_bool(f)),
    })
}

// ============================================================================
// Telemetry Log
// ============================================================================

/// Metadata about a loaded telemetry log
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryLogInfo {
    /// Source file path, or a caller-supplied label for in-memory input
    pub source: String,
    /// Number of samples loaded
    pub sample_count: usize,
    /// Data rows skipped for having too few fields
    pub skipped_rows: usize,
    /// First and last sample timestamps
    pub time_range: Option<(NaiveDateTime, NaiveDateTime)>,
}

/// Telemetry log parsed into a series ready for classification
#[derive(Debug, Clone)]
pub struct TelemetryLog {
    pub series: TelemetrySeries,
    pub info: TelemetryLogInfo,
}

impl TelemetryLog {
    /// Load a telemetry CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AcquisitionError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let file = File::open(path).map_err(|source| AcquisitionError::Io {
            path: path_str.clone(),
            source,
        })?;

        Self::parse(BufReader::new(file), &path_str)
    }

    /// Parse telemetry CSV from any buffered reader.
    ///
    /// An input with no data rows yields an empty series.
    pub fn parse<R: BufRead>(reader: R, source: &str) -> Result<Self, AcquisitionError> {
        let mut samples = Vec::new();
        let mut skipped_rows = 0usize;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|source_err| AcquisitionError::Io {
                path: source.to_string(),
                source: source_err,
            })?;

            // Header
            if idx == 0 {
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            let fields = csv_split(&line);
            if fields.len() < CSV_MIN_FIELDS {
                warn!(
                    source,
                    line = line_no,
                    fields = fields.len(),
                    "Skipping telemetry row with too few fields"
                );
                skipped_rows += 1;
                continue;
            }

            samples.push(parse_row(&fields, line_no)?);
        }

        let series = TelemetrySeries::try_new(samples)?;
        let time_range = series
            .first()
            .zip(series.last())
            .map(|(first, last)| (first.timestamp, last.timestamp));

        let info = TelemetryLogInfo {
            source: source.to_string(),
            sample_count: series.len(),
            skipped_rows,
            time_range,
        };

        info!(
            source,
            samples = info.sample_count,
            skipped = info.skipped_rows,
            "Telemetry log loaded"
        );

        Ok(Self { series, info })
    }
}

/// Load a telemetry CSV and return only the series.
pub fn read_csv(path: impl AsRef<Path>) -> Result<TelemetrySeries, AcquisitionError> {
    TelemetryLog::load(path).map(|log| log.series)
}
