//! System-wide default constants.
//!
//! Every threshold here is the built-in value used when no
//! `flight_config.toml` overrides it. Grouped by subsystem.

// ============================================================================
// Phase Detection
// ============================================================================

/// Velocity above which the rocket is considered to have left the pad (m/s).
///
/// Small positive value so sensor noise around zero does not register.
pub const LAUNCH_VELOCITY_THRESHOLD_MPS: f64 = 0.1;

/// Single-step velocity change that marks parachute deployment (m/s).
///
/// Deployment fires when `v[i+1] - v[i]` is strictly below this value.
pub const PARACHUTE_VELOCITY_DROP_MPS: f64 = -20.0;

/// Speed below which the rocket is considered at rest (m/s).
pub const LANDING_VELOCITY_THRESHOLD_MPS: f64 = 1.0;

/// Altitude at or below which the rocket is considered on the ground (m).
pub const LANDING_ALTITUDE_THRESHOLD_M: f64 = 5.0;

// ============================================================================
// Anomaly Rules
// ============================================================================

/// Landing speed above which a hard landing is reported (m/s).
pub const HARD_LANDING_VELOCITY_MPS: f64 = 5.0;

// ============================================================================
// Acquisition
// ============================================================================

/// Timestamp layout of the telemetry CSV (`2024-06-01 12:00:00.000`).
///
/// The fractional part is optional when parsing.
pub const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Minimum number of fields in a telemetry CSV row.
///
/// timestamp, altitude, velocity, acceleration, latitude, longitude,
/// recovery_deployed. `motor_burning` is optional.
pub const CSV_MIN_FIELDS: usize = 7;

// ============================================================================
// Weather
// ============================================================================

/// Hours of weather history returned before launch.
pub const WEATHER_HISTORY_HOURS: i64 = 24;

/// Location label used when none is configured.
pub const DEFAULT_LAUNCH_SITE: &str = "Launch Site";

// ============================================================================
// Playback
// ============================================================================

/// Denominator magnitude below which parabolic interpolation falls back to
/// the middle sample.
pub const INTERPOLATION_EPSILON: f64 = 1e-10;
