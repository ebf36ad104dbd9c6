//! Flight Configuration - phase and anomaly thresholds as tunable TOML values
//!
//! Each struct implements `Default` with the built-in constants from
//! [`super::defaults`], so behaviour is unchanged when no config file exists.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::defaults;

/// Environment variable naming a config file to load.
pub const CONFIG_ENV_VAR: &str = "ROCKET_CONFIG";

/// Config file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "flight_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a flight analysis run.
///
/// Load with `FlightConfig::load()` which searches:
/// 1. `$ROCKET_CONFIG` env var
/// 2. `./flight_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightConfig {
    /// Flight identification
    #[serde(default)]
    pub flight: FlightInfo,

    /// Phase detection and anomaly thresholds
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Simulated weather lookup
    #[serde(default)]
    pub weather: WeatherConfig,
}

impl FlightConfig {
    /// Load configuration using the standard search order:
    /// 1. `$ROCKET_CONFIG` environment variable
    /// 2. `./flight_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        let candidates = explicit.into_iter().chain([PathBuf::from(LOCAL_CONFIG_FILE)]);

        Self::load_first(candidates).unwrap_or_else(|| {
            info!("No usable flight config found, using built-in defaults");
            Self::default()
        })
    }

    /// First candidate file that exists and loads cleanly.
    ///
    /// Missing files are skipped quietly; files that fail to parse or
    /// validate are skipped with a warning.
    fn load_first(candidates: impl IntoIterator<Item = PathBuf>) -> Option<Self> {
        candidates.into_iter().find_map(|path| {
            if !path.exists() {
                debug!(path = %path.display(), "Flight config candidate not found");
                return None;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!(path = %path.display(), flight = %config.flight.name, "Loaded flight config");
                    Some(config)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unusable flight config");
                    None
                }
            }
        })
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings and otherwise ignored.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Flight config saved");
        Ok(())
    }

    /// Validate all thresholds.
    ///
    /// Rules:
    /// - Every threshold must be finite
    /// - The parachute velocity drop must be negative
    /// - Landing speed and hard-landing speed must be positive
    /// - Launch speed and landing altitude must not be negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.thresholds.phase;
        let a = &self.thresholds.anomaly;
        let mut errors: Vec<String> = Vec::new();

        let values = [
            ("phase.launch_velocity_mps", p.launch_velocity_mps),
            ("phase.parachute_velocity_drop_mps", p.parachute_velocity_drop_mps),
            ("phase.landing_velocity_mps", p.landing_velocity_mps),
            ("phase.landing_altitude_m", p.landing_altitude_m),
            ("anomaly.hard_landing_velocity_mps", a.hard_landing_velocity_mps),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                errors.push(format!("{name}: value must be finite (got {value})"));
            }
        }

        if p.parachute_velocity_drop_mps >= 0.0 {
            errors.push(format!(
                "phase.parachute_velocity_drop_mps ({:.3}) must be negative",
                p.parachute_velocity_drop_mps
            ));
        }
        if p.landing_velocity_mps <= 0.0 {
            errors.push(format!(
                "phase.landing_velocity_mps ({:.3}) must be > 0",
                p.landing_velocity_mps
            ));
        }
        if p.launch_velocity_mps < 0.0 {
            errors.push(format!(
                "phase.launch_velocity_mps ({:.3}) cannot be negative",
                p.launch_velocity_mps
            ));
        }
        if p.landing_altitude_m < 0.0 {
            errors.push(format!(
                "phase.landing_altitude_m ({:.3}) cannot be negative",
                p.landing_altitude_m
            ));
        }
        if a.hard_landing_velocity_mps <= 0.0 {
            errors.push(format!(
                "anomaly.hard_landing_velocity_mps ({:.3}) must be > 0",
                a.hard_landing_velocity_mps
            ));
        }

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(_, e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

// ============================================================================
// Flight Info
// ============================================================================

/// Identification metadata, used in logs and reports only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightInfo {
    /// Flight name / identifier
    #[serde(default = "default_flight_name")]
    pub name: String,

    /// Launch site name, also used as the weather lookup location
    #[serde(default = "default_site")]
    pub site: String,
}

fn default_flight_name() -> String {
    "UNNAMED".to_string()
}
fn default_site() -> String {
    defaults::DEFAULT_LAUNCH_SITE.to_string()
}

impl Default for FlightInfo {
    fn default() -> Self {
        Self {
            name: default_flight_name(),
            site: default_site(),
        }
    }
}

// ============================================================================
// Threshold Config (master container)
// ============================================================================

/// All detection thresholds, grouped by stage of the analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default)]
    pub phase: PhaseThresholds,

    #[serde(default)]
    pub anomaly: AnomalyThresholds,
}

/// Thresholds used by the four point-phase detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseThresholds {
    /// Launch fires on the first velocity strictly above this (m/s)
    #[serde(default = "default_launch_velocity")]
    pub launch_velocity_mps: f64,

    /// Parachute fires on the first single-step velocity change strictly
    /// below this (m/s, negative)
    #[serde(default = "default_parachute_drop")]
    pub parachute_velocity_drop_mps: f64,

    /// Landing requires |velocity| strictly below this (m/s)
    #[serde(default = "default_landing_velocity")]
    pub landing_velocity_mps: f64,

    /// Landing requires altitude at or below this (m)
    #[serde(default = "default_landing_altitude")]
    pub landing_altitude_m: f64,
}

fn default_launch_velocity() -> f64 {
    defaults::LAUNCH_VELOCITY_THRESHOLD_MPS
}
fn default_parachute_drop() -> f64 {
    defaults::PARACHUTE_VELOCITY_DROP_MPS
}
fn default_landing_velocity() -> f64 {
    defaults::LANDING_VELOCITY_THRESHOLD_MPS
}
fn default_landing_altitude() -> f64 {
    defaults::LANDING_ALTITUDE_THRESHOLD_M
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            launch_velocity_mps: default_launch_velocity(),
            parachute_velocity_drop_mps: default_parachute_drop(),
            landing_velocity_mps: default_landing_velocity(),
            landing_altitude_m: default_landing_altitude(),
        }
    }
}

/// Thresholds used by the anomaly rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyThresholds {
    /// Hard landing when |landing velocity| is strictly above this (m/s)
    #[serde(default = "default_hard_landing")]
    pub hard_landing_velocity_mps: f64,
}

fn default_hard_landing() -> f64 {
    defaults::HARD_LANDING_VELOCITY_MPS
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            hard_landing_velocity_mps: default_hard_landing(),
        }
    }
}

// ============================================================================
// Weather Config
// ============================================================================

/// Simulated weather lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Include weather history in the debrief
    #[serde(default = "default_weather_enabled")]
    pub enabled: bool,

    /// Fixed RNG seed for reproducible weather; random when unset.
    ///
    /// Can be overridden by the `--weather-seed` CLI flag.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_weather_enabled() -> bool {
    true
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: default_weather_enabled(),
            seed: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
