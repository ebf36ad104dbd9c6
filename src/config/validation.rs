//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! The raw TOML is first parsed into `toml::Value` and its key tree is
//! compared against the known field names, emitting "did you mean?"
//! warnings. Serde deserialization runs afterwards. Warnings never reject
//! a config.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for FlightConfig.
///
/// Maintained by hand to match the struct hierarchy in flight_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [flight]
        "flight",
        "flight.name",
        "flight.site",
        // [thresholds]
        "thresholds",
        // [thresholds.phase]
        "thresholds.phase",
        "thresholds.phase.launch_velocity_mps",
        "thresholds.phase.parachute_velocity_drop_mps",
        "thresholds.phase.landing_velocity_mps",
        "thresholds.phase.landing_altitude_m",
        // [thresholds.anomaly]
        "thresholds.anomaly",
        "thresholds.anomaly.hard_landing_velocity_mps",
        // [weather]
        "weather",
        "weather.enabled",
        "weather.seed",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the lexicographically smallest key so output is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Unparseable input yields no warnings; serde reports the parse error.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed FlightConfig.
///
/// Returns (errors, warnings). Errors are impossible values that must
/// prevent analysis; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::FlightConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let p = &config.thresholds.phase;
    let a = &config.thresholds.anomaly;

    // Orbital velocity is the ceiling for anything a sounding rocket records
    if p.parachute_velocity_drop_mps < -8_000.0 {
        errors.push(format!(
            "phase.parachute_velocity_drop_mps = {:.1} is outside physical range (> -8000 m/s)",
            p.parachute_velocity_drop_mps
        ));
    }

    if p.launch_velocity_mps > 10.0 {
        warnings.push(ValidationWarning {
            field: "thresholds.phase.launch_velocity_mps".to_string(),
            message: format!(
                "phase.launch_velocity_mps = {:.1} is high; launch will be detected late",
                p.launch_velocity_mps
            ),
            suggestion: None,
        });
    }

    // Landing detection needs |v| < landing_velocity, so a hard-landing
    // threshold below it flags every detected landing.
    if a.hard_landing_velocity_mps < p.landing_velocity_mps {
        warnings.push(ValidationWarning {
            field: "thresholds.anomaly.hard_landing_velocity_mps".to_string(),
            message: format!(
                "anomaly.hard_landing_velocity_mps ({:.1}) is below phase.landing_velocity_mps ({:.1})",
                a.hard_landing_velocity_mps, p.landing_velocity_mps
            ),
            suggestion: None,
        });
    }

    if config.flight.site.trim().is_empty() {
        warnings.push(ValidationWarning {
            field: "flight.site".to_string(),
            message: "flight.site is empty; weather lookups will use a blank location".to_string(),
            suggestion: None,
        });
    }

    (errors, warnings)
}
