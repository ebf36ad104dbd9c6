//! Anomaly findings

use serde::{Deserialize, Serialize};

/// Human-readable finding emitted by an anomaly rule.
///
/// Consumers only display the message, so no structured fields are carried.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Anomaly(String);

impl Anomaly {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }

    pub fn into_message(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Anomaly {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
