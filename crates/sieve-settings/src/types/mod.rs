//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` and `#[serde(default)]`,
//! so a settings file only needs the keys it overrides.

mod fit;
mod rules;

pub use fit::*;
pub use rules::*;

use serde::{Deserialize, Serialize};

/// Root settings type for sieve.
///
/// ```json
/// {
///   "fit": { "targetTokens": 64000, "strategy": "balanced" },
///   "rules": { "useVcsIgnore": false }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SieveSettings {
    /// Budget fitting options.
    pub fit: FitSettings,
    /// Rule file names, resolved against the scan root.
    pub rules: RuleFileSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for SieveSettings {
    fn default() -> Self {
        Self {
            fit: FitSettings::default(),
            rules: RuleFileSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Minimum level passed to the tracing `EnvFilter`.
    pub level: String,
    /// Emit JSON lines instead of compact text.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
