//! Budget fitting settings.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Options for the token budget fitter.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FitSettings {
    /// Maximum total tokens the digest may consume.
    pub target_tokens: u64,
    /// Strategy name (`auto`, `topN`, `balanced`, `shrinkDocs`, `methodsOnly`).
    pub strategy: String,
    /// Swap excluded entry points back in when the overage stays within 10%.
    pub preserve_entry_points: bool,
    /// File patterns whose matches get an importance boost.
    pub priority_patterns: Vec<String>,
    /// Lower bound on selected files, filled while budget remains.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_files: Option<usize>,
    /// Upper bound on selected files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_files: Option<usize>,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            target_tokens: 100_000,
            strategy: "auto".to_string(),
            preserve_entry_points: true,
            priority_patterns: Vec::new(),
            min_files: None,
            max_files: None,
        }
    }
}

impl FitSettings {
    /// Reject combinations the fitter cannot honor.
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_files, self.max_files) {
            if min > max {
                return Err(SettingsError::InvalidValue(format!(
                    "minFiles ({min}) exceeds maxFiles ({max})"
                )));
            }
        }
        if self.max_files == Some(0) {
            return Err(SettingsError::InvalidValue(
                "maxFiles must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults() {
        let f = FitSettings::default();
        assert_eq!(f.target_tokens, 100_000);
        assert_eq!(f.strategy, "auto");
        assert!(f.preserve_entry_points);
        assert!(f.priority_patterns.is_empty());
        assert!(f.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_limits() {
        let f = FitSettings {
            min_files: Some(10),
            max_files: Some(3),
            ..FitSettings::default()
        };
        assert_matches!(f.validate(), Err(SettingsError::InvalidValue(_)));
    }

    #[test]
    fn validate_rejects_zero_max() {
        let f = FitSettings {
            max_files: Some(0),
            ..FitSettings::default()
        };
        assert!(f.validate().is_err());
    }
}
