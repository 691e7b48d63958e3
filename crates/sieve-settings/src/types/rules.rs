//! Rule file locations.

use serde::{Deserialize, Serialize};

/// Names of the rule files looked up under the scan root.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleFileSettings {
    /// Whether the VCS-ignore file participates at all.
    pub use_vcs_ignore: bool,
    /// VCS-ignore file (tier 1).
    pub vcs_ignore_file: String,
    /// File include rules; its presence switches files to INCLUDE mode.
    pub include_file: String,
    /// File exclude rules, used only when no include file exists.
    pub exclude_file: String,
    /// Method include rules.
    pub method_include_file: String,
    /// Method exclude rules.
    pub method_exclude_file: String,
}

impl Default for RuleFileSettings {
    fn default() -> Self {
        Self {
            use_vcs_ignore: true,
            vcs_ignore_file: ".gitignore".to_string(),
            include_file: ".sieveinclude".to_string(),
            exclude_file: ".sieveignore".to_string(),
            method_include_file: ".sievemethodinclude".to_string(),
            method_exclude_file: ".sievemethodignore".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let r = RuleFileSettings::default();
        assert!(r.use_vcs_ignore);
        assert_eq!(r.vcs_ignore_file, ".gitignore");
        assert_eq!(r.include_file, ".sieveinclude");
        assert_eq!(r.exclude_file, ".sieveignore");
    }

    #[test]
    fn partial_override() {
        let r: RuleFileSettings =
            serde_json::from_value(serde_json::json!({"excludeFile": ".digestignore"})).unwrap();
        assert_eq!(r.exclude_file, ".digestignore");
        assert_eq!(r.method_include_file, ".sievemethodinclude");
    }
}
