//! # sieve-settings
//!
//! Layered configuration for sieve.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`SieveSettings::default()`]
//! 2. **Settings file**: `~/.sieve/settings.json` or an explicit path
//!    (deep-merged over defaults)
//! 3. **Environment variables**: `SIEVE_*` overrides (highest priority)

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings_from_path, settings_path};
pub use types::*;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_exports_work() {
        let _settings = SieveSettings::default();
        let _path = settings_path();
        let _fit = FitSettings::default();
    }

    #[test]
    fn settings_path_under_dot_sieve() {
        let path = settings_path();
        assert!(path.ends_with(".sieve/settings.json"));
    }
}
