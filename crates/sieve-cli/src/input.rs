//! Candidate input.
//!
//! The scanner hands over a JSON array of `{path | relativePath, tokens,
//! sizeBytes?, methodTokens?}` records. Records that cannot become a
//! [`Candidate`] (no path, a path escaping the root) are skipped with a
//! warning instead of failing the run.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use sieve_core::{Candidate, CandidateInput};
use tracing::warn;

/// Read candidates from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_candidates(path: Option<&Path>) -> Result<Vec<Candidate>> {
    let text = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read candidates: {}", p.display()))?,
        _ => {
            let mut buf = String::new();
            let _ = std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read candidates from stdin")?;
            buf
        }
    };
    parse_candidates(&text)
}

/// Parse a JSON candidate array.
pub fn parse_candidates(text: &str) -> Result<Vec<Candidate>> {
    let inputs: Vec<CandidateInput> =
        serde_json::from_str(text).context("Candidates must be a JSON array")?;

    let mut candidates = Vec::with_capacity(inputs.len());
    for (idx, input) in inputs.into_iter().enumerate() {
        match Candidate::try_from(input) {
            Ok(candidate) => candidates.push(candidate),
            Err(error) => warn!(index = idx, %error, "skipping candidate"),
        }
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scanner_records() {
        let candidates = parse_candidates(
            r#"[
                {"path": "/repo/src/main.rs", "relativePath": "src/main.rs", "tokens": 120},
                {"path": "README.md", "tokens": 40, "sizeBytes": 160}
            ]"#,
        )
        .unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].path, "src/main.rs");
        assert!(candidates[0].is_entry_point);
        assert_eq!(candidates[1].size_bytes, Some(160));
    }

    #[test]
    fn skips_invalid_records() {
        let candidates = parse_candidates(
            r#"[{"path": "../outside.rs", "tokens": 1}, {"tokens": 2}, {"path": "a.rs", "tokens": 3}]"#,
        )
        .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].path, "a.rs");
    }

    #[test]
    fn rejects_non_array() {
        assert!(parse_candidates(r#"{"path": "a.rs"}"#).is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.json");
        std::fs::write(&path, r#"[{"path": "lib/app.py", "tokens": 9}]"#).unwrap();
        let candidates = read_candidates(Some(&path)).unwrap();
        assert_eq!(candidates[0].tokens, 9);
    }
}
