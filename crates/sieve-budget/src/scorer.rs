//! Heuristic importance scoring.
//!
//! Every candidate gets a deterministic 0–100 priority from path and name
//! signals alone:
//!
//! | signal | addend |
//! |---|---|
//! | base | +50 |
//! | entry point (`index`/`main`/`app` + extension) | +30 |
//! | under a `src/` or `lib/` directory | +15 |
//! | file name contains server/handler/controller | +10 |
//! | each directory level | −2 (at most −20) |
//! | more than 10 000 tokens | −10 |
//! | file name contains util/helper | −5 |
//! | matches a configured priority pattern | +25 |
//!
//! The sum is clamped to `[0, 100]`. [`ScoreBreakdown`] exposes each addend
//! separately so a score can always be explained.

use serde::Serialize;
use sieve_core::Candidate;
use sieve_rules::GlobMatcher;

const BASE: i32 = 50;
const ENTRY_POINT_BONUS: i32 = 30;
const SOURCE_ROOT_BONUS: i32 = 15;
const ROLE_BONUS: i32 = 10;
const DEPTH_PENALTY_PER_LEVEL: i32 = 2;
const DEPTH_PENALTY_CAP: i32 = 20;
const LARGE_FILE_TOKENS: u64 = 10_000;
const LARGE_FILE_PENALTY: i32 = 10;
const UTILITY_PENALTY: i32 = 5;
const PRIORITY_BONUS: i32 = 25;

const SOURCE_ROOTS: &[&str] = &["src", "lib"];
const ROLE_MARKERS: &[&str] = &["server", "handler", "controller"];
const UTILITY_MARKERS: &[&str] = &["util", "helper"];

/// Individual addends of one score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Constant starting value.
    pub base: i32,
    /// Entry-point bonus.
    pub entry_point: i32,
    /// `src/`/`lib/` bonus.
    pub source_root: i32,
    /// Server/handler/controller bonus.
    pub role: i32,
    /// Directory depth penalty (zero or negative).
    pub depth: i32,
    /// Large-file penalty (zero or negative).
    pub size: i32,
    /// Util/helper penalty (zero or negative).
    pub utility: i32,
    /// Priority-pattern bonus.
    pub priority: i32,
}

impl ScoreBreakdown {
    /// Unclamped sum of all addends.
    pub fn raw(&self) -> i32 {
        self.base
            + self.entry_point
            + self.source_root
            + self.role
            + self.depth
            + self.size
            + self.utility
            + self.priority
    }

    /// Final score, clamped to `[0, 100]`.
    pub fn total(&self) -> u8 {
        u8::try_from(self.raw().clamp(0, 100)).unwrap_or(100)
    }
}

/// Assigns importance scores, optionally boosting priority patterns.
#[derive(Clone, Debug, Default)]
pub struct ImportanceScorer {
    priority: Vec<GlobMatcher>,
}

impl ImportanceScorer {
    /// Scorer without priority patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scorer that boosts candidates matching any of `patterns`.
    ///
    /// Patterns use the same glob syntax as file rules. Malformed patterns
    /// never match.
    pub fn with_priority_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            priority: patterns
                .into_iter()
                .map(|p| GlobMatcher::compile(p.as_ref()))
                .collect(),
        }
    }

    /// Score one candidate.
    pub fn score(&self, candidate: &Candidate) -> u8 {
        self.breakdown(candidate).total()
    }

    /// Every addend for one candidate.
    pub fn breakdown(&self, candidate: &Candidate) -> ScoreBreakdown {
        let name = candidate.file_name().to_ascii_lowercase();
        let depth = i32::try_from(candidate.depth()).unwrap_or(i32::MAX);

        ScoreBreakdown {
            base: BASE,
            entry_point: if candidate.is_entry_point {
                ENTRY_POINT_BONUS
            } else {
                0
            },
            source_root: if under_source_root(&candidate.path) {
                SOURCE_ROOT_BONUS
            } else {
                0
            },
            role: if contains_any(&name, ROLE_MARKERS) {
                ROLE_BONUS
            } else {
                0
            },
            depth: -depth
                .saturating_mul(DEPTH_PENALTY_PER_LEVEL)
                .min(DEPTH_PENALTY_CAP),
            size: if candidate.tokens > LARGE_FILE_TOKENS {
                -LARGE_FILE_PENALTY
            } else {
                0
            },
            utility: if contains_any(&name, UTILITY_MARKERS) {
                -UTILITY_PENALTY
            } else {
                0
            },
            priority: if self.priority.iter().any(|p| p.is_match(&candidate.path)) {
                PRIORITY_BONUS
            } else {
                0
            },
        }
    }

    /// Copies of `files` with `importance` filled in. The input is untouched.
    pub fn annotate(&self, files: &[Candidate]) -> Vec<Candidate> {
        files
            .iter()
            .map(|c| {
                let mut c = c.clone();
                c.importance = self.score(&c);
                c
            })
            .collect()
    }
}

fn under_source_root(path: &str) -> bool {
    path.split('/')
        .rev()
        .skip(1)
        .any(|dir| SOURCE_ROOTS.contains(&dir))
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
