//! Greedy budget-fitting strategies.
//!
//! Every strategy has the same shape: it takes importance-annotated
//! candidates and a token budget and returns a [`Selection`]. Strategies are
//! pure. They clone what they keep, never mutate their input, and break
//! importance ties by input order, so identical inputs always give identical
//! selections.
//!
//! | name | behaviour |
//! |---|---|
//! | `topN` | highest importance first, stop at the first file that does not fit |
//! | `balanced` | per-directory entitlement proportional to file count |
//! | `shrinkDocs` | all code, then docs by importance; topN over code if code alone is over |
//! | `methodsOnly` | every file reduced to method signatures (discounted cost) |
//! | `auto` | shrinkDocs → balanced → methodsOnly, first that fits, else topN |

mod auto;
mod balanced;
mod methods_only;
mod shrink_docs;
mod top_n;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sieve_core::Candidate;

use crate::errors::{BudgetError, Result};

pub use auto::{AUTO_CHAIN, auto};
pub use balanced::balanced;
pub use methods_only::methods_only;
pub use shrink_docs::shrink_docs;
pub use top_n::top_n;

/// A named selection algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FitStrategy {
    /// Greedy by importance with a hard stop.
    TopN,
    /// Directory-proportional entitlements.
    Balanced,
    /// Drop documentation first.
    ShrinkDocs,
    /// Keep signatures only.
    MethodsOnly,
    /// Fallback chain over the others.
    Auto,
}

impl FitStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::TopN,
        Self::Balanced,
        Self::ShrinkDocs,
        Self::MethodsOnly,
        Self::Auto,
    ];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::TopN => "topN",
            Self::Balanced => "balanced",
            Self::ShrinkDocs => "shrinkDocs",
            Self::MethodsOnly => "methodsOnly",
            Self::Auto => "auto",
        }
    }

    /// Run this strategy.
    pub fn run(self, files: &[Candidate], target_tokens: u64) -> Result<Selection> {
        match self {
            Self::TopN => top_n(files, target_tokens),
            Self::Balanced => balanced(files, target_tokens),
            Self::ShrinkDocs => shrink_docs(files, target_tokens),
            Self::MethodsOnly => methods_only(files, target_tokens),
            Self::Auto => Ok(auto(files, target_tokens)),
        }
    }
}

impl fmt::Display for FitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FitStrategy {
    type Err = BudgetError;

    /// Case-insensitive; `-` and `_` are ignored (`top-n`, `shrink_docs`).
    fn from_str(s: &str) -> Result<Self> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(&folded))
            .ok_or_else(|| BudgetError::InvalidStrategy(s.to_owned()))
    }
}

/// Output of one strategy run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Kept candidates, in selection order.
    pub selected: Vec<Candidate>,
    /// Dropped candidates.
    pub excluded: Vec<Candidate>,
    /// Strategy that produced the selection. Never [`FitStrategy::Auto`]:
    /// the chain reports the member it settled on.
    pub strategy: FitStrategy,
    /// Problems met along the way (strategy failures inside `auto`).
    pub warnings: Vec<String>,
}

impl Selection {
    pub(crate) fn new(strategy: FitStrategy) -> Self {
        Self {
            selected: Vec::new(),
            excluded: Vec::new(),
            strategy,
            warnings: Vec::new(),
        }
    }

    /// Accounted tokens of the selected candidates, `None` on overflow.
    pub fn total_tokens(&self) -> Option<u64> {
        accounted_total(&self.selected)
    }
}

/// Sum of accounted tokens, `None` on overflow.
pub fn accounted_total(files: &[Candidate]) -> Option<u64> {
    files
        .iter()
        .try_fold(0u64, |acc, c| acc.checked_add(c.accounted_tokens()))
}

/// Clones of `files` sorted by descending importance, ties in input order.
pub(crate) fn by_importance(files: &[Candidate]) -> Vec<Candidate> {
    let mut sorted = files.to_vec();
    sorted.sort_by_key(|c| std::cmp::Reverse(c.importance));
    sorted
}

/// Running token total against a fixed limit.
#[derive(Debug)]
pub(crate) struct Budget {
    strategy: FitStrategy,
    limit: u64,
    used: u64,
}

impl Budget {
    pub(crate) fn new(strategy: FitStrategy, limit: u64) -> Self {
        Self {
            strategy,
            limit,
            used: 0,
        }
    }

    /// Take `tokens` if they fit.
    pub(crate) fn try_take(&mut self, tokens: u64) -> Result<bool> {
        let next = checked_add(self.strategy, self.used, tokens)?;
        if next > self.limit {
            return Ok(false);
        }
        self.used = next;
        Ok(true)
    }
}

pub(crate) fn checked_add(strategy: FitStrategy, a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or_else(|| BudgetError::TokenOverflow {
        strategy: strategy.name().to_owned(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
