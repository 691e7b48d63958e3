//! Token-budget fitting.
//!
//! [`TokenBudgetFitter::fit`] runs one fit call end to end:
//!
//! 1. score every candidate with [`ImportanceScorer`]
//! 2. short-circuit as `no-reduction-needed` when the set already fits
//! 3. run the configured strategy
//! 4. swap excluded entry points back in (bounded 10% overage)
//! 5. apply `maxFiles` / `minFiles`
//! 6. attach statistics
//!
//! The selected total never exceeds the target except through step 4, and
//! then by at most 10%.

use serde::Serialize;
use sieve_core::Candidate;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::scorer::ImportanceScorer;
use crate::strategies::{FitStrategy, Selection, accounted_total, by_importance};

/// Label used when the input already fits.
pub const NO_REDUCTION_NEEDED: &str = "no-reduction-needed";

/// Allowed overage, in percent of the target, when swapping in entry points.
pub const ENTRY_POINT_OVERAGE_PERCENT: u64 = 10;

/// Options of one fitter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FitOptions {
    /// Strategy name (`topN`, `balanced`, `shrinkDocs`, `methodsOnly`, `auto`).
    pub strategy: String,
    /// Swap excluded entry points back in.
    pub preserve_entry_points: bool,
    /// Globs whose matches get an importance boost.
    pub priority_patterns: Vec<String>,
    /// Lower bound on selected files, honoured only within the budget.
    pub min_files: Option<usize>,
    /// Upper bound on selected files.
    pub max_files: Option<usize>,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            strategy: FitStrategy::Auto.name().to_owned(),
            preserve_entry_points: true,
            priority_patterns: Vec::new(),
            min_files: None,
            max_files: None,
        }
    }
}

/// Statistics attached to a [`FitResult`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitMetadata {
    /// Strategy that was asked for.
    pub requested_strategy: String,
    /// Budget.
    pub target_tokens: u64,
    /// Accounted tokens of the full input.
    pub original_tokens: u64,
    /// Entry points in the final selection.
    pub entry_points_preserved: usize,
    /// Entry points brought back by the swap step.
    pub entry_points_swapped: usize,
    /// Mean importance of the selection (one decimal).
    pub avg_importance: f64,
    /// Number of selected files.
    pub files_included: usize,
    /// Number of excluded files.
    pub files_excluded: usize,
    /// Non-fatal problems (invalid strategy names, failed strategies).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Outcome of one fit call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitResult {
    /// Kept candidates, in selection order.
    #[serde(rename = "files")]
    pub selected: Vec<Candidate>,
    /// Dropped candidates.
    pub excluded: Vec<Candidate>,
    /// Accounted tokens of the selection.
    pub total_tokens: u64,
    /// Strategy that produced the selection, or `no-reduction-needed`.
    #[serde(rename = "strategy")]
    pub strategy_used: String,
    /// Tokens saved relative to the input.
    pub reduction: u64,
    /// `reduction` as a percentage of the input (one decimal).
    pub reduction_percent: f64,
    /// Statistics.
    pub metadata: FitMetadata,
}

/// Reduces a candidate set to a token budget.
#[derive(Clone, Debug)]
pub struct TokenBudgetFitter {
    target_tokens: u64,
    options: FitOptions,
    strategy: FitStrategy,
    scorer: ImportanceScorer,
    warnings: Vec<String>,
}

impl TokenBudgetFitter {
    /// Build a fitter. An unknown strategy name falls back to `auto` and is
    /// reported in every result's warnings.
    pub fn new(target_tokens: u64, options: FitOptions) -> Self {
        let mut warnings = Vec::new();
        let strategy = options.strategy.parse().unwrap_or_else(|error| {
            warn!(%error, "falling back to auto strategy");
            warnings.push(format!("{error}; using auto"));
            FitStrategy::Auto
        });
        Self::build(target_tokens, options, strategy, warnings)
    }

    /// Build a fitter, rejecting unknown strategy names.
    pub fn try_new(target_tokens: u64, options: FitOptions) -> Result<Self> {
        let strategy = options.strategy.parse()?;
        Ok(Self::build(target_tokens, options, strategy, Vec::new()))
    }

    fn build(
        target_tokens: u64,
        options: FitOptions,
        strategy: FitStrategy,
        mut warnings: Vec<String>,
    ) -> Self {
        match (options.min_files, options.max_files) {
            (Some(min), Some(max)) if min > max => {
                warn!(min, max, "minFiles exceeds maxFiles, capping at maxFiles");
                warnings.push(format!("minFiles {min} exceeds maxFiles {max}; capped at {max}"));
            }
            _ => {}
        }
        let scorer = ImportanceScorer::with_priority_patterns(&options.priority_patterns);
        Self {
            target_tokens,
            options,
            strategy,
            scorer,
            warnings,
        }
    }

    /// Budget.
    pub fn target_tokens(&self) -> u64 {
        self.target_tokens
    }

    /// Strategy in effect after parsing.
    pub fn strategy(&self) -> FitStrategy {
        self.strategy
    }

    /// Options as given.
    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Fit `files` to the budget. Never fails; problems end up in
    /// `metadata.warnings`.
    pub fn fit(&self, files: &[Candidate]) -> FitResult {
        let scored = self.scorer.annotate(files);
        let original_tokens = saturating_total(&scored);
        let within_count = self.options.max_files.is_none_or(|max| scored.len() <= max);

        if original_tokens <= self.target_tokens && within_count {
            debug!(
                files = scored.len(),
                original_tokens,
                target = self.target_tokens,
                "input already fits"
            );
            return self.finish(
                NO_REDUCTION_NEEDED,
                scored,
                Vec::new(),
                original_tokens,
                0,
                Vec::new(),
            );
        }

        let mut selection = self.run_strategy(&scored);

        let swapped = if self.options.preserve_entry_points {
            self.swap_entry_points(&mut selection)
        } else {
            0
        };
        if let Some(max) = self.options.max_files {
            trim_to_max(&mut selection, max);
        }
        if let Some(min) = self.options.min_files {
            let min = self.options.max_files.map_or(min, |max| min.min(max));
            self.fill_to_min(&mut selection, min);
        }

        let result = self.finish(
            selection.strategy.name(),
            selection.selected,
            selection.excluded,
            original_tokens,
            swapped,
            selection.warnings,
        );

        info!(
            strategy = %result.strategy_used,
            selected = result.metadata.files_included,
            excluded = result.metadata.files_excluded,
            total_tokens = result.total_tokens,
            target = self.target_tokens,
            "fit complete"
        );
        result
    }

    fn run_strategy(&self, files: &[Candidate]) -> Selection {
        match self.strategy.run(files, self.target_tokens) {
            Ok(selection) => selection,
            Err(error) => {
                warn!(strategy = %self.strategy, %error, "strategy failed, falling back to auto");
                let mut selection = crate::strategies::auto(files, self.target_tokens);
                selection
                    .warnings
                    .insert(0, format!("{} failed: {error}; using auto", self.strategy));
                selection
            }
        }
    }

    /// Ceiling for totals produced by entry-point swaps.
    fn overage_limit(&self) -> u64 {
        let limit = u128::from(self.target_tokens) * u128::from(100 + ENTRY_POINT_OVERAGE_PERCENT)
            / 100;
        u64::try_from(limit).unwrap_or(u64::MAX)
    }

    /// Bring excluded entry points back, most important first.
    ///
    /// An entry point that fits the remaining budget is simply added.
    /// Otherwise the lowest-importance selected non-entry file is evicted,
    /// provided the new total stays within the overage limit.
    fn swap_entry_points(&self, selection: &mut Selection) -> usize {
        let methods_only = selection.strategy == FitStrategy::MethodsOnly;
        let limit = self.overage_limit();
        let mut total = saturating_total(&selection.selected);
        let mut swapped = 0;

        let mut pending: Vec<Candidate> = Vec::new();
        selection.excluded.retain(|c| {
            if c.is_entry_point {
                pending.push(c.clone());
                false
            } else {
                true
            }
        });

        for mut entry in by_importance(&pending) {
            entry.methods_only = methods_only;
            let cost = entry.accounted_tokens();

            if total.saturating_add(cost) <= self.target_tokens {
                total += cost;
                debug!(path = %entry.path, "entry point fits without eviction");
                selection.selected.push(entry);
                swapped += 1;
                continue;
            }

            let Some(victim) = lowest_non_entry(&selection.selected) else {
                entry.methods_only = false;
                selection.excluded.push(entry);
                continue;
            };
            let after = (total - selection.selected[victim].accounted_tokens()).saturating_add(cost);
            if after > limit {
                entry.methods_only = false;
                selection.excluded.push(entry);
                continue;
            }

            let mut evicted = selection.selected.remove(victim);
            debug!(entry = %entry.path, evicted = %evicted.path, total = after, "swapped in entry point");
            evicted.methods_only = false;
            selection.excluded.push(evicted);
            selection.selected.push(entry);
            total = after;
            swapped += 1;
        }
        swapped
    }

    /// Add the most important excluded files that still fit the budget until
    /// `min` are selected.
    fn fill_to_min(&self, selection: &mut Selection, min: usize) {
        if selection.selected.len() >= min {
            return;
        }
        let methods_only = selection.strategy == FitStrategy::MethodsOnly;
        let mut total = saturating_total(&selection.selected);
        let mut remaining = Vec::new();

        for mut file in by_importance(&selection.excluded) {
            file.methods_only = methods_only;
            let cost = file.accounted_tokens();
            if selection.selected.len() < min && total.saturating_add(cost) <= self.target_tokens {
                total += cost;
                debug!(path = %file.path, min, "added for minFiles");
                selection.selected.push(file);
            } else {
                file.methods_only = false;
                remaining.push(file);
            }
        }
        if selection.selected.len() < min {
            warn!(
                selected = selection.selected.len(),
                min, "minFiles not reachable within budget"
            );
        }
        selection.excluded = remaining;
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(
        &self,
        strategy_used: &str,
        selected: Vec<Candidate>,
        excluded: Vec<Candidate>,
        original_tokens: u64,
        swapped: usize,
        strategy_warnings: Vec<String>,
    ) -> FitResult {
        let total_tokens = saturating_total(&selected);
        let reduction = original_tokens.saturating_sub(total_tokens);
        let reduction_percent = if original_tokens == 0 {
            0.0
        } else {
            round1(reduction as f64 / original_tokens as f64 * 100.0)
        };
        let avg_importance = if selected.is_empty() {
            0.0
        } else {
            let sum: u64 = selected.iter().map(|c| u64::from(c.importance)).sum();
            round1(sum as f64 / selected.len() as f64)
        };

        let mut warnings = self.warnings.clone();
        warnings.extend(strategy_warnings);

        FitResult {
            metadata: FitMetadata {
                requested_strategy: self.options.strategy.clone(),
                target_tokens: self.target_tokens,
                original_tokens,
                entry_points_preserved: selected.iter().filter(|c| c.is_entry_point).count(),
                entry_points_swapped: swapped,
                avg_importance,
                files_included: selected.len(),
                files_excluded: excluded.len(),
                warnings,
            },
            selected,
            excluded,
            total_tokens,
            strategy_used: strategy_used.to_owned(),
            reduction,
            reduction_percent,
        }
    }

    /// Advisory strategy for these files and this fitter's budget.
    pub fn recommend(&self, files: &[Candidate]) -> &'static str {
        recommend_strategy(files, self.target_tokens)
    }
}

/// Suggest a strategy from the ratio of total tokens to the budget.
///
/// | ratio | suggestion |
/// |---|---|
/// | ≤ 1.0 | `no-reduction-needed` |
/// | ≤ 1.2 | `shrinkDocs` |
/// | ≤ 1.5 | `balanced` |
/// | ≤ 2.5 | `methodsOnly` |
/// | above | `topN` |
///
/// Purely advisory; [`TokenBudgetFitter::fit`] never consults it.
pub fn recommend_strategy(files: &[Candidate], target_tokens: u64) -> &'static str {
    let total = u128::from(saturating_total(files));
    let target = u128::from(target_tokens);

    if total <= target {
        NO_REDUCTION_NEEDED
    } else if total * 10 <= target * 12 {
        FitStrategy::ShrinkDocs.name()
    } else if total * 10 <= target * 15 {
        FitStrategy::Balanced.name()
    } else if total * 10 <= target * 25 {
        FitStrategy::MethodsOnly.name()
    } else {
        FitStrategy::TopN.name()
    }
}

/// Drop the least important selections until at most `max` remain,
/// non-entry files first.
fn trim_to_max(selection: &mut Selection, max: usize) {
    while selection.selected.len() > max {
        let idx =
            lowest_non_entry(&selection.selected).or_else(|| lowest(&selection.selected, |_| true));
        let Some(idx) = idx else { break };
        let mut dropped = selection.selected.remove(idx);
        debug!(path = %dropped.path, max, "trimmed by maxFiles");
        dropped.methods_only = false;
        selection.excluded.push(dropped);
    }
}

fn saturating_total(files: &[Candidate]) -> u64 {
    accounted_total(files).unwrap_or(u64::MAX)
}

/// Index of the lowest-importance candidate satisfying `keep`; the latest
/// one wins ties.
fn lowest(files: &[Candidate], keep: impl Fn(&Candidate) -> bool) -> Option<usize> {
    files
        .iter()
        .enumerate()
        .filter(|(_, c)| keep(c))
        .min_by_key(|(idx, c)| (c.importance, std::cmp::Reverse(*idx)))
        .map(|(idx, _)| idx)
}

fn lowest_non_entry(files: &[Candidate]) -> Option<usize> {
    lowest(files, |c| !c.is_entry_point)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BudgetError;
    use assert_matches::assert_matches;

    fn cand(path: &str, tokens: u64) -> Candidate {
        Candidate::new(path, tokens).unwrap()
    }

    fn paths(files: &[Candidate]) -> Vec<&str> {
        files.iter().map(|c| c.path.as_str()).collect()
    }

    fn options(strategy: &str) -> FitOptions {
        FitOptions {
            strategy: strategy.into(),
            ..FitOptions::default()
        }
    }

    fn sample() -> Vec<Candidate> {
        vec![
            cand("index.js", 500),
            cand("server.js", 3000),
            cand("helper.js", 1000),
            cand("readme.md", 2000),
        ]
    }

    // ── short-circuit ───────────────────────────────────────────────

    #[test]
    fn fitting_input_is_returned_unchanged() {
        let files = sample();
        let r = TokenBudgetFitter::new(10_000, FitOptions::default()).fit(&files);
        assert_eq!(r.strategy_used, NO_REDUCTION_NEEDED);
        assert_eq!(paths(&r.selected), paths(&files));
        assert!(r.excluded.is_empty());
        assert_eq!(r.total_tokens, 6500);
        assert_eq!(r.reduction, 0);
        assert!(r.reduction_percent.abs() < f64::EPSILON);
    }

    #[test]
    fn exact_fit_is_no_reduction() {
        let r = TokenBudgetFitter::new(6500, FitOptions::default()).fit(&sample());
        assert_eq!(r.strategy_used, NO_REDUCTION_NEEDED);
    }

    #[test]
    fn empty_input_is_well_formed() {
        let r = TokenBudgetFitter::new(0, FitOptions::default()).fit(&[]);
        assert!(r.selected.is_empty());
        assert_eq!(r.total_tokens, 0);
        assert!(r.reduction_percent.abs() < f64::EPSILON);
        assert!(r.metadata.avg_importance.abs() < f64::EPSILON);
        assert_eq!(r.strategy_used, NO_REDUCTION_NEEDED);
    }

    // ── strategies ──────────────────────────────────────────────────

    #[test]
    fn shrink_docs_scenario() {
        let r = TokenBudgetFitter::new(4000, options("shrinkDocs")).fit(&sample());
        assert_eq!(r.strategy_used, "shrinkDocs");
        assert!(r.total_tokens <= 4000);
        assert_eq!(paths(&r.selected), vec!["index.js", "server.js"]);
        assert!(paths(&r.excluded).contains(&"readme.md"));
        assert_eq!(r.reduction, 3000);
        assert!((r.reduction_percent - 46.2).abs() < 1e-9);
    }

    #[test]
    fn auto_reports_concrete_strategy() {
        let r = TokenBudgetFitter::new(4000, FitOptions::default()).fit(&sample());
        assert_eq!(r.strategy_used, "shrinkDocs");
        assert_eq!(r.metadata.requested_strategy, "auto");
    }

    #[test]
    fn invalid_strategy_falls_back_to_auto() {
        let fitter = TokenBudgetFitter::new(4000, options("knapsack"));
        assert_eq!(fitter.strategy(), FitStrategy::Auto);
        let r = fitter.fit(&sample());
        assert!(r.total_tokens <= 4000);
        assert_eq!(r.metadata.warnings.len(), 1);
        assert!(r.metadata.warnings[0].contains("knapsack"));
    }

    #[test]
    fn try_new_rejects_invalid_strategy() {
        assert_matches!(
            TokenBudgetFitter::try_new(100, options("knapsack")),
            Err(BudgetError::InvalidStrategy(_))
        );
    }

    #[test]
    fn methods_only_flags_selection() {
        let r = TokenBudgetFitter::new(3000, options("methodsOnly")).fit(&sample());
        assert_eq!(r.strategy_used, "methodsOnly");
        assert!(r.selected.iter().all(|c| c.methods_only));
        // 200 + 1200 + 400 + 800 after the discount
        assert_eq!(r.total_tokens, 2600);
    }

    // ── entry points ────────────────────────────────────────────────

    /// `index.js` sits deep enough that topN ranks it below two larger files
    /// and stops before reaching it.
    fn buried_entry_point() -> Vec<Candidate> {
        vec![
            cand("src/server.js", 3000),                  // 73
            cand("src/routes.js", 600),                   // 63
            cand("a/b/c/d/e/f/g/h/i/j/index.js", 1300),   // 60
            cand("src/util.js", 100),                     // 58
        ]
    }

    #[test]
    fn entry_point_swapped_in_within_overage() {
        let r = TokenBudgetFitter::new(4000, options("topN")).fit(&buried_entry_point());
        assert!(paths(&r.selected).contains(&"a/b/c/d/e/f/g/h/i/j/index.js"));
        assert!(paths(&r.excluded).contains(&"src/routes.js"));
        assert_eq!(r.total_tokens, 4300);
        assert!(r.total_tokens <= 4400);
        assert_eq!(r.metadata.entry_points_swapped, 1);
        assert_eq!(r.metadata.entry_points_preserved, 1);
    }

    #[test]
    fn entry_point_not_swapped_beyond_overage() {
        let mut files = buried_entry_point();
        files[2] = cand("a/b/c/d/e/f/g/h/i/j/index.js", 2000);
        let r = TokenBudgetFitter::new(4000, options("topN")).fit(&files);
        // evicting routes.js would leave 5000 > 4400
        assert!(paths(&r.excluded).contains(&"a/b/c/d/e/f/g/h/i/j/index.js"));
        assert_eq!(r.metadata.entry_points_swapped, 0);
        assert!(r.total_tokens <= 4000);
    }

    #[test]
    fn entry_points_left_alone_when_disabled() {
        let opts = FitOptions {
            strategy: "topN".into(),
            preserve_entry_points: false,
            ..FitOptions::default()
        };
        let r = TokenBudgetFitter::new(4000, opts).fit(&buried_entry_point());
        assert!(paths(&r.excluded).contains(&"a/b/c/d/e/f/g/h/i/j/index.js"));
        assert_eq!(r.metadata.entry_points_swapped, 0);
    }

    #[test]
    fn entry_point_added_without_eviction_when_it_fits() {
        // topN stops at big.js, leaving room the entry point can use
        let files = vec![
            cand("src/a.js", 1000),                     // 63
            cand("src/big.js", 5000),                   // 63
            cand("a/b/c/d/e/f/g/h/i/j/main.js", 500),   // 60
        ];
        let r = TokenBudgetFitter::new(2000, options("topN")).fit(&files);
        assert_eq!(paths(&r.selected), vec!["src/a.js", "a/b/c/d/e/f/g/h/i/j/main.js"]);
        assert_eq!(r.total_tokens, 1500);
    }

    // ── min / max files ─────────────────────────────────────────────

    #[test]
    fn max_files_trims_lowest_importance_non_entry() {
        let opts = FitOptions {
            max_files: Some(2),
            ..FitOptions::default()
        };
        let files = vec![
            cand("index.js", 100),
            cand("src/server.js", 100),
            cand("helper.js", 100),
        ];
        let r = TokenBudgetFitter::new(10_000, opts).fit(&files);
        assert_eq!(paths(&r.selected), vec!["index.js", "src/server.js"]);
        assert_eq!(paths(&r.excluded), vec!["helper.js"]);
        assert_ne!(r.strategy_used, NO_REDUCTION_NEEDED);
    }

    #[test]
    fn min_files_adds_what_fits() {
        let opts = FitOptions {
            strategy: "topN".into(),
            min_files: Some(3),
            ..FitOptions::default()
        };
        let files = vec![
            cand("src/server.js", 900), // 73
            cand("src/big.js", 900),    // 63
            cand("notes.txt", 50),      // 50
        ];
        let r = TokenBudgetFitter::new(1000, opts).fit(&files);
        // topN stops at big.js; minFiles pulls notes.txt back in
        assert_eq!(paths(&r.selected), vec!["src/server.js", "notes.txt"]);
        assert!(r.total_tokens <= 1000);
    }

    #[test]
    fn min_files_never_exceeds_max_files() {
        let opts = FitOptions {
            strategy: "topN".into(),
            min_files: Some(5),
            max_files: Some(2),
            ..FitOptions::default()
        };
        let files = vec![
            cand("src/server.js", 900),
            cand("src/big.js", 900),
            cand("a.txt", 10),
            cand("b.txt", 10),
            cand("c.txt", 10),
        ];
        let r = TokenBudgetFitter::new(1000, opts).fit(&files);
        assert_eq!(r.selected.len(), 2);
        assert_eq!(r.metadata.files_excluded, 3);
        assert!(
            r.metadata
                .warnings
                .iter()
                .any(|w| w.contains("minFiles 5 exceeds maxFiles 2"))
        );
    }

    // ── statistics / recommendation ─────────────────────────────────

    #[test]
    fn metadata_counts() {
        let r = TokenBudgetFitter::new(4000, options("shrinkDocs")).fit(&sample());
        assert_eq!(r.metadata.files_included, 2);
        assert_eq!(r.metadata.files_excluded, 2);
        assert_eq!(r.metadata.original_tokens, 6500);
        // (80 + 60) / 2
        assert!((r.metadata.avg_importance - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn result_json_shape() {
        let r = TokenBudgetFitter::new(4000, options("shrinkDocs")).fit(&sample());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["strategy"], "shrinkDocs");
        assert_eq!(json["files"][0]["path"], "index.js");
        assert_eq!(json["totalTokens"], 3500);
        assert_eq!(json["metadata"]["entryPointsPreserved"], 1);
        assert!(json["metadata"].get("warnings").is_none());
    }

    #[test]
    fn recommendation_thresholds() {
        let files = vec![cand("a.rs", 1000)];
        assert_eq!(recommend_strategy(&files, 1000), NO_REDUCTION_NEEDED);
        assert_eq!(recommend_strategy(&files, 900), "shrinkDocs");
        assert_eq!(recommend_strategy(&files, 700), "balanced");
        assert_eq!(recommend_strategy(&files, 400), "methodsOnly");
        assert_eq!(recommend_strategy(&files, 399), "topN");
        assert_eq!(recommend_strategy(&files, 0), "topN");
        assert_eq!(recommend_strategy(&[], 0), NO_REDUCTION_NEEDED);
    }

    #[test]
    fn recommendation_does_not_affect_fit() {
        let fitter = TokenBudgetFitter::new(4000, options("topN"));
        let before = fitter.fit(&sample());
        let _ = fitter.recommend(&sample());
        assert_eq!(fitter.fit(&sample()), before);
    }
}
