//! `auto`: fixed fallback chain.

use sieve_core::Candidate;
use tracing::{debug, warn};

use super::{FitStrategy, Selection, by_importance, top_n};

/// Strategies tried in order before the `topN` fallback.
pub const AUTO_CHAIN: [FitStrategy; 3] = [
    FitStrategy::ShrinkDocs,
    FitStrategy::Balanced,
    FitStrategy::MethodsOnly,
];

/// Try each strategy of [`AUTO_CHAIN`] and accept the first whose total fits
/// the budget. A strategy that fails counts as "did not fit" and is recorded
/// in [`Selection::warnings`]. Falls back to `topN`; if even that fails, the
/// result selects nothing.
pub fn auto(files: &[Candidate], target_tokens: u64) -> Selection {
    let mut warnings = Vec::new();

    for strategy in AUTO_CHAIN {
        match strategy.run(files, target_tokens) {
            Ok(mut selection) => match selection.total_tokens() {
                Some(total) if total <= target_tokens => {
                    debug!(%strategy, total, target_tokens, "auto accepted strategy");
                    selection.warnings.extend(warnings);
                    return selection;
                }
                total => debug!(%strategy, ?total, target_tokens, "auto strategy did not fit"),
            },
            Err(error) => {
                warn!(%strategy, %error, "strategy failed inside auto chain");
                warnings.push(format!("{strategy} failed: {error}"));
            }
        }
    }

    match top_n(files, target_tokens) {
        Ok(mut selection) => {
            selection.warnings.extend(warnings);
            selection
        }
        Err(error) => {
            warn!(%error, "topN fallback failed, selecting nothing");
            warnings.push(format!("{} failed: {error}", FitStrategy::TopN));
            let mut selection = Selection::new(FitStrategy::TopN);
            selection.excluded = by_importance(files);
            selection.warnings = warnings;
            selection
        }
    }
}
