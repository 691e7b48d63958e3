//! Budget fitting error types.

use thiserror::Error;

/// Errors raised by strategy selection and execution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BudgetError {
    /// The requested strategy name is not one of the known strategies.
    #[error("unknown fit strategy '{0}' (expected topN, balanced, shrinkDocs, methodsOnly, or auto)")]
    InvalidStrategy(String),

    /// A running token total overflowed `u64`.
    #[error("token total overflowed in {strategy} strategy")]
    TokenOverflow {
        /// Strategy that was running.
        strategy: String,
    },
}

/// Result type for budget operations.
pub type Result<T> = std::result::Result<T, BudgetError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_strategy_names_the_input() {
        let err = BudgetError::InvalidStrategy("greedy".into());
        assert!(err.to_string().contains("'greedy'"));
    }

    #[test]
    fn overflow_names_the_strategy() {
        let err = BudgetError::TokenOverflow {
            strategy: "topN".into(),
        };
        assert_eq!(err.to_string(), "token total overflowed in topN strategy");
    }
}
