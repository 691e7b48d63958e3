//! Rule decisions.

use serde::{Deserialize, Serialize};

use crate::rule_file::RuleRef;

/// Filtering mode of one rule category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// An include file exists: anything not matched is excluded.
    Include,
    /// Only an exclude file exists: anything not matched is included.
    Exclude,
}

/// Which layer produced a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tier {
    /// The VCS-ignore layer. Cannot be bypassed by category rules.
    VcsIgnore = 1,
    /// A category include/exclude rule (or that category's mode default).
    Category = 2,
    /// No category rules are loaded.
    Default = 3,
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier as u8
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::VcsIgnore),
            2 => Ok(Self::Category),
            3 => Ok(Self::Default),
            other => Err(format!("invalid decision tier: {other}")),
        }
    }
}

/// The outcome of resolving one candidate, with its justification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// Whether the candidate stays in the digest.
    pub included: bool,
    /// Human-readable justification.
    pub reason: String,
    /// The rule that decided, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub matched_rule: Option<RuleRef>,
    /// Mode of the category that decided, if a category decided.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mode: Option<FilterMode>,
    /// Deciding layer.
    pub tier: Tier,
}

impl Decision {
    pub(crate) fn vcs_excluded(rule: RuleRef) -> Self {
        Self {
            included: false,
            reason: format!("excluded by VCS ignore pattern {rule}"),
            matched_rule: Some(rule),
            mode: None,
            tier: Tier::VcsIgnore,
        }
    }

    pub(crate) fn include_matched(rule: RuleRef) -> Self {
        let (included, reason) = if rule.is_negation {
            (false, format!("rejected by negated include pattern {rule}"))
        } else {
            (true, format!("matched include pattern {rule}"))
        };
        Self {
            included,
            reason,
            matched_rule: Some(rule),
            mode: Some(FilterMode::Include),
            tier: Tier::Category,
        }
    }

    pub(crate) fn include_unmatched() -> Self {
        Self {
            included: false,
            reason: "no include pattern matched".to_string(),
            matched_rule: None,
            mode: Some(FilterMode::Include),
            tier: Tier::Category,
        }
    }

    pub(crate) fn exclude_matched(rule: RuleRef) -> Self {
        let (included, reason) = if rule.is_negation {
            (true, format!("re-included by negated exclude pattern {rule}"))
        } else {
            (false, format!("matched exclude pattern {rule}"))
        };
        Self {
            included,
            reason,
            matched_rule: Some(rule),
            mode: Some(FilterMode::Exclude),
            tier: Tier::Category,
        }
    }

    pub(crate) fn exclude_unmatched() -> Self {
        Self {
            included: true,
            reason: "no exclude pattern matched".to_string(),
            matched_rule: None,
            mode: Some(FilterMode::Exclude),
            tier: Tier::Category,
        }
    }

    pub(crate) fn no_rules() -> Self {
        Self {
            included: true,
            reason: "no exclusion rules matched".to_string(),
            matched_rule: None,
            mode: None,
            tier: Tier::Default,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str, negation: bool) -> RuleRef {
        RuleRef {
            pattern: pattern.into(),
            source_file: ".sieveignore".into(),
            line_number: 4,
            is_negation: negation,
        }
    }

    #[test]
    fn tier_serializes_as_number() {
        assert_eq!(serde_json::to_value(Tier::VcsIgnore).unwrap(), 1);
        assert_eq!(serde_json::to_value(Tier::Default).unwrap(), 3);
        let back: Tier = serde_json::from_value(serde_json::json!(2)).unwrap();
        assert_eq!(back, Tier::Category);
        assert!(serde_json::from_value::<Tier>(serde_json::json!(7)).is_err());
    }

    #[test]
    fn decision_json_shape() {
        let d = Decision::exclude_matched(rule("*.tmp", false));
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["included"], false);
        assert_eq!(json["mode"], "exclude");
        assert_eq!(json["tier"], 2);
        assert_eq!(json["matchedRule"]["lineNumber"], 4);
        assert_eq!(json["reason"], "matched exclude pattern '*.tmp' (.sieveignore:4)");
    }

    #[test]
    fn default_decision_omits_optional_fields() {
        let json = serde_json::to_value(Decision::no_rules()).unwrap();
        assert!(json.get("matchedRule").is_none());
        assert!(json.get("mode").is_none());
    }

    #[test]
    fn negated_rules_invert_outcome() {
        assert!(Decision::exclude_matched(rule("!keep.tmp", true)).included);
        assert!(!Decision::include_matched(rule("!src/gen/**", true)).included);
    }
}
