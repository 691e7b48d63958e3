//! Layered rule resolution.
//!
//! [`RuleResolver`] answers "is this candidate included, and why" for files
//! and for extracted methods.
//!
//! ## File precedence
//!
//! 1. **VCS-ignore** (tier 1): patterns in file order, first match wins. A
//!    positive match excludes immediately; a negated match re-includes and
//!    hands over to the category layer.
//! 2. **Category rules** (tier 2): an include file switches the category to
//!    INCLUDE mode (first match decides, no match excludes) and makes the
//!    exclude file irrelevant. Otherwise an exclude file gives EXCLUDE mode
//!    (first match decides, no match includes).
//! 3. **Default** (tier 3): no category rules at all, the candidate is
//!    included.
//!
//! The two layers are independent sequential passes: a VCS negation never
//! overrides a category exclusion, and category negations never reach back
//! into the VCS layer.
//!
//! Methods follow the same mode algorithm over the method rule files; the
//! VCS layer does not apply to them.
//!
//! The resolver is immutable after [`RuleResolverBuilder::build`] and is
//! `Send + Sync`, so concurrent callers can share one instance.

use sieve_core::Candidate;
use sieve_core::path::canonicalize_lossy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::MatcherCache;
use crate::decision::{Decision, FilterMode, Tier};
use crate::rule_file::{RuleFile, RuleKind, RulePattern, RuleRef, RuleSource};

/// Include/exclude rule files of one category.
#[derive(Clone, Debug, Default)]
pub struct CategoryRules {
    include: Option<RuleFile>,
    exclude: Option<RuleFile>,
}

impl CategoryRules {
    /// Active mode, or `None` when the category has no rules.
    pub fn mode(&self) -> Option<FilterMode> {
        if self.include.is_some() {
            Some(FilterMode::Include)
        } else if self.exclude.is_some() {
            Some(FilterMode::Exclude)
        } else {
            None
        }
    }

    /// The include file, if loaded.
    pub fn include(&self) -> Option<&RuleFile> {
        self.include.as_ref()
    }

    /// The exclude file, if loaded.
    pub fn exclude(&self) -> Option<&RuleFile> {
        self.exclude.as_ref()
    }

    fn decide(&self, first_match: impl Fn(&RuleFile) -> Option<RuleRef>) -> Decision {
        if let Some(include) = &self.include {
            return match first_match(include) {
                Some(rule) => Decision::include_matched(rule),
                None => Decision::include_unmatched(),
            };
        }
        if let Some(exclude) = &self.exclude {
            return match first_match(exclude) {
                Some(rule) => Decision::exclude_matched(rule),
                None => Decision::exclude_unmatched(),
            };
        }
        Decision::no_rules()
    }

    fn files(&self, category: RuleCategory) -> impl Iterator<Item = (RuleLayer, &RuleFile)> {
        let (include, exclude) = category.layers();
        self.include
            .iter()
            .map(move |f| (include, f))
            .chain(self.exclude.iter().map(move |f| (exclude, f)))
    }
}

/// Which kind of subject a category of rules applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCategory {
    /// File paths.
    File,
    /// Extracted methods.
    Method,
}

impl RuleCategory {
    /// Include and exclude layers of this category.
    pub fn layers(self) -> (RuleLayer, RuleLayer) {
        match self {
            Self::File => (RuleLayer::Include, RuleLayer::Exclude),
            Self::Method => (RuleLayer::MethodInclude, RuleLayer::MethodExclude),
        }
    }

    /// Layer of the rule that produced a category decision, `None` for
    /// defaults.
    pub fn deciding_layer(self, decision: &Decision) -> Option<RuleLayer> {
        let (include, exclude) = self.layers();
        match (decision.tier, decision.mode) {
            (Tier::VcsIgnore, _) if self == Self::File => Some(RuleLayer::VcsIgnore),
            (Tier::Category, Some(FilterMode::Include)) => Some(include),
            (Tier::Category, Some(FilterMode::Exclude)) => Some(exclude),
            _ => None,
        }
    }
}

/// Rule layer a pattern belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleLayer {
    /// VCS-ignore file.
    VcsIgnore,
    /// File include rules.
    Include,
    /// File exclude rules.
    Exclude,
    /// Method include rules.
    MethodInclude,
    /// Method exclude rules.
    MethodExclude,
}

/// One pattern that matches a queried candidate, deciding or not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMatch {
    /// Layer the pattern belongs to.
    pub layer: RuleLayer,
    /// The matching rule.
    pub rule: RuleRef,
}

/// Candidates split by their file decision, input order preserved.
#[derive(Clone, Debug, Default)]
pub struct Partition {
    /// Included candidates.
    pub kept: Vec<Candidate>,
    /// Excluded candidates with the decision that excluded them.
    pub rejected: Vec<(Candidate, Decision)>,
}

/// Read-only rule engine for files and methods.
#[derive(Debug)]
pub struct RuleResolver {
    vcs_ignore: Option<RuleFile>,
    files: CategoryRules,
    methods: CategoryRules,
    cache: MatcherCache,
}

impl RuleResolver {
    /// Start building a resolver.
    pub fn builder() -> RuleResolverBuilder {
        RuleResolverBuilder::default()
    }

    /// A resolver with no rules, which includes everything at tier 3.
    pub fn empty() -> Self {
        Self::builder().build()
    }

    /// Resolve a file path.
    pub fn resolve_file(&self, path: &str) -> Decision {
        let path = canonicalize_lossy(path);

        if let Some(vcs) = &self.vcs_ignore {
            if let Some(rule) = vcs.first_path_match(&path) {
                if !rule.is_negation() {
                    return Decision::vcs_excluded(rule.to_ref());
                }
            }
        }

        self.files
            .decide(|file| file.first_path_match(&path).map(RulePattern::to_ref))
    }

    /// Resolve a method declared in `file_name`.
    pub fn resolve_method(&self, name: &str, file_name: &str) -> Decision {
        self.methods.decide(|file| {
            file.first_method_match(name, file_name)
                .map(RulePattern::to_ref)
        })
    }

    /// Every pattern in every layer that matches a path, in precedence order.
    pub fn explain_file(&self, path: &str) -> Vec<RuleMatch> {
        let path = canonicalize_lossy(path);
        self.vcs_ignore
            .iter()
            .map(|f| (RuleLayer::VcsIgnore, f))
            .chain(self.files.files(RuleCategory::File))
            .flat_map(|(layer, file)| {
                file.patterns()
                    .iter()
                    .filter(|r| r.matches_path(&path))
                    .map(move |r| RuleMatch {
                        layer,
                        rule: r.to_ref(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Every method pattern that matches, in precedence order.
    pub fn explain_method(&self, name: &str, file_name: &str) -> Vec<RuleMatch> {
        self.methods
            .files(RuleCategory::Method)
            .flat_map(|(layer, file)| {
                file.patterns()
                    .iter()
                    .filter(|r| r.matches_method(name, file_name))
                    .map(move |r| RuleMatch {
                        layer,
                        rule: r.to_ref(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Split candidates by their file decision.
    pub fn partition(&self, candidates: Vec<Candidate>) -> Partition {
        let mut partition = Partition::default();
        for candidate in candidates {
            let decision = self.resolve_file(&candidate.path);
            if decision.included {
                partition.kept.push(candidate);
            } else {
                partition.rejected.push((candidate, decision));
            }
        }
        debug!(
            kept = partition.kept.len(),
            rejected = partition.rejected.len(),
            "partitioned candidates"
        );
        partition
    }

    /// File category mode, or `None` without file rules.
    pub fn file_mode(&self) -> Option<FilterMode> {
        self.files.mode()
    }

    /// Method category mode, or `None` without method rules.
    pub fn method_mode(&self) -> Option<FilterMode> {
        self.methods.mode()
    }

    /// The VCS-ignore rules, if loaded.
    pub fn vcs_ignore(&self) -> Option<&RuleFile> {
        self.vcs_ignore.as_ref()
    }

    /// File category rules.
    pub fn file_rules(&self) -> &CategoryRules {
        &self.files
    }

    /// Method category rules.
    pub fn method_rules(&self) -> &CategoryRules {
        &self.methods
    }

    /// Every loaded pattern with its layer, in precedence order.
    pub fn patterns(&self) -> Vec<(RuleLayer, &RulePattern)> {
        self.vcs_ignore
            .iter()
            .map(|f| (RuleLayer::VcsIgnore, f))
            .chain(self.files.files(RuleCategory::File))
            .chain(self.methods.files(RuleCategory::Method))
            .flat_map(|(layer, file)| file.patterns().iter().map(move |r| (layer, r)))
            .collect()
    }

    /// Number of distinct compiled matchers held by this resolver.
    pub fn compiled_matchers(&self) -> usize {
        self.cache.len()
    }
}

/// Collects rule sources and compiles them into a [`RuleResolver`].
///
/// A source with no effective patterns (empty or comment-only) is treated as
/// absent, so an empty include file does not deny everything.
#[derive(Clone, Debug, Default)]
pub struct RuleResolverBuilder {
    vcs_ignore: Option<RuleSource>,
    include: Option<RuleSource>,
    exclude: Option<RuleSource>,
    method_include: Option<RuleSource>,
    method_exclude: Option<RuleSource>,
}

impl RuleResolverBuilder {
    /// VCS-ignore rules (tier 1).
    #[must_use]
    pub fn vcs_ignore(mut self, source: RuleSource) -> Self {
        self.vcs_ignore = Some(source);
        self
    }

    /// File include rules.
    #[must_use]
    pub fn include(mut self, source: RuleSource) -> Self {
        self.include = Some(source);
        self
    }

    /// File exclude rules.
    #[must_use]
    pub fn exclude(mut self, source: RuleSource) -> Self {
        self.exclude = Some(source);
        self
    }

    /// Method include rules.
    #[must_use]
    pub fn method_include(mut self, source: RuleSource) -> Self {
        self.method_include = Some(source);
        self
    }

    /// Method exclude rules.
    #[must_use]
    pub fn method_exclude(mut self, source: RuleSource) -> Self {
        self.method_exclude = Some(source);
        self
    }

    /// Compile every source.
    pub fn build(self) -> RuleResolver {
        let mut cache = MatcherCache::default();
        let mut load = |source: Option<RuleSource>, kind: RuleKind| {
            source
                .map(|s| RuleFile::compile(&s, kind, &mut cache))
                .filter(|f| !f.is_empty())
        };

        let vcs_ignore = load(self.vcs_ignore, RuleKind::File);
        let files = CategoryRules {
            include: load(self.include, RuleKind::File),
            exclude: load(self.exclude, RuleKind::File),
        };
        let methods = CategoryRules {
            include: load(self.method_include, RuleKind::Method),
            exclude: load(self.method_exclude, RuleKind::Method),
        };

        debug!(
            vcs = vcs_ignore.is_some(),
            file_mode = ?files.mode(),
            method_mode = ?methods.mode(),
            matchers = cache.len(),
            "rule resolver built"
        );

        RuleResolver {
            vcs_ignore,
            files,
            methods,
            cache,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
