//! Method-name patterns.
//!
//! The shape of a pattern is decided once at compile time:
//!
//! ```text
//! getName            → Exact
//! get*               → Prefix
//! *Handler           → Suffix
//! *cache*            → Contains
//! get*By?d           → Wildcard (regex)
//! *                  → Any
//! SampleClass.get*   → ClassQualified { class: Exact, method: Prefix }
//! Calculator.*       → ClassQualified { class: Exact, method: Any }
//! ```
//!
//! Matching is case-insensitive: identifier casing conventions differ across
//! languages (`get_name`, `getName`, `GetName`).

use regex::Regex;

use super::glob::build_regex;

/// A compiled method-name pattern.
#[derive(Clone, Debug)]
pub enum MethodPattern {
    /// `*`: every method.
    Any,
    /// A plain identifier.
    Exact(String),
    /// `prefix*`
    Prefix(String),
    /// `*suffix`
    Suffix(String),
    /// `*mid*`
    Contains(String),
    /// Any other wildcard arrangement.
    Wildcard(Regex),
    /// `Class.method`: the class segment is tested against the file name.
    ClassQualified {
        /// Pattern for the class segment.
        class: Box<MethodPattern>,
        /// Pattern for the method segment.
        method: Box<MethodPattern>,
    },
    /// Malformed input; never matches.
    Never,
}

impl MethodPattern {
    /// Compile a method pattern. Never fails.
    pub fn compile(pattern: &str) -> Self {
        let trimmed = pattern.trim();
        match trimmed.rsplit_once('.') {
            Some((class, method)) => {
                // `pkg.Outer.method` qualifies by the innermost class name
                let class = class.rsplit('.').next().unwrap_or(class);
                let class = Self::compile_segment(class);
                let method = Self::compile_segment(method);
                if matches!(class, Self::Never) || matches!(method, Self::Never) {
                    Self::Never
                } else {
                    Self::ClassQualified {
                        class: Box::new(class),
                        method: Box::new(method),
                    }
                }
            }
            None => Self::compile_segment(trimmed),
        }
    }

    fn compile_segment(segment: &str) -> Self {
        if segment.is_empty() {
            return Self::Never;
        }
        let lower = segment.to_lowercase();
        if lower.chars().all(|c| c == '*') {
            return Self::Any;
        }
        if !lower.contains(['*', '?']) {
            return Self::Exact(lower);
        }

        let inner = lower.trim_matches('*');
        let simple = !inner.contains(['*', '?']);
        let leading = lower.starts_with('*');
        let trailing = lower.ends_with('*');
        match (simple, leading, trailing) {
            (true, false, true) => Self::Prefix(inner.to_owned()),
            (true, true, false) => Self::Suffix(inner.to_owned()),
            (true, true, true) => Self::Contains(inner.to_owned()),
            _ => Self::wildcard(&lower),
        }
    }

    fn wildcard(lower: &str) -> Self {
        let mut source = String::from("^");
        for c in lower.chars() {
            match c {
                '*' => source.push_str(".*"),
                '?' => source.push('.'),
                other => {
                    let mut buf = [0u8; 4];
                    source.push_str(&regex::escape(other.encode_utf8(&mut buf)));
                }
            }
        }
        source.push('$');
        build_regex(&source, true).map_or(Self::Never, Self::Wildcard)
    }

    /// Whether compilation failed.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Never)
    }

    /// Test a method name declared in `file_name`.
    ///
    /// `file_name` may be a bare file name or a path; class-qualified
    /// patterns compare against the file stem.
    pub fn is_match(&self, name: &str, file_name: &str) -> bool {
        match self {
            Self::ClassQualified { class, method } => {
                let stem = sieve_core::path::file_stem(file_name).to_lowercase();
                class.matches_class(&stem) && method.matches_name(&name.to_lowercase())
            }
            other => other.matches_name(&name.to_lowercase()),
        }
    }

    fn matches_name(&self, lower: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(s) => lower == s,
            Self::Prefix(s) => lower.starts_with(s.as_str()),
            Self::Suffix(s) => lower.ends_with(s.as_str()),
            Self::Contains(s) => lower.contains(s.as_str()),
            Self::Wildcard(re) => re.is_match(lower),
            Self::ClassQualified { .. } | Self::Never => false,
        }
    }

    /// A plain class name only needs to appear in the file stem
    /// (`SampleClassTest.java` contains `SampleClass`). Snake-case stems are
    /// also compared with underscores removed (`user_service.rs`).
    fn matches_class(&self, stem: &str) -> bool {
        match self {
            Self::Exact(s) => stem.contains(s.as_str()) || stem.replace('_', "") == *s,
            other => other.matches_name(stem),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn m(pattern: &str, name: &str, file: &str) -> bool {
        MethodPattern::compile(pattern).is_match(name, file)
    }

    #[test]
    fn shapes_resolved_at_compile_time() {
        assert!(matches!(MethodPattern::compile("getName"), MethodPattern::Exact(_)));
        assert!(matches!(MethodPattern::compile("get*"), MethodPattern::Prefix(_)));
        assert!(matches!(MethodPattern::compile("*Handler"), MethodPattern::Suffix(_)));
        assert!(matches!(MethodPattern::compile("*cache*"), MethodPattern::Contains(_)));
        assert!(matches!(MethodPattern::compile("get*By*"), MethodPattern::Wildcard(_)));
        assert!(matches!(MethodPattern::compile("*"), MethodPattern::Any));
        assert!(matches!(
            MethodPattern::compile("SampleClass.getName"),
            MethodPattern::ClassQualified { .. }
        ));
    }

    #[test]
    fn exact_is_case_insensitive() {
        assert!(m("getName", "getname", "SampleClass.java"));
        assert!(m("getName", "GetName", "SampleClass.java"));
        assert!(!m("getName", "getNameFor", "SampleClass.java"));
    }

    #[test]
    fn prefix_suffix_contains() {
        assert!(m("get*", "getAge", "x.java"));
        assert!(!m("get*", "setAge", "x.java"));
        assert!(m("*Sum", "calculateSum", "x.java"));
        assert!(m("*calc*", "NewCalculator", "sample.go"));
    }

    #[test]
    fn general_wildcard() {
        assert!(m("get*By?d", "getUserById", "repo.ts"));
        assert!(!m("get*By?d", "getUserByName", "repo.ts"));
    }

    #[test]
    fn class_qualified_requires_file_match() {
        assert!(m("SampleClass.getName", "getName", "SampleClass.java"));
        assert!(m("SampleClass.getName", "getName", "src/com/example/SampleClass.java"));
        assert!(!m("SampleClass.getName", "getName", "OtherClass.java"));
        assert!(!m("SampleClass.getName", "setName", "SampleClass.java"));
    }

    #[test]
    fn class_wildcard_matches_every_method_in_class() {
        assert!(m("Calculator.*", "Add", "calculator.go"));
        assert!(m("Calculator.*", "Divide", "calculator.go"));
        assert!(!m("Calculator.*", "Add", "sample.go"));
    }

    #[test]
    fn class_matches_snake_case_file() {
        assert!(m("UserService.find", "find", "user_service.rs"));
    }

    #[test]
    fn dotted_package_uses_innermost_class() {
        assert!(m("com.example.SampleClass.getAge", "getAge", "SampleClass.java"));
    }

    #[test]
    fn malformed_never_matches() {
        assert!(MethodPattern::compile("").is_malformed());
        assert!(MethodPattern::compile("Class.").is_malformed());
        assert!(MethodPattern::compile(".method").is_malformed());
        assert!(!m("Class.", "anything", "Class.java"));
    }
}
