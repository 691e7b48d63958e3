//! Rule-file discovery under a project root.
//!
//! Looks for the five rule files named in [`RuleFileSettings`] directly in
//! the root. Missing files are simply absent; unreadable ones are errors.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use sieve_rules::{RuleResolver, RuleSource};
use sieve_settings::RuleFileSettings;
use tracing::debug;

/// Build a resolver from the rule files found in `root`.
pub fn load_resolver(root: &Path, rules: &RuleFileSettings) -> Result<RuleResolver> {
    let mut builder = RuleResolver::builder();

    if rules.use_vcs_ignore {
        if let Some(source) = read_rule_file(root, &rules.vcs_ignore_file)? {
            builder = builder.vcs_ignore(source);
        }
    }
    if let Some(source) = read_rule_file(root, &rules.include_file)? {
        builder = builder.include(source);
    }
    if let Some(source) = read_rule_file(root, &rules.exclude_file)? {
        builder = builder.exclude(source);
    }
    if let Some(source) = read_rule_file(root, &rules.method_include_file)? {
        builder = builder.method_include(source);
    }
    if let Some(source) = read_rule_file(root, &rules.method_exclude_file)? {
        builder = builder.method_exclude(source);
    }

    Ok(builder.build())
}

fn read_rule_file(root: &Path, name: &str) -> Result<Option<RuleSource>> {
    let path = root.join(name);
    match fs::read_to_string(&path) {
        Ok(contents) => {
            debug!(path = %path.display(), "loaded rule file");
            Ok(Some(RuleSource::new(name, contents)))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to read rule file: {}", path.display()))
        }
    }
}
