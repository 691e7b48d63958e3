//! # sieve
//!
//! Reads scanner candidates, filters them through the project's rule files,
//! and fits what is left to a token budget. The `FitResult` is printed as
//! JSON on stdout; logs and trace reports go to stderr.

#![deny(unsafe_code)]

mod discovery;
mod input;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sieve_budget::{FitOptions, TokenBudgetFitter, recommend_strategy};
use sieve_core::logging::{init_json_subscriber, init_subscriber};
use sieve_rules::RuleTracer;
use sieve_settings::{FitSettings, load_settings_from_path, settings_path};

/// Rule-driven token-budget fitting for context digests.
#[derive(Parser, Debug)]
#[command(name = "sieve", version, about)]
struct Cli {
    /// Candidate JSON array (`-` or omitted for stdin).
    #[arg(long, short)]
    candidates: Option<PathBuf>,

    /// Project root holding the rule files.
    #[arg(long, short, default_value = ".")]
    root: PathBuf,

    /// Settings file (defaults to `~/.sieve/settings.json`).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Token budget (overrides settings).
    #[arg(long, short)]
    target_tokens: Option<u64>,

    /// Fit strategy: topN, balanced, shrinkDocs, methodsOnly, auto.
    #[arg(long, short)]
    strategy: Option<String>,

    /// Disable entry-point preservation.
    #[arg(long)]
    no_preserve_entry_points: bool,

    /// Print a rule trace to stderr.
    #[arg(long, value_enum)]
    trace: Option<TraceFormat>,

    /// Print the advisory strategy for the filtered set and exit.
    #[arg(long)]
    recommend: bool,

    /// Log level (overrides settings; `RUST_LOG` wins over both).
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TraceFormat {
    /// Human-readable report.
    Text,
    /// JSON report.
    Json,
}

fn fit_options(fit: &FitSettings, args: &Cli) -> FitOptions {
    FitOptions {
        strategy: args.strategy.clone().unwrap_or_else(|| fit.strategy.clone()),
        preserve_entry_points: fit.preserve_entry_points && !args.no_preserve_entry_points,
        priority_patterns: fit.priority_patterns.clone(),
        min_files: fit.min_files,
        max_files: fit.max_files,
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let settings_file = args.settings.clone().unwrap_or_else(settings_path);
    let settings = load_settings_from_path(&settings_file)
        .with_context(|| format!("Failed to load settings: {}", settings_file.display()))?;

    let level = args.log_level.as_deref().unwrap_or(&settings.logging.level);
    if settings.logging.json {
        init_json_subscriber(level);
    } else {
        init_subscriber(level);
    }

    let candidates = input::read_candidates(args.candidates.as_deref())?;
    let resolver = Arc::new(discovery::load_resolver(&args.root, &settings.rules)?);

    let kept = match args.trace {
        Some(format) => {
            let mut tracer = RuleTracer::new(Arc::clone(&resolver));
            let partition = tracer.trace_candidates(candidates);
            match format {
                TraceFormat::Text => eprint!("{}", tracer.render_text()),
                TraceFormat::Json => eprintln!(
                    "{}",
                    tracer.to_json().context("Failed to serialize trace")?
                ),
            }
            partition.kept
        }
        None => resolver.partition(candidates).kept,
    };

    let target = args.target_tokens.unwrap_or(settings.fit.target_tokens);

    if args.recommend {
        println!("{}", recommend_strategy(&kept, target));
        return Ok(());
    }

    let fitter = TokenBudgetFitter::new(target, fit_options(&settings.fit, &args));
    let result = fitter.fit(&kept);

    println!(
        "{}",
        serde_json::to_string_pretty(&result).context("Failed to serialize result")?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_overrides() {
        let cli = Cli::try_parse_from([
            "sieve",
            "--candidates",
            "scan.json",
            "--target-tokens",
            "5000",
            "--strategy",
            "topN",
            "--trace",
            "json",
            "--no-preserve-entry-points",
        ])
        .unwrap();
        assert_eq!(cli.target_tokens, Some(5000));
        assert!(matches!(cli.trace, Some(TraceFormat::Json)));

        let options = fit_options(&FitSettings::default(), &cli);
        assert_eq!(options.strategy, "topN");
        assert!(!options.preserve_entry_points);
    }

    #[test]
    fn settings_supply_defaults() {
        let cli = Cli::try_parse_from(["sieve"]).unwrap();
        let fit = FitSettings {
            strategy: "balanced".into(),
            max_files: Some(40),
            ..FitSettings::default()
        };
        let options = fit_options(&fit, &cli);
        assert_eq!(options.strategy, "balanced");
        assert_eq!(options.max_files, Some(40));
        assert!(options.preserve_entry_points);
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
