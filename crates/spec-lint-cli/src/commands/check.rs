//! Check command implementation.

use anyhow::{Context, Result};
use spec_lint_core::{declarative, Config, Document, Rule, RuleEngine};
use spec_lint_rules::Preset;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Inputs of the check command.
pub struct CheckArgs<'a> {
    /// Canvas snapshot to scan.
    pub document: &'a Path,
    /// Rule set file, overriding presets.
    pub rules: Option<&'a Path>,
    /// Preset name from the command line.
    pub preset: Option<&'a str>,
    /// Comma-separated rule ids to keep.
    pub only: Option<&'a str>,
}

/// Runs the check command.
pub fn run(args: &CheckArgs<'_>, format: OutputFormat, source: &ConfigSource) -> Result<()> {
    let config = load_config(source)?;

    let rules = select_rules(args, &config, source)?;
    let rules = match args.only {
        Some(ids) => filter_only(rules, ids),
        None => rules,
    };
    let rules = config.apply(rules);

    let content = std::fs::read_to_string(args.document)
        .with_context(|| format!("Failed to read document: {}", args.document.display()))?;
    let document = Document::from_json(&content)
        .with_context(|| format!("Failed to load document: {}", args.document.display()))?;

    let engine = RuleEngine::builder(&document)
        .rules(rules)
        .config(config.engine.clone())
        .build()
        .context("Failed to build rule engine")?;

    tracing::info!(
        "Scanning {} with {} rules",
        args.document.display(),
        engine.rule_count()
    );

    let report = engine.scan_selection().context("Scan failed")?;

    super::output::print(&report, format)?;

    if report.has_findings_at(config.fail_on()) {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

fn load_rules_file(path: &Path) -> Result<Vec<Rule>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule set: {}", path.display()))?;
    declarative::load_rules_from_source(&path.display().to_string(), &content)
        .map_err(|err| anyhow::anyhow!("{:?}", miette::Report::new(err)))
}

/// `--rules`, then `--preset`, then the config's `rules.json`, then its preset.
fn select_rules(
    args: &CheckArgs<'_>,
    config: &Config,
    source: &ConfigSource,
) -> Result<Vec<Rule>> {
    if let Some(path) = args.rules {
        return load_rules_file(path);
    }
    if args.preset.is_none() {
        if let Some(path) = source.rule_set() {
            tracing::info!("Using rule set: {}", path.display());
            return load_rules_file(&path);
        }
    }
    preset_rules(args.preset, config)
}

/// Rules of the requested preset, else the configured one, else `recommended`.
fn preset_rules(requested: Option<&str>, config: &Config) -> Result<Vec<Rule>> {
    let name = requested
        .or(config.preset.as_deref())
        .unwrap_or(Preset::Recommended.name());
    let preset = Preset::parse(name)
        .with_context(|| format!("Unknown preset: {name} (expected recommended or basic)"))?;
    tracing::debug!("Using preset: {}", preset);
    Ok(preset.rules())
}

fn filter_only(rules: Vec<Rule>, ids: &str) -> Vec<Rule> {
    let wanted: Vec<&str> = ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();

    for id in &wanted {
        if !rules.iter().any(|r| r.id() == *id) {
            tracing::warn!("Unknown rule: {}", id);
        }
    }

    rules
        .into_iter()
        .filter(|r| wanted.contains(&r.id()))
        .collect()
}
