//! Rule sets loaded from JSON.
//!
//! # Architecture
//!
//! ```text
//! JSON text
//!   ↓ serde_json (must be an array)
//! Vec<Value>
//!   ↓ dto::RuleDto + loader validation
//! Vec<Rule> (condition parsed into a typed Condition)
//! ```

pub mod dto;
pub mod loader;

use crate::rule::Rule;
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::Value;

/// Errors from parsing JSON and loading a rule set.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum LoadRulesError {
    /// The text is not valid JSON.
    #[error("Invalid JSON in rule set: {message}")]
    #[diagnostic(code(spec_lint::rules::json))]
    Json {
        /// Parser message.
        message: String,
        /// The rule-set text.
        #[source_code]
        src: NamedSource<String>,
        /// Where parsing stopped.
        #[label("here")]
        span: SourceSpan,
    },

    /// The top-level value is not an array.
    #[error("Rule set must be a JSON array of rules, found {found}")]
    #[diagnostic(
        code(spec_lint::rules::not_an_array),
        help("wrap the rules in [ ... ]")
    )]
    NotAnArray {
        /// JSON kind that was found.
        found: &'static str,
    },

    /// An entry failed validation.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] loader::LoadError),
}

/// Parses a JSON rule set.
///
/// # Errors
///
/// Returns an error if the JSON is invalid, is not an array, or any entry
/// fails validation.
pub fn load_rules_from_json(content: &str) -> Result<Vec<Rule>, LoadRulesError> {
    load_rules_from_source("rules.json", content)
}

/// Parses a JSON rule set, naming the source in diagnostics.
///
/// # Errors
///
/// Same as [`load_rules_from_json`].
pub fn load_rules_from_source(name: &str, content: &str) -> Result<Vec<Rule>, LoadRulesError> {
    let value: Value = serde_json::from_str(content).map_err(|e| LoadRulesError::Json {
        message: e.to_string(),
        span: SourceSpan::from((offset_of(content, e.line(), e.column()), 0)),
        src: NamedSource::new(name, content.to_string()),
    })?;

    let Value::Array(entries) = value else {
        return Err(LoadRulesError::NotAnArray {
            found: loader::json_kind(&value),
        });
    };

    let rules = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| loader::load_rule(entry, index))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Loaded {} rule(s) from {}", rules.len(), name);
    Ok(rules)
}

/// Serializes rules to a pretty-printed JSON rule set.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn rules_to_json(rules: &[Rule]) -> Result<String, serde_json::Error> {
    let dtos: Vec<_> = rules.iter().map(loader::to_dto).collect();
    serde_json::to_string_pretty(&dtos)
}

/// Byte offset of a 1-based line/column position, clamped to the text.
fn offset_of(content: &str, line: usize, column: usize) -> usize {
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(content.len())
}
