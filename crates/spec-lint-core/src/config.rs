//! Configuration types for spec-lint.

use crate::node::Node;
use crate::rule::Rule;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for spec-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Built-in rule set to use when no rules file is given (e.g. "recommended", "basic").
    #[serde(default)]
    pub preset: Option<String>,

    /// Lowest status that fails a scan (default: "error").
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Engine thresholds.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Per-rule overrides keyed by rule id.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or thresholds are out of range.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        self.rules
            .get(rule_id)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_id: &str) -> Option<Severity> {
        self.rules.get(rule_id).and_then(|c| c.severity)
    }

    /// Severity threshold that fails a scan.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }

    /// Drops disabled rules and applies severity overrides.
    ///
    /// Returns new rules; the input order is kept.
    #[must_use]
    pub fn apply(&self, rules: Vec<Rule>) -> Vec<Rule> {
        rules
            .into_iter()
            .filter(|rule| {
                let enabled = self.is_rule_enabled(rule.id());
                if !enabled {
                    tracing::debug!("Skipping disabled rule: {}", rule.id());
                }
                enabled
            })
            .map(|rule| match self.rule_severity(rule.id()) {
                Some(severity) => rule.with_severity(severity),
                None => rule,
            })
            .collect()
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Axis-aligned proximity window.
///
/// Two nodes are near when both origin deltas are strictly below the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    /// Maximum horizontal distance (exclusive).
    pub horizontal: f64,
    /// Maximum vertical distance (exclusive).
    pub vertical: f64,
}

impl Proximity {
    /// Creates a proximity window.
    #[must_use]
    pub fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Returns true if `a` and `b` fall within this window.
    #[must_use]
    pub fn is_near(&self, a: &Node, b: &Node) -> bool {
        (a.x - b.x).abs() < self.horizontal && (a.y - b.y).abs() < self.vertical
    }
}

/// Thresholds and heuristic constants used by the checkers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Size assumed for text with mixed font sizes.
    pub mixed_font_size: f64,
    /// Minimum font size when a `font-size` rule gives no bounds.
    pub default_min_font_size: f64,
    /// Text at or above this size counts as a heading.
    pub heading_min_font_size: f64,
    /// Default name hosts give unnamed rectangles.
    pub placeholder_image_name: String,
    /// Window in which a label must sit relative to its input.
    pub label_proximity: Proximity,
    /// Window in which descriptive text must sit relative to an image.
    pub alt_text_proximity: Proximity,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mixed_font_size: 14.0,
            default_min_font_size: 12.0,
            heading_min_font_size: 18.0,
            placeholder_image_name: "Rectangle".to_string(),
            label_proximity: Proximity::new(200.0, 100.0),
            alt_text_proximity: Proximity::new(100.0, 100.0),
        }
    }
}

impl EngineConfig {
    /// Checks that all thresholds are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("mixed_font_size", self.mixed_font_size),
            ("default_min_font_size", self.default_min_font_size),
            ("heading_min_font_size", self.heading_min_font_size),
            ("label_proximity.horizontal", self.label_proximity.horizontal),
            ("label_proximity.vertical", self.label_proximity.vertical),
            ("alt_text_proximity.horizontal", self.alt_text_proximity.horizontal),
            ("alt_text_proximity.vertical", self.alt_text_proximity.vertical),
        ];
        match fields
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((field, value)) => Err(ConfigError::InvalidThreshold {
                field: (*field).to_string(),
                value: *value,
            }),
            None => Ok(()),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A threshold is negative or not a number.
    #[error("Invalid engine threshold `{field}`: {value}")]
    InvalidThreshold {
        /// Offending field.
        field: String,
        /// Offending value.
        value: f64,
    },
}
