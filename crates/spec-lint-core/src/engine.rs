//! The rule engine: evaluates a rule set against scanned nodes.

use crate::checks::ScanContext;
use crate::config::{ConfigError, EngineConfig};
use crate::node::{collect_nodes, CanvasHost, Node};
use crate::rule::Rule;
use crate::types::{Finding, LintReport};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that stop a scan before any rule runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The host reports nothing selected.
    #[error("Nothing selected: select at least one element to scan")]
    EmptySelection,
}

/// Builder for constructing a [`RuleEngine`].
pub struct RuleEngineBuilder<'h> {
    host: &'h dyn CanvasHost,
    rules: Vec<Rule>,
    config: EngineConfig,
}

impl<'h> RuleEngineBuilder<'h> {
    fn new(host: &'h dyn CanvasHost) -> Self {
        Self {
            host,
            rules: Vec::new(),
            config: EngineConfig::default(),
        }
    }

    /// Adds a rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds rules in order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the engine thresholds.
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the engine.
    ///
    /// # Errors
    ///
    /// Returns an error if a threshold is negative or not a number.
    pub fn build(self) -> Result<RuleEngine<'h>, ConfigError> {
        self.config.validate()?;
        Ok(RuleEngine {
            host: self.host,
            rules: self.rules,
            config: self.config,
        })
    }
}

/// Evaluates rules against nodes supplied by a [`CanvasHost`].
///
/// Use [`RuleEngine::builder()`] to construct an instance. Rules run in
/// insertion order and every rule yields exactly one finding.
pub struct RuleEngine<'h> {
    host: &'h dyn CanvasHost,
    rules: Vec<Rule>,
    config: EngineConfig,
}

impl std::fmt::Debug for RuleEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rules)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'h> RuleEngine<'h> {
    /// Creates a new builder over `host`.
    #[must_use]
    pub fn builder(host: &'h dyn CanvasHost) -> RuleEngineBuilder<'h> {
        RuleEngineBuilder::new(host)
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// The registered rules in order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Engine thresholds in use.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluates the registered rules against `nodes`.
    #[must_use]
    pub fn run(&self, nodes: &[&Node]) -> LintReport {
        self.run_rules(nodes, &self.rules)
    }

    /// Evaluates an arbitrary rule slice against `nodes`.
    ///
    /// A rule that cannot be evaluated becomes an error finding; the
    /// remaining rules still run.
    #[must_use]
    pub fn run_rules(&self, nodes: &[&Node], rules: &[Rule]) -> LintReport {
        info!(
            "Evaluating {} rule(s) against {} node(s)",
            rules.len(),
            nodes.len()
        );

        let ctx = ScanContext::new(self.host, nodes, &self.config);
        let findings: Vec<Finding> = rules
            .iter()
            .map(|rule| {
                debug!("Checking rule {} ({})", rule.id(), rule.rule_type());
                rule.condition()
                    .evaluate(&ctx, rule)
                    .unwrap_or_else(|e| {
                        warn!("Rule {} could not be evaluated: {}", rule.id(), e);
                        Finding::rule_failure(rule, e)
                    })
            })
            .collect();

        let report = LintReport::from_findings(findings, nodes.len());
        info!("Scan complete: {}", report.summary());
        report
    }

    /// Scans the host's current selection and all descendants.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::EmptySelection`] when nothing is selected.
    pub fn scan_selection(&self) -> Result<LintReport, ScanError> {
        let selection = self.host.current_selection();
        if selection.is_empty() {
            return Err(ScanError::EmptySelection);
        }

        let nodes = collect_nodes(self.host, &selection);
        debug!(
            "Collected {} node(s) from {} selected element(s)",
            nodes.len(),
            selection.len()
        );
        Ok(self.run(&nodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{ImageAlt, RequiredText};
    use crate::config::Proximity;
    use crate::document::Document;
    use crate::rule::Condition;
    use crate::types::Status;
    use serde_json::json;

    const DOC: &str = r#"{"nodes": [
        {"id": "1", "name": "Screen", "type": "FRAME", "children": [
            {"id": "2", "name": "cta", "type": "TEXT", "characters": "Submit order", "fontSize": 16}
        ]}
    ]}"#;

    fn required(id: &str, text: &str) -> Rule {
        Rule::new(id, "needs text", Condition::RequiredText(RequiredText::new(text)))
    }

    #[test]
    fn builder_collects_rules_in_order() {
        let doc = Document::from_json(DOC).unwrap();
        let engine = RuleEngine::builder(&doc)
            .rule(required("a", "submit"))
            .rules(vec![required("b", "cancel"), required("a", "order")])
            .build()
            .unwrap();
        assert_eq!(engine.rule_count(), 3);
        let ids: Vec<_> = engine.rules().iter().map(Rule::id).collect();
        assert_eq!(ids, vec!["a", "b", "a"]);
    }

    #[test]
    fn duplicate_ids_yield_independent_findings() {
        let doc = Document::from_json(DOC).unwrap();
        let engine = RuleEngine::builder(&doc)
            .rules(vec![required("dup", "submit"), required("dup", "cancel")])
            .build()
            .unwrap();
        let report = engine.scan_selection().unwrap();
        assert_eq!(report.finding_count(), 2);
        assert_eq!(report.passed[0].rule_id, "dup");
        assert_eq!(report.errors[0].rule_id, "dup");
        assert_eq!(report.score, 50);
    }

    #[test]
    fn failing_rule_does_not_stop_the_batch() {
        let doc = Document::from_json(DOC).unwrap();
        let engine = RuleEngine::builder(&doc)
            .rule(Rule::new(
                "bad",
                "broken",
                Condition::from_json("unknown-type", json!({})),
            ))
            .rule(Rule::new(
                "invalid",
                "broken",
                Condition::from_json("element-size", json!({"min_width": "wide"})),
            ))
            .rule(required("ok", "submit"))
            .build()
            .unwrap();

        let report = engine.scan_selection().unwrap();
        assert_eq!(report.count_by_status(), (1, 0, 2));
        assert_eq!(report.score, 33);
        let unknown = report.finding("bad").unwrap();
        assert_eq!(unknown.status, Status::Error);
        assert_eq!(unknown.message, "Rule check failed: Unknown rule type: unknown-type");
        let invalid = report.finding("invalid").unwrap();
        assert!(invalid
            .message
            .starts_with("Rule check failed: Invalid condition for `element-size`"));
    }

    #[test]
    fn empty_selection_is_reported_before_running() {
        let snapshot = r#"{"selection": [], "nodes": [{"id": "1", "type": "FRAME"}]}"#;
        let doc = Document::from_json(snapshot).unwrap();
        let engine = RuleEngine::builder(&doc)
            .rule(Rule::new("img", "images", Condition::ImageAlt(ImageAlt::default())))
            .build()
            .unwrap();
        assert_eq!(engine.scan_selection(), Err(ScanError::EmptySelection));
    }

    #[test]
    fn zero_nodes_is_a_valid_run() {
        let doc = Document::default();
        let engine = RuleEngine::builder(&doc)
            .rule(required("t", "submit"))
            .build()
            .unwrap();
        let report = engine.run(&[]);
        assert_eq!(report.total_nodes_scanned, 0);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].affected_nodes.is_empty());
    }

    #[test]
    fn build_rejects_invalid_thresholds() {
        let doc = Document::default();
        let config = EngineConfig {
            label_proximity: Proximity::new(f64::NAN, 10.0),
            ..EngineConfig::default()
        };
        let result = RuleEngine::builder(&doc).config(config).build();
        assert!(matches!(result, Err(ConfigError::InvalidThreshold { .. })));
    }
}
