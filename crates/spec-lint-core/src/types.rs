//! Core types for lint findings and reports.

use crate::node::{Node, NodeId, NodeKind};
use crate::rule::Rule;
use serde::{Deserialize, Serialize};

/// Severity a rule assigns to its finding when the check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Should be addressed, does not fail the scan by default.
    Warning,
    /// Must be fixed.
    Error,
}

impl Severity {
    /// Parses a severity from its lowercase name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Outcome of evaluating one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The rule held for every scanned node.
    Passed,
    /// The rule failed with warning severity.
    Warning,
    /// The rule failed with error severity, or could not be evaluated.
    Error,
}

impl Status {
    /// Returns the severity of a failed status, `None` for [`Status::Passed`].
    #[must_use]
    pub fn severity(self) -> Option<Severity> {
        match self {
            Self::Passed => None,
            Self::Warning => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
        }
    }
}

impl From<Severity> for Status {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => Self::Warning,
            Severity::Error => Self::Error,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A node referenced by a finding, with optional check-specific details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedNode {
    /// Node identifier.
    pub id: NodeId,
    /// Node name as authored.
    pub name: String,
    /// Node kind.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Resolved font size (text nodes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Text content (text nodes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    /// Matched text (text-uniqueness).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Actual width (element-size).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Actual height (element-size).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Why the node was flagged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
}

impl AffectedNode {
    /// Creates an entry carrying only the node's identity.
    #[must_use]
    pub fn new(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind,
            font_size: None,
            characters: None,
            text: None,
            width: None,
            height: None,
            issue: None,
        }
    }

    /// Creates an entry with the text details attached for text nodes.
    #[must_use]
    pub fn describe(node: &Node, mixed_font_size: f64) -> Self {
        let entry = Self::new(node);
        if node.kind == NodeKind::Text {
            Self {
                font_size: Some(node.resolved_font_size(mixed_font_size)),
                characters: node.characters.clone(),
                ..entry
            }
        } else {
            entry
        }
    }

    /// Attaches the matched text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attaches the actual size of the node.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Attaches the reason this node was flagged.
    #[must_use]
    pub fn with_issue(mut self, issue: impl Into<String>) -> Self {
        self.issue = Some(issue.into());
        self
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// The outcome of evaluating one rule against the scanned nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Id of the rule that produced this finding.
    pub rule_id: String,
    /// Description copied from the rule.
    pub description: String,
    /// Pass/warning/error outcome.
    pub status: Status,
    /// Human-readable summary.
    pub message: String,
    /// Nodes responsible for a failure; empty when passed.
    pub affected_nodes: Vec<AffectedNode>,
    /// Set when the rule type is accepted but not actually verified.
    #[serde(default, skip_serializing_if = "is_false")]
    pub unverified: bool,
}

impl Finding {
    /// Creates a passed finding.
    #[must_use]
    pub fn passed(rule: &Rule, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule.id().to_string(),
            description: rule.description().to_string(),
            status: Status::Passed,
            message: message.into(),
            affected_nodes: Vec::new(),
            unverified: false,
        }
    }

    /// Creates a passed finding for a check that performed no verification.
    #[must_use]
    pub fn unverified(rule: &Rule, message: impl Into<String>) -> Self {
        Self {
            unverified: true,
            ..Self::passed(rule, message)
        }
    }

    /// Creates a failed finding.
    ///
    /// The status is the rule's own severity when set, else `default_severity`.
    #[must_use]
    pub fn failed(
        rule: &Rule,
        default_severity: Severity,
        message: impl Into<String>,
        affected_nodes: Vec<AffectedNode>,
    ) -> Self {
        Self {
            rule_id: rule.id().to_string(),
            description: rule.description().to_string(),
            status: rule.severity().unwrap_or(default_severity).into(),
            message: message.into(),
            affected_nodes,
            unverified: false,
        }
    }

    /// Creates the error finding recorded for a rule that could not be evaluated.
    #[must_use]
    pub fn rule_failure(rule: &Rule, reason: impl std::fmt::Display) -> Self {
        Self {
            rule_id: rule.id().to_string(),
            description: rule.description().to_string(),
            status: Status::Error,
            message: format!("Rule check failed: {reason}"),
            affected_nodes: Vec::new(),
            unverified: false,
        }
    }

    /// Returns true if the rule passed.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.status == Status::Passed
    }

    /// Formats the finding for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} [{}] {}\n", self.rule_id, self.status, self.description);
        let _ = writeln!(output, "  {}", self.message);
        for node in &self.affected_nodes {
            let _ = write!(output, "  - {} \"{}\" ({})", node.id, node.name, node.kind);
            if let Some(issue) = &node.issue {
                let _ = write!(output, ": {issue}");
            }
            output.push('\n');
        }
        if self.unverified {
            let _ = writeln!(output, "  = note: this check is not implemented yet");
        }
        output
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {}", self.status, self.rule_id, self.message)?;
        if !self.affected_nodes.is_empty() {
            write!(f, " ({} node(s))", self.affected_nodes.len())?;
        }
        Ok(())
    }
}

/// Result of evaluating a rule set against a node list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintReport {
    /// Findings of rules that passed.
    pub passed: Vec<Finding>,
    /// Findings with warning status.
    pub warnings: Vec<Finding>,
    /// Findings with error status.
    pub errors: Vec<Finding>,
    /// Compliance score, 0 to 100.
    pub score: u8,
    /// Number of nodes the rules were evaluated against.
    pub total_nodes_scanned: usize,
}

impl LintReport {
    /// Builds a report by bucketing findings by status and computing the score.
    #[must_use]
    pub fn from_findings(findings: Vec<Finding>, total_nodes_scanned: usize) -> Self {
        let total = findings.len();
        let mut report = Self {
            total_nodes_scanned,
            ..Self::default()
        };

        for finding in findings {
            match finding.status {
                Status::Passed => report.passed.push(finding),
                Status::Warning => report.warnings.push(finding),
                Status::Error => report.errors.push(finding),
            }
        }

        report.score = compute_score(report.passed.len(), total);
        report
    }

    /// Total number of findings (one per evaluated rule).
    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.passed.len() + self.warnings.len() + self.errors.len()
    }

    /// Counts findings as `(passed, warnings, errors)`.
    #[must_use]
    pub fn count_by_status(&self) -> (usize, usize, usize) {
        (self.passed.len(), self.warnings.len(), self.errors.len())
    }

    /// Returns true if any rule ended with error status.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Checks if any finding meets or exceeds the given severity.
    #[must_use]
    pub fn has_findings_at(&self, severity: Severity) -> bool {
        match severity {
            Severity::Error => !self.errors.is_empty(),
            Severity::Warning => !self.errors.is_empty() || !self.warnings.is_empty(),
        }
    }

    /// Iterates over every finding: errors, then warnings, then passed.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.passed.iter())
    }

    /// Looks up the finding for a rule id (first match).
    #[must_use]
    pub fn finding(&self, rule_id: &str) -> Option<&Finding> {
        self.findings().find(|f| f.rule_id == rule_id)
    }

    /// One-line summary of the scan.
    #[must_use]
    pub fn summary(&self) -> String {
        let (passed, warnings, errors) = self.count_by_status();
        format!(
            "Score {}%: {} passed, {} warning(s), {} error(s) across {} node(s)",
            self.score, passed, warnings, errors, self.total_nodes_scanned
        )
    }
}

/// `round(100 * passed / total)`, or 100 for an empty rule set.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn compute_score(passed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (passed as f64 / total as f64 * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::RequiredText;
    use crate::rule::Condition;

    fn rule(id: &str) -> Rule {
        Rule::new(
            id,
            "test rule",
            Condition::RequiredText(RequiredText::new("submit")),
        )
    }

    fn finding(id: &str, status: Status) -> Finding {
        match status {
            Status::Passed => Finding::passed(&rule(id), "ok"),
            Status::Warning => Finding::failed(&rule(id), Severity::Warning, "meh", vec![]),
            Status::Error => Finding::failed(&rule(id), Severity::Error, "bad", vec![]),
        }
    }

    #[test]
    fn empty_report_scores_100() {
        let report = LintReport::from_findings(vec![], 12);
        assert_eq!(report.score, 100);
        assert_eq!(report.total_nodes_scanned, 12);
        assert_eq!(report.finding_count(), 0);
    }

    #[test]
    fn score_rounds_to_nearest() {
        let report = LintReport::from_findings(
            vec![
                finding("a", Status::Passed),
                finding("b", Status::Passed),
                finding("c", Status::Error),
            ],
            1,
        );
        // 2/3 = 66.67
        assert_eq!(report.score, 67);
        assert_eq!(report.count_by_status(), (2, 0, 1));
    }

    #[test]
    fn findings_are_bucketed_by_status() {
        let report = LintReport::from_findings(
            vec![
                finding("a", Status::Warning),
                finding("b", Status::Passed),
                finding("c", Status::Error),
                finding("d", Status::Warning),
            ],
            3,
        );
        assert_eq!(report.passed.len(), 1);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.score, 25);
        assert_eq!(report.finding_count(), 4);
    }

    #[test]
    fn has_findings_at_respects_threshold() {
        let report = LintReport::from_findings(vec![finding("a", Status::Warning)], 1);
        assert!(!report.has_findings_at(Severity::Error));
        assert!(report.has_findings_at(Severity::Warning));
        assert!(!report.has_errors());
    }

    #[test]
    fn rule_severity_overrides_default() {
        let strict = rule("strict").with_severity(Severity::Error);
        let f = Finding::failed(&strict, Severity::Warning, "failed", vec![]);
        assert_eq!(f.status, Status::Error);
    }

    #[test]
    fn rule_failure_is_error_with_reason() {
        let f = Finding::rule_failure(&rule("x"), "Unknown rule type: nope");
        assert_eq!(f.status, Status::Error);
        assert_eq!(f.message, "Rule check failed: Unknown rule type: nope");
        assert!(f.affected_nodes.is_empty());
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = LintReport::from_findings(vec![finding("a", Status::Passed)], 2);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totalNodesScanned"], 2);
        assert_eq!(json["passed"][0]["ruleId"], "a");
        assert!(json["passed"][0]["affectedNodes"].as_array().unwrap().is_empty());
        assert!(json["passed"][0].get("unverified").is_none());
    }

    #[test]
    fn format_lists_nodes_with_their_issue() {
        let field = Node::new("7", "Promo field", NodeKind::Frame);
        let f = Finding::failed(
            &rule("labels"),
            Severity::Warning,
            "1 input field missing labels",
            vec![AffectedNode::new(&field).with_issue("No associated label found")],
        );
        insta::assert_snapshot!(f.format(), @r#"
        labels [warning] test rule
          1 input field missing labels
          - 7 "Promo field" (FRAME): No associated label found
        "#);
    }

    #[test]
    fn format_notes_unverified_checks() {
        let f = Finding::unverified(&rule("align"), "Element alignment not verified");
        insta::assert_snapshot!(f.format(), @r"
        align [passed] test rule
          Element alignment not verified
          = note: this check is not implemented yet
        ");
    }

    #[test]
    fn unverified_finding_is_serialized() {
        let f = Finding::unverified(&rule("a"), "not checked");
        assert!(f.is_passed());
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["unverified"], true);
    }
}
