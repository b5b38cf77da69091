//! `label-presence`: input fields need a nearby label.
//!
//! Association is positional: a text layer named like a label within the
//! engine's label window counts, wherever it sits in the tree.

use super::{count_of, Check, ScanContext};
use crate::node::Node;
use crate::rule::Rule;
use crate::types::{AffectedNode, Finding, Severity};
use serde::{Deserialize, Serialize};

const INPUT_NAMES: [&str; 3] = ["input", "field", "textfield"];

/// Condition for `label-presence`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPresence {
    /// Extra name fragment that marks a node as an input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl LabelPresence {
    fn is_input(&self, node: &Node) -> bool {
        node.name_contains_any(&INPUT_NAMES)
            || self
                .target
                .as_deref()
                .is_some_and(|target| node.name_contains(target))
    }
}

impl Check for LabelPresence {
    const RULE_TYPE: &'static str = "label-presence";
    const SUMMARY: &'static str = "Input fields have a text label positioned next to them";
    const DEFAULT_SEVERITY: Severity = Severity::Warning;

    fn check(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Finding {
        let window = ctx.config().label_proximity;
        let has_label = |input: &Node| {
            ctx.text_nodes().any(|label| {
                label.id != input.id && label.name_contains("label") && window.is_near(label, input)
            })
        };

        let unlabeled: Vec<_> = ctx
            .nodes()
            .iter()
            .copied()
            .filter(|&n| self.is_input(n) && !has_label(n))
            .map(|n| AffectedNode::new(n).with_issue("No associated label found"))
            .collect();

        if unlabeled.is_empty() {
            Finding::passed(rule, "All input fields have associated labels")
        } else {
            Finding::failed(
                rule,
                Self::DEFAULT_SEVERITY,
                format!("{} missing labels", count_of(unlabeled.len(), "input field")),
                unlabeled,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::{condition, evaluate, rule};
    use crate::rule::Condition;
    use crate::types::Status;
    use serde_json::json;

    #[test]
    fn label_within_window_passes() {
        let doc = r#"{"nodes": [
            {"id": "1", "name": "Email input", "type": "FRAME", "x": 0, "y": 40},
            {"id": "2", "name": "Email label", "type": "TEXT", "characters": "Email", "x": 199, "y": -59}
        ]}"#;
        let finding = evaluate(&rule(Condition::LabelPresence(LabelPresence::default())), doc);
        assert_eq!(finding.status, Status::Passed);
        insta::assert_snapshot!(finding.message, @"All input fields have associated labels");
    }

    #[test]
    fn label_on_the_boundary_is_too_far() {
        let doc = r#"{"nodes": [
            {"id": "1", "name": "Email input", "type": "FRAME", "x": 0, "y": 0},
            {"id": "2", "name": "Email label", "type": "TEXT", "characters": "Email", "x": 200, "y": 0},
            {"id": "3", "name": "Password field", "type": "FRAME", "x": 0, "y": 300}
        ]}"#;
        let finding = evaluate(&rule(Condition::LabelPresence(LabelPresence::default())), doc);
        assert_eq!(finding.status, Status::Warning);
        insta::assert_snapshot!(finding.message, @"2 input fields missing labels");
        assert_eq!(
            finding.affected_nodes[0].issue.as_deref(),
            Some("No associated label found")
        );
    }

    #[test]
    fn a_label_does_not_label_itself() {
        let doc = r#"{"nodes": [
            {"id": "1", "name": "field label", "type": "TEXT", "characters": "Name"}
        ]}"#;
        let finding = evaluate(&rule(Condition::LabelPresence(LabelPresence::default())), doc);
        assert_eq!(finding.status, Status::Warning);
        assert_eq!(finding.affected_nodes.len(), 1);
    }

    #[test]
    fn target_adds_input_names() {
        let doc = r#"{"nodes": [{"id": "1", "name": "Search box", "type": "FRAME"}]}"#;
        let plain = evaluate(&rule(Condition::LabelPresence(LabelPresence::default())), doc);
        assert_eq!(plain.status, Status::Passed);

        let targeted = evaluate(&rule(condition("label-presence", json!({"target": "box"}))), doc);
        assert_eq!(targeted.status, Status::Warning);
    }
}
