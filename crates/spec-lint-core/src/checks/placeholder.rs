//! Rule types that are accepted but not yet verified.
//!
//! Both always pass, and their findings are marked `unverified` so reports can
//! tell them apart from real passes.

use super::{count_of, non_negative, Check, ScanContext};
use crate::rule::Rule;
use crate::types::{Finding, Severity};
use serde::{Deserialize, Serialize};

/// Condition for `element-alignment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementAlignment {
    /// Name fragment of the elements to align. `PrimaryButton` also matches any button.
    pub target: String,
    /// Expected alignment, e.g. `bottom-right`.
    pub alignment: String,
}

impl ElementAlignment {
    /// Condition for `target` aligned to `alignment`.
    #[must_use]
    pub fn new(target: impl Into<String>, alignment: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            alignment: alignment.into(),
        }
    }
}

impl Check for ElementAlignment {
    const RULE_TYPE: &'static str = "element-alignment";
    const SUMMARY: &'static str = "Target elements follow an alignment pattern (not verified)";
    const DEFAULT_SEVERITY: Severity = Severity::Warning;
    const VERIFIED: bool = false;

    fn check(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Finding {
        let is_primary_button = self.target == "PrimaryButton";
        let targets = ctx
            .nodes()
            .iter()
            .filter(|n| {
                n.name_contains(&self.target) || (is_primary_button && n.name_contains("button"))
            })
            .count();

        Finding::unverified(
            rule,
            format!(
                "Element alignment not verified: found {} for \"{}\", expected {} alignment",
                count_of(targets, "element"),
                self.target,
                self.alignment
            ),
        )
    }
}

fn default_min_spacing() -> f64 {
    8.0
}

/// Condition for `spacing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacing {
    /// Smallest allowed gap in pixels.
    #[serde(default = "default_min_spacing")]
    pub min_spacing: f64,
    /// Largest allowed gap in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_spacing: Option<f64>,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            min_spacing: default_min_spacing(),
            max_spacing: None,
        }
    }
}

impl Check for Spacing {
    const RULE_TYPE: &'static str = "spacing";
    const SUMMARY: &'static str = "Gaps between elements stay within a range (not verified)";
    const DEFAULT_SEVERITY: Severity = Severity::Warning;
    const VERIFIED: bool = false;

    fn validate(&self) -> Result<(), String> {
        non_negative("minSpacing", self.min_spacing)?;
        match self.max_spacing {
            Some(max) if !max.is_finite() || max < self.min_spacing => Err(format!(
                "`maxSpacing` ({max}) must be at least `minSpacing` ({})",
                self.min_spacing
            )),
            _ => Ok(()),
        }
    }

    fn check(&self, _ctx: &ScanContext<'_>, rule: &Rule) -> Finding {
        let range = match self.max_spacing {
            Some(max) => format!("{}-{max}px", self.min_spacing),
            None => format!("at least {}px", self.min_spacing),
        };
        Finding::unverified(
            rule,
            format!("Spacing not verified: gaps are not measured (expected {range})"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::{condition, evaluate, rule};
    use crate::rule::Condition;
    use crate::types::Status;
    use serde_json::json;

    const DOC: &str = r#"{"nodes": [
        {"id": "1", "name": "Confirm Button", "type": "INSTANCE", "x": 3, "y": 7},
        {"id": "2", "name": "Cancel button", "type": "INSTANCE", "x": 90, "y": 2}
    ]}"#;

    #[test]
    fn alignment_is_passed_but_unverified() {
        let finding = evaluate(
            &rule(Condition::ElementAlignment(ElementAlignment::new(
                "PrimaryButton",
                "bottom-right",
            ))),
            DOC,
        );
        assert_eq!(finding.status, Status::Passed);
        assert!(finding.unverified);
        assert!(finding.affected_nodes.is_empty());
        insta::assert_snapshot!(
            finding.message,
            @r#"Element alignment not verified: found 2 elements for "PrimaryButton", expected bottom-right alignment"#
        );
    }

    #[test]
    fn spacing_is_passed_but_unverified() {
        let finding = evaluate(&rule(condition("spacing", json!({}))), DOC);
        assert_eq!(finding.status, Status::Passed);
        assert!(finding.unverified);
        insta::assert_snapshot!(
            finding.message,
            @"Spacing not verified: gaps are not measured (expected at least 8px)"
        );

        let ranged = evaluate(
            &rule(condition("spacing", json!({"minSpacing": 4, "maxSpacing": 16}))),
            DOC,
        );
        insta::assert_snapshot!(
            ranged.message,
            @"Spacing not verified: gaps are not measured (expected 4-16px)"
        );
    }

    #[test]
    fn severity_does_not_fail_a_placeholder() {
        let r = rule(Condition::Spacing(Spacing::default())).with_severity(Severity::Error);
        assert_eq!(evaluate(&r, DOC).status, Status::Passed);
    }

    #[test]
    fn spacing_range_is_validated() {
        let inverted = Spacing {
            min_spacing: 10.0,
            max_spacing: Some(5.0),
        };
        assert!(inverted.validate().is_err());
        assert!(Spacing::default().validate().is_ok());
    }
}
