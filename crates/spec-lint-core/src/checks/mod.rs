//! Per-type rule checkers.
//!
//! Each rule type has a condition struct that deserializes from the rule's
//! `condition` object and implements [`Check`]. Checkers are pure functions of
//! the scanned nodes and the rule; they never mutate either.

mod alt_text_presence;
mod color_contrast;
mod component_presence;
mod element_size;
mod font_size;
mod heading_presence;
mod image_alt;
mod label_presence;
mod placeholder;
mod required_component;
mod required_text;
mod text_uniqueness;

pub use alt_text_presence::AltTextPresence;
pub use color_contrast::ColorContrast;
pub use component_presence::ComponentPresence;
pub use element_size::ElementSize;
pub use font_size::FontSizeRange;
pub use heading_presence::HeadingPresence;
pub use image_alt::ImageAlt;
pub use label_presence::LabelPresence;
pub use placeholder::{ElementAlignment, Spacing};
pub use required_component::RequiredComponent;
pub use required_text::RequiredText;
pub use text_uniqueness::TextUniqueness;

use crate::config::EngineConfig;
use crate::node::{CanvasHost, Node};
use crate::rule::Rule;
use crate::types::{AffectedNode, Finding, Severity};

/// A rule type's checker.
///
/// # Example
///
/// ```ignore
/// use spec_lint_core::checks::{Check, ScanContext};
/// use spec_lint_core::{Finding, Rule, Severity};
///
/// #[derive(serde::Deserialize)]
/// pub struct NoEmptyText;
///
/// impl Check for NoEmptyText {
///     const RULE_TYPE: &'static str = "no-empty-text";
///     const SUMMARY: &'static str = "Text layers must have content";
///     const DEFAULT_SEVERITY: Severity = Severity::Warning;
///
///     fn check(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Finding {
///         let empty: Vec<_> = ctx
///             .text_nodes()
///             .filter(|n| n.text().trim().is_empty())
///             .map(|n| ctx.describe(n))
///             .collect();
///         if empty.is_empty() {
///             Finding::passed(rule, "No empty text")
///         } else {
///             Finding::failed(rule, Self::DEFAULT_SEVERITY, "Empty text found", empty)
///         }
///     }
/// }
/// ```
pub trait Check {
    /// The `type` string rules use to select this checker.
    const RULE_TYPE: &'static str;

    /// One-line description of what the checker verifies.
    const SUMMARY: &'static str;

    /// Status of a failed finding when the rule sets no severity.
    const DEFAULT_SEVERITY: Severity;

    /// False for rule types that are accepted but not actually verified.
    const VERIFIED: bool = true;

    /// Validates condition values that deserialization cannot express.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the condition is unusable.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Evaluates the rule against the scanned nodes.
    fn check(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Finding;
}

/// Everything a checker may read during a scan.
#[derive(Clone, Copy)]
pub struct ScanContext<'a> {
    host: &'a dyn CanvasHost,
    nodes: &'a [&'a Node],
    config: &'a EngineConfig,
}

impl std::fmt::Debug for ScanContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanContext")
            .field("nodes", &self.nodes.len())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> ScanContext<'a> {
    /// Creates a context over a flattened node list.
    #[must_use]
    pub fn new(host: &'a dyn CanvasHost, nodes: &'a [&'a Node], config: &'a EngineConfig) -> Self {
        Self {
            host,
            nodes,
            config,
        }
    }

    /// The host the nodes came from.
    #[must_use]
    pub fn host(&self) -> &'a dyn CanvasHost {
        self.host
    }

    /// The scanned nodes in pre-order.
    #[must_use]
    pub fn nodes(&self) -> &'a [&'a Node] {
        self.nodes
    }

    /// Engine thresholds.
    #[must_use]
    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// Scanned text nodes in pre-order.
    pub fn text_nodes(&self) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().copied().filter(|n| n.is_text())
    }

    /// Font size of a node, with mixed sizes resolved.
    #[must_use]
    pub fn font_size(&self, node: &Node) -> f64 {
        node.resolved_font_size(self.config.mixed_font_size)
    }

    /// Affected-node entry for `node`, with text details for text nodes.
    #[must_use]
    pub fn describe(&self, node: &Node) -> AffectedNode {
        AffectedNode::describe(node, self.config.mixed_font_size)
    }
}

/// Catalogue entry for a rule type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTypeInfo {
    /// The `type` string.
    pub rule_type: &'static str,
    /// What the checker verifies.
    pub summary: &'static str,
    /// Status of a failed finding without a severity override.
    pub default_severity: Severity,
    /// False for placeholder checks.
    pub verified: bool,
}

impl RuleTypeInfo {
    fn of<C: Check>() -> Self {
        Self {
            rule_type: C::RULE_TYPE,
            summary: C::SUMMARY,
            default_severity: C::DEFAULT_SEVERITY,
            verified: C::VERIFIED,
        }
    }
}

/// Every rule type the engine can evaluate, in documentation order.
#[must_use]
pub fn rule_types() -> Vec<RuleTypeInfo> {
    vec![
        RuleTypeInfo::of::<RequiredText>(),
        RuleTypeInfo::of::<FontSizeRange>(),
        RuleTypeInfo::of::<ColorContrast>(),
        RuleTypeInfo::of::<RequiredComponent>(),
        RuleTypeInfo::of::<ComponentPresence>(),
        RuleTypeInfo::of::<ElementSize>(),
        RuleTypeInfo::of::<LabelPresence>(),
        RuleTypeInfo::of::<TextUniqueness>(),
        RuleTypeInfo::of::<HeadingPresence>(),
        RuleTypeInfo::of::<AltTextPresence>(),
        RuleTypeInfo::of::<ElementAlignment>(),
        RuleTypeInfo::of::<Spacing>(),
        RuleTypeInfo::of::<ImageAlt>(),
    ]
}

/// `"1 element"`, `"3 elements"`.
pub(crate) fn count_of(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Rejects negative or non-finite numbers in a condition.
pub(crate) fn non_negative(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("`{field}` must be a non-negative number, got {value}"))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::ScanContext;
    use crate::config::EngineConfig;
    use crate::document::Document;
    use crate::node::{collect_nodes, CanvasHost};
    use crate::rule::{Condition, Rule};
    use crate::types::Finding;

    pub(crate) fn rule(condition: Condition) -> Rule {
        Rule::new("r", "test rule", condition)
    }

    /// Evaluates `rule` against every node of a snapshot document.
    pub(crate) fn evaluate(rule: &Rule, document: &str) -> Finding {
        let doc = Document::from_json(document).unwrap();
        let nodes = collect_nodes(&doc, &doc.current_selection());
        let config = EngineConfig::default();
        let ctx = ScanContext::new(&doc, &nodes, &config);
        rule.condition().evaluate(&ctx, rule).unwrap()
    }

    /// Parses a condition for `rule_type`, panicking if it is not accepted.
    pub(crate) fn condition(rule_type: &str, raw: serde_json::Value) -> Condition {
        let condition = Condition::from_json(rule_type, raw);
        assert!(
            !matches!(condition, Condition::Invalid { .. } | Condition::Unknown { .. }),
            "condition rejected: {condition:?}"
        );
        condition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_lists_every_type_once() {
        let types = rule_types();
        assert_eq!(types.len(), 13);
        let mut names: Vec<_> = types.iter().map(|t| t.rule_type).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn only_placeholders_are_unverified() {
        let unverified: Vec<_> = rule_types()
            .into_iter()
            .filter(|t| !t.verified)
            .map(|t| t.rule_type)
            .collect();
        assert_eq!(unverified, vec!["element-alignment", "spacing"]);
    }

    #[test]
    fn count_of_pluralizes() {
        assert_eq!(count_of(1, "image"), "1 image");
        assert_eq!(count_of(0, "image"), "0 images");
        assert_eq!(count_of(2, "text element"), "2 text elements");
    }

    #[test]
    fn non_negative_rejects_bad_numbers() {
        assert!(non_negative("min_width", 0.0).is_ok());
        assert!(non_negative("min_width", -1.0).is_err());
        assert!(non_negative("min_width", f64::NAN).is_err());
    }
}
