//! `alt-text-presence`: icons and images need a description.

use super::{count_of, Check, ScanContext};
use crate::node::{Node, NodeKind};
use crate::rule::Rule;
use crate::types::{AffectedNode, Finding, Severity};
use serde::{Deserialize, Serialize};

const IMAGE_NAMES: [&str; 3] = ["icon", "image", "img"];
const DESCRIPTIVE_NAMES: [&str; 2] = ["alt", "desc"];

/// Condition for `alt-text-presence`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltTextPresence {
    /// Extra name fragment that marks a node as an image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl AltTextPresence {
    fn is_image(&self, node: &Node) -> bool {
        matches!(node.kind, NodeKind::Rectangle | NodeKind::Ellipse)
            || node.name_contains_any(&IMAGE_NAMES)
            || self
                .target
                .as_deref()
                .is_some_and(|target| node.name_contains(target))
    }
}

impl Check for AltTextPresence {
    const RULE_TYPE: &'static str = "alt-text-presence";
    const SUMMARY: &'static str = "Shapes, icons and images carry a description or nearby text";
    const DEFAULT_SEVERITY: Severity = Severity::Warning;

    fn check(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Finding {
        let window = ctx.config().alt_text_proximity;
        let is_described = |image: &Node| {
            image.name_contains_any(&DESCRIPTIVE_NAMES)
                || ctx.text_nodes().any(|text| window.is_near(text, image))
        };

        let missing: Vec<_> = ctx
            .nodes()
            .iter()
            .copied()
            .filter(|&n| self.is_image(n) && !is_described(n))
            .map(|n| AffectedNode::new(n).with_issue("No alt text or descriptive label found"))
            .collect();

        if missing.is_empty() {
            Finding::passed(rule, "All icons and images have descriptive text")
        } else {
            Finding::failed(
                rule,
                Self::DEFAULT_SEVERITY,
                format!("{} missing alt text", count_of(missing.len(), "image")),
                missing,
            )
        }
    }
}
