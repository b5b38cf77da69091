//! `image-alt`: image fills must sit on descriptively named layers.

use super::{count_of, Check, ScanContext};
use crate::node::{NodeKind, PaintKind};
use crate::rule::Rule;
use crate::types::{AffectedNode, Finding, Severity};
use serde::{Deserialize, Serialize};

/// Condition for `image-alt`. Takes no parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAlt {}

impl Check for ImageAlt {
    const RULE_TYPE: &'static str = "image-alt";
    const SUMMARY: &'static str = "Rectangles with an image fill have a non-default name";
    const DEFAULT_SEVERITY: Severity = Severity::Warning;

    fn check(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Finding {
        let placeholder = ctx.config().placeholder_image_name.as_str();
        let failing: Vec<_> = ctx
            .nodes()
            .iter()
            .filter(|n| n.kind == NodeKind::Rectangle && n.fills.has_kind(PaintKind::Image))
            .filter(|n| {
                let name = n.name.trim();
                name.is_empty() || name == placeholder
            })
            .map(|n| AffectedNode::new(n).with_issue("Image layer has no descriptive name"))
            .collect();

        if failing.is_empty() {
            Finding::passed(rule, "All images have descriptive names")
        } else {
            Finding::failed(
                rule,
                Self::DEFAULT_SEVERITY,
                format!(
                    "{} missing descriptive names",
                    count_of(failing.len(), "image")
                ),
                failing,
            )
        }
    }
}
