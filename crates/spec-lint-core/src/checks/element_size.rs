//! `element-size`: interactive elements must meet a minimum touch target.

use super::{count_of, non_negative, Check, ScanContext};
use crate::node::{Node, NodeKind};
use crate::rule::Rule;
use crate::types::{AffectedNode, Finding, Severity};
use serde::{Deserialize, Serialize};

/// Condition for `element-size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSize {
    /// Minimum width in pixels.
    #[serde(alias = "minWidth")]
    pub min_width: f64,
    /// Minimum height in pixels.
    #[serde(alias = "minHeight")]
    pub min_height: f64,
}

impl ElementSize {
    /// Condition with the given minimum size.
    #[must_use]
    pub fn new(min_width: f64, min_height: f64) -> Self {
        Self {
            min_width,
            min_height,
        }
    }
}

fn is_interactive(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::Frame | NodeKind::Component | NodeKind::Instance
    ) || node.name_contains("button")
}

impl Check for ElementSize {
    const RULE_TYPE: &'static str = "element-size";
    const SUMMARY: &'static str = "Frames, components, instances and buttons meet a minimum size";
    const DEFAULT_SEVERITY: Severity = Severity::Warning;

    fn validate(&self) -> Result<(), String> {
        non_negative("min_width", self.min_width)?;
        non_negative("min_height", self.min_height)
    }

    fn check(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Finding {
        let (min_w, min_h) = (self.min_width, self.min_height);
        let failing: Vec<_> = ctx
            .nodes()
            .iter()
            .filter(|n| is_interactive(n))
            .filter(|n| n.width < min_w || n.height < min_h)
            .map(|n| {
                AffectedNode::new(n)
                    .with_size(n.width, n.height)
                    .with_issue(format!(
                        "Size {}x{}px is below {min_w}x{min_h}px",
                        n.width.round(),
                        n.height.round()
                    ))
            })
            .collect();

        if failing.is_empty() {
            Finding::passed(
                rule,
                format!(
                    "All interactive elements meet minimum size requirements ({min_w}x{min_h}px)"
                ),
            )
        } else {
            Finding::failed(
                rule,
                Self::DEFAULT_SEVERITY,
                format!(
                    "{} below minimum touch target size ({min_w}x{min_h}px)",
                    count_of(failing.len(), "interactive element")
                ),
                failing,
            )
        }
    }
}
