//! `heading-presence`: a screen should have at least one heading.

use super::{count_of, Check, ScanContext};
use crate::node::{FontSize, Node};
use crate::rule::Rule;
use crate::types::{Finding, Severity};
use serde::{Deserialize, Serialize};

const HEADING_NAMES: [&str; 3] = ["heading", "title", "header"];

/// Condition for `heading-presence`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingPresence {
    /// Text style name. Accepted for compatibility; styles are not resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style: Option<String>,
}

impl Check for HeadingPresence {
    const RULE_TYPE: &'static str = "heading-presence";
    const SUMMARY: &'static str = "Some text layer is named like a heading or is set large";
    const DEFAULT_SEVERITY: Severity = Severity::Warning;

    fn check(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Finding {
        let min_size = ctx.config().heading_min_font_size;
        // mixed sizes are never treated as headings
        let is_heading = |n: &Node| {
            n.name_contains_any(&HEADING_NAMES)
                || matches!(n.font_size, Some(FontSize::Px(px)) if px >= min_size)
        };

        let found = ctx.text_nodes().filter(|&n| is_heading(n)).count();
        if found > 0 {
            Finding::passed(
                rule,
                format!("Found {}", count_of(found, "heading element")),
            )
        } else {
            Finding::failed(
                rule,
                Self::DEFAULT_SEVERITY,
                "No heading elements found - add section headers for clarity",
                Vec::new(),
            )
        }
    }
}
