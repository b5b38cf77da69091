//! `text-uniqueness`: a call to action should appear at most once.

use super::{Check, ScanContext};
use crate::rule::Rule;
use crate::types::{AffectedNode, Finding, Severity};
use serde::{Deserialize, Serialize};

/// Condition for `text-uniqueness`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUniqueness {
    /// Text that may appear in at most one layer (case-insensitive).
    pub target_text: String,
}

impl TextUniqueness {
    /// Condition for `target_text`.
    #[must_use]
    pub fn new(target_text: impl Into<String>) -> Self {
        Self {
            target_text: target_text.into(),
        }
    }
}

impl Check for TextUniqueness {
    const RULE_TYPE: &'static str = "text-uniqueness";
    const SUMMARY: &'static str = "The given text appears in at most one text layer";
    const DEFAULT_SEVERITY: Severity = Severity::Warning;

    fn validate(&self) -> Result<(), String> {
        if self.target_text.is_empty() {
            Err("`target_text` must not be empty".to_string())
        } else {
            Ok(())
        }
    }

    fn check(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Finding {
        let needle = self.target_text.to_lowercase();
        let matching: Vec<_> = ctx
            .text_nodes()
            .filter(|n| n.text().to_lowercase().contains(&needle))
            .collect();

        if matching.len() <= 1 {
            return Finding::passed(
                rule,
                format!(
                    "Text \"{}\" appears appropriately ({} times)",
                    self.target_text,
                    matching.len()
                ),
            );
        }

        let message = format!(
            "Text \"{}\" appears {} times - consider using unique CTAs",
            self.target_text,
            matching.len()
        );
        let affected = matching
            .into_iter()
            .map(|n| AffectedNode::new(n).with_text(n.text()))
            .collect();
        Finding::failed(rule, Self::DEFAULT_SEVERITY, message, affected)
    }
}
