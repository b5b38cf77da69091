//! `component-presence`: a loose, name-based check for a key component.

use super::{count_of, Check, ScanContext};
use crate::node::{Node, NodeKind};
use crate::rule::Rule;
use crate::types::{Finding, Severity};
use serde::{Deserialize, Serialize};

/// Condition for `component-presence`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentPresence {
    /// Name fragment to look for (case-insensitive).
    pub component_name: String,
}

impl ComponentPresence {
    /// Condition looking for `component_name`.
    #[must_use]
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
        }
    }

    fn matches(&self, node: &Node) -> bool {
        node.name_contains(&self.component_name)
            || (matches!(node.kind, NodeKind::Component | NodeKind::Instance)
                && node.name_contains("button"))
    }
}

impl Check for ComponentPresence {
    const RULE_TYPE: &'static str = "component-presence";
    const SUMMARY: &'static str = "Some element is named like the component, or is a button component";
    const DEFAULT_SEVERITY: Severity = Severity::Warning;

    fn validate(&self) -> Result<(), String> {
        if self.component_name.trim().is_empty() {
            Err("`component_name` must not be empty".to_string())
        } else {
            Ok(())
        }
    }

    fn check(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Finding {
        let found = ctx.nodes().iter().filter(|n| self.matches(n)).count();

        if found > 0 {
            Finding::passed(
                rule,
                format!(
                    "Found {} matching \"{}\"",
                    count_of(found, "element"),
                    self.component_name
                ),
            )
        } else {
            Finding::failed(
                rule,
                Self::DEFAULT_SEVERITY,
                format!(
                    "No \"{}\" found - ensure screen has a clear primary action",
                    self.component_name
                ),
                Vec::new(),
            )
        }
    }
}
