//! `required-component`: an instance of a named component must be present.

use super::{Check, ScanContext};
use crate::node::NodeKind;
use crate::rule::Rule;
use crate::types::{Finding, Severity};
use serde::{Deserialize, Serialize};

/// Condition for `required-component`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredComponent {
    /// Exact name of the main component.
    pub component_name: String,
}

impl RequiredComponent {
    /// Condition requiring an instance of `component_name`.
    #[must_use]
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
        }
    }
}

impl Check for RequiredComponent {
    const RULE_TYPE: &'static str = "required-component";
    const SUMMARY: &'static str = "An instance of the named main component is present";
    const DEFAULT_SEVERITY: Severity = Severity::Error;

    fn check(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Finding {
        let host = ctx.host();
        let found = ctx
            .nodes()
            .iter()
            .filter(|n| n.kind == NodeKind::Instance)
            .filter_map(|n| host.main_component_of(&n.id))
            .any(|component| component.name == self.component_name);

        if found {
            Finding::passed(
                rule,
                format!("Required component \"{}\" found", self.component_name),
            )
        } else {
            Finding::failed(
                rule,
                Self::DEFAULT_SEVERITY,
                format!("Required component \"{}\" not found", self.component_name),
                Vec::new(),
            )
        }
    }
}
