//! `color-contrast`: every text layer must carry a solid text color.
//!
//! This is a presence check. The exact ratio for a single node is available
//! from [`analyze_text_node`](crate::contrast::analyze_text_node).

use super::{count_of, Check, ScanContext};
use crate::node::{Fills, PaintKind};
use crate::rule::Rule;
use crate::types::{Finding, Severity};
use serde::{Deserialize, Serialize};

fn default_min_contrast() -> f64 {
    crate::contrast::AA_NORMAL
}

/// Condition for `color-contrast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorContrast {
    /// Target ratio reported in the message.
    #[serde(default = "default_min_contrast", alias = "min_ratio")]
    pub min_contrast: f64,
}

impl Default for ColorContrast {
    fn default() -> Self {
        Self {
            min_contrast: default_min_contrast(),
        }
    }
}

impl ColorContrast {
    /// Condition with an explicit target ratio.
    #[must_use]
    pub fn new(min_contrast: f64) -> Self {
        Self { min_contrast }
    }
}

fn missing_color(fills: &Fills) -> Option<&'static str> {
    match fills.paints() {
        None => Some("Mixed text color"),
        Some([]) => Some("No text color defined"),
        Some(paints) => {
            let has_solid = paints
                .iter()
                .any(|p| p.kind == PaintKind::Solid && p.color.is_some());
            (!has_solid).then_some("No solid text color")
        }
    }
}

impl Check for ColorContrast {
    const RULE_TYPE: &'static str = "color-contrast";
    const SUMMARY: &'static str = "Every text layer has a solid color that contrast can be computed for";
    const DEFAULT_SEVERITY: Severity = Severity::Warning;

    fn validate(&self) -> Result<(), String> {
        if self.min_contrast.is_finite() && (1.0..=21.0).contains(&self.min_contrast) {
            Ok(())
        } else {
            Err(format!(
                "`minContrast` must be between 1 and 21, got {}",
                self.min_contrast
            ))
        }
    }

    fn check(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Finding {
        let failing: Vec<_> = ctx
            .text_nodes()
            .filter_map(|n| missing_color(&n.fills).map(|issue| ctx.describe(n).with_issue(issue)))
            .collect();

        if failing.is_empty() {
            Finding::passed(
                rule,
                format!("Color contrast check passed (min {}:1)", self.min_contrast),
            )
        } else {
            Finding::failed(
                rule,
                Self::DEFAULT_SEVERITY,
                format!(
                    "{} may have contrast issues",
                    count_of(failing.len(), "element")
                ),
                failing,
            )
        }
    }
}
