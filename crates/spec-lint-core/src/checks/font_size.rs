//! `font-size`: every text layer must fall within a size range.

use super::{count_of, non_negative, Check, ScanContext};
use crate::rule::Rule;
use crate::types::{Finding, Severity};
use serde::{Deserialize, Serialize};

/// Condition for `font-size`.
///
/// A missing `minSize` falls back to the engine's default minimum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSizeRange {
    /// Smallest allowed size in pixels.
    #[serde(default, alias = "min_px", skip_serializing_if = "Option::is_none")]
    pub min_size: Option<f64>,
    /// Largest allowed size in pixels.
    #[serde(default, alias = "max_px", skip_serializing_if = "Option::is_none")]
    pub max_size: Option<f64>,
}

impl FontSizeRange {
    /// Range with only a lower bound.
    #[must_use]
    pub fn min(min_size: f64) -> Self {
        Self {
            min_size: Some(min_size),
            max_size: None,
        }
    }

    /// Range with only an upper bound.
    #[must_use]
    pub fn max(max_size: f64) -> Self {
        Self {
            min_size: None,
            max_size: Some(max_size),
        }
    }
}

impl Check for FontSizeRange {
    const RULE_TYPE: &'static str = "font-size";
    const SUMMARY: &'static str = "Every text layer's font size is within the allowed range";
    const DEFAULT_SEVERITY: Severity = Severity::Error;

    fn validate(&self) -> Result<(), String> {
        if let Some(min) = self.min_size {
            non_negative("minSize", min)?;
        }
        if let Some(max) = self.max_size {
            non_negative("maxSize", max)?;
        }
        match (self.min_size, self.max_size) {
            (Some(min), Some(max)) if min > max => {
                Err(format!("`minSize` ({min}) is greater than `maxSize` ({max})"))
            }
            _ => Ok(()),
        }
    }

    fn check(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Finding {
        let min = self
            .min_size
            .unwrap_or(ctx.config().default_min_font_size);
        let max = self.max_size;

        let failing: Vec<_> = ctx
            .text_nodes()
            .filter(|n| {
                let size = ctx.font_size(n);
                size < min || max.is_some_and(|max| size > max)
            })
            .map(|n| ctx.describe(n))
            .collect();

        if failing.is_empty() {
            let message = match max {
                Some(max) => format!("All text is between {min}px and {max}px"),
                None => format!("All text meets minimum font size ({min}px)"),
            };
            return Finding::passed(rule, message);
        }

        let problem = if max.is_some() {
            "outside allowed range"
        } else {
            "below minimum size"
        };
        Finding::failed(
            rule,
            Self::DEFAULT_SEVERITY,
            format!("{} {problem}", count_of(failing.len(), "text element")),
            failing,
        )
    }
}
