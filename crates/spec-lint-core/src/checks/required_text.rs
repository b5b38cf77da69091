//! `required-text`: some text layer must contain a phrase.

use super::{count_of, Check, ScanContext};
use crate::rule::Rule;
use crate::types::{Finding, Severity};
use serde::{Deserialize, Serialize};

/// Condition for `required-text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredText {
    /// Phrase to look for.
    pub text: String,
    /// Match case exactly (default: false).
    #[serde(default)]
    pub case_sensitive: bool,
}

impl RequiredText {
    /// Case-insensitive condition for `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            case_sensitive: false,
        }
    }

    /// Sets case sensitivity.
    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    fn matches(&self, haystack: &str) -> bool {
        if self.case_sensitive {
            haystack.contains(&self.text)
        } else {
            haystack.to_lowercase().contains(&self.text.to_lowercase())
        }
    }
}

impl Check for RequiredText {
    const RULE_TYPE: &'static str = "required-text";
    const SUMMARY: &'static str = "At least one text layer contains the given text";
    const DEFAULT_SEVERITY: Severity = Severity::Error;

    fn check(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Finding {
        let matching = ctx.text_nodes().filter(|n| self.matches(n.text())).count();

        if matching > 0 {
            return Finding::passed(
                rule,
                format!(
                    "Required text \"{}\" found in {}",
                    self.text,
                    count_of(matching, "element")
                ),
            );
        }

        // every text layer is a candidate for the missing copy
        let affected = ctx.text_nodes().map(|n| ctx.describe(n)).collect();
        Finding::failed(
            rule,
            Self::DEFAULT_SEVERITY,
            format!("Required text \"{}\" not found", self.text),
            affected,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::{evaluate, rule};
    use crate::rule::Condition;
    use crate::types::Status;

    const DOC: &str = r#"{"nodes": [
        {"id": "1", "name": "Title", "type": "TEXT", "characters": "Submit order", "fontSize": 16},
        {"id": "2", "name": "Hint", "type": "TEXT", "characters": "Cancel", "fontSize": "mixed"},
        {"id": "3", "name": "Card", "type": "FRAME"}
    ]}"#;

    #[test]
    fn passes_on_case_folded_match() {
        let finding = evaluate(&rule(Condition::RequiredText(RequiredText::new("submit"))), DOC);
        assert_eq!(finding.status, Status::Passed);
        assert!(finding.affected_nodes.is_empty());
        insta::assert_snapshot!(finding.message, @r#"Required text "submit" found in 1 element"#);
    }

    #[test]
    fn case_sensitive_match_fails_and_lists_all_text() {
        let condition = RequiredText::new("submit").case_sensitive(true);
        let finding = evaluate(&rule(Condition::RequiredText(condition)), DOC);
        assert_eq!(finding.status, Status::Error);
        insta::assert_snapshot!(finding.message, @r#"Required text "submit" not found"#);

        let ids: Vec<_> = finding.affected_nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(finding.affected_nodes[1].font_size, Some(14.0));
        assert_eq!(finding.affected_nodes[1].characters.as_deref(), Some("Cancel"));
    }

    #[test]
    fn severity_override_applies() {
        let r = rule(Condition::RequiredText(RequiredText::new("checkout")))
            .with_severity(Severity::Warning);
        let finding = evaluate(&r, DOC);
        assert_eq!(finding.status, Status::Warning);
    }
}
