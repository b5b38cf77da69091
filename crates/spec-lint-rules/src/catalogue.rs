//! Catalogue of rule types the engine understands.

use spec_lint_core::{rule_types, RuleTypeInfo};

/// Returns every rule type, in documentation order.
#[must_use]
pub fn all_rule_types() -> Vec<RuleTypeInfo> {
    rule_types()
}

/// Looks up a rule type by its `type` string.
#[must_use]
pub fn find_rule_type(rule_type: &str) -> Option<RuleTypeInfo> {
    rule_types().into_iter().find(|t| t.rule_type == rule_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Preset;
    use spec_lint_core::Severity;

    #[test]
    fn test_find_rule_type() {
        let info = find_rule_type("font-size").unwrap();
        assert_eq!(info.default_severity, Severity::Error);
        assert!(info.verified);
        assert!(find_rule_type("unknown-type").is_none());
    }

    #[test]
    fn test_presets_only_use_catalogued_types() {
        for preset in Preset::ALL {
            for rule in preset.rules() {
                assert!(
                    find_rule_type(rule.rule_type()).is_some(),
                    "{} uses uncatalogued type {}",
                    rule.id(),
                    rule.rule_type()
                );
            }
        }
    }
}
