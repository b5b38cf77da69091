//! Built-in rule sets.

use spec_lint_core::checks::{
    AltTextPresence, ColorContrast, ComponentPresence, ElementAlignment, ElementSize,
    FontSizeRange, HeadingPresence, ImageAlt, LabelPresence, TextUniqueness,
};
use spec_lint_core::{Condition, Rule, Severity};

/// Preset rule sets for spec-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Screen-level accessibility and UX rules.
    Recommended,
    /// Typography, contrast and image naming only.
    Basic,
}

impl Preset {
    /// Every preset, in documentation order.
    pub const ALL: [Self; 2] = [Self::Recommended, Self::Basic];

    /// Parses a preset from its name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "basic" => Some(Self::Basic),
            _ => None,
        }
    }

    /// The preset's name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Basic => "basic",
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<Rule> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Basic => basic_rules(),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `req-primary-button` (component-presence) - a primary action exists
/// - `text-contrast` (color-contrast) - text has a solid color
/// - `font-size-min` (font-size) - body text is at least 14px
/// - `tap-target-size` (element-size) - touch targets are 44x44px
/// - `missing-label` (label-presence) - inputs are labelled
/// - `duplicate-cta` (text-uniqueness) - "Submit" appears once
/// - `section-header-required` (heading-presence) - a heading exists
/// - `icon-alt-text` (alt-text-presence) - icons and images are described
/// - `btn-alignment` (element-alignment) - not verified
#[must_use]
pub fn recommended_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "req-primary-button",
            "Every screen must contain a clearly styled primary action button",
            Condition::ComponentPresence(ComponentPresence::new("PrimaryButton")),
        )
        .with_severity(Severity::Error),
        Rule::new(
            "text-contrast",
            "Text elements must have a minimum contrast ratio of 4.5:1 against the background",
            Condition::ColorContrast(ColorContrast::new(4.5)),
        )
        .with_severity(Severity::Error),
        Rule::new(
            "font-size-min",
            "Body text should be at least 14px for readability",
            Condition::FontSize(FontSizeRange::min(14.0)),
        )
        .with_severity(Severity::Warning),
        Rule::new(
            "tap-target-size",
            "Interactive elements must be at least 44x44 pixels for touch accessibility",
            Condition::ElementSize(ElementSize::new(44.0, 44.0)),
        )
        .with_severity(Severity::Warning),
        Rule::new(
            "missing-label",
            "All input fields must have associated labels",
            Condition::LabelPresence(LabelPresence {
                target: Some("input".to_string()),
            }),
        )
        .with_severity(Severity::Error),
        Rule::new(
            "duplicate-cta",
            "Avoid using the same CTA text more than once on a screen",
            Condition::TextUniqueness(TextUniqueness::new("Submit")),
        )
        .with_severity(Severity::Warning),
        Rule::new(
            "section-header-required",
            "Sections must include a heading element for clarity",
            Condition::HeadingPresence(HeadingPresence {
                text_style: Some("Heading".to_string()),
            }),
        )
        .with_severity(Severity::Warning),
        Rule::new(
            "icon-alt-text",
            "Icons and images must include alt text or a label for accessibility",
            Condition::AltTextPresence(AltTextPresence {
                target: Some("icon".to_string()),
            }),
        )
        .with_severity(Severity::Warning),
        Rule::new(
            "btn-alignment",
            "Primary action buttons should be aligned consistently",
            Condition::ElementAlignment(ElementAlignment::new("PrimaryButton", "bottom-right")),
        )
        .with_severity(Severity::Warning),
    ]
}

/// Returns the basic set of rules.
///
/// Rules keep their type's default severity.
#[must_use]
pub fn basic_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "min-font-size",
            "Text must be at least 12px for readability",
            Condition::FontSize(FontSizeRange::min(12.0)),
        ),
        Rule::new(
            "max-font-size",
            "Heading text should not exceed 72px",
            Condition::FontSize(FontSizeRange::max(72.0)),
        ),
        Rule::new(
            "color-contrast",
            "Text must meet WCAG AA contrast requirements (4.5:1)",
            Condition::ColorContrast(ColorContrast::new(4.5)),
        ),
        Rule::new(
            "image-alt",
            "Images should have descriptive names for accessibility",
            Condition::ImageAlt(ImageAlt::default()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use spec_lint_core::declarative::{load_rules_from_json, rules_to_json};

    fn ids(rules: &[Rule]) -> String {
        rules.iter().map(Rule::id).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_preset_rules() {
        for preset in Preset::ALL {
            assert!(!preset.rules().is_empty(), "{preset} is empty");
        }
    }

    #[test]
    fn test_preset_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(Preset::parse(preset.name()), Some(preset));
        }
        assert_eq!(Preset::parse("strict"), None);
    }

    #[test]
    fn test_recommended_ids() {
        insta::assert_snapshot!(ids(&recommended_rules()), @r"
        req-primary-button
        text-contrast
        font-size-min
        tap-target-size
        missing-label
        duplicate-cta
        section-header-required
        icon-alt-text
        btn-alignment
        ");
    }

    #[test]
    fn test_basic_ids() {
        insta::assert_snapshot!(ids(&basic_rules()), @r"
        min-font-size
        max-font-size
        color-contrast
        image-alt
        ");
    }

    #[test]
    fn test_presets_are_valid_rule_sets() {
        for preset in Preset::ALL {
            let rules = preset.rules();
            let json = rules_to_json(&rules).unwrap();
            let reloaded = load_rules_from_json(&json).unwrap();
            assert_eq!(reloaded, rules, "{preset} does not survive JSON");
            assert!(reloaded.iter().all(|r| !matches!(
                r.condition(),
                Condition::Unknown { .. } | Condition::Invalid { .. }
            )));
        }
    }

    #[test]
    fn test_recommended_uses_original_field_names() {
        let json: serde_json::Value =
            serde_json::from_str(&rules_to_json(&recommended_rules()).unwrap()).unwrap();
        assert_eq!(json[0]["condition"]["component_name"], "PrimaryButton");
        assert_eq!(json[3]["condition"]["min_width"], 44.0);
        assert_eq!(json[4]["severity"], "error");
    }
}
