//! Rule model: a declarative check with a typed condition.

use crate::checks::{
    AltTextPresence, Check, ColorContrast, ComponentPresence, ElementAlignment, ElementSize,
    FontSizeRange, HeadingPresence, ImageAlt, LabelPresence, RequiredComponent, RequiredText,
    ScanContext, Spacing, TextUniqueness,
};
use crate::types::{Finding, Severity};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Errors that keep a single rule from being evaluated.
///
/// These never abort a scan; the engine records them as error findings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// No checker exists for the rule's type.
    #[error("Unknown rule type: {rule_type}")]
    UnknownRuleType {
        /// The unrecognized type.
        rule_type: String,
    },

    /// The condition does not fit the rule's type.
    #[error("Invalid condition for `{rule_type}`: {reason}")]
    InvalidCondition {
        /// The rule type.
        rule_type: String,
        /// What was wrong.
        reason: String,
    },
}

/// Type-specific parameters of a rule, one variant per rule type.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `required-text`
    RequiredText(RequiredText),
    /// `font-size`
    FontSize(FontSizeRange),
    /// `color-contrast`
    ColorContrast(ColorContrast),
    /// `required-component`
    RequiredComponent(RequiredComponent),
    /// `component-presence`
    ComponentPresence(ComponentPresence),
    /// `element-size`
    ElementSize(ElementSize),
    /// `label-presence`
    LabelPresence(LabelPresence),
    /// `text-uniqueness`
    TextUniqueness(TextUniqueness),
    /// `heading-presence`
    HeadingPresence(HeadingPresence),
    /// `alt-text-presence`
    AltTextPresence(AltTextPresence),
    /// `element-alignment` (not verified)
    ElementAlignment(ElementAlignment),
    /// `spacing` (not verified)
    Spacing(Spacing),
    /// `image-alt`
    ImageAlt(ImageAlt),
    /// A type with no checker. Kept so the rule still yields a finding.
    Unknown {
        /// The unrecognized type.
        rule_type: String,
        /// Condition as given.
        raw: Value,
    },
    /// A known type whose condition could not be parsed or validated.
    Invalid {
        /// The rule type.
        rule_type: String,
        /// Parse or validation error.
        reason: String,
        /// Condition as given.
        raw: Value,
    },
}

fn parse<T>(raw: &Value, wrap: fn(T) -> Condition) -> Result<Condition, String>
where
    T: Check + DeserializeOwned,
{
    let condition: T = serde_json::from_value(raw.clone()).map_err(|e| e.to_string())?;
    condition.validate()?;
    Ok(wrap(condition))
}

impl Condition {
    /// Parses a raw JSON condition for the given rule type.
    ///
    /// Never fails: unknown types and bad conditions become
    /// [`Condition::Unknown`] and [`Condition::Invalid`].
    #[must_use]
    pub fn from_json(rule_type: &str, raw: Value) -> Self {
        let parsed = match rule_type {
            RequiredText::RULE_TYPE => parse(&raw, Self::RequiredText),
            FontSizeRange::RULE_TYPE => parse(&raw, Self::FontSize),
            ColorContrast::RULE_TYPE => parse(&raw, Self::ColorContrast),
            RequiredComponent::RULE_TYPE => parse(&raw, Self::RequiredComponent),
            ComponentPresence::RULE_TYPE => parse(&raw, Self::ComponentPresence),
            ElementSize::RULE_TYPE => parse(&raw, Self::ElementSize),
            LabelPresence::RULE_TYPE => parse(&raw, Self::LabelPresence),
            TextUniqueness::RULE_TYPE => parse(&raw, Self::TextUniqueness),
            HeadingPresence::RULE_TYPE => parse(&raw, Self::HeadingPresence),
            AltTextPresence::RULE_TYPE => parse(&raw, Self::AltTextPresence),
            ElementAlignment::RULE_TYPE => parse(&raw, Self::ElementAlignment),
            Spacing::RULE_TYPE => parse(&raw, Self::Spacing),
            ImageAlt::RULE_TYPE => parse(&raw, Self::ImageAlt),
            _ => {
                return Self::Unknown {
                    rule_type: rule_type.to_string(),
                    raw,
                }
            }
        };

        parsed.unwrap_or_else(|reason| Self::Invalid {
            rule_type: rule_type.to_string(),
            reason,
            raw,
        })
    }

    /// The rule type this condition belongs to.
    #[must_use]
    pub fn rule_type(&self) -> &str {
        match self {
            Self::RequiredText(_) => RequiredText::RULE_TYPE,
            Self::FontSize(_) => FontSizeRange::RULE_TYPE,
            Self::ColorContrast(_) => ColorContrast::RULE_TYPE,
            Self::RequiredComponent(_) => RequiredComponent::RULE_TYPE,
            Self::ComponentPresence(_) => ComponentPresence::RULE_TYPE,
            Self::ElementSize(_) => ElementSize::RULE_TYPE,
            Self::LabelPresence(_) => LabelPresence::RULE_TYPE,
            Self::TextUniqueness(_) => TextUniqueness::RULE_TYPE,
            Self::HeadingPresence(_) => HeadingPresence::RULE_TYPE,
            Self::AltTextPresence(_) => AltTextPresence::RULE_TYPE,
            Self::ElementAlignment(_) => ElementAlignment::RULE_TYPE,
            Self::Spacing(_) => Spacing::RULE_TYPE,
            Self::ImageAlt(_) => ImageAlt::RULE_TYPE,
            Self::Unknown { rule_type, .. } | Self::Invalid { rule_type, .. } => rule_type,
        }
    }

    /// Serializes the condition back to its JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        fn to_value<T: Serialize>(c: &T) -> Result<Value, serde_json::Error> {
            serde_json::to_value(c)
        }
        match self {
            Self::RequiredText(c) => to_value(c),
            Self::FontSize(c) => to_value(c),
            Self::ColorContrast(c) => to_value(c),
            Self::RequiredComponent(c) => to_value(c),
            Self::ComponentPresence(c) => to_value(c),
            Self::ElementSize(c) => to_value(c),
            Self::LabelPresence(c) => to_value(c),
            Self::TextUniqueness(c) => to_value(c),
            Self::HeadingPresence(c) => to_value(c),
            Self::AltTextPresence(c) => to_value(c),
            Self::ElementAlignment(c) => to_value(c),
            Self::Spacing(c) => to_value(c),
            Self::ImageAlt(c) => to_value(c),
            Self::Unknown { raw, .. } | Self::Invalid { raw, .. } => Ok(raw.clone()),
        }
    }

    /// Runs the checker for this condition.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown types and invalid conditions.
    pub fn evaluate(&self, ctx: &ScanContext<'_>, rule: &Rule) -> Result<Finding, CheckError> {
        let finding = match self {
            Self::RequiredText(c) => c.check(ctx, rule),
            Self::FontSize(c) => c.check(ctx, rule),
            Self::ColorContrast(c) => c.check(ctx, rule),
            Self::RequiredComponent(c) => c.check(ctx, rule),
            Self::ComponentPresence(c) => c.check(ctx, rule),
            Self::ElementSize(c) => c.check(ctx, rule),
            Self::LabelPresence(c) => c.check(ctx, rule),
            Self::TextUniqueness(c) => c.check(ctx, rule),
            Self::HeadingPresence(c) => c.check(ctx, rule),
            Self::AltTextPresence(c) => c.check(ctx, rule),
            Self::ElementAlignment(c) => c.check(ctx, rule),
            Self::Spacing(c) => c.check(ctx, rule),
            Self::ImageAlt(c) => c.check(ctx, rule),
            Self::Unknown { rule_type, .. } => {
                return Err(CheckError::UnknownRuleType {
                    rule_type: rule_type.clone(),
                })
            }
            Self::Invalid {
                rule_type, reason, ..
            } => {
                return Err(CheckError::InvalidCondition {
                    rule_type: rule_type.clone(),
                    reason: reason.clone(),
                })
            }
        };
        Ok(finding)
    }
}

/// A declarative check.
///
/// Rules are immutable once built; the engine only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    id: String,
    description: String,
    severity: Option<Severity>,
    condition: Condition,
}

impl Rule {
    /// Creates a rule that uses its type's default severity.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        condition: Condition,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            severity: None,
            condition,
        }
    }

    /// Sets the severity used when the rule fails.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Replaces the severity (or clears it with `None`).
    #[must_use]
    pub fn with_severity_opt(mut self, severity: Option<Severity>) -> Self {
        self.severity = severity;
        self
    }

    /// Rule id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Explicit severity, if any.
    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    /// Typed condition.
    #[must_use]
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Rule type name (e.g. `font-size`).
    #[must_use]
    pub fn rule_type(&self) -> &str {
        self.condition.rule_type()
    }
}
