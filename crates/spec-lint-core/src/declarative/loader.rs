//! DTO → [`Rule`] conversion with validation.

use super::dto::RuleDto;
use crate::rule::{Condition, Rule};
use crate::types::Severity;
use miette::Diagnostic;
use serde_json::Value;

/// Errors found while validating individual rule entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum LoadError {
    /// An entry is not a JSON object.
    #[error("{context}: expected a rule object, found {found}")]
    #[diagnostic(
        code(spec_lint::rules::not_an_object),
        help("each entry looks like {{\"id\": ..., \"description\": ..., \"type\": ..., \"condition\": {{...}}}}")
    )]
    NotAnObject {
        /// Where the error occurred (e.g., "rules[2]").
        context: String,
        /// JSON kind that was found.
        found: &'static str,
    },

    /// An entry could not be read (a field has the wrong JSON type).
    #[error("{context}: {message}")]
    #[diagnostic(code(spec_lint::rules::malformed))]
    Malformed {
        /// Where the error occurred.
        context: String,
        /// Deserializer message.
        message: String,
    },

    /// A required text field is absent or blank.
    #[error("{context}: missing required field `{field}`")]
    #[diagnostic(
        code(spec_lint::rules::missing_field),
        help("`id`, `description` and `type` must be non-empty strings")
    )]
    MissingField {
        /// Where the error occurred.
        context: String,
        /// The missing field.
        field: &'static str,
    },

    /// `condition` is absent or not an object.
    #[error("{context}: `condition` must be an object")]
    #[diagnostic(
        code(spec_lint::rules::condition),
        help("use {{}} for rule types without parameters")
    )]
    InvalidCondition {
        /// Where the error occurred.
        context: String,
    },

    /// Unknown severity string.
    #[error("{context}: unknown severity `{value}`, expected: error, warning")]
    #[diagnostic(code(spec_lint::rules::severity))]
    UnknownSeverity {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn required(
    value: Option<String>,
    context: &str,
    field: &'static str,
) -> Result<String, LoadError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(LoadError::MissingField {
            context: context.to_string(),
            field,
        }),
    }
}

/// Converts one raw entry of a rule set into a [`Rule`].
///
/// Rule types are not checked here: an unknown type still loads and is
/// reported when the rule is evaluated.
///
/// # Errors
///
/// Returns the first problem found in the entry.
pub fn load_rule(entry: Value, index: usize) -> Result<Rule, LoadError> {
    let context = format!("rules[{index}]");
    if !entry.is_object() {
        return Err(LoadError::NotAnObject {
            context,
            found: json_kind(&entry),
        });
    }

    let dto: RuleDto = serde_json::from_value(entry).map_err(|e| LoadError::Malformed {
        context: context.clone(),
        message: e.to_string(),
    })?;
    convert_rule(dto, &context)
}

fn convert_rule(dto: RuleDto, context: &str) -> Result<Rule, LoadError> {
    let id = required(dto.id, context, "id")?;
    let context = format!("{context} ({id})");
    let description = required(dto.description, &context, "description")?;
    let rule_type = required(dto.rule_type, &context, "type")?;

    let condition = match dto.condition {
        Some(value @ Value::Object(_)) => value,
        _ => return Err(LoadError::InvalidCondition { context }),
    };

    let severity = dto
        .severity
        .map(|value| {
            Severity::parse(&value).ok_or(LoadError::UnknownSeverity {
                context: context.clone(),
                value,
            })
        })
        .transpose()?;

    Ok(Rule::new(id, description, Condition::from_json(&rule_type, condition))
        .with_severity_opt(severity))
}

/// Converts a rule back into its DTO form.
#[must_use]
pub fn to_dto(rule: &Rule) -> RuleDto {
    RuleDto {
        id: Some(rule.id().to_string()),
        description: Some(rule.description().to_string()),
        rule_type: Some(rule.rule_type().to_string()),
        condition: rule.condition().to_json().ok(),
        severity: rule.severity().map(|s| s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loads_complete_entry() {
        let rule = load_rule(
            json!({
                "id": "t1",
                "description": "needs submit",
                "type": "required-text",
                "condition": {"text": "submit"},
                "severity": "warning"
            }),
            0,
        )
        .unwrap();
        assert_eq!(rule.id(), "t1");
        assert_eq!(rule.rule_type(), "required-text");
        assert_eq!(rule.severity(), Some(Severity::Warning));
    }

    #[test]
    fn unknown_type_still_loads() {
        let rule = load_rule(
            json!({"id": "x", "description": "d", "type": "unknown-type", "condition": {}}),
            0,
        )
        .unwrap();
        assert!(matches!(rule.condition(), Condition::Unknown { .. }));
    }

    #[test]
    fn rejects_non_object_entry() {
        let err = load_rule(json!("rule"), 3).unwrap_err();
        assert_eq!(err.to_string(), "rules[3]: expected a rule object, found a string");
    }

    #[test]
    fn rejects_blank_required_fields() {
        let err = load_rule(
            json!({"id": "x", "description": " ", "type": "spacing", "condition": {}}),
            1,
        )
        .unwrap_err();
        assert_eq!(
            err,
            LoadError::MissingField {
                context: "rules[1] (x)".to_string(),
                field: "description",
            }
        );

        let err = load_rule(json!({"description": "d", "type": "spacing", "condition": {}}), 0)
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingField { field: "id", .. }));
    }

    #[test]
    fn rejects_missing_or_scalar_condition() {
        let missing = load_rule(json!({"id": "x", "description": "d", "type": "spacing"}), 0);
        assert!(matches!(missing, Err(LoadError::InvalidCondition { .. })));

        let scalar = load_rule(
            json!({"id": "x", "description": "d", "type": "spacing", "condition": 8}),
            0,
        );
        assert!(matches!(scalar, Err(LoadError::InvalidCondition { .. })));
    }

    #[test]
    fn rejects_unknown_severity() {
        let entry = json!({
            "id": "x",
            "description": "d",
            "type": "spacing",
            "condition": {},
            "severity": "info"
        });
        let err = load_rule(entry, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "rules[0] (x): unknown severity `info`, expected: error, warning"
        );
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let entry = json!({"id": 7, "description": "d", "type": "spacing", "condition": {}});
        let err = load_rule(entry, 0).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }
}
