//! Interprets a [`RuleSet`] against one bundle of request data.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::{
    error::ValidationError,
    rules::{FieldRule, FieldType, RuleSet},
};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.\S+$").expect("Failed to compile email regex")
});

/// Checks `data` against `rules` and returns every failed check.
///
/// Errors follow the rule-set order and, within a field, the order
/// type, min, max, minLength, maxLength, enum. A missing required field
/// yields a single error and its other rules are skipped; a missing optional
/// field yields nothing.
pub fn evaluate(data: &Map<String, Value>, rules: &RuleSet) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (field, rule) in rules.iter() {
        evaluate_field(field, data.get(field), rule, &mut errors);
    }
    errors
}

fn evaluate_field(
    field: &str,
    value: Option<&Value>,
    rule: &FieldRule,
    errors: &mut Vec<ValidationError>,
) {
    let value = match value {
        None | Some(Value::Null) => {
            if rule.required {
                errors.push(ValidationError::missing(field));
            }
            return;
        }
        Some(Value::String(s)) if s.is_empty() && rule.required => {
            errors.push(ValidationError::missing(field));
            return;
        }
        Some(value) => value,
    };

    match rule.field_type {
        Some(FieldType::Email) if !is_email(value) => {
            errors.push(ValidationError::invalid_email(field))
        }
        Some(FieldType::Number) if coerce_number(value).is_none() => {
            errors.push(ValidationError::not_a_number(field))
        }
        _ => {}
    }

    if rule.min.is_some() || rule.max.is_some() {
        let number = coerce_number(value);
        if let Some(min) = rule.min {
            // NaN never satisfies a bound.
            if !number.is_some_and(|n| n >= min) {
                errors.push(ValidationError::below_min(field, min));
            }
        }
        if let Some(max) = rule.max {
            if !number.is_some_and(|n| n <= max) {
                errors.push(ValidationError::above_max(field, max));
            }
        }
    }

    if let Some(len) = length_of(value) {
        if let Some(min_length) = rule.min_length {
            if len < min_length {
                errors.push(ValidationError::too_short(field, min_length));
            }
        }
        if let Some(max_length) = rule.max_length {
            if len > max_length {
                errors.push(ValidationError::too_long(field, max_length));
            }
        }
    }

    if let Some(allowed) = &rule.allowed {
        if !allowed.iter().any(|literal| same_literal(literal, value)) {
            errors.push(ValidationError::not_in_enum(field, allowed));
        }
    }
}

/// Literal equality where numbers compare by value, so `2` matches `2.0`.
fn same_literal(literal: &Value, value: &Value) -> bool {
    match (literal, value) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => literal == value,
    }
}

fn is_email(value: &Value) -> bool {
    EMAIL_REGEX.is_match(&text_of(value))
}

fn text_of(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Loosely coerces a value to a finite number.
///
/// Strings are trimmed and an empty string counts as zero; booleans map to
/// one and zero. Anything else is not a number.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    number.is_finite().then_some(number)
}

/// Character count for strings, element count for arrays.
fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::error::ValidationErrorKind;
    use serde_json::json;

    fn data(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test data must be an object"),
        }
    }

    fn messages(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.message.as_str()).collect()
    }

    #[test]
    fn short_name_reports_min_length() {
        let rules = RuleSet::new().field("name", FieldRule::required().length(3, 100));
        let errors = evaluate(&data(json!({"name": "Hi"})), &rules);
        assert_eq!(messages(&errors), vec!["name must be at least 3 characters"]);
    }

    #[test]
    fn missing_required_enum_reports_required_only() {
        let rules = RuleSet::new().field(
            "type",
            FieldRule::required().one_of(["image", "article"]),
        );
        let errors = evaluate(&Map::new(), &rules);
        assert_eq!(messages(&errors), vec!["type is required"]);
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingRequiredField);
    }

    #[test]
    fn negative_numeric_string_fails_min_only() {
        let rules = RuleSet::new().field("price", FieldRule::required().number().min(0.0));
        let errors = evaluate(&data(json!({"price": "-5"})), &rules);
        assert_eq!(messages(&errors), vec!["price must be at least 0"]);
    }

    #[test]
    fn optional_email_is_checked_only_when_present() {
        let rules = RuleSet::new().field("email", FieldRule::optional().email());
        let errors = evaluate(&data(json!({"email": "not-an-email"})), &rules);
        assert_eq!(messages(&errors), vec!["email must be a valid email"]);
        assert!(evaluate(&Map::new(), &rules).is_empty());
        assert!(evaluate(&data(json!({"email": null})), &rules).is_empty());
    }

    #[test]
    fn required_rejects_empty_string_and_null() {
        let rules = RuleSet::new().field("title", FieldRule::required().min_length(3).email());
        for value in [json!(""), Value::Null] {
            let errors = evaluate(&data(json!({ "title": value })), &rules);
            assert_eq!(messages(&errors), vec!["title is required"]);
        }
    }

    #[test]
    fn optional_empty_string_is_still_checked() {
        let rules = RuleSet::new().field("bio", FieldRule::optional().min_length(2));
        let errors = evaluate(&data(json!({"bio": ""})), &rules);
        assert_eq!(messages(&errors), vec!["bio must be at least 2 characters"]);
    }

    #[test]
    fn multiple_violations_follow_attribute_order() {
        let rules = RuleSet::new().field(
            "code",
            FieldRule::required()
                .number()
                .min(10.0)
                .max(5.0)
                .length(4, 6)
                .one_of(["1234"]),
        );
        let errors = evaluate(&data(json!({"code": "abc"})), &rules);
        assert_eq!(
            messages(&errors),
            vec![
                "code must be a number",
                "code must be at least 10",
                "code must be at most 5",
                "code must be at least 4 characters",
                "code must be one of: 1234",
            ]
        );
    }

    #[test]
    fn failed_required_field_does_not_skip_other_fields() {
        let rules = RuleSet::new()
            .field("name", FieldRule::required())
            .field("email", FieldRule::required().email())
            .field("age", FieldRule::optional().number());
        let errors = evaluate(&data(json!({"email": "x", "age": "old"})), &rules);
        assert_eq!(
            messages(&errors),
            vec!["name is required", "email must be a valid email", "age must be a number"]
        );
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "age"]);
    }

    #[test]
    fn non_numeric_value_fails_bounds_without_number_type() {
        let rules = RuleSet::new().field("limit", FieldRule::optional().min(1.0).max(100.0));
        let errors = evaluate(&data(json!({"limit": "many"})), &rules);
        assert_eq!(
            messages(&errors),
            vec!["limit must be at least 1", "limit must be at most 100"]
        );
    }

    #[test]
    fn numeric_literals_and_strings_satisfy_bounds() {
        let rules = RuleSet::new().field("amount", FieldRule::required().number().min(0.5).max(10.0));
        for value in [json!(0.5), json!(10), json!(" 2.5 "), json!("1e0")] {
            assert!(evaluate(&data(json!({ "amount": value })), &rules).is_empty());
        }
        let errors = evaluate(&data(json!({"amount": 11})), &rules);
        assert_eq!(messages(&errors), vec!["amount must be at most 10"]);
    }

    #[test]
    fn coerce_number_is_permissive_but_finite() {
        assert_eq!(coerce_number(&json!("42")), Some(42.0));
        assert_eq!(coerce_number(&json!("")), Some(0.0));
        assert_eq!(coerce_number(&json!(true)), Some(1.0));
        assert_eq!(coerce_number(&json!("inf")), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
        assert_eq!(coerce_number(&json!("12abc")), None);
        assert_eq!(coerce_number(&json!([1])), None);
        assert_eq!(coerce_number(&json!({})), None);
    }

    #[test]
    fn email_shape_requires_local_part_domain_and_dot() {
        let rules = RuleSet::new().field("email", FieldRule::required().email());
        for valid in ["a@b.co", "jane.doe@example.com", "x@y.z"] {
            assert!(evaluate(&data(json!({ "email": valid })), &rules).is_empty(), "{valid}");
        }
        for invalid in ["@b.co", "a@.co", "a@b", "a b@c.d", "a@b.c d", "a@@b.c"] {
            assert_eq!(
                evaluate(&data(json!({ "email": invalid })), &rules).len(),
                1,
                "{invalid}"
            );
        }
    }

    #[test]
    fn length_counts_characters_and_array_items() {
        let rules = RuleSet::new().field("tags", FieldRule::optional().max_length(2));
        let errors = evaluate(&data(json!({"tags": ["a", "b", "c"]})), &rules);
        assert_eq!(messages(&errors), vec!["tags must be at most 2 characters"]);

        let rules = RuleSet::new().field("name", FieldRule::optional().max_length(3));
        assert!(evaluate(&data(json!({"name": "héé"})), &rules).is_empty());
    }

    #[test]
    fn length_rules_skip_values_without_length() {
        let rules = RuleSet::new().field("count", FieldRule::optional().min_length(3));
        assert!(evaluate(&data(json!({"count": 7})), &rules).is_empty());
    }

    #[test]
    fn enum_membership_is_strict() {
        let rules = RuleSet::new().field("level", FieldRule::optional().one_of([1, 2]));
        assert!(evaluate(&data(json!({"level": 2})), &rules).is_empty());
        let errors = evaluate(&data(json!({"level": "2"})), &rules);
        assert_eq!(messages(&errors), vec!["level must be one of: 1, 2"]);
    }

    #[test]
    fn enum_numbers_compare_by_value() {
        let rules = RuleSet::new().field("level", FieldRule::optional().one_of([1, 2]));
        assert!(evaluate(&data(json!({"level": 2.0})), &rules).is_empty());

        let rules = RuleSet::new().field("ratio", FieldRule::optional().one_of([0.5, 2.0]));
        assert!(evaluate(&data(json!({"ratio": 2})), &rules).is_empty());
        assert_eq!(evaluate(&data(json!({"ratio": 3})), &rules).len(), 1);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let rules = RuleSet::new()
            .field("name", FieldRule::required().length(3, 5))
            .field("price", FieldRule::required().number().min(0.0));
        let input = data(json!({"name": "toolong", "price": "x"}));
        let first = evaluate(&input, &rules);
        let second = evaluate(&input, &rules);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }
}
