//! Field-level validation failures reported back to the client.

use serde::Serialize;
use serde_json::Value;

/// Category of a failed field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    MissingRequiredField,
    InvalidType,
    OutOfRange,
    InvalidLength,
    NotInEnum,
}

/// One failed check on one field, serialized as `{field, message}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    #[serde(skip)]
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
            kind,
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(
            ValidationErrorKind::MissingRequiredField,
            field,
            format!("{} is required", field),
        )
    }

    pub fn invalid_email(field: &str) -> Self {
        Self::new(
            ValidationErrorKind::InvalidType,
            field,
            format!("{} must be a valid email", field),
        )
    }

    pub fn not_a_number(field: &str) -> Self {
        Self::new(
            ValidationErrorKind::InvalidType,
            field,
            format!("{} must be a number", field),
        )
    }

    pub fn below_min(field: &str, min: f64) -> Self {
        Self::new(
            ValidationErrorKind::OutOfRange,
            field,
            format!("{} must be at least {}", field, min),
        )
    }

    pub fn above_max(field: &str, max: f64) -> Self {
        Self::new(
            ValidationErrorKind::OutOfRange,
            field,
            format!("{} must be at most {}", field, max),
        )
    }

    pub fn too_short(field: &str, min_length: usize) -> Self {
        Self::new(
            ValidationErrorKind::InvalidLength,
            field,
            format!("{} must be at least {} characters", field, min_length),
        )
    }

    pub fn too_long(field: &str, max_length: usize) -> Self {
        Self::new(
            ValidationErrorKind::InvalidLength,
            field,
            format!("{} must be at most {} characters", field, max_length),
        )
    }

    pub fn not_in_enum(field: &str, allowed: &[Value]) -> Self {
        let joined = allowed
            .iter()
            .map(literal_text)
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(
            ValidationErrorKind::NotInEnum,
            field,
            format!("{} must be one of: {}", field, joined),
        )
    }
}

// Strings render bare, other literals as JSON.
fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bounds_render_in_shortest_form() {
        assert_eq!(ValidationError::below_min("price", 0.0).message, "price must be at least 0");
        assert_eq!(ValidationError::above_max("amount", 2.5).message, "amount must be at most 2.5");
    }

    #[test]
    fn enum_message_joins_literals() {
        let err = ValidationError::not_in_enum("type", &[json!("image"), json!("article"), json!(3)]);
        assert_eq!(err.message, "type must be one of: image, article, 3");
        assert_eq!(err.kind, ValidationErrorKind::NotInEnum);
    }

    #[test]
    fn serializes_field_and_message_only() {
        let value = serde_json::to_value(ValidationError::missing("name")).unwrap();
        assert_eq!(value, json!({"field": "name", "message": "name is required"}));
    }
}
