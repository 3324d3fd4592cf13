//! Declarative field rules and the rule sets that group them.

use serde_json::Value;
use thiserror::Error;

/// Shape constraint a field value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Email,
    Number,
}

/// Constraints attached to a single field.
///
/// Every attribute is optional and checked independently of the others, so a
/// present value can collect one error per violated attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRule {
    pub required: bool,
    pub field_type: Option<FieldType>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub allowed: Option<Vec<Value>>,
}

impl FieldRule {
    /// A rule for a field that may be omitted.
    pub fn optional() -> Self {
        Self::default()
    }

    /// A rule for a field that must be present and non-empty.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn email(mut self) -> Self {
        self.field_type = Some(FieldType::Email);
        self
    }

    pub fn number(mut self) -> Self {
        self.field_type = Some(FieldType::Number);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Shorthand for `min_length(min).max_length(max)`.
    pub fn length(self, min: usize, max: usize) -> Self {
        self.min_length(min).max_length(max)
    }

    /// Restricts the value to the given literals.
    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Reports rule combinations that no value could ever satisfy.
    pub fn check(&self, field: &str) -> Result<(), SchemaError> {
        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(SchemaError::NonFiniteBound {
                    field: field.to_string(),
                });
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(SchemaError::InvertedRange {
                    field: field.to_string(),
                    min,
                    max,
                });
            }
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(SchemaError::InvertedLength {
                    field: field.to_string(),
                    min,
                    max,
                });
            }
        }
        if matches!(&self.allowed, Some(values) if values.is_empty()) {
            return Err(SchemaError::EmptyEnum {
                field: field.to_string(),
            });
        }
        Ok(())
    }
}

/// Ordered mapping from field name to [`FieldRule`].
///
/// Fields are evaluated in insertion order. Declaring a field twice replaces
/// the earlier rule in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    fields: Vec<(String, FieldRule)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = rule,
            None => self.fields.push((name, rule)),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn check(&self) -> Result<(), SchemaError> {
        self.iter().try_for_each(|(name, rule)| rule.check(name))
    }
}

/// A rule that can never be satisfied or cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("field `{field}` has min {min} greater than max {max}")]
    InvertedRange { field: String, min: f64, max: f64 },
    #[error("field `{field}` has minLength {min} greater than maxLength {max}")]
    InvertedLength {
        field: String,
        min: usize,
        max: usize,
    },
    #[error("field `{field}` declares an enum without allowed values")]
    EmptyEnum { field: String },
    #[error("field `{field}` has a numeric bound that is not finite")]
    NonFiniteBound { field: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_replaces_existing_rule_in_place() {
        let rules = RuleSet::new()
            .field("name", FieldRule::required())
            .field("email", FieldRule::optional().email())
            .field("name", FieldRule::optional().max_length(10));

        let fields: Vec<(&str, &FieldRule)> = rules.iter().collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("name", &FieldRule::optional().max_length(10)));
        assert_eq!(fields[1].0, "email");
    }

    #[test]
    fn check_rejects_inverted_numeric_range() {
        let rules = RuleSet::new().field("price", FieldRule::optional().min(10.0).max(1.0));
        assert_eq!(
            rules.check(),
            Err(SchemaError::InvertedRange {
                field: "price".into(),
                min: 10.0,
                max: 1.0
            })
        );
    }

    #[test]
    fn check_rejects_inverted_length() {
        let rule = FieldRule::optional().length(5, 2);
        assert!(matches!(
            rule.check("title"),
            Err(SchemaError::InvertedLength { min: 5, max: 2, .. })
        ));
    }

    #[test]
    fn check_rejects_empty_enum_and_non_finite_bound() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            FieldRule::optional().one_of(empty).check("kind"),
            Err(SchemaError::EmptyEnum { .. })
        ));
        assert!(matches!(
            FieldRule::optional().max(f64::NAN).check("amount"),
            Err(SchemaError::NonFiniteBound { .. })
        ));
    }

    #[test]
    fn check_accepts_consistent_rules() {
        let rule = FieldRule::required()
            .number()
            .min(0.0)
            .max(0.0)
            .length(3, 3)
            .one_of(["a", "b"]);
        assert!(rule.check("field").is_ok());
    }
}
