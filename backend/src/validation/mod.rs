//! Declarative request validation.
//!
//! Each endpoint declares a [`Schema`] of per-field rules for its body, path
//! params and query. [`evaluate`] checks one of those bundles and returns every
//! failed check; the `validate_request` middleware drives it per request.

pub mod error;
pub mod evaluator;
pub mod rules;
pub mod schemas;

pub use error::{ValidationError, ValidationErrorKind};
pub use evaluator::{coerce_number, evaluate};
pub use rules::{FieldRule, FieldType, RuleSet, SchemaError};
pub use schemas::{DataSource, MalformedSchema, Schema};
