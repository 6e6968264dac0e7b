//! Schema evaluator
//!
//! Walks the schema in declaration order and applies, per field:
//! 1. required rule (key must exist, any value including null),
//! 2. absent or null values are skipped,
//! 3. the registry predicate for the field's type.
//!
//! Failures are accumulated; one field failing never stops the others.

use tracing::{debug, trace};

use crate::config::ValidatorConfig;
use crate::errors::{FieldError, FieldErrors, ValidationResult};
use crate::registry;
use crate::schema::{FieldKind, FieldRule, Schema};
use crate::types::{Record, Value};

// ============================================================================
// Public API
// ============================================================================

/// Validate a record against a schema with the default configuration
///
/// # Example
///
/// ```
/// use shapecheck::{validate, FieldRule, NumberOptions, Record, Schema};
///
/// let schema = Schema::new()
///     .field("age", FieldRule::number(NumberOptions::new().min(18.0)).required());
///
/// assert!(validate(&Record::new().with("age", 25), &schema).is_ok());
///
/// let errors = validate(&Record::new(), &schema).unwrap_err();
/// assert_eq!(errors.get("age"), Some("Required field."));
/// ```
pub fn validate(data: &Record, schema: &Schema) -> ValidationResult<()> {
    Validator::default().validate(data, schema)
}

/// Schema evaluator bound to a [`ValidatorConfig`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate every schema field against `data`
    pub fn validate(&self, data: &Record, schema: &Schema) -> ValidationResult<()> {
        let mut errors = FieldErrors::new();

        for (name, rule) in schema.iter() {
            self.validate_field(name, rule, data, &mut errors);
        }

        if !errors.is_empty() {
            debug!(failed = errors.len(), fields = schema.len(), "record failed validation");
        }
        errors.into_result()
    }

    /// Validate one schema field, recording at most one error for it
    pub fn validate_field(
        &self,
        name: &str,
        rule: &FieldRule,
        data: &Record,
        errors: &mut FieldErrors,
    ) {
        if let Some(value) = self.presence(name, rule.required, data, errors) {
            self.check_value(name, value, &rule.kind, errors);
        }
    }

    // ========================================================================
    // Steps
    // ========================================================================

    /// Required and null handling. Returns the value only if it must be type checked.
    pub(crate) fn presence<'a>(
        &self,
        name: &str,
        required: bool,
        data: &'a Record,
        errors: &mut FieldErrors,
    ) -> Option<&'a Value> {
        if required && !data.contains_key(name) {
            debug!(field = name, "required field missing");
            errors.add(FieldError::missing(name));
            return None;
        }

        match data.get(name) {
            None | Some(Value::Null) => {
                trace!(field = name, "no value, skipping");
                None
            }
            Some(value) => Some(value),
        }
    }

    /// Run the registry predicate for `kind` against a present value
    pub(crate) fn check_value(
        &self,
        name: &str,
        value: &Value,
        kind: &FieldKind,
        errors: &mut FieldErrors,
    ) {
        if !registry::check(value, kind, &self.config) {
            debug!(
                field = name,
                expected = %kind.type_tag(),
                got = value.type_name(),
                "value rejected"
            );
            errors.add(FieldError::invalid(name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZeroBounds;
    use crate::errors::ErrorKind;
    use crate::schema::{ArrayOptions, NumberOptions, StringOptions};

    fn user_schema() -> Schema {
        Schema::new()
            .field(
                "username",
                FieldRule::string(StringOptions::new().min_length(3).max_length(20)).required(),
            )
            .field("age", FieldRule::number(NumberOptions::new().min(18.0)).required())
            .field("hobbies", FieldRule::array(ArrayOptions::new().min_length(1)))
    }

    #[test]
    fn test_empty_data_no_required_fields() {
        let schema = Schema::new()
            .field("nickname", FieldRule::string(StringOptions::new()))
            .field("active", FieldRule::boolean());
        assert!(validate(&Record::new(), &schema).is_ok());
    }

    #[test]
    fn test_required_missing_short_circuits() {
        let errors = validate(&Record::new(), &user_schema()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("username"), Some("Required field."));
        assert_eq!(errors.get("age"), Some("Required field."));
        assert!(errors.iter().all(|e| e.kind == ErrorKind::Missing));
        assert!(!errors.contains("hobbies"));
    }

    #[test]
    fn test_explicit_null_satisfies_required() {
        let data = Record::new()
            .with("username", Value::Null)
            .with("age", Value::Null);
        assert!(validate(&data, &user_schema()).is_ok());
    }

    #[test]
    fn test_invalid_value_message() {
        let data = Record::new().with("username", "jo").with("age", 30);
        let errors = validate(&data, &user_schema()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("username"), Some("Invalid value for username."));
    }

    #[test]
    fn test_wrong_type_is_invalid() {
        let data = Record::new().with("username", "john").with("age", "25");
        let errors = validate(&data, &user_schema()).unwrap_err();
        assert_eq!(errors.get("age"), Some("Invalid value for age."));
    }

    #[test]
    fn test_fields_outside_schema_ignored() {
        let data = Record::new()
            .with("username", "john")
            .with("age", 30)
            .with("extra", true);
        assert!(validate(&data, &user_schema()).is_ok());
    }

    #[test]
    fn test_errors_in_schema_order() {
        let data = Record::new().with("username", 1).with("age", 1).with("hobbies", 1);
        let errors = validate(&data, &user_schema()).unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, vec!["username", "age", "hobbies"]);
    }

    #[test]
    fn test_validator_config_applies() {
        let schema = Schema::new().field("offset", FieldRule::number(NumberOptions::new().min(0.0)));
        let data = Record::new().with("offset", -5);

        assert!(validate(&data, &schema).is_err());

        let legacy = Validator::new(ValidatorConfig::new().zero_bounds(ZeroBounds::Ignore));
        assert!(legacy.validate(&data, &schema).is_ok());
    }
}
