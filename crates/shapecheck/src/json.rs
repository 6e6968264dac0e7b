//! JSON documents as schemas and records
//!
//! Schema documents look like:
//!
//! ```json
//! {
//!   "username": { "type": "string", "required": true, "options": { "minLength": 3, "maxLength": 20 } },
//!   "age":      { "type": "number", "required": true, "options": { "min": 18 } },
//!   "email":    { "type": "string", "required": true, "options": { "pattern": "^[^\\s@]+@[^\\s@]+\\.[^\\s@]+$" } },
//!   "hobbies":  { "type": "array", "options": { "minLength": 1 } }
//! }
//! ```
//!
//! Here the type tag is a plain string, so this is where an unknown tag can
//! show up. [`Schema::from_json_value`] rejects it up front;
//! [`Validator::validate_json`] resolves each rule only when a value actually
//! needs checking, the same order the evaluator uses for typed schemas.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value as JsonValue};
use tracing::warn;

use crate::errors::{FieldErrors, SchemaError, ValidationResult};
use crate::registry;
use crate::schema::{ArrayOptions, BooleanOptions, FieldKind, FieldRule, NumberOptions, Schema, StringOptions, TypeTag};
use crate::types::Record;
use crate::validators::Validator;

const MIN_LENGTH: &str = "minLength";
const MAX_LENGTH: &str = "maxLength";
const PATTERN: &str = "pattern";
const MIN: &str = "min";
const MAX: &str = "max";

// ============================================================================
// Schema loading
// ============================================================================

impl Schema {
    /// Build a schema from a parsed JSON document, resolving every rule
    pub fn from_json_value(doc: &JsonValue) -> Result<Self, SchemaError> {
        let mut schema = Schema::new();
        for (name, raw) in schema_object(doc)? {
            schema.insert(name.clone(), parse_rule(name, raw)?);
        }
        Ok(schema)
    }

    /// Parse and build a schema from JSON text
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let doc: JsonValue = serde_json::from_str(text)?;
        Self::from_json_value(&doc)
    }
}

/// Validate `data` against a JSON schema document with the default configuration
///
/// The outer `Result` carries schema failures, the inner one data failures.
pub fn validate_json(data: &Record, schema: &JsonValue) -> Result<ValidationResult<()>, SchemaError> {
    Validator::default().validate_json(data, schema)
}

impl Validator {
    /// Validate against a JSON schema document without building a [`Schema`] first
    ///
    /// A rule is only resolved once its value passed the required and null
    /// steps, so a broken rule on a skipped field goes unnoticed. Anything
    /// broken that is reached aborts the call.
    pub fn validate_json(
        &self,
        data: &Record,
        schema: &JsonValue,
    ) -> Result<ValidationResult<()>, SchemaError> {
        let mut errors = FieldErrors::new();

        for (name, raw) in schema_object(schema)? {
            let required = parse_required(name, raw)?;
            if let Some(value) = self.presence(name, required, data, &mut errors) {
                let rule = parse_rule(name, raw)?;
                self.check_value(name, value, &rule.kind, &mut errors);
            }
        }

        Ok(errors.into_result())
    }
}

fn schema_object(doc: &JsonValue) -> Result<&Map<String, JsonValue>, SchemaError> {
    doc.as_object()
        .ok_or_else(|| SchemaError::Malformed("schema must be a JSON object".to_string()))
}

fn rule_object<'a>(field: &str, raw: &'a JsonValue) -> Result<&'a Map<String, JsonValue>, SchemaError> {
    raw.as_object()
        .ok_or_else(|| SchemaError::Malformed(format!("rule for '{}' must be an object", field)))
}

fn parse_required(field: &str, raw: &JsonValue) -> Result<bool, SchemaError> {
    match rule_object(field, raw)?.get("required") {
        None | Some(JsonValue::Null) => Ok(false),
        Some(JsonValue::Bool(b)) => Ok(*b),
        Some(other) => Err(SchemaError::Malformed(format!(
            "'required' for '{}' must be a boolean, got {}",
            field, other
        ))),
    }
}

/// Resolve one field rule: type tag, required flag and options
pub fn parse_rule(field: &str, raw: &JsonValue) -> Result<FieldRule, SchemaError> {
    let obj = rule_object(field, raw)?;

    let type_name = match obj.get("type") {
        Some(JsonValue::String(s)) => s.as_str(),
        Some(other) => {
            return Err(SchemaError::Malformed(format!(
                "'type' for '{}' must be a string, got {}",
                field, other
            )))
        }
        None => {
            return Err(SchemaError::Malformed(format!(
                "rule for '{}' has no 'type'",
                field
            )))
        }
    };

    let tag = registry::lookup(type_name).ok_or_else(|| {
        warn!(field, type_tag = type_name, "unknown validator type");
        SchemaError::UnknownType {
            field: field.to_string(),
            type_tag: type_name.to_string(),
        }
    })?;

    let empty = Map::new();
    let options = match obj.get("options") {
        None | Some(JsonValue::Null) => &empty,
        Some(JsonValue::Object(map)) => map,
        Some(_) => return Err(SchemaError::invalid_option(field, "options", "must be an object")),
    };

    let kind = match tag {
        TypeTag::String => FieldKind::String(string_options(field, options)?),
        TypeTag::Number => FieldKind::Number(number_options(field, options)?),
        TypeTag::Boolean => {
            allow_only(field, tag, options, &[])?;
            FieldKind::Boolean(BooleanOptions)
        }
        TypeTag::Array => FieldKind::Array(array_options(field, options)?),
    };

    Ok(FieldRule {
        kind,
        required: parse_required(field, raw)?,
    })
}

// ============================================================================
// Options
// ============================================================================

fn allow_only(
    field: &str,
    tag: TypeTag,
    options: &Map<String, JsonValue>,
    allowed: &[&str],
) -> Result<(), SchemaError> {
    match options.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(key) => Err(SchemaError::invalid_option(
            field,
            key.as_str(),
            format!("not supported for type {}", tag),
        )),
        None => Ok(()),
    }
}

fn length_option(
    field: &str,
    options: &Map<String, JsonValue>,
    key: &str,
) -> Result<Option<usize>, SchemaError> {
    match options.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => n
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| SchemaError::invalid_option(field, key, "must be a non-negative integer")),
        Some(_) => Err(SchemaError::invalid_option(field, key, "must be a number")),
    }
}

fn number_option(
    field: &str,
    options: &Map<String, JsonValue>,
    key: &str,
) -> Result<Option<f64>, SchemaError> {
    match options.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| SchemaError::invalid_option(field, key, "not representable as f64")),
        Some(_) => Err(SchemaError::invalid_option(field, key, "must be a number")),
    }
}

fn string_options(field: &str, options: &Map<String, JsonValue>) -> Result<StringOptions, SchemaError> {
    allow_only(field, TypeTag::String, options, &[MIN_LENGTH, MAX_LENGTH, PATTERN])?;

    let mut opts = StringOptions {
        min_length: length_option(field, options, MIN_LENGTH)?,
        max_length: length_option(field, options, MAX_LENGTH)?,
        pattern: None,
    };

    match options.get(PATTERN) {
        None | Some(JsonValue::Null) => {}
        Some(JsonValue::String(p)) => {
            opts = opts.pattern(p).map_err(|source| SchemaError::InvalidPattern {
                field: field.to_string(),
                source,
            })?;
        }
        Some(_) => return Err(SchemaError::invalid_option(field, PATTERN, "must be a string")),
    }

    Ok(opts)
}

fn number_options(field: &str, options: &Map<String, JsonValue>) -> Result<NumberOptions, SchemaError> {
    allow_only(field, TypeTag::Number, options, &[MIN, MAX])?;
    Ok(NumberOptions {
        min: number_option(field, options, MIN)?,
        max: number_option(field, options, MAX)?,
    })
}

fn array_options(field: &str, options: &Map<String, JsonValue>) -> Result<ArrayOptions, SchemaError> {
    allow_only(field, TypeTag::Array, options, &[MIN_LENGTH, MAX_LENGTH])?;
    Ok(ArrayOptions {
        min_length: length_option(field, options, MIN_LENGTH)?,
        max_length: length_option(field, options, MAX_LENGTH)?,
    })
}

// ============================================================================
// Records
// ============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, JsonValue>::deserialize(deserializer)?;
        Ok(map.into_iter().collect())
    }
}

impl Record {
    /// Record from a JSON object
    pub fn from_json_value(doc: JsonValue) -> Result<Self, serde_json::Error> {
        serde_json::from_value(doc)
    }

    /// Record from JSON text holding an object
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

// ============================================================================
// Error output
// ============================================================================

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for error in self {
            map.serialize_entry(&error.field, &error.message)?;
        }
        map.end()
    }
}
