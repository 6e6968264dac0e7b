//! End-to-end validation tests

use serde_json::json;
use shapecheck::{
    validate, validate_json, ArrayOptions, ErrorKind, FieldRule, NumberOptions, Record, Schema,
    SchemaError, StringOptions, Validator, ValidatorConfig, Value,
};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn user_schema() -> Schema {
    Schema::new()
        .field(
            "username",
            FieldRule::string(StringOptions::new().min_length(3).max_length(20)).required(),
        )
        .field("age", FieldRule::number(NumberOptions::new().min(18.0)).required())
        .field(
            "email",
            FieldRule::string(StringOptions::new().pattern(EMAIL_PATTERN).unwrap()).required(),
        )
        .field("hobbies", FieldRule::array(ArrayOptions::new().min_length(1)))
}

fn user_schema_json() -> serde_json::Value {
    json!({
        "username": { "type": "string", "required": true, "options": { "minLength": 3, "maxLength": 20 } },
        "age": { "type": "number", "required": true, "options": { "min": 18 } },
        "email": { "type": "string", "required": true, "options": { "pattern": EMAIL_PATTERN } },
        "hobbies": { "type": "array", "required": false, "options": { "minLength": 1 } }
    })
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_valid_user() {
    init_tracing();
    let data = Record::new()
        .with("username", "john_doe")
        .with("age", 25)
        .with("email", "john@example.com")
        .with("hobbies", vec!["reading", "traveling"]);

    assert!(validate(&data, &user_schema()).is_ok());
}

#[test]
fn test_invalid_user() {
    init_tracing();
    let data = Record::new()
        .with("username", "jo")
        .with("age", 16)
        .with("email", "not-an-email");

    let errors = validate(&data, &user_schema()).unwrap_err();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get("username"), Some("Invalid value for username."));
    assert_eq!(errors.get("age"), Some("Invalid value for age."));
    assert_eq!(errors.get("email"), Some("Invalid value for email."));
    assert!(!errors.contains("hobbies"));
}

#[test]
fn test_json_schema_matches_typed_schema() {
    let typed = Schema::from_json_value(&user_schema_json()).unwrap();
    let records = [
        Record::new(),
        Record::new().with("username", "jo").with("age", 16).with("email", "x"),
        Record::new()
            .with("username", "john_doe")
            .with("age", 25)
            .with("email", "john@example.com")
            .with("hobbies", Vec::<Value>::new()),
    ];

    for data in &records {
        assert_eq!(validate(data, &typed), validate(data, &user_schema()));
        assert_eq!(
            validate_json(data, &user_schema_json()).unwrap(),
            validate(data, &user_schema())
        );
    }
}

#[test]
fn test_json_record_end_to_end() {
    let data = Record::from_json_str(
        r#"{ "username": "john_doe", "age": 25, "email": "john@example.com", "hobbies": ["reading"] }"#,
    )
    .unwrap();
    assert!(validate_json(&data, &user_schema_json()).unwrap().is_ok());
}

// ============================================================================
// Presence
// ============================================================================

#[test]
fn test_no_required_fields_empty_data() {
    let schema = Schema::new()
        .field("a", FieldRule::string(StringOptions::new().min_length(5)))
        .field("b", FieldRule::number(NumberOptions::new().max(1.0)))
        .field("c", FieldRule::boolean())
        .field("d", FieldRule::array(ArrayOptions::new().min_length(2)));
    assert!(validate(&Record::new(), &schema).is_ok());
}

#[test]
fn test_required_missing() {
    let errors = validate(&Record::new(), &user_schema()).unwrap_err();
    for field in ["username", "age", "email"] {
        assert_eq!(errors.get(field), Some("Required field."));
    }
    assert!(errors.iter().all(|e| e.kind == ErrorKind::Missing));
    assert_eq!(errors.len(), 3);
}

#[test]
fn test_required_null_passes() {
    let data = Record::new()
        .with("username", Value::Null)
        .with("age", Value::Null)
        .with("email", Value::Null);
    assert!(validate(&data, &user_schema()).is_ok());
}

#[test]
fn test_optional_null_skipped() {
    let data = Record::new()
        .with("username", "john_doe")
        .with("age", 25)
        .with("email", "john@example.com")
        .with("hobbies", Value::Null);
    assert!(validate(&data, &user_schema()).is_ok());
}

#[test]
fn test_error_keys_subset_of_schema() {
    let data = Record::new()
        .with("username", 7)
        .with("unknown", "whatever")
        .with("hobbies", "not a list");
    let errors = validate(&data, &user_schema()).unwrap_err();
    let schema = user_schema();
    assert!(errors.fields().all(|f| schema.get(f).is_some()));
    assert!(!errors.contains("unknown"));
}

// ============================================================================
// Constraints
// ============================================================================

#[test]
fn test_string_min_length() {
    let schema = Schema::new().field("s", FieldRule::string(StringOptions::new().min_length(3)));
    assert!(validate(&Record::new().with("s", "ab"), &schema).is_err());
    assert!(validate(&Record::new().with("s", "abc"), &schema).is_ok());
}

#[test]
fn test_number_min() {
    let schema = Schema::new().field("n", FieldRule::number(NumberOptions::new().min(18.0)));
    assert!(validate(&Record::new().with("n", 17), &schema).is_err());
    assert!(validate(&Record::new().with("n", 18), &schema).is_ok());
}

#[test]
fn test_number_min_zero() {
    let schema = Schema::new().field("n", FieldRule::number(NumberOptions::new().min(0.0)));
    let data = Record::new().with("n", -5);

    assert!(validate(&data, &schema).is_err());

    let legacy = Validator::new(ValidatorConfig::legacy());
    assert!(legacy.validate(&data, &schema).is_ok());
}

#[test]
fn test_number_min_zero_json_legacy() {
    let schema = json!({ "n": { "type": "number", "options": { "min": 0 } } });
    let data = Record::new().with("n", -5);
    let legacy = Validator::new(ValidatorConfig::legacy());
    assert!(legacy.validate_json(&data, &schema).unwrap().is_ok());
    assert!(validate_json(&data, &schema).unwrap().is_err());
}

#[test]
fn test_number_nan_invalid() {
    let schema = Schema::new().field("n", FieldRule::number(NumberOptions::new()));
    let errors = validate(&Record::new().with("n", f64::NAN), &schema).unwrap_err();
    assert_eq!(errors.get("n"), Some("Invalid value for n."));
}

#[test]
fn test_array_min_length() {
    let schema = Schema::new().field("a", FieldRule::array(ArrayOptions::new().min_length(1)));
    assert!(validate(&Record::new().with("a", Vec::<Value>::new()), &schema).is_err());
    assert!(validate(&Record::new().with("a", vec!["x"]), &schema).is_ok());
}

#[test]
fn test_boolean_type_only() {
    let schema = Schema::new().field("flag", FieldRule::boolean().required());
    assert!(validate(&Record::new().with("flag", false), &schema).is_ok());
    assert!(validate(&Record::new().with("flag", "false"), &schema).is_err());
}

// ============================================================================
// Schema failures
// ============================================================================

#[test]
fn test_unknown_type_raises() {
    init_tracing();
    let data = Record::new().with("born", "2000-01-01");
    let schema = json!({ "born": { "type": "date", "required": true } });

    let err = validate_json(&data, &schema).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownType { ref type_tag, .. } if type_tag == "date"));
    assert!(err.to_string().contains("date"));

    assert!(Schema::from_json_value(&schema).is_err());
}

#[test]
fn test_unknown_type_aborts_whole_call() {
    let data = Record::new().with("born", "2000-01-01");
    let schema = json!({
        "name": { "type": "string", "required": true },
        "born": { "type": "date" },
        "age": { "type": "number", "required": true }
    });
    assert!(validate_json(&data, &schema).is_err());
}
