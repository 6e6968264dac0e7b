//! Type tag to predicate dispatch
//!
//! One [`Predicate`] implementation per [`TypeTag`]. A predicate answers a
//! single yes/no question: does this value have the right type and satisfy
//! every bound that is set? It never says which bound failed.

use crate::config::ValidatorConfig;
use crate::schema::{ArrayOptions, BooleanOptions, FieldKind, NumberOptions, StringOptions, TypeTag};
use crate::types::Value;

/// Check of a single value against one type and its options
pub trait Predicate: Send + Sync {
    /// Tag this predicate is registered under
    fn type_tag(&self) -> TypeTag;

    /// `true` if `value` is acceptable
    fn check(&self, value: &Value, config: &ValidatorConfig) -> bool;
}

/// Predicate for a field kind
pub fn predicate_for(kind: &FieldKind) -> &dyn Predicate {
    match kind {
        FieldKind::String(options) => options,
        FieldKind::Number(options) => options,
        FieldKind::Boolean(options) => options,
        FieldKind::Array(options) => options,
    }
}

/// Resolve a schema-facing type name
pub fn lookup(name: &str) -> Option<TypeTag> {
    name.parse().ok()
}

/// Shorthand for `predicate_for(kind).check(value, config)`
pub fn check(value: &Value, kind: &FieldKind, config: &ValidatorConfig) -> bool {
    predicate_for(kind).check(value, config)
}

fn within_length(len: usize, min: Option<usize>, max: Option<usize>) -> bool {
    if let Some(min) = min {
        if len < min {
            return false;
        }
    }
    if let Some(max) = max {
        if len > max {
            return false;
        }
    }
    true
}

// ============================================================================
// String
// ============================================================================

impl Predicate for StringOptions {
    fn type_tag(&self) -> TypeTag {
        TypeTag::String
    }

    fn check(&self, value: &Value, config: &ValidatorConfig) -> bool {
        let Value::String(s) = value else {
            return false;
        };

        let len = config.length_unit.measure(s);
        if !within_length(
            len,
            config.length_bound(self.min_length),
            config.length_bound(self.max_length),
        ) {
            return false;
        }

        match &self.pattern {
            Some(re) => re.is_match(s),
            None => true,
        }
    }
}

// ============================================================================
// Number
// ============================================================================

impl Predicate for NumberOptions {
    fn type_tag(&self) -> TypeTag {
        TypeTag::Number
    }

    fn check(&self, value: &Value, config: &ValidatorConfig) -> bool {
        let num = match value.as_f64() {
            Some(n) if !n.is_nan() => n,
            _ => return false,
        };

        if let Some(min) = config.numeric_bound(self.min) {
            if num < min {
                return false;
            }
        }
        if let Some(max) = config.numeric_bound(self.max) {
            if num > max {
                return false;
            }
        }
        true
    }
}

// ============================================================================
// Boolean
// ============================================================================

impl Predicate for BooleanOptions {
    fn type_tag(&self) -> TypeTag {
        TypeTag::Boolean
    }

    fn check(&self, value: &Value, _config: &ValidatorConfig) -> bool {
        matches!(value, Value::Bool(_))
    }
}

// ============================================================================
// Array
// ============================================================================

impl Predicate for ArrayOptions {
    fn type_tag(&self) -> TypeTag {
        TypeTag::Array
    }

    fn check(&self, value: &Value, config: &ValidatorConfig) -> bool {
        match value {
            Value::List(items) => within_length(
                items.len(),
                config.length_bound(self.min_length),
                config.length_bound(self.max_length),
            ),
            _ => false,
        }
    }
}
