//! Validation error types
//!
//! Two channels that never mix:
//! - [`FieldErrors`]: the data failed the schema. One message per field,
//!   collected across the whole record.
//! - [`SchemaError`]: the schema itself is broken. Aborts the call.

use std::fmt;

// ============================================================================
// Validation Result
// ============================================================================

/// Validation result type
pub type ValidationResult<T> = Result<T, FieldErrors>;

/// Message recorded when a required key is missing from the record
pub const REQUIRED_MESSAGE: &str = "Required field.";

/// Message recorded when a present value fails its predicate
pub fn invalid_message(field: &str) -> String {
    format!("Invalid value for {}.", field)
}

// ============================================================================
// Field Errors Collection
// ============================================================================

/// Per-field validation failures, in schema order
///
/// Each schema field appears at most once: the first failure reason for a
/// field wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of failing fields
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Record a failure. A second failure for the same field is dropped.
    pub fn add(&mut self, error: FieldError) {
        if !self.contains(&error.field) {
            self.errors.push(error);
        }
    }

    /// Whether `field` has a recorded failure
    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Message recorded for `field`
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Failing field names in schema order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Convert to Result - Ok if no errors, Err if there are errors
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Render as a `{ field: message }` JSON object
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.errors
                .iter()
                .map(|e| (e.field.clone(), serde_json::Value::String(e.message.clone())))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

// ============================================================================
// Single Field Error
// ============================================================================

/// A single field failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Schema field name
    pub field: String,

    /// Human-readable error message
    pub message: String,

    /// Error kind classification
    pub kind: ErrorKind,
}

impl FieldError {
    /// Required key absent from the record
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: REQUIRED_MESSAGE.to_string(),
            kind: ErrorKind::Missing,
        }
    }

    /// Present value rejected by its type predicate
    pub fn invalid(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            message: invalid_message(&field),
            field,
            kind: ErrorKind::Invalid,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.field, self.message, self.kind)
    }
}

// ============================================================================
// Error Kind Classification
// ============================================================================

/// Classification of field failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required field missing
    Missing,

    /// Wrong type or constraint violation
    Invalid,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}

// ============================================================================
// Schema Errors
// ============================================================================

/// The schema is malformed. Raised, never collected.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A field rule names a type tag the registry does not know.
    #[error("Invalid validator type: {type_tag} (field '{field}')")]
    UnknownType { field: String, type_tag: String },

    /// A `pattern` option did not compile.
    #[error("invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// An option does not belong to the field's type, or has the wrong shape.
    #[error("invalid option '{option}' for field '{field}': {reason}")]
    InvalidOption {
        field: String,
        option: String,
        reason: String,
    },

    /// The schema document does not have the expected structure.
    #[error("malformed schema: {0}")]
    Malformed(String),

    /// The schema document is not valid JSON.
    #[error("schema is not valid JSON: {0}")]
    Json(String),
}

impl SchemaError {
    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    pub(crate) fn invalid_option(
        field: impl Into<String>,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            field: field.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
