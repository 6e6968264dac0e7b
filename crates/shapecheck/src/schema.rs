//! Schema definitions: type tags, per-type options and field rules
//!
//! Options are tied to their type tag. A string rule can only carry
//! [`StringOptions`], a number rule [`NumberOptions`], and so on, so a bound
//! that the type would never look at cannot be written down.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

// ============================================================================
// Type Tag
// ============================================================================

/// The kind of value a field must hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    Array,
}

impl TypeTag {
    /// All tags known to the registry
    pub const ALL: [TypeTag; 4] = [Self::String, Self::Number, Self::Boolean, Self::Array];

    /// Schema-facing name of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a name does not match any [`TypeTag`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTypeTag(pub String);

impl fmt::Display for UnknownTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown type tag: {}", self.0)
    }
}

impl std::error::Error for UnknownTypeTag {}

impl FromStr for TypeTag {
    type Err = UnknownTypeTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownTypeTag(s.to_string()))
    }
}

// ============================================================================
// String Options
// ============================================================================

/// Constraints for string fields
#[derive(Debug, Clone, Default)]
pub struct StringOptions {
    /// Minimum length
    pub min_length: Option<usize>,
    /// Maximum length
    pub max_length: Option<usize>,
    /// Pattern the value must contain a match for
    pub pattern: Option<Regex>,
}

impl StringOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Compile and attach a pattern
    pub fn pattern(self, pattern: &str) -> Result<Self, regex::Error> {
        Ok(self.with_regex(Regex::new(pattern)?))
    }

    /// Attach an already compiled pattern
    pub fn with_regex(mut self, regex: Regex) -> Self {
        self.pattern = Some(regex);
        self
    }
}

// ============================================================================
// Number Options
// ============================================================================

/// Constraints for number fields (inclusive bounds)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberOptions {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumberOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

// ============================================================================
// Boolean Options
// ============================================================================

/// Booleans take no constraints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanOptions;

// ============================================================================
// Array Options
// ============================================================================

/// Constraints for array fields (element count)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrayOptions {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl ArrayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

// ============================================================================
// Field Kind & Rule
// ============================================================================

/// Type tag together with the options that belong to it
#[derive(Debug, Clone)]
pub enum FieldKind {
    String(StringOptions),
    Number(NumberOptions),
    Boolean(BooleanOptions),
    Array(ArrayOptions),
}

impl FieldKind {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::String(_) => TypeTag::String,
            Self::Number(_) => TypeTag::Number,
            Self::Boolean(_) => TypeTag::Boolean,
            Self::Array(_) => TypeTag::Array,
        }
    }
}

/// Per-field schema entry
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Expected type and its constraints
    pub kind: FieldKind,
    /// Whether the key must exist in the record
    pub required: bool,
}

impl FieldRule {
    /// Create an optional rule of the given kind
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
        }
    }

    pub fn string(options: StringOptions) -> Self {
        Self::new(FieldKind::String(options))
    }

    pub fn number(options: NumberOptions) -> Self {
        Self::new(FieldKind::Number(options))
    }

    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean(BooleanOptions))
    }

    pub fn array(options: ArrayOptions) -> Self {
        Self::new(FieldKind::Array(options))
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn type_tag(&self) -> TypeTag {
        self.kind.type_tag()
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Ordered field name to [`FieldRule`] mapping
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, FieldRule)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Schema::insert`]
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.insert(name, rule);
        self
    }

    /// Add a rule. Redefining a field replaces its rule in place.
    pub fn insert(&mut self, name: impl Into<String>, rule: FieldRule) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = rule,
            None => self.fields.push((name, rule)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rule)| rule)
    }

    /// Fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(n, rule)| (n.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
