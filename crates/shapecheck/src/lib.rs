//! shapecheck
//!
//! Declarative validation of flat records. A [`Schema`] names the fields a
//! [`Record`] may carry, the type each must have, whether it is required and
//! which bounds apply. Validation yields `Ok(())` or one message per failing
//! field.
//!
//! # Features
//!
//! - **Default**: `serde` - load schemas and records from JSON documents,
//!   serialize [`FieldErrors`]
//!
//! # Example
//!
//! ```rust
//! use shapecheck::{validate, ArrayOptions, FieldRule, NumberOptions, Record, Schema, StringOptions};
//!
//! let schema = Schema::new()
//!     .field("username", FieldRule::string(StringOptions::new().min_length(3).max_length(20)).required())
//!     .field("age", FieldRule::number(NumberOptions::new().min(18.0)).required())
//!     .field("email", FieldRule::string(StringOptions::new().pattern(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()).required())
//!     .field("hobbies", FieldRule::array(ArrayOptions::new().min_length(1)));
//!
//! let data = Record::new()
//!     .with("username", "jo")
//!     .with("age", 16)
//!     .with("email", "not-an-email");
//!
//! let errors = validate(&data, &schema).unwrap_err();
//! assert_eq!(errors.get("username"), Some("Invalid value for username."));
//! assert_eq!(errors.len(), 3);
//! assert!(!errors.contains("hobbies"));
//! ```

// Public modules
pub mod config;
pub mod errors;
pub mod registry;
pub mod schema;
pub mod types;
pub mod validators;

#[cfg(feature = "serde")]
pub mod json;

// Re-export commonly used types
pub use config::{LengthUnit, ValidatorConfig, ZeroBounds};
pub use errors::{ErrorKind, FieldError, FieldErrors, SchemaError, ValidationResult};
pub use registry::Predicate;
pub use schema::{
    ArrayOptions, BooleanOptions, FieldKind, FieldRule, NumberOptions, Schema, StringOptions, TypeTag,
};
pub use types::{Record, Value};
pub use validators::{validate, Validator};

#[cfg(feature = "serde")]
pub use json::validate_json;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
