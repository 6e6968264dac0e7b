//! Basic Validation Example
//!
//! Validates a sample user record and prints the outcome.
//!
//! Run with:
//! ```bash
//! cargo run -p shapecheck --example basic_validation
//! ```

use shapecheck::{validate, ArrayOptions, FieldRule, NumberOptions, Record, Schema, StringOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let schema = Schema::new()
        .field("username", FieldRule::string(StringOptions::new().min_length(3).max_length(20)).required())
        .field("age", FieldRule::number(NumberOptions::new().min(18.0)).required())
        .field(
            "email",
            FieldRule::string(StringOptions::new().pattern(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")?).required(),
        )
        .field("hobbies", FieldRule::array(ArrayOptions::new().min_length(1)));

    let records = [
        Record::new()
            .with("username", "john_doe")
            .with("age", 25)
            .with("email", "john@example.com")
            .with("hobbies", vec!["reading", "traveling"]),
        Record::new()
            .with("username", "jo")
            .with("age", 16)
            .with("email", "not-an-email"),
    ];

    for data in &records {
        match validate(data, &schema) {
            Ok(()) => println!("Data is valid."),
            Err(errors) => println!("Validation errors: {}", serde_json::to_string_pretty(&errors)?),
        }
    }

    Ok(())
}
