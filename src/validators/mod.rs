pub mod compose_validator;

pub use compose_validator::{SchemaViolation, ValidationResult, validate};
