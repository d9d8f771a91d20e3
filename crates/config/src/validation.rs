//! Reusable field validators
//!
//! `Settings::validate` composes these; each returns a single
//! `ValidationError` so failures across fields can be collected and
//! reported together.

pub use crate::error::ValidationError;

/// Common validators for config values
pub struct Validator;

impl Validator {
    /// Validates that a number is not below `min`
    pub fn at_least(value: i64, min: i64, field: &str) -> Result<(), ValidationError> {
        if value < min {
            Err(ValidationError::with_value(
                field,
                format!("must be {} or greater", min),
                value,
            ))
        } else {
            Ok(())
        }
    }

    /// Validates that a string is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::new(field, "must not be empty"))
        } else {
            Ok(())
        }
    }

    /// Validates that a URL uses an HTTP scheme
    pub fn http_url(value: &str, field: &str) -> Result<(), ValidationError> {
        let lower = value.trim().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(())
        } else {
            Err(ValidationError::with_value(
                field,
                "must start with http:// or https://",
                value,
            ))
        }
    }

    /// Validates that a value was changed from its template placeholder
    pub fn not_placeholder(value: &str, placeholder: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim() == placeholder {
            Err(ValidationError::new(
                field,
                "still contains the template placeholder, please fill it in",
            ))
        } else {
            Ok(())
        }
    }

    /// Collects multiple validation results into a single result
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(|r| r.err()).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
