//! Parameter validation.
//!
//! Search inputs are checked once, up front, so the search itself never has to
//! fail. A type implements [`Validate`] by returning every problem it finds as
//! a [`ValidationError`]; [`into_anyhow`] turns a failed result into a single
//! error for callers that propagate with `?`.
//!
//! # Example
//!
//! ```
//! use keyspace::validation::{validators, combine_validations, Validate, ValidationResult};
//!
//! struct Sizes { length: usize, depths: usize }
//!
//! impl Validate for Sizes {
//!     fn validate(&self) -> ValidationResult {
//!         combine_validations(vec![
//!             validators::at_least("length", self.length, 1),
//!             validators::in_range("depths", self.depths, 1, 256),
//!         ])
//!     }
//! }
//!
//! assert!(Sizes { length: 10, depths: 6 }.validate().is_ok());
//! assert_eq!(Sizes { length: 0, depths: 300 }.validate().unwrap_err().len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for validation operations.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Trait for types that can be validated.
pub trait Validate {
    /// Validate this instance and return a list of errors if invalid.
    fn validate(&self) -> ValidationResult;
}

/// A single validation error with context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The field that failed validation (optional)
    pub field: Option<String>,
    /// Human-readable error message
    pub message: String,
    /// Error code for categorization (optional)
    pub code: Option<String>,
}

impl ValidationError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            field: None,
            message: message.into(),
            code: None,
        }
    }

    pub fn field<S: Into<String>, M: Into<String>>(field: S, message: M) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
            code: None,
        }
    }

    #[must_use]
    pub fn with_code<S: Into<String>>(mut self, code: S) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref field) = self.field {
            write!(f, "[{field}] {}", self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(ref code) = self.code {
            write!(f, " (code: {code})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Join errors into one line.
#[must_use]
pub fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convert a failed validation into an `anyhow` error naming every problem.
///
/// # Errors
///
/// Returns an error if `result` holds any validation errors.
pub fn into_anyhow(what: &str, result: ValidationResult) -> anyhow::Result<()> {
    result.map_err(|errors| anyhow::anyhow!("invalid {what}: {}", format_errors(&errors)))
}

/// Validation helpers for numeric parameters.
pub mod validators {
    use super::{ValidationError, ValidationResult};
    use std::fmt;

    /// Validate that a value is within `[min, max]`.
    pub fn in_range<T: PartialOrd + fmt::Display>(
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> ValidationResult {
        if value >= min && value <= max {
            Ok(())
        } else {
            Err(vec![
                ValidationError::field(field, format!("must be between {min} and {max}, got {value}"))
                    .with_code("out_of_range"),
            ])
        }
    }

    /// Validate that a value is at least `min`.
    pub fn at_least<T: PartialOrd + fmt::Display>(field: &str, value: T, min: T) -> ValidationResult {
        if value >= min {
            Ok(())
        } else {
            Err(vec![
                ValidationError::field(field, format!("must be at least {min}, got {value}"))
                    .with_code("too_small"),
            ])
        }
    }
}

/// Combine multiple validation results.
pub fn combine_validations(results: Vec<ValidationResult>) -> ValidationResult {
    let mut all_errors = Vec::new();
    for result in results {
        if let Err(mut errors) = result {
            all_errors.append(&mut errors);
        }
    }
    if all_errors.is_empty() {
        Ok(())
    } else {
        Err(all_errors)
    }
}
