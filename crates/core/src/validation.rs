//! Declarative field validation for outgoing request payloads
//!
//! Every request type sent to the Ingram Micro API declares its field rules
//! through the fluent [`Validator`] and exposes them via [`Validate`]. The
//! client runs these rules before any network call is made.
//!
//! # Example
//!
//! ```rust
//! use ingram_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("customernumber", "20-222222")
//!     .max_length("customerponumber", "PO-1", 18)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single violated field rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation (dotted path for nested structures)
    pub field: String,
    /// Error message
    pub message: String,
    /// Rule code (`REQUIRED`, `MIN_LENGTH`, ...)
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of running a set of rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Names of every violated field, in rule order
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    /// Merge another result, prefixing its field names with `prefix.`
    pub fn merge_nested(&mut self, prefix: &str, other: ValidationResult) {
        self.errors
            .extend(other.errors.into_iter().map(|mut error| {
                error.field = format!("{prefix}.{}", error.field);
                error
            }));
    }

    /// Convert to a `Result`, handing back the violations on failure
    ///
    /// # Errors
    ///
    /// Returns every collected [`ValidationError`] when at least one rule failed.
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Types that carry field rules
pub trait Validate {
    /// Run every rule and collect the violations
    fn validate(&self) -> ValidationResult;
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> ValidationResult {
        self.as_ref().map(Validate::validate).unwrap_or_default()
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    #[must_use]
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate that a field is not empty
    #[must_use]
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Field is required".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty value".to_string()),
                actual: Some("empty".to_string()),
            });
        }
        self
    }

    /// Validate minimum length in characters
    #[must_use]
    pub fn min_length(mut self, field: &str, value: &str, min: usize) -> Self {
        let len = value.chars().count();
        if len < min {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be at least {min} characters"),
                code: "MIN_LENGTH".to_string(),
                expected: Some(format!(">= {min} chars")),
                actual: Some(format!("{len} chars")),
            });
        }
        self
    }

    /// Validate maximum length in characters
    #[must_use]
    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        let len = value.chars().count();
        if len > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be at most {max} characters"),
                code: "MAX_LENGTH".to_string(),
                expected: Some(format!("<= {max} chars")),
                actual: Some(format!("{len} chars")),
            });
        }
        self
    }

    /// Validate a numeric range (inclusive)
    #[must_use]
    pub fn range<T: PartialOrd + fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be between {min} and {max}"),
                code: "RANGE".to_string(),
                expected: Some(format!("{min} - {max}")),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Add a custom validation; the closure returns a message on failure
    #[must_use]
    pub fn custom<F>(mut self, field: &str, f: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(message) = f() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message,
                code: "CUSTOM".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Run the rules of a nested structure under `prefix`
    #[must_use]
    pub fn nested<V: Validate + ?Sized>(mut self, prefix: &str, value: &V) -> Self {
        self.result.merge_nested(prefix, value.validate());
        self
    }

    /// Run the rules of every element, prefixed `prefix[index]`
    #[must_use]
    pub fn each<V: Validate>(mut self, prefix: &str, values: &[V]) -> Self {
        for (index, value) in values.iter().enumerate() {
            self.result
                .merge_nested(&format!("{prefix}[{index}]"), value.validate());
        }
        self
    }

    /// Complete validation and return result
    #[must_use]
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}
