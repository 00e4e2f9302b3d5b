//! The outcome of a validation.

use indexmap::IndexMap;
use serde_json::{json, Value};
use stillwater::Validation;

use crate::error::{ErrorCode, ValidationErrorDetail, ValidationErrors};

/// The result of [`Validator::validate`](crate::Validator::validate) or
/// [`Validator::validate_first`](crate::Validator::validate_first).
///
/// A `Failure` always holds at least one error. The query methods are also
/// available on `Success`, where they report no errors.
///
/// # Example
///
/// ```rust
/// use fieldwise::{ErrorCode, ValidationErrorDetail, ValidationResult};
///
/// let result = ValidationResult::from_errors(vec![
///     ValidationErrorDetail::new(ErrorCode::NotBlank, "must not be blank").with_field("name"),
/// ]);
///
/// match &result {
///     ValidationResult::Success => unreachable!(),
///     ValidationResult::Failure(errors) => assert_eq!(errors.len(), 1),
/// }
///
/// assert!(ValidationResult::from_errors(Vec::new()).is_success());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Every rule passed.
    Success,
    /// At least one rule failed.
    Failure(ValidationErrors),
}

impl ValidationResult {
    /// Builds a result from a list of failures; an empty list is `Success`.
    pub fn from_errors(errors: Vec<ValidationErrorDetail>) -> Self {
        match ValidationErrors::from_vec(errors) {
            Some(errors) => ValidationResult::Failure(errors),
            None => ValidationResult::Success,
        }
    }

    /// Builds a failure holding a single error.
    pub fn failure(error: ValidationErrorDetail) -> Self {
        ValidationResult::Failure(ValidationErrors::single(error))
    }

    /// Returns true when every rule passed.
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationResult::Success)
    }

    /// Returns true when at least one rule failed.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Returns the failures, or `None` on success.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            ValidationResult::Success => None,
            ValidationResult::Failure(errors) => Some(errors),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &ValidationErrorDetail> {
        self.errors().into_iter().flat_map(ValidationErrors::iter)
    }

    /// Returns the number of failures, zero on success.
    pub fn error_count(&self) -> usize {
        self.errors().map_or(0, ValidationErrors::len)
    }

    /// Returns the first failure, if any.
    pub fn first_error(&self) -> Option<&ValidationErrorDetail> {
        self.errors().map(ValidationErrors::first)
    }

    /// Groups failures by field name. See [`ValidationErrors::errors_by_field`].
    pub fn errors_by_field(&self) -> IndexMap<&str, Vec<&ValidationErrorDetail>> {
        self.errors()
            .map(ValidationErrors::errors_by_field)
            .unwrap_or_default()
    }

    /// Returns all failures reported against `field_name`, possibly none.
    pub fn errors_for(&self, field_name: &str) -> Vec<&ValidationErrorDetail> {
        self.iter().filter(|e| e.field_name == field_name).collect()
    }

    /// Returns the first failure reported against `field_name`.
    pub fn first_error_for(&self, field_name: &str) -> Option<&ValidationErrorDetail> {
        self.iter().find(|e| e.field_name == field_name)
    }

    /// Returns all failures with the given code.
    pub fn with_code(&self, code: ErrorCode) -> Vec<&ValidationErrorDetail> {
        self.iter().filter(|e| e.code == code).collect()
    }

    /// Converts into a `Result`, with the failures as the error.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        match self {
            ValidationResult::Success => Ok(()),
            ValidationResult::Failure(errors) => Err(errors),
        }
    }

    /// Converts into a stillwater `Validation` for applicative composition.
    pub fn into_validation(self) -> Validation<(), ValidationErrors> {
        match self {
            ValidationResult::Success => Validation::Success(()),
            ValidationResult::Failure(errors) => Validation::Failure(errors),
        }
    }

    /// Renders the result as a JSON object with `valid` and `errors` keys.
    pub fn to_json(&self) -> Value {
        match self {
            ValidationResult::Success => json!({ "valid": true, "errors": [] }),
            ValidationResult::Failure(errors) => json!({
                "valid": false,
                "errors": errors.to_json(),
            }),
        }
    }
}

impl From<ValidationResult> for Validation<(), ValidationErrors> {
    fn from(result: ValidationResult) -> Self {
        result.into_validation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> ValidationResult {
        ValidationResult::from_errors(vec![
            ValidationErrorDetail::new(ErrorCode::NotBlank, "blank").with_field("name"),
            ValidationErrorDetail::new(ErrorCode::OutOfRange, "young").with_field("age"),
            ValidationErrorDetail::new(ErrorCode::TooShort, "short").with_field("name"),
        ])
    }

    #[test]
    fn test_success_queries_are_empty() {
        let result = ValidationResult::Success;

        assert!(result.is_success());
        assert!(!result.is_failure());
        assert!(result.errors().is_none());
        assert_eq!(result.error_count(), 0);
        assert!(result.first_error().is_none());
        assert!(result.errors_by_field().is_empty());
        assert!(result.errors_for("name").is_empty());
        assert!(result.first_error_for("name").is_none());
    }

    #[test]
    fn test_failure_queries() {
        let result = failure();

        assert!(result.is_failure());
        assert_eq!(result.error_count(), 3);
        assert_eq!(result.first_error().unwrap().code, ErrorCode::NotBlank);
        assert_eq!(result.errors_for("name").len(), 2);
        assert_eq!(
            result.first_error_for("name").map(|e| e.code),
            Some(ErrorCode::NotBlank)
        );
        assert_eq!(result.with_code(ErrorCode::OutOfRange).len(), 1);

        let groups = result.errors_by_field();
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["name", "age"]);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationResult::Success.into_result().is_ok());
        assert_eq!(failure().into_result().unwrap_err().len(), 3);
    }

    #[test]
    fn test_into_validation() {
        let validation: Validation<(), ValidationErrors> = ValidationResult::Success.into();
        assert!(validation.is_success());

        let validation = failure().into_validation();
        assert!(validation.is_failure());
    }

    #[test]
    fn test_to_json() {
        assert_eq!(
            ValidationResult::Success.to_json(),
            json!({ "valid": true, "errors": [] })
        );

        let rendered = failure().to_json();
        assert_eq!(rendered["valid"], json!(false));
        assert_eq!(rendered["errors"].as_array().map(Vec::len), Some(3));
        assert_eq!(rendered["errors"][1]["code"], json!("OUT_OF_RANGE"));
    }
}
