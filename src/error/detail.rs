//! Validation failure records.
//!
//! This module provides [`ValidationErrorDetail`] for single failures and
//! [`ValidationErrors`] for the non-empty, ordered list a failed validation
//! carries.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::{json, Value};
use stillwater::prelude::*;

use super::ErrorCode;

/// A single validation failure.
///
/// `ValidationErrorDetail` captures everything a caller needs to report a
/// failure:
/// - **field_name**: the field the failure is attributed to
/// - **message**: the rendered, human-readable message
/// - **code**: the semantic kind of failure
/// - **actual_value**: the failing value's string form, or `"null"`
///
/// # Example
///
/// ```rust
/// use fieldwise::{ErrorCode, ValidationErrorDetail};
///
/// let error = ValidationErrorDetail::new(ErrorCode::TooShort, "must be at least 3 characters")
///     .with_field("name")
///     .with_actual_value("ab");
///
/// assert_eq!(error.field_name, "name");
/// assert_eq!(error.actual_value, "ab");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrorDetail {
    /// Name of the field the failure is reported against.
    pub field_name: String,
    /// Human-readable message with placeholders already substituted.
    pub message: String,
    /// Semantic kind of the failure.
    pub code: ErrorCode,
    /// String form of the failing value, `"null"` when absent.
    pub actual_value: String,
}

impl ValidationErrorDetail {
    /// Creates a detail with the given code and message.
    ///
    /// The field name starts empty and the actual value starts as `"null"`.
    /// Details produced by cross-field and object checks without a field name
    /// are attributed to their registered field by the engine.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            field_name: String::new(),
            message: message.into(),
            code,
            actual_value: "null".to_string(),
        }
    }

    /// Sets the field name and returns self for chaining.
    pub fn with_field(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    /// Sets the actual value and returns self for chaining.
    pub fn with_actual_value(mut self, actual_value: impl Into<String>) -> Self {
        self.actual_value = actual_value.into();
        self
    }

    /// Renders this detail as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "field": self.field_name,
            "code": self.code.as_str(),
            "message": self.message,
            "actualValue": self.actual_value,
        })
    }
}

impl Display for ValidationErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = if self.field_name.is_empty() {
            "(object)"
        } else {
            self.field_name.as_str()
        };
        write!(
            f,
            "{}: {} [{}] (got: {})",
            field, self.message, self.code, self.actual_value
        )
    }
}

impl std::error::Error for ValidationErrorDetail {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationErrorDetail>();
    assert_sync::<ValidationErrorDetail>();
};

/// A non-empty, ordered collection of validation failures.
///
/// `ValidationErrors` wraps a `NonEmptyVec<ValidationErrorDetail>` so a failed
/// validation always carries at least one error.
///
/// # Querying
///
/// ```rust
/// use fieldwise::{ErrorCode, ValidationErrorDetail, ValidationErrors};
/// use stillwater::prelude::*;
///
/// let errors = ValidationErrors::single(
///     ValidationErrorDetail::new(ErrorCode::NotBlank, "must not be blank").with_field("name"),
/// )
/// .combine(ValidationErrors::single(
///     ValidationErrorDetail::new(ErrorCode::OutOfRange, "must be at least 18").with_field("age"),
/// ));
///
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.errors_for("age").len(), 1);
/// assert!(errors.first_error_for("email").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationErrorDetail>);

impl ValidationErrors {
    /// Creates a collection containing a single error.
    pub fn single(error: ValidationErrorDetail) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a vec, or `None` when the vec is empty.
    pub fn from_vec(errors: Vec<ValidationErrorDetail>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the errors in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationErrorDetail> {
        self.0.iter()
    }

    /// Returns the first error.
    pub fn first(&self) -> &ValidationErrorDetail {
        self.0.head()
    }

    /// Groups errors by field name.
    ///
    /// Groups appear in order of the first error for each field, and each
    /// group keeps the relative order of the original list.
    pub fn errors_by_field(&self) -> IndexMap<&str, Vec<&ValidationErrorDetail>> {
        let mut groups: IndexMap<&str, Vec<&ValidationErrorDetail>> = IndexMap::new();
        for error in self.0.iter() {
            groups
                .entry(error.field_name.as_str())
                .or_default()
                .push(error);
        }
        groups
    }

    /// Returns all errors reported against `field_name`, possibly none.
    pub fn errors_for(&self, field_name: &str) -> Vec<&ValidationErrorDetail> {
        self.0
            .iter()
            .filter(|e| e.field_name == field_name)
            .collect()
    }

    /// Returns the first error reported against `field_name`.
    pub fn first_error_for(&self, field_name: &str) -> Option<&ValidationErrorDetail> {
        self.0.iter().find(|e| e.field_name == field_name)
    }

    /// Returns all errors with the given code.
    pub fn with_code(&self, code: ErrorCode) -> Vec<&ValidationErrorDetail> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Converts this collection into a `Vec`.
    pub fn into_vec(self) -> Vec<ValidationErrorDetail> {
        self.0.into_vec()
    }

    /// Renders the errors as a JSON array.
    pub fn to_json(&self) -> Value {
        Value::Array(self.0.iter().map(ValidationErrorDetail::to_json).collect())
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationErrorDetail;
    type IntoIter = std::vec::IntoIter<ValidationErrorDetail>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationErrorDetail;
    type IntoIter = Box<dyn Iterator<Item = &'a ValidationErrorDetail> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationErrors>();
    assert_sync::<ValidationErrors>();
};
