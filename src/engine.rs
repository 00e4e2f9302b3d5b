//! Validation execution.
//!
//! This module provides [`Validator`], the frozen form of a
//! [`ValidatorRegistry`](crate::ValidatorRegistry), and its two execution modes:
//!
//! - [`Validator::validate`] collects every distinct failure
//! - [`Validator::validate_first`] stops at the first failure
//!
//! Both walk the same order: field rule sets in registration order with their
//! constraints in registration order, then cross-field and object checks in
//! registration order. The single error of `validate_first` is therefore always
//! the first error `validate` reports.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::builder::ValidatorBuilder;
use crate::error::{ErrorCode, ValidationErrorDetail};
use crate::field::FieldRules;
use crate::registry::ObjectCheck;
use crate::result::ValidationResult;

struct Snapshot<T> {
    name: String,
    field_rule_sets: Vec<Box<dyn FieldRules<T>>>,
    cross_field_rule_sets: Vec<(String, Vec<ObjectCheck<T>>)>,
}

/// An immutable set of rules for target type `T`.
///
/// A `Validator` is produced once by [`ValidatorBuilder::build`] or
/// [`ValidatorRegistry::build`](crate::ValidatorRegistry::build) and cannot be
/// modified afterwards. Clones share the same rules, and a validator can be
/// used from many threads at once.
///
/// # Example
///
/// ```rust
/// use fieldwise::{rules, ErrorCode, FieldIdentity, Validator};
///
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let validator = Validator::builder("User")
///     .field(FieldIdentity::new("name", |u: &User| &u.name), |f| {
///         f.rule(rules::not_blank());
///     })
///     .field(FieldIdentity::new("age", |u: &User| &u.age), |f| {
///         f.rule(rules::min(18)).rule(rules::max(120));
///     })
///     .build();
///
/// let result = validator.validate(&User { name: "".into(), age: 10 });
/// assert_eq!(result.error_count(), 2);
///
/// let first = validator.validate_first(&User { name: "".into(), age: 10 });
/// assert_eq!(first.error_count(), 1);
/// assert_eq!(first.first_error().unwrap().code, ErrorCode::NotBlank);
/// ```
pub struct Validator<T> {
    inner: Arc<Snapshot<T>>,
}

impl<T: 'static> Validator<T> {
    /// Starts declaring a validator named `name`.
    pub fn builder(name: impl Into<String>) -> ValidatorBuilder<T> {
        ValidatorBuilder::new(name)
    }
}

impl<T> Validator<T> {
    pub(crate) fn from_parts(
        name: String,
        field_rule_sets: Vec<Box<dyn FieldRules<T>>>,
        cross_field_rule_sets: Vec<(String, Vec<ObjectCheck<T>>)>,
    ) -> Self {
        Self {
            inner: Arc::new(Snapshot {
                name,
                field_rule_sets,
                cross_field_rule_sets,
            }),
        }
    }

    /// Returns the validator name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the names of fields with rule sets, in registration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.inner
            .field_rule_sets
            .iter()
            .map(|rules| rules.field_name())
    }

    /// Returns the total number of single-field constraints.
    pub fn constraint_count(&self) -> usize {
        self.inner
            .field_rule_sets
            .iter()
            .map(|rules| rules.constraint_count())
            .sum()
    }

    /// Returns the total number of cross-field and object checks.
    pub fn cross_field_count(&self) -> usize {
        self.inner
            .cross_field_rule_sets
            .iter()
            .map(|(_, checks)| checks.len())
            .sum()
    }

    /// Returns true when the validator has no rules and accepts everything.
    pub fn is_empty(&self) -> bool {
        self.constraint_count() == 0 && self.cross_field_count() == 0
    }

    /// Validates `target`, collecting every distinct failure.
    ///
    /// Failures are deduplicated by `(field_name, code, message)`, keeping the
    /// first occurrence in evaluation order.
    pub fn validate(&self, target: &T) -> ValidationResult {
        trace!(validator = %self.inner.name, mode = "collect-all", "validating");

        let mut errors = Vec::new();
        for rules in &self.inner.field_rule_sets {
            rules.collect_errors(target, &mut errors);
        }
        for (field_name, checks) in &self.inner.cross_field_rule_sets {
            errors.extend(
                checks
                    .iter()
                    .filter_map(|check| check(target))
                    .map(|error| attribute(error, field_name)),
            );
        }

        let result = ValidationResult::from_errors(dedup(errors));
        if let ValidationResult::Failure(errors) = &result {
            debug!(
                validator = %self.inner.name,
                errors = errors.len(),
                "validation failed"
            );
        }
        result
    }

    /// Validates `target`, stopping at the first failure.
    ///
    /// Returns either `Success` or a failure holding exactly one error: the
    /// first error [`validate`](Self::validate) would report. Cross-field
    /// checks only run once every field rule set passes.
    pub fn validate_first(&self, target: &T) -> ValidationResult {
        trace!(validator = %self.inner.name, mode = "fail-fast", "validating");

        let first = self
            .inner
            .field_rule_sets
            .iter()
            .find_map(|rules| rules.first_error(target))
            .or_else(|| {
                self.inner
                    .cross_field_rule_sets
                    .iter()
                    .find_map(|(field_name, checks)| {
                        checks
                            .iter()
                            .find_map(|check| check(target))
                            .map(|error| attribute(error, field_name))
                    })
            });

        match first {
            Some(error) => {
                debug!(
                    validator = %self.inner.name,
                    field = %error.field_name,
                    code = %error.code,
                    "validation failed fast"
                );
                ValidationResult::failure(error)
            }
            None => ValidationResult::Success,
        }
    }

    /// Validates every target in parallel, returning results in input order.
    pub fn validate_batch(&self, targets: &[T]) -> Vec<ValidationResult>
    where
        T: Sync,
    {
        targets
            .par_iter()
            .map(|target| self.validate(target))
            .collect()
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.inner.name)
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .field("constraints", &self.constraint_count())
            .field("cross_field_checks", &self.cross_field_count())
            .finish()
    }
}

/// Reports a whole-object failure against `field_name` unless it names a field.
fn attribute(mut error: ValidationErrorDetail, field_name: &str) -> ValidationErrorDetail {
    if error.field_name.is_empty() {
        error.field_name = field_name.to_string();
    }
    error
}

/// Keeps the first failure of each `(field_name, code, message)`, preserving order.
fn dedup(errors: Vec<ValidationErrorDetail>) -> Vec<ValidationErrorDetail> {
    let mut seen: HashSet<(String, ErrorCode, String)> = HashSet::with_capacity(errors.len());
    errors
        .into_iter()
        .filter(|e| seen.insert((e.field_name.clone(), e.code, e.message.clone())))
        .collect()
}
