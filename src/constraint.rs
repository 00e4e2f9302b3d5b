//! Single-field constraints and cross-field checks.
//!
//! A [`Constraint`] is the contract every rule satisfies: a message template,
//! an [`ErrorCode`] and a predicate over one field value. A
//! [`CrossFieldCheck`] additionally reads a second value from the whole
//! target, for rules like "confirmation equals password".

use std::fmt;
use std::sync::Arc;

use crate::error::{ErrorCode, ValidationErrorDetail};
use crate::value::{render_hint, FieldValue};

type PredicateFn<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;
type SelectorFn<T, R> = Arc<dyn Fn(&T) -> &R + Send + Sync>;
type CompareFn<R> = Arc<dyn Fn(&R, &R) -> bool + Send + Sync>;

/// An immutable predicate rule over a single field value.
///
/// Cloning is cheap; the predicate is shared.
///
/// # Example
///
/// ```rust
/// use fieldwise::{Constraint, ErrorCode};
///
/// let adult = Constraint::new(ErrorCode::OutOfRange, "{value} is under 18", |age: &u32| *age >= 18);
///
/// assert!(adult.evaluate(&30, "age").is_none());
///
/// let error = adult.evaluate(&10, "age").unwrap();
/// assert_eq!(error.message, "10 is under 18");
/// assert_eq!(error.actual_value, "10");
/// ```
pub struct Constraint<R> {
    hint: String,
    suffix: String,
    code: ErrorCode,
    predicate: PredicateFn<R>,
}

impl<R> Constraint<R> {
    /// Creates a constraint that fails when `predicate` returns false.
    ///
    /// `hint` becomes the failure message; each `{value}` in it is replaced
    /// by the failing value.
    pub fn new<P>(code: ErrorCode, hint: impl Into<String>, predicate: P) -> Self
    where
        P: Fn(&R) -> bool + Send + Sync + 'static,
    {
        Self {
            hint: hint.into(),
            suffix: String::new(),
            code,
            predicate: Arc::new(predicate),
        }
    }

    /// Appends `suffix` to every failure message after `{value}` substitution,
    /// so the suffix is never treated as a template.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Returns the message template.
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Returns the literal text appended to failure messages.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Returns the error code reported on failure.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns a copy of this constraint with a different message template.
    pub fn with_hint(&self, hint: impl Into<String>) -> Self {
        Self {
            hint: hint.into(),
            suffix: self.suffix.clone(),
            code: self.code,
            predicate: Arc::clone(&self.predicate),
        }
    }

    /// Returns a copy of this constraint with a different error code.
    pub fn with_code(&self, code: ErrorCode) -> Self {
        Self {
            hint: self.hint.clone(),
            suffix: self.suffix.clone(),
            code,
            predicate: Arc::clone(&self.predicate),
        }
    }

    /// Returns true when `value` satisfies the predicate.
    pub fn is_satisfied_by(&self, value: &R) -> bool {
        (self.predicate)(value)
    }
}

impl<R: FieldValue> Constraint<R> {
    /// Evaluates the constraint against `value` of the field `field_name`.
    ///
    /// Returns `None` when the value satisfies the predicate, otherwise one
    /// failure with the rendered message.
    pub fn evaluate(&self, value: &R, field_name: &str) -> Option<ValidationErrorDetail> {
        if self.is_satisfied_by(value) {
            return None;
        }
        let rendered = value.render_value();
        let message = render_hint(&self.hint, &rendered) + &self.suffix;
        Some(
            ValidationErrorDetail::new(self.code, message)
                .with_field(field_name)
                .with_actual_value(rendered),
        )
    }
}

impl<R> Clone for Constraint<R> {
    fn clone(&self) -> Self {
        Self {
            hint: self.hint.clone(),
            suffix: self.suffix.clone(),
            code: self.code,
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<R> fmt::Debug for Constraint<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("hint", &self.hint)
            .field("suffix", &self.suffix)
            .field("code", &self.code)
            .field("predicate", &"<function>")
            .finish()
    }
}

/// A rule comparing a field value with another value of the same target.
///
/// The `selector` picks the second value out of the whole target and
/// `compare` receives `(field value, selected value)`. Failures are reported
/// against the field the check is registered under, unless
/// [`report_as`](Self::report_as) names another field.
///
/// # Example
///
/// ```rust
/// use fieldwise::{CrossFieldCheck, ErrorCode};
///
/// struct Signup {
///     password: String,
///     confirm_password: String,
/// }
///
/// let matches = CrossFieldCheck::new(
///     ErrorCode::CrossFieldError,
///     "passwords do not match",
///     |s: &Signup| &s.password,
///     |confirm: &String, password: &String| confirm == password,
/// );
///
/// let signup = Signup { password: "abc".into(), confirm_password: "xyz".into() };
/// let error = matches.evaluate(&signup, &signup.confirm_password, "confirm_password").unwrap();
/// assert_eq!(error.field_name, "confirm_password");
/// ```
pub struct CrossFieldCheck<T, R> {
    hint: String,
    code: ErrorCode,
    selector: SelectorFn<T, R>,
    compare: CompareFn<R>,
    field_name: Option<String>,
}

impl<T, R> CrossFieldCheck<T, R> {
    /// Creates a check that fails when `compare(value, selector(target))` is false.
    pub fn new<S, C>(code: ErrorCode, hint: impl Into<String>, selector: S, compare: C) -> Self
    where
        S: Fn(&T) -> &R + Send + Sync + 'static,
        C: Fn(&R, &R) -> bool + Send + Sync + 'static,
    {
        Self {
            hint: hint.into(),
            code,
            selector: Arc::new(selector),
            compare: Arc::new(compare),
            field_name: None,
        }
    }

    /// Reports failures against `field_name` instead of the registered field.
    pub fn report_as(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// Returns the message template.
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Returns the error code reported on failure.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the field name failures are reported against, if overridden.
    pub fn reported_field(&self) -> Option<&str> {
        self.field_name.as_deref()
    }
}

impl<T, R: FieldValue> CrossFieldCheck<T, R> {
    /// Evaluates the check for `value`, the current value of `field_name` in `target`.
    pub fn evaluate(
        &self,
        target: &T,
        value: &R,
        field_name: &str,
    ) -> Option<ValidationErrorDetail> {
        let selected = (self.selector)(target);
        if (self.compare)(value, selected) {
            return None;
        }
        let rendered = value.render_value();
        let field = self.field_name.as_deref().unwrap_or(field_name);
        Some(
            ValidationErrorDetail::new(self.code, render_hint(&self.hint, &rendered))
                .with_field(field)
                .with_actual_value(rendered),
        )
    }
}

impl<T, R> Clone for CrossFieldCheck<T, R> {
    fn clone(&self) -> Self {
        Self {
            hint: self.hint.clone(),
            code: self.code,
            selector: Arc::clone(&self.selector),
            compare: Arc::clone(&self.compare),
            field_name: self.field_name.clone(),
        }
    }
}

impl<T, R> fmt::Debug for CrossFieldCheck<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossFieldCheck")
            .field("hint", &self.hint)
            .field("code", &self.code)
            .field("field_name", &self.field_name)
            .finish_non_exhaustive()
    }
}
