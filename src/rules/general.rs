//! Rules that apply to any value type.

use stillwater::predicate::Predicate;

use crate::constraint::Constraint;
use crate::error::ErrorCode;
use crate::value::FieldValue;

/// Lifts a constraint to an optional value: absent values pass, present
/// values must satisfy `constraint`.
pub fn optional<R>(constraint: Constraint<R>) -> Constraint<Option<R>>
where
    R: 'static,
{
    let hint = constraint.hint().to_string();
    let suffix = constraint.suffix().to_string();
    let code = constraint.code();
    Constraint::new(code, hint, move |value: &Option<R>| {
        value
            .as_ref()
            .map_or(true, |v| constraint.is_satisfied_by(v))
    })
    .with_suffix(suffix)
}

/// Requires an optional value to be present.
pub fn required<R>() -> Constraint<Option<R>>
where
    R: 'static,
{
    Constraint::new(ErrorCode::Required, "is required", |value: &Option<R>| {
        value.is_some()
    })
}

/// Requires the value to equal one of `allowed`.
pub fn one_of<R, I>(allowed: I) -> Constraint<R>
where
    R: PartialEq + FieldValue + Send + Sync + 'static,
    I: IntoIterator<Item = R>,
{
    let allowed: Vec<R> = allowed.into_iter().collect();
    let listed = format!(" must be one of {}", allowed.render_value());
    Constraint::new(ErrorCode::InvalidValue, "'{value}'", move |value: &R| {
        allowed.contains(value)
    })
    .with_suffix(listed)
}

/// Adapts a stillwater [`Predicate`] into a constraint.
pub fn satisfies<R, P>(code: ErrorCode, hint: impl Into<String>, predicate: P) -> Constraint<R>
where
    R: 'static,
    P: Predicate<R> + Send + Sync + 'static,
{
    Constraint::new(code, hint, move |value: &R| predicate.check(value))
}

/// A user-defined rule reported as [`ErrorCode::CustomError`].
pub fn custom<R, F>(hint: impl Into<String>, predicate: F) -> Constraint<R>
where
    F: Fn(&R) -> bool + Send + Sync + 'static,
{
    Constraint::new(ErrorCode::CustomError, hint, predicate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{email, min};

    #[test]
    fn test_optional_lets_absent_values_pass() {
        let c = optional(email());

        assert!(c.evaluate(&None, "email").is_none());
        assert!(c.evaluate(&Some("a@b.io".to_string()), "email").is_none());

        let error = c.evaluate(&Some("nope".to_string()), "email").unwrap();
        assert_eq!(error.code, ErrorCode::InvalidEmail);
        assert_eq!(error.message, "'nope' is not a valid email address");
    }

    #[test]
    fn test_required() {
        let c = required::<u32>();
        assert!(c.is_satisfied_by(&Some(0)));

        let error = c.evaluate(&None, "age").unwrap();
        assert_eq!(error.code, ErrorCode::Required);
        assert_eq!(error.actual_value, "null");
    }

    #[test]
    fn test_optional_wraps_numeric_rule() {
        let at_least = optional(min(18u32));
        assert!(at_least.is_satisfied_by(&None));
        assert!(!at_least.is_satisfied_by(&Some(3)));
    }

    #[test]
    fn test_one_of() {
        let c = one_of(["admin".to_string(), "user".to_string()]);
        assert!(c.is_satisfied_by(&"user".to_string()));

        let error = c.evaluate(&"root".to_string(), "role").unwrap();
        assert_eq!(error.message, "'root' must be one of [admin, user]");
        assert_eq!(error.code, ErrorCode::InvalidValue);
    }

    #[test]
    fn test_one_of_lists_allowed_values_verbatim() {
        let c = one_of(["{value}".to_string(), "plain".to_string()]);

        let error = c.evaluate(&"other".to_string(), "template").unwrap();
        assert_eq!(error.message, "'other' must be one of [{value}, plain]");

        let lifted = optional(c);
        let error = lifted.evaluate(&Some("x".to_string()), "template").unwrap();
        assert_eq!(error.message, "'x' must be one of [{value}, plain]");
    }

    #[test]
    fn test_satisfies_adapts_stillwater_predicate() {
        let c = satisfies(
            ErrorCode::OutOfRange,
            "{value} is not a valid percentage",
            stillwater::predicate::between(0u32, 100u32),
        );

        assert!(c.is_satisfied_by(&42));
        let error = c.evaluate(&101, "progress").unwrap();
        assert_eq!(error.message, "101 is not a valid percentage");
    }

    #[test]
    fn test_custom() {
        let even = custom("must be even", |n: &i64| n % 2 == 0);
        assert!(even.is_satisfied_by(&4));
        assert_eq!(even.evaluate(&3, "n").unwrap().code, ErrorCode::CustomError);
    }
}
