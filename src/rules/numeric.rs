//! Numeric rules, generic over any ordered, displayable value.

use std::fmt::Display;

use crate::constraint::Constraint;
use crate::error::ErrorCode;

/// Requires a value of at least `min`.
pub fn min<N>(min: N) -> Constraint<N>
where
    N: PartialOrd + Display + Send + Sync + 'static,
{
    Constraint::new(
        ErrorCode::OutOfRange,
        format!("must be at least {}, got {{value}}", min),
        move |n: &N| *n >= min,
    )
}

/// Requires a value of at most `max`.
pub fn max<N>(max: N) -> Constraint<N>
where
    N: PartialOrd + Display + Send + Sync + 'static,
{
    Constraint::new(
        ErrorCode::OutOfRange,
        format!("must be at most {}, got {{value}}", max),
        move |n: &N| *n <= max,
    )
}

/// Requires a value between `min` and `max`, inclusive.
///
/// # Panics
///
/// Panics if `min > max`, or if the bounds are not comparable (NaN).
pub fn range<N>(min: N, max: N) -> Constraint<N>
where
    N: PartialOrd + Display + Send + Sync + 'static,
{
    assert!(
        min <= max,
        "range bounds are inverted: min {} > max {}",
        min,
        max
    );
    Constraint::new(
        ErrorCode::OutOfRange,
        format!("must be between {} and {}, got {{value}}", min, max),
        move |n: &N| *n >= min && *n <= max,
    )
}

/// Requires a value greater than zero (`N::default()`).
pub fn positive<N>() -> Constraint<N>
where
    N: PartialOrd + Default + Send + Sync + 'static,
{
    Constraint::new(
        ErrorCode::OutOfRange,
        "must be positive, got {value}",
        |n: &N| *n > N::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_message_mentions_bound() {
        let c = min(18u32);
        assert!(c.evaluate(&18, "age").is_none());

        let error = c.evaluate(&10, "age").unwrap();
        assert_eq!(error.code, ErrorCode::OutOfRange);
        assert_eq!(error.message, "must be at least 18, got 10");
        assert_eq!(error.actual_value, "10");
    }

    #[test]
    fn test_max() {
        let c = max(120i64);
        assert!(c.is_satisfied_by(&120));
        assert!(!c.is_satisfied_by(&121));
    }

    #[test]
    fn test_range_is_inclusive() {
        let c = range(1.0f64, 2.0);
        assert!(c.is_satisfied_by(&1.0));
        assert!(c.is_satisfied_by(&2.0));
        assert!(!c.is_satisfied_by(&2.5));
        assert!(!c.is_satisfied_by(&f64::NAN));
    }

    #[test]
    #[should_panic(expected = "range bounds are inverted")]
    fn test_range_rejects_inverted_bounds() {
        range(10, 1);
    }

    #[test]
    fn test_positive() {
        let c = positive::<i32>();
        assert!(c.is_satisfied_by(&1));
        assert!(!c.is_satisfied_by(&0));
        assert!(!c.is_satisfied_by(&-1));
    }
}
