//! Cross-field rules.

use crate::constraint::CrossFieldCheck;
use crate::error::ErrorCode;

/// Requires the field to equal the value `selector` picks from the target.
pub fn equals_field<T, R, S>(selector: S, hint: impl Into<String>) -> CrossFieldCheck<T, R>
where
    T: 'static,
    R: PartialEq + 'static,
    S: Fn(&T) -> &R + Send + Sync + 'static,
{
    CrossFieldCheck::new(ErrorCode::CrossFieldError, hint, selector, |value: &R, other: &R| {
        value == other
    })
}

/// Requires the field to differ from the value `selector` picks from the target.
pub fn differs_from<T, R, S>(selector: S, hint: impl Into<String>) -> CrossFieldCheck<T, R>
where
    T: 'static,
    R: PartialEq + 'static,
    S: Fn(&T) -> &R + Send + Sync + 'static,
{
    CrossFieldCheck::new(ErrorCode::CrossFieldError, hint, selector, |value: &R, other: &R| {
        value != other
    })
}
