//! String rules.

use regex::Regex;

use crate::constraint::Constraint;
use crate::error::ErrorCode;

/// Fails on empty or whitespace-only strings.
pub fn not_blank() -> Constraint<String> {
    Constraint::new(ErrorCode::NotBlank, "must not be blank", |s: &String| {
        !s.trim().is_empty()
    })
}

/// Fails on empty strings.
pub fn not_empty() -> Constraint<String> {
    Constraint::new(ErrorCode::NotEmpty, "must not be empty", |s: &String| {
        !s.is_empty()
    })
}

/// Requires at least `min` characters (Unicode scalar values).
pub fn min_len(min: usize) -> Constraint<String> {
    Constraint::new(
        ErrorCode::TooShort,
        format!("must be at least {} characters", min),
        move |s: &String| s.chars().count() >= min,
    )
}

/// Allows at most `max` characters (Unicode scalar values).
pub fn max_len(max: usize) -> Constraint<String> {
    Constraint::new(
        ErrorCode::TooLong,
        format!("must be at most {} characters", max),
        move |s: &String| s.chars().count() <= max,
    )
}

/// Requires between `min` and `max` characters, inclusive.
///
/// # Panics
///
/// Panics if `min > max`.
pub fn length(min: usize, max: usize) -> Constraint<String> {
    assert!(
        min <= max,
        "length bounds are inverted: min {} > max {}",
        min,
        max
    );
    Constraint::new(
        ErrorCode::OutOfRange,
        format!("must be between {} and {} characters", min, max),
        move |s: &String| (min..=max).contains(&s.chars().count()),
    )
}

/// Requires the string to match the regex `pattern`.
///
/// # Errors
///
/// Returns the regex compilation error for an invalid pattern.
pub fn pattern(pattern: &str) -> Result<Constraint<String>, regex::Error> {
    let regex = Regex::new(pattern)?;
    Ok(Constraint::new(
        ErrorCode::InvalidFormat,
        format!("'{{value}}' does not match pattern {}", pattern),
        move |s: &String| regex.is_match(s),
    ))
}

/// Requires a plausible email address: one `@`, a non-empty local part and a
/// dotted domain, without whitespace.
pub fn email() -> Constraint<String> {
    Constraint::new(
        ErrorCode::InvalidEmail,
        "'{value}' is not a valid email address",
        |s: &String| is_email(s),
    )
}

fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !domain.ends_with('.')
        }
        None => false,
    }
}
