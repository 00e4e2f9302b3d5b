use std::fmt::{self, Display};

/// Semantic kind of a validation failure.
///
/// Every [`ValidationErrorDetail`](crate::ValidationErrorDetail) carries one
/// code so callers can branch on the kind of failure without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A value was absent.
    Required,
    /// A string was empty or whitespace only.
    NotBlank,
    /// A string or collection was empty.
    NotEmpty,
    /// Shorter than the minimum length.
    TooShort,
    /// Longer than the maximum length.
    TooLong,
    /// Outside of an allowed numeric range.
    OutOfRange,
    /// Not a well-formed email address.
    InvalidEmail,
    /// Did not match the expected format.
    InvalidFormat,
    /// Not one of the accepted values.
    InvalidValue,
    /// Password did not meet strength requirements.
    WeakPassword,
    /// Failure raised by a user supplied rule.
    CustomError,
    /// Failure of a rule comparing fields of the same object.
    CrossFieldError,
}

impl ErrorCode {
    /// Returns the stable machine-readable form, e.g. `NOT_BLANK`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Required => "REQUIRED",
            ErrorCode::NotBlank => "NOT_BLANK",
            ErrorCode::NotEmpty => "NOT_EMPTY",
            ErrorCode::TooShort => "TOO_SHORT",
            ErrorCode::TooLong => "TOO_LONG",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidEmail => "INVALID_EMAIL",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::WeakPassword => "WEAK_PASSWORD",
            ErrorCode::CustomError => "CUSTOM_ERROR",
            ErrorCode::CrossFieldError => "CROSS_FIELD_ERROR",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
