//! # Fieldwise
//!
//! Typed, declarative validation for Rust values. Rules are declared per field
//! of a target type, frozen into a [`Validator`], and run in one of two modes:
//! collect every failure, or stop at the first one.
//!
//! ## Overview
//!
//! A validator is declared once, typically at startup, and shared for the
//! lifetime of the process. Each call to [`Validator::validate`] or
//! [`Validator::validate_first`] returns a fresh [`ValidationResult`]: either
//! `Success`, or a `Failure` carrying a non-empty, ordered list of
//! [`ValidationErrorDetail`]s that can be grouped and queried by field.
//!
//! ## Core Types
//!
//! - [`Constraint`]: a predicate over one field value with an [`ErrorCode`] and message template
//! - [`CrossFieldCheck`]: a rule comparing a field with another value of the same target
//! - [`FieldIdentity`]: a named accessor for one field of a target type
//! - [`ValidatorRegistry`] / [`ValidatorBuilder`]: the configuration phase
//! - [`Validator`]: the frozen rules and both execution modes
//! - [`ValidatorSet`]: type-erased dispatch for framework integrations
//!
//! ## Example
//!
//! ```rust
//! use fieldwise::{rules, ErrorCode, FieldIdentity, Validator};
//!
//! struct Signup {
//!     name: String,
//!     age: u32,
//!     password: String,
//!     confirm_password: String,
//! }
//!
//! let validator = Validator::builder("Signup")
//!     .field(FieldIdentity::new("name", |s: &Signup| &s.name), |f| {
//!         f.rule(rules::not_blank());
//!     })
//!     .field(FieldIdentity::new("age", |s: &Signup| &s.age), |f| {
//!         f.rule(rules::min(18)).rule(rules::max(120));
//!     })
//!     .field(
//!         FieldIdentity::new("confirm_password", |s: &Signup| &s.confirm_password),
//!         |f| {
//!             f.cross_field(rules::equals_field(|s: &Signup| &s.password, "passwords do not match"));
//!         },
//!     )
//!     .build();
//!
//! let signup = Signup {
//!     name: "".into(),
//!     age: 10,
//!     password: "abc".into(),
//!     confirm_password: "xyz".into(),
//! };
//!
//! let result = validator.validate(&signup);
//! assert_eq!(result.error_count(), 3);
//! assert_eq!(
//!     result.first_error_for("confirm_password").map(|e| e.code),
//!     Some(ErrorCode::CrossFieldError)
//! );
//!
//! let first = validator.validate_first(&signup);
//! assert_eq!(first.error_count(), 1);
//! assert_eq!(first.first_error(), result.first_error());
//! ```

pub mod builder;
pub mod constraint;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod field;
pub mod registry;
pub mod result;
pub mod rules;
pub mod value;

pub use builder::ValidatorBuilder;
pub use constraint::{Constraint, CrossFieldCheck};
pub use dispatch::{AnyValidator, DispatchError, Mode, ValidatorSet};
pub use engine::Validator;
pub use error::{ErrorCode, ValidationErrorDetail, ValidationErrors};
pub use field::{FieldIdentity, FieldRuleSet};
pub use registry::{FieldScope, ValidatorRegistry};
pub use result::ValidationResult;
pub use value::FieldValue;
