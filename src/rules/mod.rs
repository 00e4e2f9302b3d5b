//! A representative catalogue of ready-made rules.
//!
//! Every rule here is an ordinary [`Constraint`](crate::Constraint) or
//! [`CrossFieldCheck`](crate::CrossFieldCheck); nothing in this module has
//! access to the engine. Rules with invalid bounds panic when constructed,
//! since bounds are part of the declaration, not of the validated data.
//!
//! # Example
//!
//! ```rust
//! use fieldwise::{rules, FieldIdentity, Validator};
//!
//! struct Account {
//!     handle: String,
//!     email: Option<String>,
//!     age: u32,
//! }
//!
//! let validator = Validator::builder("Account")
//!     .field(FieldIdentity::new("handle", |a: &Account| &a.handle), |f| {
//!         f.rule(rules::not_blank()).rule(rules::length(3, 16));
//!     })
//!     .field(FieldIdentity::new("email", |a: &Account| &a.email), |f| {
//!         f.rule(rules::optional(rules::email()));
//!     })
//!     .field(FieldIdentity::new("age", |a: &Account| &a.age), |f| {
//!         f.rule(rules::range(13, 130));
//!     })
//!     .build();
//!
//! let account = Account { handle: "ferris".into(), email: None, age: 7 };
//! let result = validator.validate(&account);
//! assert_eq!(result.error_count(), 1);
//! assert!(result.first_error_for("age").is_some());
//! ```

mod cross;
mod general;
mod numeric;
mod string;

pub use cross::{differs_from, equals_field};
pub use general::{custom, one_of, optional, required, satisfies};
pub use numeric::{max, min, positive, range};
pub use string::{email, length, max_len, min_len, not_blank, not_empty, pattern};
