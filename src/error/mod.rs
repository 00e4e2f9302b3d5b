//! Error types for validation failures.
//!
//! This module provides the closed [`ErrorCode`] taxonomy, the per-failure
//! [`ValidationErrorDetail`] record and the non-empty [`ValidationErrors`]
//! collection carried by a failed validation.

mod code;
mod detail;

pub use code::ErrorCode;
pub use detail::{ValidationErrorDetail, ValidationErrors};
