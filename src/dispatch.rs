//! Type-erased validator dispatch.
//!
//! Framework integrations often receive values whose concrete type is only
//! known at runtime. This module provides [`AnyValidator`], a
//! downcast-and-validate wrapper around a [`Validator`], and [`ValidatorSet`],
//! a thread-safe registry of validators keyed by the type they validate.
//!
//! Looking up a missing validator or handing a validator a value of the wrong
//! type is a programming error. It is reported as a [`DispatchError`], never
//! as a validation failure.

use std::any::{self, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::engine::Validator;
use crate::result::ValidationResult;

/// Which execution mode to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Collect every distinct failure ([`Validator::validate`]).
    CollectAll,
    /// Stop at the first failure ([`Validator::validate_first`]).
    FailFast,
}

/// A validator for a type known only at runtime.
///
/// # Example
///
/// ```rust
/// use std::any::Any;
/// use fieldwise::{rules, AnyValidator, FieldIdentity, Mode, Validator};
///
/// struct Comment {
///     body: String,
/// }
///
/// let validator = AnyValidator::new(
///     Validator::builder("Comment")
///         .rule(&FieldIdentity::new("body", |c: &Comment| &c.body), rules::not_blank())
///         .build(),
/// );
///
/// let body: Box<dyn Any> = Box::new(Comment { body: "".into() });
/// let result = validator.validate(body.as_ref(), Mode::CollectAll).unwrap();
/// assert!(result.is_failure());
///
/// let wrong: Box<dyn Any> = Box::new(42u8);
/// assert!(validator.validate(wrong.as_ref(), Mode::CollectAll).is_err());
/// ```
pub struct AnyValidator {
    target_type: TypeId,
    target_name: &'static str,
    run: Arc<dyn Fn(&dyn Any, Mode) -> Option<ValidationResult> + Send + Sync>,
}

impl AnyValidator {
    /// Wraps a typed validator.
    pub fn new<T: 'static>(validator: Validator<T>) -> Self {
        Self {
            target_type: TypeId::of::<T>(),
            target_name: any::type_name::<T>(),
            run: Arc::new(move |value: &dyn Any, mode: Mode| {
                value.downcast_ref::<T>().map(|target| match mode {
                    Mode::CollectAll => validator.validate(target),
                    Mode::FailFast => validator.validate_first(target),
                })
            }),
        }
    }

    /// Returns the `TypeId` of the validated type.
    pub fn target_type(&self) -> TypeId {
        self.target_type
    }

    /// Returns the name of the validated type.
    pub fn target_name(&self) -> &'static str {
        self.target_name
    }

    /// Validates `value` after checking it has the expected type.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::TypeMismatch`] if `value` is not the type this
    /// validator was built for.
    pub fn validate(&self, value: &dyn Any, mode: Mode) -> Result<ValidationResult, DispatchError> {
        (self.run)(value, mode).ok_or_else(|| {
            warn!(expected = self.target_name, "validator received a value of another type");
            DispatchError::TypeMismatch {
                expected: self.target_name,
            }
        })
    }
}

impl fmt::Debug for AnyValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyValidator")
            .field("target", &self.target_name)
            .finish()
    }
}

/// Type alias for the validator storage map.
type ValidatorMap = Arc<RwLock<HashMap<TypeId, Arc<AnyValidator>>>>;

/// A thread-safe registry of validators, keyed by the type they validate.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>`:
/// - Multiple threads can validate concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use fieldwise::{rules, FieldIdentity, Validator, ValidatorSet};
///
/// struct User {
///     name: String,
/// }
///
/// let validators = ValidatorSet::new();
/// validators
///     .register(
///         Validator::builder("User")
///             .rule(&FieldIdentity::new("name", |u: &User| &u.name), rules::not_blank())
///             .build(),
///     )
///     .unwrap();
///
/// let result = validators.validate(&User { name: "Alice".into() }).unwrap();
/// assert!(result.is_success());
///
/// // Types without a validator are a configuration error.
/// assert!(validators.validate(&42u32).is_err());
/// ```
#[derive(Clone, Default)]
pub struct ValidatorSet {
    validators: ValidatorMap,
}

impl ValidatorSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the validator for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DuplicateValidator`] if `T` already has one.
    pub fn register<T: 'static>(&self, validator: Validator<T>) -> Result<(), DispatchError> {
        let mut validators = self.validators.write();
        let type_id = TypeId::of::<T>();

        if validators.contains_key(&type_id) {
            return Err(DispatchError::DuplicateValidator(any::type_name::<T>()));
        }

        debug!(
            target_type = any::type_name::<T>(),
            validator = validator.name(),
            "validator registered"
        );
        validators.insert(type_id, Arc::new(AnyValidator::new(validator)));
        Ok(())
    }

    /// Returns the validator registered for `type_id`.
    pub fn get(&self, type_id: TypeId) -> Option<Arc<AnyValidator>> {
        self.validators.read().get(&type_id).cloned()
    }

    /// Returns true when `T` has a validator.
    pub fn contains<T: 'static>(&self) -> bool {
        self.validators.read().contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.read().len()
    }

    /// Returns true when no validator is registered.
    pub fn is_empty(&self) -> bool {
        self.validators.read().is_empty()
    }

    /// Validates `value` with the validator for `T`, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotRegistered`] if `T` has no validator.
    pub fn validate<T: 'static>(&self, value: &T) -> Result<ValidationResult, DispatchError> {
        self.run(value, Mode::CollectAll)
    }

    /// Validates `value` with the validator for `T`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotRegistered`] if `T` has no validator.
    pub fn validate_first<T: 'static>(&self, value: &T) -> Result<ValidationResult, DispatchError> {
        self.run(value, Mode::FailFast)
    }

    fn run<T: 'static>(&self, value: &T, mode: Mode) -> Result<ValidationResult, DispatchError> {
        let validator = self.get(TypeId::of::<T>()).ok_or_else(|| {
            warn!(target_type = any::type_name::<T>(), "no validator registered");
            DispatchError::NotRegistered(any::type_name::<T>().to_string())
        })?;
        validator.validate(value, mode)
    }

    /// Validates a value whose type is only known at runtime.
    ///
    /// The validator is selected by the value's runtime `TypeId`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotRegistered`] if the value's type has no
    /// validator.
    pub fn validate_dyn(&self, value: &dyn Any, mode: Mode) -> Result<ValidationResult, DispatchError> {
        let type_id = value.type_id();
        let validator = self.get(type_id).ok_or_else(|| {
            warn!(?type_id, "no validator registered");
            DispatchError::NotRegistered(format!("{:?}", type_id))
        })?;
        validator.validate(value, mode)
    }
}

impl fmt::Debug for ValidatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let validators = self.validators.read();
        f.debug_struct("ValidatorSet")
            .field(
                "targets",
                &validators.values().map(|v| v.target_name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Errors raised at the type-erased boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// A validator for the type is already registered.
    #[error("validator for '{0}' already registered")]
    DuplicateValidator(&'static str),

    /// No validator is registered for the type.
    #[error("no validator registered for '{0}'")]
    NotRegistered(String),

    /// A validator received a value of another type.
    #[error("validator for '{expected}' received a value of a different type")]
    TypeMismatch {
        /// Name of the type the validator expects.
        expected: &'static str,
    },
}
