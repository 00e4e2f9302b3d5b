//! Fluent declaration of validators.

use crate::constraint::{Constraint, CrossFieldCheck};
use crate::engine::Validator;
use crate::error::ValidationErrorDetail;
use crate::field::FieldIdentity;
use crate::registry::{FieldScope, ValidatorRegistry};
use crate::value::FieldValue;

/// Declares the rules of a [`Validator`] for target type `T`.
///
/// Each method appends to an owned [`ValidatorRegistry`]; [`build`](Self::build)
/// freezes it.
///
/// # Example
///
/// ```rust
/// use fieldwise::{rules, FieldIdentity, Validator};
///
/// struct Signup {
///     password: String,
///     confirm_password: String,
/// }
///
/// let password = FieldIdentity::new("password", |s: &Signup| &s.password);
/// let confirm = FieldIdentity::new("confirm_password", |s: &Signup| &s.confirm_password);
///
/// let validator = Validator::builder("Signup")
///     .rule(&password, rules::min_len(8))
///     .field(confirm, |f| {
///         f.cross_field(rules::equals_field(|s: &Signup| &s.password, "must match password"));
///     })
///     .build();
///
/// let result = validator.validate(&Signup {
///     password: "correct horse".into(),
///     confirm_password: "battery staple".into(),
/// });
/// assert!(result.first_error_for("confirm_password").is_some());
/// ```
pub struct ValidatorBuilder<T> {
    registry: ValidatorRegistry<T>,
}

impl<T: 'static> ValidatorBuilder<T> {
    /// Creates a builder for a validator named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            registry: ValidatorRegistry::new(name),
        }
    }

    /// Configures the rules of `field` inside `configure`.
    ///
    /// The rule set for the field is created on first use; configuring the
    /// same field again appends to it.
    pub fn field<R, F>(mut self, field: FieldIdentity<T, R>, configure: F) -> Self
    where
        R: FieldValue + 'static,
        F: FnOnce(&mut FieldScope<'_, T, R>),
    {
        let mut scope = FieldScope::new(&mut self.registry, field);
        configure(&mut scope);
        self
    }

    /// Appends a single constraint to `field`.
    pub fn rule<R>(mut self, field: &FieldIdentity<T, R>, constraint: Constraint<R>) -> Self
    where
        R: FieldValue + 'static,
    {
        self.registry.add_constraint(field, constraint);
        self
    }

    /// Appends a cross-field check under `field`.
    pub fn cross_field<R>(mut self, field: &FieldIdentity<T, R>, check: CrossFieldCheck<T, R>) -> Self
    where
        R: FieldValue + 'static,
    {
        self.registry.add_cross_field_check(field, check);
        self
    }

    /// Appends a free-form whole-object check under `field_name`.
    pub fn object_check<F>(mut self, field_name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T) -> Option<ValidationErrorDetail> + Send + Sync + 'static,
    {
        self.registry.add_object_check(field_name, check);
        self
    }

    /// Returns the registry being configured.
    pub fn registry_mut(&mut self) -> &mut ValidatorRegistry<T> {
        &mut self.registry
    }

    /// Freezes the declared rules into a [`Validator`].
    pub fn build(self) -> Validator<T> {
        self.registry.build()
    }
}

impl<T: 'static> From<ValidatorRegistry<T>> for ValidatorBuilder<T> {
    fn from(registry: ValidatorRegistry<T>) -> Self {
        Self { registry }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    struct Order {
        quantity: u32,
        unit_price: u32,
        total: u32,
    }

    fn quantity() -> FieldIdentity<Order, u32> {
        FieldIdentity::new("quantity", |o: &Order| &o.quantity)
    }

    #[test]
    fn test_builder_collects_field_configuration() {
        let validator = ValidatorBuilder::new("Order")
            .field(quantity(), |f| {
                f.must(ErrorCode::OutOfRange, "must be positive", |q: &u32| *q > 0);
            })
            .field(quantity(), |f| {
                f.must(ErrorCode::OutOfRange, "at most 100", |q: &u32| *q <= 100);
            })
            .build();

        assert_eq!(validator.name(), "Order");
        assert_eq!(validator.field_names().collect::<Vec<_>>(), vec!["quantity"]);
        assert_eq!(validator.constraint_count(), 2);
    }

    #[test]
    fn test_object_check_attributed_to_registered_field() {
        let validator = ValidatorBuilder::new("Order")
            .object_check("total", |o: &Order| {
                (o.quantity * o.unit_price != o.total).then(|| {
                    ValidationErrorDetail::new(
                        ErrorCode::CustomError,
                        "total must equal quantity * unit_price",
                    )
                    .with_actual_value(o.total.to_string())
                })
            })
            .build();

        let order = Order {
            quantity: 5,
            unit_price: 10,
            total: 30,
        };
        let result = validator.validate(&order);
        let error = result.first_error_for("total").unwrap();
        assert_eq!(error.code, ErrorCode::CustomError);
        assert_eq!(error.actual_value, "30");

        let order = Order { total: 50, ..order };
        assert!(validator.validate(&order).is_success());
    }

    #[test]
    fn test_builder_from_registry() {
        let mut registry = ValidatorRegistry::new("Order");
        registry.add_constraint(
            &quantity(),
            Constraint::new(ErrorCode::OutOfRange, "positive", |q: &u32| *q > 0),
        );

        let mut builder = ValidatorBuilder::from(registry);
        assert_eq!(builder.registry_mut().constraint_count(), 1);
        assert_eq!(builder.build().constraint_count(), 1);
    }
}
