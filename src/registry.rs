//! Rule registration for one target type.
//!
//! This module provides [`ValidatorRegistry`], the mutable, configuration-phase
//! store of every rule declared for a target type `T`, and [`FieldScope`], the
//! handle a field's configuration callback receives.
//!
//! Rules are kept in two insertion-ordered maps keyed by field name: per-field
//! rule sets, and whole-object checks (cross-field checks and free-form object
//! checks). Registration only appends. Once configured, [`ValidatorRegistry::build`]
//! freezes the registry into an immutable [`Validator`].

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::constraint::{Constraint, CrossFieldCheck};
use crate::engine::Validator;
use crate::error::{ErrorCode, ValidationErrorDetail};
use crate::field::{FieldIdentity, FieldRuleSet, FieldRules};
use crate::value::FieldValue;

/// A whole-object check stored under a field name.
pub(crate) type ObjectCheck<T> = Arc<dyn Fn(&T) -> Option<ValidationErrorDetail> + Send + Sync>;

/// The rules declared for target type `T`.
///
/// # Example
///
/// ```rust
/// use fieldwise::{rules, FieldIdentity, ValidatorRegistry};
///
/// struct User {
///     name: String,
/// }
///
/// let name = FieldIdentity::new("name", |u: &User| &u.name);
///
/// let mut registry = ValidatorRegistry::new("User");
/// registry.add_constraint(&name, rules::not_blank());
/// registry.add_constraint(&name, rules::max_len(64));
/// assert_eq!(registry.constraint_count(), 2);
///
/// let validator = registry.build();
/// assert!(validator.validate(&User { name: "Alice".into() }).is_success());
/// ```
pub struct ValidatorRegistry<T> {
    name: String,
    field_rule_sets: IndexMap<String, Box<dyn FieldRules<T>>>,
    cross_field_rule_sets: IndexMap<String, Vec<ObjectCheck<T>>>,
}

impl<T: 'static> ValidatorRegistry<T> {
    /// Creates an empty registry. `name` identifies the validator in logs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_rule_sets: IndexMap::new(),
            cross_field_rule_sets: IndexMap::new(),
        }
    }

    /// Returns the validator name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rule set for `field`, creating an empty one on first use.
    ///
    /// Repeated calls with the same field name return the same rule set, so
    /// constraints added through any of them accumulate.
    ///
    /// # Panics
    ///
    /// Panics if the field name was first registered with a different value
    /// type. That is a declaration mistake, not a validation outcome.
    pub fn field_rule_set<R>(&mut self, field: &FieldIdentity<T, R>) -> &mut FieldRuleSet<T, R>
    where
        R: FieldValue + 'static,
    {
        let rules = self
            .field_rule_sets
            .entry(field.name().to_string())
            .or_insert_with(|| Box::new(FieldRuleSet::new(field.clone())));
        let registered = rules.value_type();

        match rules.as_any_mut().downcast_mut::<FieldRuleSet<T, R>>() {
            Some(rules) => rules,
            None => panic!(
                "field '{}' of '{}' is registered with value type {} but was used as {}",
                field.name(),
                self.name,
                registered,
                std::any::type_name::<R>(),
            ),
        }
    }

    /// Appends `constraint` to the rules of `field`.
    pub fn add_constraint<R>(&mut self, field: &FieldIdentity<T, R>, constraint: Constraint<R>)
    where
        R: FieldValue + 'static,
    {
        self.field_rule_set(field).push(constraint);
    }

    /// Appends a cross-field check under `field`.
    ///
    /// Failures are reported against the field's name unless the check
    /// names another field through [`CrossFieldCheck::report_as`]. The field
    /// is read through its canonical rule set, created if needed.
    ///
    /// # Panics
    ///
    /// Panics if the field name was first registered with a different value
    /// type.
    pub fn add_cross_field_check<R>(&mut self, field: &FieldIdentity<T, R>, check: CrossFieldCheck<T, R>)
    where
        R: FieldValue + 'static,
    {
        let accessor = self.field_rule_set(field).field().clone();
        self.push_object_check(
            field.name().to_string(),
            Arc::new(move |target: &T| {
                check.evaluate(target, accessor.get(target), accessor.name())
            }),
        );
    }

    /// Appends a free-form check over the whole target under `field_name`.
    ///
    /// The closure returns a failure or `None`. A failure without a field name
    /// is attributed to `field_name`.
    pub fn add_object_check<F>(&mut self, field_name: impl Into<String>, check: F)
    where
        F: Fn(&T) -> Option<ValidationErrorDetail> + Send + Sync + 'static,
    {
        self.push_object_check(field_name.into(), Arc::new(check));
    }

    fn push_object_check(&mut self, field_name: String, check: ObjectCheck<T>) {
        self.cross_field_rule_sets
            .entry(field_name)
            .or_default()
            .push(check);
    }

    /// Returns the names of fields with rule sets, in registration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.field_rule_sets.keys().map(String::as_str)
    }

    /// Returns the total number of single-field constraints.
    pub fn constraint_count(&self) -> usize {
        self.field_rule_sets
            .values()
            .map(|rules| rules.constraint_count())
            .sum()
    }

    /// Returns the total number of cross-field and object checks.
    pub fn cross_field_count(&self) -> usize {
        self.cross_field_rule_sets.values().map(Vec::len).sum()
    }

    /// Returns true when no rule of any kind is registered.
    pub fn is_empty(&self) -> bool {
        self.constraint_count() == 0 && self.cross_field_count() == 0
    }

    /// Freezes the registry into an immutable, shareable [`Validator`].
    pub fn build(self) -> Validator<T> {
        debug!(
            validator = %self.name,
            fields = self.field_rule_sets.len(),
            constraints = self.constraint_count(),
            cross_field_checks = self.cross_field_count(),
            "validator built"
        );
        Validator::from_parts(
            self.name,
            self.field_rule_sets.into_values().collect(),
            self.cross_field_rule_sets.into_iter().collect(),
        )
    }
}

impl<T> fmt::Debug for ValidatorRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("name", &self.name)
            .field("fields", &self.field_rule_sets.keys().collect::<Vec<_>>())
            .field(
                "cross_fields",
                &self.cross_field_rule_sets.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Rule attachment for one field, handed to configuration callbacks.
///
/// Every method appends to the registry through the field's canonical rule
/// set and returns the scope for chaining.
pub struct FieldScope<'a, T, R> {
    registry: &'a mut ValidatorRegistry<T>,
    field: FieldIdentity<T, R>,
}

impl<'a, T, R> FieldScope<'a, T, R>
where
    T: 'static,
    R: FieldValue + 'static,
{
    pub(crate) fn new(registry: &'a mut ValidatorRegistry<T>, field: FieldIdentity<T, R>) -> Self {
        registry.field_rule_set(&field);
        Self { registry, field }
    }

    /// Returns the field this scope configures.
    pub fn field(&self) -> &FieldIdentity<T, R> {
        &self.field
    }

    /// Appends a constraint.
    pub fn rule(&mut self, constraint: Constraint<R>) -> &mut Self {
        self.registry.add_constraint(&self.field, constraint);
        self
    }

    /// Appends an inline constraint built from a predicate.
    pub fn must<P>(&mut self, code: ErrorCode, hint: impl Into<String>, predicate: P) -> &mut Self
    where
        P: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.rule(Constraint::new(code, hint, predicate))
    }

    /// Appends a cross-field check.
    pub fn cross_field(&mut self, check: CrossFieldCheck<T, R>) -> &mut Self {
        self.registry.add_cross_field_check(&self.field, check);
        self
    }
}
