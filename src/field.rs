//! Field identities and per-field rule sets.
//!
//! This module provides [`FieldIdentity`], the stable handle naming one field
//! of a target type, and [`FieldRuleSet`], the ordered constraints attached to
//! that field.

use std::any::{self, Any};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::constraint::Constraint;
use crate::error::ValidationErrorDetail;
use crate::value::FieldValue;

type AccessorFn<T, R> = Arc<dyn Fn(&T) -> &R + Send + Sync>;

/// Identifies "field `name` of type `T`" together with how to read it.
///
/// Identity is the field name alone: two identities with the same name are
/// equal and hash the same, whatever their accessors. Registering rules
/// through either one accumulates into the same [`FieldRuleSet`].
///
/// # Example
///
/// ```rust
/// use fieldwise::FieldIdentity;
///
/// struct User {
///     name: String,
/// }
///
/// let name = FieldIdentity::new("name", |u: &User| &u.name);
/// let user = User { name: "Alice".into() };
///
/// assert_eq!(name.name(), "name");
/// assert_eq!(name.get(&user), "Alice");
/// ```
pub struct FieldIdentity<T, R> {
    name: String,
    accessor: AccessorFn<T, R>,
}

impl<T, R> FieldIdentity<T, R> {
    /// Creates an identity for the field `name`, read through `accessor`.
    pub fn new<F>(name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> &R + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            accessor: Arc::new(accessor),
        }
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads the field from `target`.
    pub fn get<'a>(&self, target: &'a T) -> &'a R {
        (self.accessor)(target)
    }
}

impl<T, R> Clone for FieldIdentity<T, R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            accessor: Arc::clone(&self.accessor),
        }
    }
}

impl<T, R> PartialEq for FieldIdentity<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T, R> Eq for FieldIdentity<T, R> {}

impl<T, R> Hash for FieldIdentity<T, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T, R> fmt::Debug for FieldIdentity<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldIdentity")
            .field("name", &self.name)
            .field("accessor", &"<function>")
            .finish()
    }
}

/// The ordered constraints registered for one field of `T`.
///
/// Rule sets only grow: [`push`](Self::push) appends and nothing replaces or
/// removes constraints. Identical constraints may appear more than once;
/// duplicate failures are collapsed when results are aggregated.
pub struct FieldRuleSet<T, R> {
    field: FieldIdentity<T, R>,
    constraints: Vec<Constraint<R>>,
}

impl<T, R> FieldRuleSet<T, R> {
    /// Creates an empty rule set for `field`.
    pub fn new(field: FieldIdentity<T, R>) -> Self {
        Self {
            field,
            constraints: Vec::new(),
        }
    }

    /// Returns the field name.
    pub fn field_name(&self) -> &str {
        self.field.name()
    }

    /// Returns the identity this rule set belongs to.
    pub fn field(&self) -> &FieldIdentity<T, R> {
        &self.field
    }

    /// Appends a constraint and returns self for chaining.
    pub fn push(&mut self, constraint: Constraint<R>) -> &mut Self {
        self.constraints.push(constraint);
        self
    }

    /// Returns the constraints in registration order.
    pub fn constraints(&self) -> &[Constraint<R>] {
        &self.constraints
    }

    /// Returns the number of registered constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns true when no constraint is registered.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl<T, R: FieldValue> FieldRuleSet<T, R> {
    /// Evaluates every constraint in order, appending failures to `errors`.
    pub fn collect_errors(&self, target: &T, errors: &mut Vec<ValidationErrorDetail>) {
        let value = self.field.get(target);
        errors.extend(
            self.constraints
                .iter()
                .filter_map(|c| c.evaluate(value, self.field.name())),
        );
    }

    /// Returns the failure of the first constraint the field violates.
    pub fn first_error(&self, target: &T) -> Option<ValidationErrorDetail> {
        let value = self.field.get(target);
        self.constraints
            .iter()
            .find_map(|c| c.evaluate(value, self.field.name()))
    }
}

impl<T, R> fmt::Debug for FieldRuleSet<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRuleSet")
            .field("field", &self.field.name())
            .field("constraints", &self.constraints)
            .finish()
    }
}

/// Type-erased view of a [`FieldRuleSet`], so rule sets of different value
/// types can live in one registry for `T`.
pub(crate) trait FieldRules<T>: Send + Sync {
    fn field_name(&self) -> &str;

    fn value_type(&self) -> &'static str;

    fn constraint_count(&self) -> usize;

    fn collect_errors(&self, target: &T, errors: &mut Vec<ValidationErrorDetail>);

    fn first_error(&self, target: &T) -> Option<ValidationErrorDetail>;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T, R> FieldRules<T> for FieldRuleSet<T, R>
where
    T: 'static,
    R: FieldValue + 'static,
{
    fn field_name(&self) -> &str {
        self.field.name()
    }

    fn value_type(&self) -> &'static str {
        any::type_name::<R>()
    }

    fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    fn collect_errors(&self, target: &T, errors: &mut Vec<ValidationErrorDetail>) {
        FieldRuleSet::collect_errors(self, target, errors)
    }

    fn first_error(&self, target: &T) -> Option<ValidationErrorDetail> {
        FieldRuleSet::first_error(self, target)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
