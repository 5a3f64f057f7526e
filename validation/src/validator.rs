//! Ordered rule sets.
//!
//! A [`Validator`] is a list of `(field, predicate, message)` rules evaluated
//! in registration order. It is deliberately small: anything richer belongs in
//! a dedicated validation library whose output is fed to
//! [`to_problem_details`](crate::to_problem_details).

use crate::failure::{FieldError, ValidationFailure, to_problem_details};
use outcome_core::Outcome;
use outcome_pipeline::Check;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

struct Rule<T> {
    field: String,
    predicate: Predicate<T>,
    message: String,
}

/// Rules over values of type `T`.
///
/// # Example
///
/// ```
/// use outcome_validation::Validator;
///
/// struct SignUp {
///     name: String,
///     email: String,
/// }
///
/// let validator = Validator::new()
///     .rule("Name", |s: &SignUp| !s.name.is_empty(), "required")
///     .rule("Email", |s: &SignUp| !s.email.is_empty(), "required")
///     .rule("Email", |s: &SignUp| s.email.contains('@'), "invalid format");
///
/// let outcome = validator.check(&SignUp { name: String::new(), email: String::new() });
/// assert_eq!(outcome.error_value().map(|p| p.status()), Ok(400));
/// ```
pub struct Validator<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Validator<T> {
    /// A validator with no rules.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a rule; `predicate` returns `true` when the value is valid.
    #[must_use]
    pub fn rule<P>(mut self, field: impl Into<String>, predicate: P, message: impl Into<String>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            field: field.into(),
            predicate: Box::new(predicate),
            message: message.into(),
        });
        self
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule.
    ///
    /// # Errors
    ///
    /// Returns every failed rule, in registration order.
    pub fn validate(&self, value: &T) -> Result<(), ValidationFailure> {
        let failure: ValidationFailure = self
            .rules
            .iter()
            .filter(|rule| !(rule.predicate)(value))
            .map(|rule| FieldError::new(rule.field.clone(), rule.message.clone()))
            .collect();

        if failure.is_empty() {
            Ok(())
        } else {
            tracing::debug!(errors = failure.len(), "Validation failed");
            Err(failure)
        }
    }

    /// Run every rule and report the result as a non-generic outcome.
    pub fn check(&self, value: &T) -> Outcome {
        match self.validate(value) {
            Ok(()) => Outcome::success(),
            Err(failure) => Outcome::from_problem(to_problem_details(&failure)),
        }
    }
}

impl<T> Default for Validator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Validators guard pipeline stages.
impl<T> Check<T> for Validator<T> {
    fn check(&self, input: &T) -> Outcome {
        Validator::check(self, input)
    }
}
