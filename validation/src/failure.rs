//! Field failures and their problem-details form.

use outcome_core::{FieldErrors, Outcome, ProblemDetails, status_to_problem_type};
use thiserror::Error;

/// Status used for every validation problem.
pub const VALIDATION_STATUS: u16 = 400;

/// Title used for every validation problem.
pub const VALIDATION_TITLE: &str = "One or more validation errors occurred.";

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Ordered collection of field errors from one validation pass.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("validation failed with {} error(s)", .errors.len())]
pub struct ValidationFailure {
    errors: Vec<FieldError>,
}

impl ValidationFailure {
    /// An empty failure to add errors to.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Append an error; order is preserved.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.push(FieldError::new(field, message));
        self
    }

    /// Append an error in place.
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Errors in the order they were recorded.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl FromIterator<FieldError> for ValidationFailure {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl<F: Into<String>, M: Into<String>> FromIterator<(F, M)> for ValidationFailure {
    fn from_iter<I: IntoIterator<Item = (F, M)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(field, message)| FieldError::new(field, message))
            .collect()
    }
}

/// Build the 400 problem for a set of field errors.
///
/// Messages for the same field are grouped under one key, in the order they
/// were recorded.
///
/// # Examples
///
/// ```
/// use outcome_validation::{ValidationFailure, to_problem_details};
///
/// let failure = ValidationFailure::new()
///     .with("Name", "required")
///     .with("Email", "required")
///     .with("Email", "invalid format");
///
/// let problem = to_problem_details(&failure);
/// assert_eq!(problem.status(), 400);
/// assert_eq!(problem.errors().map(|e| e.len()), Some(2));
/// ```
#[must_use]
pub fn to_problem_details(failure: &ValidationFailure) -> ProblemDetails {
    failure.errors.iter().fold(
        ProblemDetails::new(VALIDATION_TITLE, VALIDATION_STATUS)
            .with_type(status_to_problem_type(VALIDATION_STATUS))
            .with_errors(FieldErrors::new()),
        |problem, error| problem.with_field_error(&error.field, &error.message),
    )
}

impl From<ValidationFailure> for ProblemDetails {
    fn from(failure: ValidationFailure) -> Self {
        to_problem_details(&failure)
    }
}

impl<T> From<ValidationFailure> for Outcome<T> {
    fn from(failure: ValidationFailure) -> Self {
        Self::from_problem(to_problem_details(&failure))
    }
}
