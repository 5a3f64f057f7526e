//! The success-or-problem value type.
//!
//! `Outcome<T>` carries either a payload or a [`ProblemDetails`]. The
//! non-generic form, `Outcome` (that is, `Outcome<()>`), records only whether
//! an operation succeeded.
//!
//! # Conversions
//!
//! - **Narrowing** ([`Outcome::narrow`]): `Outcome<T>` to `Outcome`. A success
//!   payload is dropped.
//! - **Widening** ([`Outcome::widen`]): `Outcome` to `Outcome<U>`. Only a
//!   failure has something to carry; a success yields
//!   [`InvalidState::WidenSuccess`].
//! - **Re-typing** ([`Outcome::convert`]): `Outcome<T>` to `Outcome<U>`. Only
//!   for failures; a success yields [`InvalidState::ConvertSuccess`].
//!
//! Code that forwards failures across payload types should prefer
//! [`Outcome::split`] and [`Failure`], which cannot hold a success at all:
//!
//! ```
//! use outcome_core::{Failure, Outcome};
//!
//! fn load(id: u32) -> Outcome<String> {
//!     if id == 0 {
//!         Outcome::error_with_status("Not found", 404)
//!     } else {
//!         Outcome::ok(format!("item-{id}"))
//!     }
//! }
//!
//! fn length(id: u32) -> Outcome<usize> {
//!     match load(id).split() {
//!         Ok(name) => Outcome::ok(name.len()),
//!         Err(failure) => failure.widen(),
//!     }
//! }
//!
//! assert_eq!(length(7).into_value(), Ok(6));
//! assert_eq!(length(0).error_value().map(|p| p.status()), Ok(404));
//! ```

use crate::content::ContentCategory;
use crate::error::InvalidState;
use crate::problem::{DEFAULT_ERROR_STATUS, ProblemDetails};

/// Either a success payload or a problem.
///
/// A success whose payload may be absent is an `Outcome<Option<T>>`:
/// `Outcome::ok(None)` is a success and is never treated as a failure.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "an outcome may be a failure that should be handled"]
pub enum Outcome<T = ()> {
    /// Success with its payload.
    Ok(T),
    /// Failure with its description.
    Error(ProblemDetails),
}

impl Outcome {
    /// Success without a payload.
    pub const fn success() -> Self {
        Self::Ok(())
    }

    /// Widen a failure into an outcome of any payload type.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidState::WidenSuccess`] if this outcome is a success,
    /// since there is no value to populate the payload with.
    pub fn widen<U>(self) -> Result<Outcome<U>, InvalidState> {
        match self {
            Self::Ok(()) => Err(InvalidState::WidenSuccess),
            Self::Error(problem) => Ok(Outcome::Error(problem)),
        }
    }
}

impl<T> Outcome<T> {
    /// Success carrying `value`.
    pub const fn ok(value: T) -> Self {
        Self::Ok(value)
    }

    /// Failure with status 500 and title "Unknown error".
    pub fn unknown_error() -> Self {
        Self::Error(ProblemDetails::unknown())
    }

    /// Failure with a title and status 500.
    pub fn error(title: impl Into<String>) -> Self {
        Self::Error(ProblemDetails::new(title, DEFAULT_ERROR_STATUS))
    }

    /// Failure with a title and status.
    pub fn error_with_status(title: impl Into<String>, status: u16) -> Self {
        Self::Error(ProblemDetails::new(title, status))
    }

    /// Failure with every descriptor member given.
    ///
    /// `type_uri` defaults to the canonical URI for `status` when `None`.
    pub fn error_full(
        title: impl Into<String>,
        status: u16,
        type_uri: Option<String>,
        detail: Option<String>,
        instance: Option<String>,
    ) -> Self {
        let mut problem = ProblemDetails::new(title, status);
        if let Some(type_uri) = type_uri {
            problem = problem.with_type(type_uri);
        }
        if let Some(detail) = detail {
            problem = problem.with_detail(detail);
        }
        if let Some(instance) = instance {
            problem = problem.with_instance(instance);
        }
        Self::Error(problem)
    }

    /// Failure wrapping a caller-built descriptor.
    pub const fn from_problem(problem: ProblemDetails) -> Self {
        Self::Error(problem)
    }

    /// Whether this outcome is a success.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Whether this outcome is a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Borrow the success payload.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidState::ValueOfFailure`] on a failure.
    pub const fn value(&self) -> Result<&T, InvalidState> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Error(_) => Err(InvalidState::ValueOfFailure),
        }
    }

    /// Take the success payload.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidState::ValueOfFailure`] on a failure.
    pub fn into_value(self) -> Result<T, InvalidState> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Error(_) => Err(InvalidState::ValueOfFailure),
        }
    }

    /// Borrow the problem details.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidState::ErrorOfSuccess`] on a success.
    pub const fn error_value(&self) -> Result<&ProblemDetails, InvalidState> {
        match self {
            Self::Ok(_) => Err(InvalidState::ErrorOfSuccess),
            Self::Error(problem) => Ok(problem),
        }
    }

    /// Take the problem details.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidState::ErrorOfSuccess`] on a success.
    pub fn into_error(self) -> Result<ProblemDetails, InvalidState> {
        match self {
            Self::Ok(_) => Err(InvalidState::ErrorOfSuccess),
            Self::Error(problem) => Ok(problem),
        }
    }

    /// Drop the payload, keeping only success or the problem.
    pub fn narrow(self) -> Outcome {
        match self {
            Self::Ok(_) => Outcome::Ok(()),
            Self::Error(problem) => Outcome::Error(problem),
        }
    }

    /// Re-type a failure to another payload type.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidState::ConvertSuccess`] if this outcome is a success;
    /// there is no conversion between unrelated payloads.
    pub fn convert<U>(self) -> Result<Outcome<U>, InvalidState> {
        match self {
            Self::Ok(_) => Err(InvalidState::ConvertSuccess),
            Self::Error(problem) => Ok(Outcome::Error(problem)),
        }
    }

    /// Separate the payload from a failure that can be forwarded to any
    /// payload type.
    ///
    /// # Errors
    ///
    /// Returns the [`Failure`] when this outcome is not a success.
    pub fn split(self) -> Result<T, Failure> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Error(problem) => Err(Failure(problem)),
        }
    }

    /// A copy of the failure, if any.
    #[must_use]
    pub fn failure(&self) -> Option<Failure> {
        match self {
            Self::Ok(_) => None,
            Self::Error(problem) => Some(Failure(problem.clone())),
        }
    }

    /// Transform the success payload.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Ok(value) => Outcome::Ok(f(value)),
            Self::Error(problem) => Outcome::Error(problem),
        }
    }

    /// Chain an operation that may itself fail.
    pub fn and_then<U, F: FnOnce(T) -> Outcome<U>>(self, f: F) -> Outcome<U> {
        match self {
            Self::Ok(value) => f(value),
            Self::Error(problem) => Outcome::Error(problem),
        }
    }

    /// Convert into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the problem details of a failure.
    pub fn into_result(self) -> Result<T, ProblemDetails> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Error(problem) => Err(problem),
        }
    }

    /// Borrowing view of the payload; a failure's problem is cloned.
    #[must_use]
    pub fn by_ref(&self) -> Outcome<&T> {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Error(problem) => Outcome::Error(problem.clone()),
        }
    }
}

impl<T: 'static> Outcome<T> {
    /// Wire representation for this outcome's payload type.
    #[must_use]
    pub fn content_category(&self) -> ContentCategory {
        ContentCategory::of::<T>()
    }
}

/// A failure detached from any payload type.
///
/// Obtained from [`Outcome::split`] or [`Outcome::failure`]; it converts into
/// an `Outcome<U>` for every `U`. A `Failure` cannot be a success, so
/// propagating it across payload types never hits an invalid state.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure(ProblemDetails);

impl Failure {
    /// Wrap a problem.
    #[must_use]
    pub const fn new(problem: ProblemDetails) -> Self {
        Self(problem)
    }

    /// The problem details.
    #[must_use]
    pub const fn problem(&self) -> &ProblemDetails {
        &self.0
    }

    /// Take the problem details.
    #[must_use]
    pub fn into_problem(self) -> ProblemDetails {
        self.0
    }

    /// Failed outcome of any payload type.
    pub fn widen<U>(self) -> Outcome<U> {
        Outcome::Error(self.0)
    }
}

impl From<ProblemDetails> for Failure {
    fn from(problem: ProblemDetails) -> Self {
        Self(problem)
    }
}

impl<U> From<Failure> for Outcome<U> {
    fn from(failure: Failure) -> Self {
        failure.widen()
    }
}

impl<T> From<ProblemDetails> for Outcome<T> {
    fn from(problem: ProblemDetails) -> Self {
        Self::Error(problem)
    }
}

impl<T, E: Into<ProblemDetails>> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(err) => Self::Error(err.into()),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, ProblemDetails> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}
