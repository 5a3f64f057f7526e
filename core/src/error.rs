//! Contract violations raised by [`Outcome`](crate::Outcome) accessors and conversions.
//!
//! These are programming errors: reading the wrong arm of an outcome, or
//! asking for a conversion that has no value to carry across. They are
//! returned rather than panicking so callers decide how loudly to fail.

use thiserror::Error;

/// An outcome was used in a state that does not support the operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidState {
    /// The success payload was requested from a failed outcome.
    #[error("invalid state: cannot read the value of a failed outcome")]
    ValueOfFailure,

    /// The problem details were requested from a successful outcome.
    #[error("invalid state: cannot read the error of a successful outcome")]
    ErrorOfSuccess,

    /// A successful outcome was converted to an unrelated payload type.
    #[error("invalid state: a successful outcome cannot change its payload type")]
    ConvertSuccess,

    /// A successful non-generic outcome was widened to a payload-carrying one.
    #[error("invalid state: a successful outcome has no value to widen into a payload")]
    WidenSuccess,
}
