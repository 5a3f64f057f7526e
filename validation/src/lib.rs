//! Validation adapter for [`Outcome`](outcome_core::Outcome).
//!
//! Converts field-level validation failures into a 400 problem whose
//! `errors` member groups messages by field:
//!
//! ```json
//! {
//!   "type": "https://tools.ietf.org/html/rfc9110#section-15.5.1",
//!   "title": "One or more validation errors occurred.",
//!   "status": 400,
//!   "errors": {
//!     "Email": ["required", "invalid format"],
//!     "Name": ["required"]
//!   }
//! }
//! ```
//!
//! [`Validator`] provides a minimal ordered rule set and plugs into
//! pipelines as a [`Check`](outcome_pipeline::Check).

pub mod failure;
pub mod validator;

pub use failure::{
    FieldError, VALIDATION_STATUS, VALIDATION_TITLE, ValidationFailure, to_problem_details,
};
pub use validator::Validator;
