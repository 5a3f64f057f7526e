//! # Outcome Core
//!
//! A success-or-problem value type for request handlers and message
//! pipelines.
//!
//! An [`Outcome<T>`] is either a success payload or a [`ProblemDetails`]
//! describing why the operation failed. Handlers return outcomes instead of
//! raising errors; adapters turn them into HTTP responses, API documentation,
//! or pipeline short-circuits.
//!
//! ## Core Concepts
//!
//! - **Outcome**: `Ok(T)` or `Error(ProblemDetails)`; `Outcome` alone means `Outcome<()>`
//! - **ProblemDetails**: RFC 9457 error record (type, title, status, detail, instance, errors)
//! - **Failure**: a problem detached from any payload type, for cross-type propagation
//! - **ContentCategory**: wire representation picked from the payload type
//!
//! ## Example
//!
//! ```
//! use outcome_core::{Outcome, ProblemDetails};
//!
//! fn find_order(id: u32) -> Outcome<String> {
//!     if id == 42 {
//!         Outcome::ok("espresso".to_string())
//!     } else {
//!         Outcome::from_problem(
//!             ProblemDetails::new("Order not found", 404)
//!                 .with_detail(format!("No order with id {id}")),
//!         )
//!     }
//! }
//!
//! assert!(find_order(42).is_ok());
//! assert_eq!(find_order(7).error_value().map(ProblemDetails::status), Ok(404));
//! ```

pub mod content;
pub mod error;
pub mod outcome;
pub mod problem;
pub mod status;

// Re-export key types for convenience
pub use content::{ByteStream, ContentCategory, XmlDocument, XmlElement, is_empty_payload};
pub use error::InvalidState;
pub use outcome::{Failure, Outcome};
pub use problem::{FieldErrors, ProblemDetails, RESERVED_MEMBERS, is_reserved_member};
pub use status::status_to_problem_type;
