//! Axum integration for [`Outcome`](outcome_core::Outcome).
//!
//! Handlers return [`ApiOutcome<T>`]; the response writer picks the status,
//! media type and body from the outcome, and [`problem_details_layer`]
//! enriches failures on their way out.
//!
//! # Response Mapping
//!
//! ```text
//! Outcome::Ok(())              → 204 No Content
//! Outcome::Ok(String)          → 200 text/plain; charset=utf-8
//! Outcome::Ok(Vec<u8> | Bytes) → 200 application/octet-stream
//! Outcome::Ok(ByteStream)      → 200 application/octet-stream (streamed)
//! Outcome::Ok(XmlDocument)     → 200 application/xml
//! Outcome::Ok(T: Serialize)    → 200 application/json
//! Outcome::Error(problem)      → problem.status application/problem+json
//! ```
//!
//! # Example
//!
//! ```rust
//! use axum::{Router, routing::get, extract::Path};
//! use outcome_core::{Outcome, ProblemDetails};
//! use outcome_web::{ApiOutcome, ProblemOptions, problem_details_layer};
//!
//! async fn order_name(Path(id): Path<u32>) -> ApiOutcome<String> {
//!     match id {
//!         7 => Outcome::ok("Seven".to_string()).into(),
//!         _ => Outcome::from_problem(ProblemDetails::new("Order not found", 404)).into(),
//!     }
//! }
//!
//! let app: Router = Router::new()
//!     .route("/orders/:id/name", get(order_name))
//!     .layer(problem_details_layer(ProblemOptions::default()));
//! ```

pub mod config;
pub mod middleware;
pub mod response;

pub use config::{ProblemOptions, ProblemOptionsBuilder};
pub use middleware::{
    CORRELATION_ID_HEADER, PROBLEM_RESPONSES_METRIC, ProblemDetailsLayer, ProblemDetailsMiddleware,
    problem_details_layer,
};
pub use response::{ApiOutcome, PROBLEM_CONTENT_TYPE, problem_response};
