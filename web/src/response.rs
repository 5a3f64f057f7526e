//! Writing outcomes as HTTP responses.
//!
//! `Outcome` lives in another crate, so the `IntoResponse` impl sits on the
//! [`ApiOutcome`] wrapper. Handlers return `ApiOutcome<T>` (or convert with
//! `.into()`):
//!
//! ```rust
//! use outcome_core::{Outcome, ProblemDetails};
//! use outcome_web::ApiOutcome;
//!
//! async fn find_order(id: u32) -> ApiOutcome<String> {
//!     if id == 0 {
//!         return Outcome::from_problem(ProblemDetails::new("Order not found", 404)).into();
//!     }
//!     Outcome::ok(format!("order {id}")).into()
//! }
//! ```
//!
//! Success payloads are written by [`ContentCategory`]: unit becomes
//! `204 No Content`, text and bytes are written raw, XML as
//! `application/xml`, everything else as JSON. Failures are written as
//! `application/problem+json` with the descriptor's status.

use axum::{
    body::Body,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::{HeaderValue, StatusCode, header::CONTENT_TYPE};
use outcome_core::{
    ByteStream, ContentCategory, Outcome, ProblemDetails, XmlDocument, XmlElement,
    is_empty_payload,
};
use serde::Serialize;
use std::any::Any;
use std::borrow::Cow;

/// Media type of problem bodies.
pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

type AnyPayload = Box<dyn Any + Send>;

/// An [`Outcome`] that axum can return from a handler.
#[derive(Debug)]
pub struct ApiOutcome<T = ()>(pub Outcome<T>);

impl<T> ApiOutcome<T> {
    /// Unwrap the outcome.
    #[must_use]
    pub fn into_inner(self) -> Outcome<T> {
        self.0
    }
}

impl<T> From<Outcome<T>> for ApiOutcome<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self(outcome)
    }
}

impl<T, E: Into<ProblemDetails>> From<Result<T, E>> for ApiOutcome<T> {
    fn from(result: Result<T, E>) -> Self {
        Self(Outcome::from(result))
    }
}

impl<T: Serialize + Send + 'static> IntoResponse for ApiOutcome<T> {
    fn into_response(self) -> Response {
        match self.0 {
            Outcome::Ok(value) => success_response(value),
            Outcome::Error(problem) => problem_response(problem),
        }
    }
}

fn success_response<T: Serialize + Send + 'static>(value: T) -> Response {
    if is_empty_payload::<T>() {
        return StatusCode::NO_CONTENT.into_response();
    }

    let category = ContentCategory::of::<T>();
    if category == ContentCategory::Json {
        return match serde_json::to_vec(&value) {
            Ok(body) => with_content_type(Body::from(body), category.media_type()),
            Err(error) => {
                tracing::error!(error = %error, "Failed to serialize response payload");
                problem_response(ProblemDetails::from_status(500))
            }
        };
    }

    match raw_body(Box::new(value)) {
        Ok(body) => with_content_type(body, category.media_type()),
        Err(_) => {
            tracing::error!(category = ?category, "Payload type has no raw body writer");
            problem_response(ProblemDetails::from_status(500))
        }
    }
}

fn take<U: 'static>(payload: AnyPayload, into_body: impl FnOnce(U) -> Body) -> Result<Body, AnyPayload> {
    payload.downcast::<U>().map(|value| into_body(*value))
}

/// Raw body for text, binary and XML payloads.
fn raw_body(payload: AnyPayload) -> Result<Body, AnyPayload> {
    take::<String>(payload, Body::from)
        .or_else(|p| take::<&'static str>(p, Body::from))
        .or_else(|p| take::<Box<str>>(p, |text| Body::from(String::from(text))))
        .or_else(|p| take::<Cow<'static, str>>(p, Body::from))
        .or_else(|p| take::<Vec<u8>>(p, Body::from))
        .or_else(|p| take::<&'static [u8]>(p, Body::from))
        .or_else(|p| take::<Box<[u8]>>(p, |bytes| Body::from(Vec::from(bytes))))
        .or_else(|p| take::<Bytes>(p, Body::from))
        .or_else(|p| take::<ByteStream>(p, |stream| Body::from_stream(stream.into_inner())))
        .or_else(|p| take::<XmlDocument>(p, |xml| Body::from(xml.into_string())))
        .or_else(|p| take::<XmlElement>(p, |xml| Body::from(xml.into_string())))
}

fn with_content_type(body: Body, media_type: &'static str) -> Response {
    let mut response = body.into_response();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(media_type));
    response
}

/// Write a problem response, logging server errors.
///
/// The descriptor is also stored in the response extensions so outer layers
/// can read and enrich it.
#[must_use]
pub fn problem_response(problem: ProblemDetails) -> Response {
    if problem.is_server_error() {
        tracing::error!(
            status = problem.status(),
            title = %problem.title(),
            detail = problem.detail().unwrap_or_default(),
            "Server error"
        );
    }
    render_problem(problem)
}

/// Write a problem response without logging.
pub(crate) fn render_problem(problem: ProblemDetails) -> Response {
    let status =
        StatusCode::from_u16(problem.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match serde_json::to_vec(&problem) {
        Ok(body) => body,
        Err(error) => {
            tracing::error!(error = %error, "Failed to serialize problem details");
            serde_json::to_vec(&ProblemDetails::from_status(500)).unwrap_or_default()
        }
    };

    let mut response = with_content_type(Body::from(body), PROBLEM_CONTENT_TYPE);
    *response.status_mut() = status;
    response.extensions_mut().insert(problem);
    response
}
