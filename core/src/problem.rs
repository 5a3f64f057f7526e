//! Problem details: the error arm of an [`Outcome`](crate::Outcome).
//!
//! Follows the RFC 9457 document shape:
//!
//! ```json
//! {
//!   "type": "https://tools.ietf.org/html/rfc9110#section-15.5.1",
//!   "title": "One or more validation errors occurred.",
//!   "status": 400,
//!   "errors": { "Email": ["required", "invalid format"] }
//! }
//! ```
//!
//! Optional members are omitted from the wire form when absent. Extension
//! members are flattened next to the standard ones.

use crate::status::{reason_phrase, status_to_problem_type};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default status for failures created without one.
pub const DEFAULT_ERROR_STATUS: u16 = 500;

/// Default title for failures created without one.
pub const UNKNOWN_ERROR_TITLE: &str = "Unknown error";

/// Standard members of the problem document.
///
/// Extension members with these names would be written twice, so they are
/// refused.
pub const RESERVED_MEMBERS: [&str; 6] = ["type", "title", "status", "detail", "instance", "errors"];

/// Whether `name` is one of the [`RESERVED_MEMBERS`].
#[must_use]
pub fn is_reserved_member(name: &str) -> bool {
    RESERVED_MEMBERS.contains(&name)
}

/// Per-field validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Structured description of a failure.
///
/// Immutable once built. The `with_*` methods consume and return the value,
/// so a descriptor is assembled in one expression and never mutated after it
/// is wrapped in an outcome.
///
/// # Examples
///
/// ```
/// use outcome_core::ProblemDetails;
///
/// let problem = ProblemDetails::new("Order not found", 404)
///     .with_detail("No order with id 42")
///     .with_instance("/orders/42");
///
/// assert_eq!(problem.status(), 404);
/// assert_eq!(problem.type_uri(), "https://tools.ietf.org/html/rfc9110#section-15.5.5");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    type_uri: String,
    title: String,
    status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
    #[serde(flatten)]
    extensions: BTreeMap<String, serde_json::Value>,
}

impl ProblemDetails {
    /// Create a problem with a title and status.
    ///
    /// The type defaults to the canonical URI for `status`.
    #[must_use]
    pub fn new(title: impl Into<String>, status: u16) -> Self {
        Self {
            type_uri: status_to_problem_type(status).to_string(),
            title: title.into(),
            status,
            detail: None,
            instance: None,
            errors: None,
            extensions: BTreeMap::new(),
        }
    }

    /// Create a problem titled with the status reason phrase.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        Self::new(reason_phrase(status).unwrap_or(UNKNOWN_ERROR_TITLE), status)
    }

    /// The 500 "Unknown error" problem.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_ERROR_TITLE, DEFAULT_ERROR_STATUS)
    }

    /// Replace the problem type URI.
    #[must_use]
    pub fn with_type(mut self, type_uri: impl Into<String>) -> Self {
        self.type_uri = type_uri.into();
        self
    }

    /// Set the human-readable explanation of this occurrence.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the URI identifying this occurrence.
    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Replace the per-field validation messages.
    #[must_use]
    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Append one message for a field, after any existing messages for it.
    #[must_use]
    pub fn with_field_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors
            .get_or_insert_with(BTreeMap::new)
            .entry(field.into())
            .or_default()
            .push(message.into());
        self
    }

    /// Add an extension member such as `traceId`.
    ///
    /// Names of standard members (see [`RESERVED_MEMBERS`]) are ignored.
    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        let key = key.into();
        if is_reserved_member(&key) {
            tracing::warn!(member = %key, "Ignoring extension named after a standard member");
            return self;
        }
        self.extensions.insert(key, value.into());
        self
    }

    /// Problem type URI.
    #[must_use]
    pub fn type_uri(&self) -> &str {
        &self.type_uri
    }

    /// Short summary of the problem type.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Explanation specific to this occurrence.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// URI of this occurrence.
    #[must_use]
    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    /// Per-field validation messages.
    #[must_use]
    pub const fn errors(&self) -> Option<&FieldErrors> {
        self.errors.as_ref()
    }

    /// Extension members.
    #[must_use]
    pub const fn extensions(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extensions
    }

    /// Whether the status is in the 5xx range.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}

impl Default for ProblemDetails {
    fn default() -> Self {
        Self::unknown()
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.status, self.title)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ProblemDetails {}

/// Opaque 500 for unexpected errors.
///
/// The cause is logged and never copied into the problem, so internal
/// messages do not leak to clients.
impl From<anyhow::Error> for ProblemDetails {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "Unexpected error converted to problem details");
        Self::from_status(DEFAULT_ERROR_STATUS)
    }
}
