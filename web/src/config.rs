//! Options for the problem-details layer.
//!
//! # Example
//!
//! ```rust
//! use outcome_web::ProblemOptions;
//!
//! let options = ProblemOptions::builder()
//!     .instance_from_path(false)
//!     .trace_id_member("correlationId")
//!     .build();
//!
//! assert!(!options.instance_from_path);
//! assert_eq!(options.trace_id_member.as_deref(), Some("correlationId"));
//! ```

use outcome_core::is_reserved_member;
use std::borrow::Cow;

/// Extension member that carries the correlation id by default.
pub const DEFAULT_TRACE_ID_MEMBER: &str = "traceId";

/// How problem responses are enriched on the way out.
///
/// # Default Values
///
/// - `instance_from_path`: true
/// - `trace_id_member`: `"traceId"`
/// - `record_metrics`: true
/// - `log_client_errors`: false
/// - `problem_for_empty_errors`: true
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemOptions {
    /// Fill a missing `instance` with the request path
    pub instance_from_path: bool,
    /// Extension member for the correlation id; `None` leaves it out
    pub trace_id_member: Option<Cow<'static, str>>,
    /// Count problem responses with `metrics`
    pub record_metrics: bool,
    /// Log 4xx problems at `warn`; 5xx are always logged
    pub log_client_errors: bool,
    /// Replace empty 4xx/5xx bodies with a problem built from the status
    pub problem_for_empty_errors: bool,
}

impl Default for ProblemOptions {
    fn default() -> Self {
        Self {
            instance_from_path: true,
            trace_id_member: Some(Cow::Borrowed(DEFAULT_TRACE_ID_MEMBER)),
            record_metrics: true,
            log_client_errors: false,
            problem_for_empty_errors: true,
        }
    }
}

impl ProblemOptions {
    /// Create a new options builder starting from the defaults.
    #[must_use]
    pub fn builder() -> ProblemOptionsBuilder {
        ProblemOptionsBuilder {
            options: Self::default(),
        }
    }
}

/// Builder for [`ProblemOptions`].
#[derive(Debug, Clone)]
pub struct ProblemOptionsBuilder {
    options: ProblemOptions,
}

impl ProblemOptionsBuilder {
    /// Set whether a missing `instance` is filled from the request path.
    #[must_use]
    pub const fn instance_from_path(mut self, enabled: bool) -> Self {
        self.options.instance_from_path = enabled;
        self
    }

    /// Set the extension member carrying the correlation id.
    ///
    /// Standard problem members such as `status` are refused and the
    /// current member is kept.
    #[must_use]
    pub fn trace_id_member(mut self, member: impl Into<Cow<'static, str>>) -> Self {
        let member = member.into();
        if is_reserved_member(&member) {
            tracing::warn!(member = %member, "Refusing a standard problem member as trace id member");
            return self;
        }
        self.options.trace_id_member = Some(member);
        self
    }

    /// Leave the correlation id out of problem bodies.
    #[must_use]
    pub fn without_trace_id(mut self) -> Self {
        self.options.trace_id_member = None;
        self
    }

    /// Set whether problem responses are counted.
    #[must_use]
    pub const fn record_metrics(mut self, enabled: bool) -> Self {
        self.options.record_metrics = enabled;
        self
    }

    /// Set whether 4xx problems are logged.
    #[must_use]
    pub const fn log_client_errors(mut self, enabled: bool) -> Self {
        self.options.log_client_errors = enabled;
        self
    }

    /// Set whether empty error bodies become problems.
    #[must_use]
    pub const fn problem_for_empty_errors(mut self, enabled: bool) -> Self {
        self.options.problem_for_empty_errors = enabled;
        self
    }

    /// Build the [`ProblemOptions`].
    #[must_use]
    pub fn build(self) -> ProblemOptions {
        self.options
    }
}
