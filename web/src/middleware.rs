//! Axum middleware for problem responses.
//!
//! [`problem_details_layer`] watches responses on their way out. When a
//! response carries a [`ProblemDetails`] (every failure written by
//! [`ApiOutcome`](crate::ApiOutcome) does), the layer:
//!
//! 1. **Fills** `instance` with the request path when it is missing
//! 2. **Adds** the correlation id from the `X-Correlation-ID` header as an
//!    extension member (`traceId` by default)
//! 3. **Logs** the problem and **counts** it in `outcome_problem_responses_total`
//! 4. **Re-writes** the `application/problem+json` body, keeping the HTTP
//!    status the inner service chose
//!
//! Error responses with an empty body, such as a bare 404 from a fallback,
//! are turned into problems built from their status.
//!
//! # Example
//!
//! ```rust
//! use axum::{Router, routing::get};
//! use outcome_core::Outcome;
//! use outcome_web::{ApiOutcome, ProblemOptions, problem_details_layer};
//!
//! async fn archived() -> ApiOutcome {
//!     Outcome::error_with_status("Order archived", 410).into()
//! }
//!
//! let app: Router = Router::new()
//!     .route("/orders/:id", get(archived))
//!     .layer(problem_details_layer(ProblemOptions::default()));
//! ```

use crate::config::ProblemOptions;
use crate::response::render_problem;
use axum::{body::HttpBody, extract::Request, response::Response};
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use outcome_core::ProblemDetails;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the request's correlation id.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Counter of problem responses, labelled by `status`.
pub const PROBLEM_RESPONSES_METRIC: &str = "outcome_problem_responses_total";

/// Create a layer that enriches problem responses.
#[must_use]
pub fn problem_details_layer(options: ProblemOptions) -> ProblemDetailsLayer {
    ProblemDetailsLayer {
        options: Arc::new(options),
    }
}

/// Layer for problem-response enrichment.
#[derive(Clone, Debug)]
pub struct ProblemDetailsLayer {
    options: Arc<ProblemOptions>,
}

impl<S> Layer<S> for ProblemDetailsLayer {
    type Service = ProblemDetailsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ProblemDetailsMiddleware {
            inner,
            options: Arc::clone(&self.options),
        }
    }
}

/// Middleware service for problem-response enrichment.
#[derive(Clone, Debug)]
pub struct ProblemDetailsMiddleware<S> {
    inner: S,
    options: Arc<ProblemOptions>,
}

impl<S> Service<Request> for ProblemDetailsMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let path = req.uri().path().to_owned();
        let correlation_id = correlation_id(&req);
        let options = Arc::clone(&self.options);

        let span = tracing::debug_span!(
            "problem_details",
            method = %req.method(),
            path = %path,
        );

        let fut = self.inner.call(req);

        Box::pin(
            async move {
                let response = fut.await?;

                let Some((problem, origin)) = problem_of(&response, &options) else {
                    return Ok(response);
                };

                let problem = enrich(problem, &options, &path, correlation_id);
                observe(&problem, origin, &options);

                let mut enriched = render_problem(problem);
                *enriched.status_mut() = response.status();
                for (name, value) in response.headers() {
                    if name != CONTENT_TYPE && name != CONTENT_LENGTH {
                        enriched.headers_mut().append(name.clone(), value.clone());
                    }
                }
                Ok(enriched)
            }
            .instrument(span),
        )
    }
}

/// Correlation id from the header, or one stored by an earlier layer.
fn correlation_id(req: &Request) -> Option<Uuid> {
    req.headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .or_else(|| req.extensions().get::<Uuid>().copied())
}

/// Where the problem on a response came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Origin {
    /// Written by the handler, which already logged server errors.
    Handler,
    /// Built here from an empty error response.
    EmptyBody,
}

fn problem_of(response: &Response, options: &ProblemOptions) -> Option<(ProblemDetails, Origin)> {
    if let Some(problem) = response.extensions().get::<ProblemDetails>() {
        return Some((problem.clone(), Origin::Handler));
    }

    let status = response.status();
    let is_error = status.is_client_error() || status.is_server_error();
    let is_empty = response.body().size_hint().exact() == Some(0);
    (options.problem_for_empty_errors && is_error && is_empty)
        .then(|| (ProblemDetails::from_status(status.as_u16()), Origin::EmptyBody))
}

fn enrich(
    mut problem: ProblemDetails,
    options: &ProblemOptions,
    path: &str,
    correlation_id: Option<Uuid>,
) -> ProblemDetails {
    if options.instance_from_path && problem.instance().is_none() {
        problem = problem.with_instance(path);
    }

    if let (Some(member), Some(id)) = (&options.trace_id_member, correlation_id) {
        if !problem.extensions().contains_key(member.as_ref()) {
            problem = problem.with_extension(member.as_ref(), id.to_string());
        }
    }

    problem
}

fn observe(problem: &ProblemDetails, origin: Origin, options: &ProblemOptions) {
    if options.record_metrics {
        metrics::counter!(PROBLEM_RESPONSES_METRIC, "status" => problem.status().to_string())
            .increment(1);
    }

    if problem.is_server_error() && origin == Origin::EmptyBody {
        tracing::error!(
            status = problem.status(),
            title = %problem.title(),
            instance = problem.instance().unwrap_or_default(),
            "Server error"
        );
    } else if options.log_client_errors && !problem.is_server_error() {
        tracing::warn!(
            status = problem.status(),
            title = %problem.title(),
            instance = problem.instance().unwrap_or_default(),
            "Client error"
        );
    } else {
        tracing::debug!(
            status = problem.status(),
            title = %problem.title(),
            "Problem response"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::ApiOutcome;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        routing::get,
    };
    use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
    use outcome_core::Outcome;
    use std::borrow::Cow;
    use std::sync::Mutex;
    use tower::ServiceExt;
    use tracing::{Level, Subscriber};
    use tracing_subscriber::layer::{Context as LayerContext, SubscriberExt};

    /// Records the level of every event emitted while installed.
    #[derive(Clone, Default)]
    struct EventLevels(Arc<Mutex<Vec<Level>>>);

    impl EventLevels {
        fn captured(&self) -> Vec<Level> {
            self.0.lock().unwrap().clone()
        }
    }

    impl<S: Subscriber> tracing_subscriber::Layer<S> for EventLevels {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: LayerContext<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    fn problem_counts(snapshotter: &Snapshotter) -> Vec<(String, u64)> {
        snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter_map(|(key, _, _, value)| {
                let key = key.key();
                if key.name() != PROBLEM_RESPONSES_METRIC {
                    return None;
                }
                let status = key.labels().find(|label| label.key() == "status")?;
                match value {
                    DebugValue::Counter(count) => Some((status.value().to_string(), count)),
                    _ => None,
                }
            })
            .collect()
    }

    async fn problem_body(response: Response) -> ProblemDetails {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).expect("problem body should be JSON")
    }

    fn app(options: ProblemOptions) -> Router {
        Router::new()
            .route(
                "/orders/7",
                get(|| async { ApiOutcome::from(Outcome::<String>::error_with_status("Gone", 410)) }),
            )
            .route(
                "/orders/8",
                get(|| async {
                    (
                        StatusCode::CONFLICT,
                        ApiOutcome::from(Outcome::<String>::error_with_status("Gone", 410)),
                    )
                }),
            )
            .route("/ok", get(|| async { "fine" }))
            .route("/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .fallback(|| async { StatusCode::NOT_FOUND })
            .layer(problem_details_layer(options))
    }

    #[tokio::test]
    async fn test_instance_filled_from_path() {
        let request = Request::builder()
            .uri("/orders/7")
            .body(Body::empty())
            .unwrap();

        let response = app(ProblemOptions::default()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::GONE);

        let problem = problem_body(response).await;
        assert_eq!(problem.instance(), Some("/orders/7"));
        assert!(problem.extensions().get("traceId").is_none());
    }

    #[tokio::test]
    async fn test_correlation_id_added() {
        let correlation_id = Uuid::new_v4();
        let request = Request::builder()
            .uri("/orders/7")
            .header(CORRELATION_ID_HEADER, correlation_id.to_string())
            .body(Body::empty())
            .unwrap();

        let response = app(ProblemOptions::default()).oneshot(request).await.unwrap();
        let problem = problem_body(response).await;
        assert_eq!(
            problem.extensions().get("traceId").and_then(|v| v.as_str()),
            Some(correlation_id.to_string().as_str())
        );
    }

    #[tokio::test]
    async fn test_invalid_correlation_id_ignored() {
        let request = Request::builder()
            .uri("/orders/7")
            .header(CORRELATION_ID_HEADER, "not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = app(ProblemOptions::default()).oneshot(request).await.unwrap();
        let problem = problem_body(response).await;
        assert!(problem.extensions().get("traceId").is_none());
    }

    #[tokio::test]
    async fn test_success_untouched() {
        let request = Request::builder().uri("/ok").body(Body::empty()).unwrap();
        let response = app(ProblemOptions::default()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, "fine");
    }

    #[tokio::test]
    async fn test_unmatched_route_becomes_problem() {
        let request = Request::builder().uri("/missing").body(Body::empty()).unwrap();
        let response = app(ProblemOptions::default()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/problem+json");
        let problem = problem_body(response).await;
        assert_eq!(problem.title(), "Not Found");
        assert_eq!(problem.instance(), Some("/missing"));
    }

    #[tokio::test]
    async fn test_empty_errors_kept_when_disabled() {
        let options = ProblemOptions::builder().problem_for_empty_errors(false).build();
        let request = Request::builder().uri("/missing").body(Body::empty()).unwrap();
        let response = app(options).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(CONTENT_TYPE).is_none());
    }

    #[tokio::test]
    async fn test_overridden_status_is_kept() {
        let request = Request::builder().uri("/orders/8").body(Body::empty()).unwrap();
        let response = app(ProblemOptions::default()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let problem = problem_body(response).await;
        assert_eq!(problem.status(), 410);
        assert_eq!(problem.instance(), Some("/orders/8"));
    }

    #[tokio::test]
    async fn test_standard_member_never_used_for_trace_id() {
        let options = ProblemOptions {
            trace_id_member: Some(Cow::Borrowed("status")),
            ..ProblemOptions::default()
        };
        let request = Request::builder()
            .uri("/orders/7")
            .header(CORRELATION_ID_HEADER, Uuid::new_v4().to_string())
            .body(Body::empty())
            .unwrap();

        let response = app(options).oneshot(request).await.unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 410);

        let problem: ProblemDetails = serde_json::from_slice(&body).unwrap();
        assert!(problem.extensions().is_empty());
    }

    #[tokio::test]
    async fn test_empty_server_error_logged_as_error() {
        let levels = EventLevels::default();
        let subscriber = tracing_subscriber::registry().with(levels.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let request = Request::builder().uri("/broken").body(Body::empty()).unwrap();
        let response = app(ProblemOptions::default()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/problem+json");
        assert!(levels.captured().contains(&Level::ERROR));
    }

    #[test]
    fn test_handler_problems_not_logged_twice() {
        let levels = EventLevels::default();
        let subscriber = tracing_subscriber::registry().with(levels.clone());
        let problem = ProblemDetails::from_status(503);

        tracing::subscriber::with_default(subscriber, || {
            observe(&problem, Origin::Handler, &ProblemOptions::default());
        });

        assert!(!levels.captured().contains(&Level::ERROR));
    }

    #[test]
    fn test_client_errors_logged_when_enabled() {
        let problem = ProblemDetails::from_status(404).with_instance("/orders/9");

        let quiet = EventLevels::default();
        tracing::subscriber::with_default(tracing_subscriber::registry().with(quiet.clone()), || {
            observe(&problem, Origin::Handler, &ProblemOptions::default());
        });
        assert!(!quiet.captured().contains(&Level::WARN));

        let loud = EventLevels::default();
        let options = ProblemOptions::builder().log_client_errors(true).build();
        tracing::subscriber::with_default(tracing_subscriber::registry().with(loud.clone()), || {
            observe(&problem, Origin::Handler, &options);
        });
        assert_eq!(loud.captured(), vec![Level::WARN]);
    }

    #[test]
    fn test_problem_responses_counted_by_status() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            observe(&ProblemDetails::from_status(404), Origin::EmptyBody, &ProblemOptions::default());
            observe(&ProblemDetails::from_status(404), Origin::Handler, &ProblemOptions::default());
        });

        assert_eq!(problem_counts(&snapshotter), vec![("404".to_string(), 2)]);
    }

    #[test]
    fn test_metrics_can_be_turned_off() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let options = ProblemOptions::builder().record_metrics(false).build();

        metrics::with_local_recorder(&recorder, || {
            observe(&ProblemDetails::from_status(409), Origin::Handler, &options);
        });

        assert!(problem_counts(&snapshotter).is_empty());
    }
}
