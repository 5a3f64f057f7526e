//! # Outcome Testing
//!
//! Testing utilities and helpers for outcomes, problem details, and pipelines.
//!
//! This crate provides:
//! - A Given-When-Then harness for steps and pipelines
//! - Assertion helpers for outcomes and problems
//! - Property-based testing strategies
//! - Log capture setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use outcome_testing::{PipelineTest, assertions::assert_problem_status};
//!
//! #[tokio::test]
//! async fn test_rejects_empty_orders() {
//!     let outcome = PipelineTest::new(order_pipeline())
//!         .given(PlaceOrder { sku: "tea".into(), quantity: 0 })
//!         .run()
//!         .await;
//!
//!     assert_problem_status(&outcome, 400);
//! }
//! ```

pub mod pipeline_test;

/// Property-based testing utilities using proptest.
pub mod properties {
    use outcome_core::{FieldErrors, ProblemDetails};
    use proptest::collection::{btree_map, vec};
    use proptest::option;
    use proptest::prelude::*;

    /// Any status code, mapped or not.
    pub fn arb_status() -> impl Strategy<Value = u16> {
        prop_oneof![
            Just(400_u16),
            Just(404_u16),
            Just(409_u16),
            Just(500_u16),
            100_u16..=599,
            600_u16..=999,
        ]
    }

    /// Field names mapped to one or more messages.
    pub fn arb_field_errors() -> impl Strategy<Value = FieldErrors> {
        btree_map("[A-Z][a-z]{1,8}", vec("[a-z ]{1,16}", 1..4), 0..4)
    }

    /// Problem details with every optional member sometimes present.
    pub fn arb_problem_details() -> impl Strategy<Value = ProblemDetails> {
        (
            "[A-Za-z ]{1,24}",
            arb_status(),
            option::of("https://example\\.com/probs/[a-z-]{1,12}"),
            option::of("[A-Za-z0-9 .]{0,40}"),
            option::of("/[a-z]{1,8}/[0-9]{1,4}"),
            option::of(arb_field_errors()),
        )
            .prop_map(|(title, status, type_uri, detail, instance, errors)| {
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
                if let Some(errors) = errors {
                    problem = problem.with_errors(errors);
                }
                problem
            })
    }
}

/// Log capture for tests.
pub mod logging {
    use tracing_subscriber::EnvFilter;

    /// Install a test-writer subscriber honouring `RUST_LOG`.
    ///
    /// Safe to call from every test; only the first call installs.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use logging::init_test_tracing;
pub use pipeline_test::{PipelineTest, assertions};
