//! Ergonomic testing utilities for pipelines and steps
//!
//! This module provides a fluent API for testing steps with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // PipelineTest is the natural name

use outcome_core::{Outcome, ProblemDetails};
use outcome_pipeline::Step;

/// Type alias for payload assertion functions
type PayloadAssertion<O> = Box<dyn FnOnce(&O)>;

/// Type alias for problem assertion functions
type ProblemAssertion = Box<dyn FnOnce(&ProblemDetails)>;

/// Fluent API for testing steps with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use outcome_testing::PipelineTest;
///
/// PipelineTest::new(order_pipeline)
///     .given(PlaceOrder { sku: "tea".into(), quantity: 0 })
///     .then_problem(|problem| {
///         assert_eq!(problem.status(), 400);
///     })
///     .run()
///     .await;
/// ```
pub struct PipelineTest<S, I>
where
    S: Step<I>,
{
    step: S,
    input: Option<I>,
    payload_assertions: Vec<PayloadAssertion<S::Output>>,
    problem_assertions: Vec<ProblemAssertion>,
}

impl<S, I> PipelineTest<S, I>
where
    S: Step<I>,
{
    /// Create a new test for the given step or pipeline
    #[must_use]
    pub const fn new(step: S) -> Self {
        Self {
            step,
            input: None,
            payload_assertions: Vec::new(),
            problem_assertions: Vec::new(),
        }
    }

    /// Set the input message (Given)
    #[must_use]
    pub fn given(mut self, input: I) -> Self {
        self.input = Some(input);
        self
    }

    /// Expect success and assert on the payload (Then)
    #[must_use]
    pub fn then_ok<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S::Output) + 'static,
    {
        self.payload_assertions.push(Box::new(assertion));
        self
    }

    /// Expect failure and assert on the problem (Then)
    #[must_use]
    pub fn then_problem<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&ProblemDetails) + 'static,
    {
        self.problem_assertions.push(Box::new(assertion));
        self
    }

    /// Run the step and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if no input was set, if the outcome is on the other arm than
    /// the registered assertions expect, or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub async fn run(self) -> Outcome<S::Output> {
        let input = self.input.expect("Input must be set with given()");

        let outcome = self.step.run(input).await;

        match &outcome {
            Outcome::Ok(payload) => {
                assert!(
                    self.problem_assertions.is_empty(),
                    "Expected a failure, but the step succeeded"
                );
                for assertion in self.payload_assertions {
                    assertion(payload);
                }
            },
            Outcome::Error(problem) => {
                assert!(
                    self.payload_assertions.is_empty(),
                    "Expected success, but the step failed with {problem}"
                );
                for assertion in self.problem_assertions {
                    assertion(problem);
                }
            },
        }

        outcome
    }
}

/// Helper assertions for outcomes
pub mod assertions {
    use outcome_core::{Outcome, ProblemDetails};

    /// Assert success and return the payload
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a failure.
    #[allow(clippy::panic)] // Test assertion
    #[track_caller]
    pub fn assert_ok<T>(outcome: &Outcome<T>) -> &T {
        match outcome {
            Outcome::Ok(value) => value,
            Outcome::Error(problem) => panic!("Expected success, but found failure {problem}"),
        }
    }

    /// Assert failure and return the problem
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a success.
    #[allow(clippy::panic)] // Test assertion
    #[track_caller]
    pub fn assert_problem<T>(outcome: &Outcome<T>) -> &ProblemDetails {
        match outcome {
            Outcome::Ok(_) => panic!("Expected failure, but found success"),
            Outcome::Error(problem) => problem,
        }
    }

    /// Assert failure with a specific status
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a success or the status differs.
    #[track_caller]
    pub fn assert_problem_status<T>(outcome: &Outcome<T>, expected: u16) {
        let problem = assert_problem(outcome);
        assert_eq!(
            problem.status(),
            expected,
            "Expected status {expected}, but found {problem}"
        );
    }

    /// Assert the messages recorded for one field
    ///
    /// # Panics
    ///
    /// Panics if the problem has no errors for `field` or they differ.
    #[allow(clippy::panic)] // Test assertion
    #[track_caller]
    pub fn assert_field_errors(problem: &ProblemDetails, field: &str, expected: &[&str]) {
        let Some(messages) = problem.errors().and_then(|errors| errors.get(field)) else {
            panic!("Expected errors for field {field}, but found none in {problem}");
        };
        assert_eq!(messages, expected, "Unexpected messages for field {field}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outcome_pipeline::step;

    #[tokio::test]
    async fn test_pipeline_test_success() {
        PipelineTest::new(step(|n: u32| async move { Outcome::ok(n + 1) }))
            .given(1)
            .then_ok(|n| assert_eq!(*n, 2))
            .run()
            .await;
    }

    #[tokio::test]
    async fn test_pipeline_test_failure() {
        PipelineTest::new(step(|_: u32| async move {
            Outcome::<u32>::error_with_status("Rejected", 422)
        }))
        .given(1)
        .then_problem(|problem| assert_eq!(problem.status(), 422))
        .run()
        .await;
    }

    #[test]
    fn test_assertions() {
        let ok = Outcome::ok(5);
        assert_eq!(*assertions::assert_ok(&ok), 5);

        let failed: Outcome<u8> = Outcome::from_problem(
            ProblemDetails::new("Invalid", 400).with_field_error("Name", "required"),
        );
        assertions::assert_problem_status(&failed, 400);
        assertions::assert_field_errors(assertions::assert_problem(&failed), "Name", &["required"]);
    }

    #[test]
    #[should_panic(expected = "Expected failure")]
    fn test_assert_problem_panics_on_success() {
        let _ = assertions::assert_problem(&Outcome::ok(1));
    }
}
