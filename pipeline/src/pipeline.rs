//! Pipeline builder.
//!
//! A [`Pipeline`] chains steps and guards. The first failed outcome ends the
//! run: its problem is widened to the pipeline's output type and every later
//! stage is skipped. Successful payloads flow into the next stage.
//!
//! # Example
//!
//! ```
//! use outcome_core::Outcome;
//! use outcome_pipeline::{Pipeline, spread, step};
//!
//! # tokio_test::block_on(async {
//! let pipeline = Pipeline::<(u32, u32)>::begin("price-order")
//!     .guard(|order: &(u32, u32)| {
//!         if order.1 == 0 {
//!             Outcome::error_with_status("Quantity must be positive", 400)
//!         } else {
//!             Outcome::success()
//!         }
//!     })
//!     .then(spread(|unit: u32, quantity: u32| async move { Outcome::ok(unit * quantity) }))
//!     .then(step(|total: u32| async move { Outcome::ok(format!("total={total}")) }));
//!
//! assert_eq!(pipeline.run((4, 3)).await, Outcome::ok("total=12".to_string()));
//! assert!(pipeline.run((4, 0)).await.is_error());
//! # });
//! ```

use crate::step::{Check, Identity, Step, StepFuture};
use outcome_core::Outcome;
use std::borrow::Cow;
use std::marker::PhantomData;
use tracing::Instrument;

/// Two stages run in sequence.
///
/// Created by [`Pipeline::then`].
pub struct Then<A, B> {
    first: A,
    next: B,
    stage: usize,
}

impl<I, A, B> Step<I> for Then<A, B>
where
    I: Send + 'static,
    A: Step<I>,
    A::Output: Send,
    B: Step<A::Output>,
{
    type Output = B::Output;

    fn run(&self, input: I) -> StepFuture<'_, Self::Output> {
        Box::pin(async move {
            let value = match self.first.run(input).await.split() {
                Ok(value) => value,
                Err(failure) => return failure.widen(),
            };

            let outcome = self.next.run(value).await;
            if let Outcome::Error(problem) = &outcome {
                tracing::debug!(
                    stage = self.stage,
                    status = problem.status(),
                    title = %problem.title(),
                    "Step failed, skipping remaining stages"
                );
            }
            outcome
        })
    }
}

/// A stage followed by a guard on its output.
///
/// Created by [`Pipeline::guard`].
pub struct Guarded<S, C> {
    inner: S,
    check: C,
    stage: usize,
}

impl<I, S, C> Step<I> for Guarded<S, C>
where
    I: Send + 'static,
    S: Step<I>,
    S::Output: Send,
    C: Check<S::Output>,
{
    type Output = S::Output;

    fn run(&self, input: I) -> StepFuture<'_, Self::Output> {
        Box::pin(async move {
            let value = match self.inner.run(input).await.split() {
                Ok(value) => value,
                Err(failure) => return failure.widen(),
            };

            match self.check.check(&value) {
                Outcome::Ok(()) => Outcome::Ok(value),
                Outcome::Error(problem) => {
                    tracing::debug!(
                        stage = self.stage,
                        status = problem.status(),
                        title = %problem.title(),
                        "Guard rejected input, skipping remaining stages"
                    );
                    Outcome::Error(problem)
                },
            }
        })
    }
}

/// A named chain of steps over input `I`.
pub struct Pipeline<I, S = Identity<I>> {
    name: Cow<'static, str>,
    step: S,
    stages: usize,
    _input: PhantomData<fn(I)>,
}

impl<I: Send + 'static> Pipeline<I> {
    /// Start an empty pipeline that forwards its input.
    #[must_use]
    pub fn begin(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            step: Identity::new(),
            stages: 0,
            _input: PhantomData,
        }
    }
}

impl<I, S> Pipeline<I, S>
where
    I: Send + 'static,
    S: Step<I>,
    S::Output: Send,
{
    /// Append a step that receives the current payload.
    #[must_use]
    pub fn then<N>(self, next: N) -> Pipeline<I, Then<S, N>>
    where
        N: Step<S::Output>,
    {
        let stage = self.stages + 1;
        Pipeline {
            name: self.name,
            step: Then {
                first: self.step,
                next,
                stage,
            },
            stages: stage,
            _input: PhantomData,
        }
    }

    /// Append a guard on the current payload.
    #[must_use]
    pub fn guard<C>(self, check: C) -> Pipeline<I, Guarded<S, C>>
    where
        C: Check<S::Output>,
    {
        let stage = self.stages + 1;
        Pipeline {
            name: self.name,
            step: Guarded {
                inner: self.step,
                check,
                stage,
            },
            stages: stage,
            _input: PhantomData,
        }
    }

    /// Pipeline name, used in log spans.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of steps and guards appended so far.
    #[must_use]
    pub const fn stages(&self) -> usize {
        self.stages
    }

    /// Run every stage until one fails.
    pub async fn run(&self, input: I) -> Outcome<S::Output> {
        let span = tracing::debug_span!("pipeline", name = %self.name, stages = self.stages);
        let outcome = self.step.run(input).instrument(span).await;

        match &outcome {
            Outcome::Ok(_) => tracing::trace!(pipeline = %self.name, "Pipeline completed"),
            Outcome::Error(problem) => tracing::debug!(
                pipeline = %self.name,
                status = problem.status(),
                "Pipeline ended with a failure"
            ),
        }
        outcome
    }
}

/// Pipelines nest: a whole pipeline can be a step of another.
impl<I, S> Step<I> for Pipeline<I, S>
where
    I: Send + 'static,
    S: Step<I>,
    S::Output: Send,
{
    type Output = S::Output;

    fn run(&self, input: I) -> StepFuture<'_, Self::Output> {
        Box::pin(Pipeline::run(self, input))
    }
}
