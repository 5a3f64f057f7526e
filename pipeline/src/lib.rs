//! Message-handler pipelines over [`Outcome`](outcome_core::Outcome).
//!
//! A pipeline is an explicit chain of steps. Each step returns an outcome; a
//! failure ends the run early and becomes the pipeline's result, a success
//! hands its payload to the next step.
//!
//! ```text
//! input ─▶ guard ─▶ step ─▶ step ─▶ Outcome<Output>
//!            │        │       │
//!            └────────┴───────┴──▶ first failure, widened to Outcome<Output>
//! ```
//!
//! See [`Pipeline`] for the builder and [`Step`] / [`Check`] for the stage
//! contracts.

pub mod pipeline;
pub mod step;

pub use pipeline::{Guarded, Pipeline, Then};
pub use step::{Check, FnStep, Identity, Spread, Step, StepFuture, spread, step};
