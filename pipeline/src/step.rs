//! Pipeline steps and guards.
//!
//! A [`Step`] consumes an input and produces an [`Outcome`]. A [`Check`]
//! inspects a value and either lets it through or fails with a problem.
//! Async closures become steps with [`step`]; closures taking several
//! arguments become steps over a tuple payload with [`spread`].

use outcome_core::Outcome;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

/// Boxed future returned by [`Step::run`].
pub type StepFuture<'a, T> = Pin<Box<dyn Future<Output = Outcome<T>> + Send + 'a>>;

/// One stage of a message-handler pipeline.
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of
/// `async fn` so steps stay object safe and can be chained freely.
///
/// # Example
///
/// ```
/// use outcome_core::Outcome;
/// use outcome_pipeline::{Step, StepFuture};
///
/// struct ParseQuantity;
///
/// impl Step<String> for ParseQuantity {
///     type Output = u32;
///
///     fn run(&self, input: String) -> StepFuture<'_, u32> {
///         Box::pin(async move {
///             match input.parse() {
///                 Ok(quantity) => Outcome::ok(quantity),
///                 Err(_) => Outcome::error_with_status("Quantity must be a number", 400),
///             }
///         })
///     }
/// }
/// ```
pub trait Step<I>: Send + Sync {
    /// Payload produced on success.
    type Output;

    /// Run the step.
    fn run(&self, input: I) -> StepFuture<'_, Self::Output>;
}

/// Synchronous guard run between steps.
///
/// A failed check stops the pipeline; a successful one forwards the value
/// unchanged.
pub trait Check<I>: Send + Sync {
    /// Inspect the value.
    fn check(&self, input: &I) -> Outcome;
}

impl<I, F> Check<I> for F
where
    F: Fn(&I) -> Outcome + Send + Sync,
{
    fn check(&self, input: &I) -> Outcome {
        self(input)
    }
}

/// Step backed by an async function of one argument.
///
/// Created by [`step`].
pub struct FnStep<F, I> {
    f: F,
    _input: PhantomData<fn(I)>,
}

/// Adapt an async closure into a [`Step`].
///
/// ```
/// use outcome_core::Outcome;
/// use outcome_pipeline::step;
///
/// let double = step(|n: u32| async move { Outcome::ok(n * 2) });
/// # let _ = double;
/// ```
pub const fn step<I, O, F, Fut>(f: F) -> FnStep<F, I>
where
    F: Fn(I) -> Fut + Send + Sync,
    Fut: Future<Output = Outcome<O>> + Send + 'static,
{
    FnStep {
        f,
        _input: PhantomData,
    }
}

impl<I, O, F, Fut> Step<I> for FnStep<F, I>
where
    F: Fn(I) -> Fut + Send + Sync,
    Fut: Future<Output = Outcome<O>> + Send + 'static,
{
    type Output = O;

    fn run(&self, input: I) -> StepFuture<'_, O> {
        Box::pin((self.f)(input))
    }
}

/// Step that destructures a tuple payload into separate arguments.
///
/// Created by [`spread`].
pub struct Spread<F, Args> {
    f: F,
    _args: PhantomData<fn(Args)>,
}

/// Adapt an async closure of two or three arguments into a step over the
/// matching tuple.
///
/// ```
/// use outcome_core::Outcome;
/// use outcome_pipeline::{spread, Spread};
///
/// let total: Spread<_, (u32, u32)> = spread(|price: u32, quantity: u32| async move { Outcome::ok(price * quantity) });
/// # let _ = total;
/// ```
pub const fn spread<F, Args>(f: F) -> Spread<F, Args> {
    Spread {
        f,
        _args: PhantomData,
    }
}

macro_rules! impl_spread {
    ($($ty:ident => $var:ident),+) => {
        impl<F, Fut, O, $($ty),+> Step<($($ty,)+)> for Spread<F, ($($ty,)+)>
        where
            F: Fn($($ty),+) -> Fut + Send + Sync,
            Fut: Future<Output = Outcome<O>> + Send + 'static,
        {
            type Output = O;

            fn run(&self, input: ($($ty,)+)) -> StepFuture<'_, O> {
                let ($($var,)+) = input;
                Box::pin((self.f)($($var),+))
            }
        }
    };
}

impl_spread!(A => a, B => b);
impl_spread!(A => a, B => b, C => c);

/// Step that forwards its input unchanged.
///
/// The first stage of every [`Pipeline`](crate::Pipeline).
pub struct Identity<I> {
    _input: PhantomData<fn(I)>,
}

impl<I> Identity<I> {
    pub(crate) const fn new() -> Self {
        Self {
            _input: PhantomData,
        }
    }
}

impl<I: Send + 'static> Step<I> for Identity<I> {
    type Output = I;

    fn run(&self, input: I) -> StepFuture<'_, I> {
        Box::pin(std::future::ready(Outcome::ok(input)))
    }
}
