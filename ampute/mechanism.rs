//! # Probability Functions
//!
//! A missingness mechanism is reduced to one capability: given the response
//! vector `y` and the caller's extra arguments, produce one probability per
//! element. MCAR, MAR and MNAR differ only in what the function looks at
//! (nothing, the covariates, or `y` itself), so a single trait covers all
//! three.
//!
//! - Declared Parameters: a function advertises the names of the parameters
//!   it accepts. Closures always accept `y` by construction; functions whose
//!   parameter list is described at runtime go through [`Declared`], and the
//!   injector refuses any function that does not declare `y`.
//! - Defaults: [`DefaultRate`] is the only mechanism shipped with the crate.
//!   Anything model-based belongs to the caller.

use crate::args::{ArgError, ExtraArgs};
use thiserror::Error;

/// Name of the parameter that receives the response vector.
pub const Y_PARAM: &str = "y";

/// Missingness rate used by [`DefaultRate`] when no `rate` argument is forwarded.
pub const DEFAULT_RATE: f64 = 0.1;

/// Failures raised from inside a probability function.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MechanismError {
    #[error("{0}")]
    Argument(#[from] ArgError),
    #[error("The probability function failed: {0}")]
    Failed(String),
}

/// A callable producing per-element missingness probabilities.
pub trait ProbabilityFn<T> {
    /// One probability per element of `y`, in order.
    fn probabilities(&self, y: &[Option<T>], extra: &ExtraArgs)
    -> Result<Vec<f64>, MechanismError>;

    /// Names of the parameters this function accepts.
    fn parameter_names(&self) -> Vec<&str> {
        vec![Y_PARAM]
    }
}

impl<T, F> ProbabilityFn<T> for F
where
    F: Fn(&[Option<T>], &ExtraArgs) -> Vec<f64>,
{
    fn probabilities(
        &self,
        y: &[Option<T>],
        extra: &ExtraArgs,
    ) -> Result<Vec<f64>, MechanismError> {
        Ok(self(y, extra))
    }
}

/// MCAR at a uniform rate: the `rate` extra argument, or [`DEFAULT_RATE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRate;

impl<T> ProbabilityFn<T> for DefaultRate {
    fn probabilities(
        &self,
        y: &[Option<T>],
        extra: &ExtraArgs,
    ) -> Result<Vec<f64>, MechanismError> {
        let rate = extra.scalar_or("rate", DEFAULT_RATE)?;
        Ok(vec![rate; y.len()])
    }
}

/// A probability function paired with an explicit parameter list.
///
/// The wrapped function is only called through the injector after the list
/// has been checked, so a list without `y` means the function never runs.
#[derive(Debug, Clone)]
pub struct Declared<F> {
    parameters: Vec<String>,
    fun: F,
}

impl<F> Declared<F> {
    pub fn new<I, S>(parameters: I, fun: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parameters: parameters.into_iter().map(Into::into).collect(),
            fun,
        }
    }
}

impl<T, F> ProbabilityFn<T> for Declared<F>
where
    F: ProbabilityFn<T>,
{
    fn probabilities(
        &self,
        y: &[Option<T>],
        extra: &ExtraArgs,
    ) -> Result<Vec<f64>, MechanismError> {
        self.fun.probabilities(y, extra)
    }

    fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(String::as_str).collect()
    }
}
