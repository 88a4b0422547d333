//! # Missingness Injection
//!
//! The single operation of the crate: take a vector, ask a probability
//! function how likely each element is to go missing, and run one
//! independent Bernoulli trial per element.
//!
//! - All-or-Nothing: the probability vector is validated in full before the
//!   first trial is drawn. A failing call returns an error, produces no
//!   output, and leaves the random source untouched.
//! - No Quotas: a rate of 0.5 means each element is missing with
//!   probability 0.5. The realised count varies from draw to draw.
//! - Borrowed Input: `y` is only read. The result is always a fresh vector.

use crate::args::ExtraArgs;
use crate::mechanism::{DefaultRate, MechanismError, ProbabilityFn, Y_PARAM};
use crate::source::with_default_source;
use ndarray::{Array1, ArrayView1};
use rand::Rng;
use thiserror::Error;

/// Failures of a single injection call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InjectError {
    #[error(
        "The probability function must accept a parameter named '{expected}', but it only declares {declared:?}."
    )]
    MissingYParameter {
        expected: String,
        declared: Vec<String>,
    },
    #[error(
        "The probability function returned {found} probabilities, but the input vector has {expected} elements."
    )]
    LengthMismatch { expected: usize, found: usize },
    #[error("The probability {value} at index {index} lies outside the interval [0, 1].")]
    ProbabilityOutOfRange { index: usize, value: f64 },
    #[error(transparent)]
    Mechanism(#[from] MechanismError),
}

impl InjectError {
    /// True for the three ways a probability function can break its contract
    /// with the injector, false when the function itself reported a failure.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, InjectError::Mechanism(_))
    }
}

/// Checks that `probs` holds exactly `expected_len` values in `[0, 1]`.
pub fn check_probabilities(probs: &[f64], expected_len: usize) -> Result<(), InjectError> {
    if probs.len() != expected_len {
        return Err(InjectError::LengthMismatch {
            expected: expected_len,
            found: probs.len(),
        });
    }
    // NaN fails the range test as well.
    if let Some((index, &value)) = probs
        .iter()
        .enumerate()
        .find(|(_, p)| !(0.0..=1.0).contains(*p))
    {
        return Err(InjectError::ProbabilityOutOfRange { index, value });
    }
    Ok(())
}

/// Number of missing markers in `y`.
pub fn count_missing<T>(y: &[Option<T>]) -> usize {
    y.iter().filter(|v| v.is_none()).count()
}

/// Injects missing values into `y` using an explicitly supplied generator.
pub fn inject_with_rng<T, F, R>(
    y: &[Option<T>],
    fun: &F,
    extra: &ExtraArgs,
    rng: &mut R,
) -> Result<Vec<Option<T>>, InjectError>
where
    T: Clone,
    F: ProbabilityFn<T> + ?Sized,
    R: Rng + ?Sized,
{
    inject_as(Y_PARAM, y, fun, extra, rng)
}

/// Injects missing values into `y`, drawing from the process-level default source.
pub fn inject<T, F>(
    y: &[Option<T>],
    fun: &F,
    extra: &ExtraArgs,
) -> Result<Vec<Option<T>>, InjectError>
where
    T: Clone,
    F: ProbabilityFn<T> + ?Sized,
{
    // `fun` may itself draw from the default source, so it runs unlocked.
    let probs = validated_probabilities(Y_PARAM, y, fun, extra)?;
    Ok(with_default_source(|rng| draw_missing(y, &probs, rng)))
}

/// MCAR injection at the `rate` extra argument, or 10% when none is given.
pub fn inject_default<T: Clone>(
    y: &[Option<T>],
    extra: &ExtraArgs,
) -> Result<Vec<Option<T>>, InjectError> {
    inject(y, &DefaultRate, extra)
}

/// Numeric variant where `NaN` is the missing marker on both sides.
pub fn inject_nan<F, R>(
    y: ArrayView1<f64>,
    fun: &F,
    extra: &ExtraArgs,
    rng: &mut R,
) -> Result<Array1<f64>, InjectError>
where
    F: ProbabilityFn<f64> + ?Sized,
    R: Rng + ?Sized,
{
    let observed: Vec<Option<f64>> = y
        .iter()
        .map(|&v| if v.is_nan() { None } else { Some(v) })
        .collect();
    let injected = inject_with_rng(&observed, fun, extra, rng)?;
    Ok(injected
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// Steps 1 to 4 of an injection: the declared-parameter check, the call to
/// `fun`, and validation of what it returned. No randomness is consumed.
pub(crate) fn validated_probabilities<T, F>(
    y_name: &str,
    y: &[Option<T>],
    fun: &F,
    extra: &ExtraArgs,
) -> Result<Vec<f64>, InjectError>
where
    F: ProbabilityFn<T> + ?Sized,
{
    log::debug!(
        "Injecting missingness into {} values (response parameter '{}', {} extra arguments)",
        y.len(),
        y_name,
        extra.len()
    );

    let declared = fun.parameter_names();
    if !declared.contains(&y_name) {
        return Err(InjectError::MissingYParameter {
            expected: y_name.to_string(),
            declared: declared.into_iter().map(str::to_string).collect(),
        });
    }

    let probs = fun.probabilities(y, extra)?;
    check_probabilities(&probs, y.len())?;
    Ok(probs)
}

/// Runs one Bernoulli trial per element against already validated `probs`.
pub(crate) fn draw_missing<T, R>(y: &[Option<T>], probs: &[f64], rng: &mut R) -> Vec<Option<T>>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut output = Vec::with_capacity(y.len());
    let mut newly_missing = 0usize;
    let mut already_missing = 0usize;
    for (value, &p) in y.iter().zip(probs.iter()) {
        // Exactly one uniform per index, whatever `p` is.
        let hit = rng.r#gen::<f64>() < p;
        match value {
            None => {
                already_missing += 1;
                output.push(None);
            }
            Some(_) if hit => {
                newly_missing += 1;
                output.push(None);
            }
            Some(v) => output.push(Some(v.clone())),
        }
    }

    log::debug!(
        "Injection complete: {newly_missing} values masked, {already_missing} were already missing"
    );
    output
}

/// Shared implementation, with the name of the response parameter supplied
/// by the caller so configuration can rename it.
pub(crate) fn inject_as<T, F, R>(
    y_name: &str,
    y: &[Option<T>],
    fun: &F,
    extra: &ExtraArgs,
    rng: &mut R,
) -> Result<Vec<Option<T>>, InjectError>
where
    T: Clone,
    F: ProbabilityFn<T> + ?Sized,
    R: Rng + ?Sized,
{
    let probs = validated_probabilities(y_name, y, fun, extra)?;
    Ok(draw_missing(y, &probs, rng))
}
