//! Calibrated distribution constructors
//!
//! Each constructor turns an informal statement ("between 10 and 20",
//! "3 out of 7", "give or take 5 percent") into `n` Monte-Carlo samples. They
//! are pure functions of their arguments and the random stream passed in;
//! [`Sampler`](super::Sampler) wraps them with a stored configuration and
//! returns [`Quantity`](crate::Quantity) values.
//!
//! Two-bound calibrations take `p`, the probability mass the user meant the
//! bounds `(a, b)` to enclose. The result is drawn so that its symmetric
//! `p`-interval is `[a, b]`.

use super::config::validate_confidence;
use super::special::{inverse_normal_cdf, t_quantile};
use crate::core_types::kernels::{affine, exp_in_place};
use crate::error::{FermiError, Result};
use crate::summary::interval::{mean, std_dev};
use crate::summary::sigfig::sigfig_resolution;
use rand::distr::weighted::WeightedIndex;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use rand_distr::{Beta, Gamma, StandardNormal, StudentT};
use tracing::debug;

/// Degrees of freedom `logstudent` uses when the caller has no opinion.
pub const DEFAULT_STUDENT_DF: f64 = 2.0;

fn invalid(message: impl Into<String>) -> FermiError {
    FermiError::InvalidParameters(message.into())
}

fn require_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite, got {value}")))
    }
}

fn draw<R: Rng, D: Distribution<f64>>(rng: &mut R, n: usize, distribution: D) -> Vec<f64> {
    distribution.sample_iter(rng).take(n).collect()
}

/// Standard-normal quantile at the lower tail of a central `p` interval.
///
/// Negative for every valid `p`; callers take the magnitude.
fn lower_tail_z(p: f64) -> Result<f64> {
    validate_confidence(p)?;
    Ok(inverse_normal_cdf(0.5 * (1.0 - p)))
}

// ============================================================================
// NORMAL FAMILY
// ============================================================================

/// `mean + sigma * Z` for standard-normal `Z`.
pub fn plusminus<R: Rng>(rng: &mut R, n: usize, mean: f64, sigma: f64) -> Result<Vec<f64>> {
    require_finite("mean", mean)?;
    require_finite("sigma", sigma)?;
    let mut samples = draw(rng, n, StandardNormal);
    affine(&mut samples, mean, sigma);
    Ok(samples)
}

/// Standard-normal noise, `plusminus(0, 1)`.
pub fn epsilon<R: Rng>(rng: &mut R, n: usize) -> Result<Vec<f64>> {
    plusminus(rng, n, 0.0, 1.0)
}

/// Normal whose central `p` interval is `[a, b]`.
pub fn normal<R: Rng>(rng: &mut R, n: usize, a: f64, b: f64, p: f64) -> Result<Vec<f64>> {
    require_finite("a", a)?;
    require_finite("b", b)?;
    let mu = 0.5 * (a + b);
    let sigma = (0.5 * (b - a) / lower_tail_z(p)?).abs();
    debug!(a, b, p, mu, sigma, "calibrated normal");
    plusminus(rng, n, mu, sigma)
}

/// Log-normal whose central `p` interval is `[a, b]`; needs `a, b > 0`.
pub fn lognormal<R: Rng>(rng: &mut R, n: usize, a: f64, b: f64, p: f64) -> Result<Vec<f64>> {
    require_finite("a", a)?;
    require_finite("b", b)?;
    if a <= 0.0 || b <= 0.0 {
        return Err(invalid(format!(
            "lognormal bounds must be positive, got ({a}, {b})"
        )));
    }
    let mu = (a * b).sqrt().ln();
    let sigma = ((b / a).sqrt().ln() / lower_tail_z(p)?).abs();
    debug!(a, b, p, mu, sigma, "calibrated lognormal");
    let mut samples = plusminus(rng, n, mu, sigma)?;
    exp_in_place(&mut samples);
    Ok(samples)
}

/// Heavy-tailed log-space calibration: `exp(mu + sigma * T)` with `T`
/// Student-t on `df` degrees of freedom, scaled so `[a, b]` is its central
/// `p` interval.
pub fn logstudent<R: Rng>(
    rng: &mut R,
    n: usize,
    a: f64,
    b: f64,
    df: f64,
    p: f64,
) -> Result<Vec<f64>> {
    require_finite("a", a)?;
    require_finite("b", b)?;
    if a <= 0.0 || b <= 0.0 {
        return Err(invalid(format!(
            "logstudent bounds must be positive, got ({a}, {b})"
        )));
    }
    validate_confidence(p)?;
    let student = StudentT::new(df)
        .map_err(|e| invalid(format!("student-t with {df} degrees of freedom: {e}")))?;

    let mu = (a * b).sqrt().ln();
    let sigma = ((b / a).sqrt().ln() / t_quantile(0.5 * (1.0 + p), df)).abs();
    debug!(a, b, df, p, mu, sigma, "calibrated logstudent");

    let mut samples = draw(rng, n, student);
    affine(&mut samples, mu, sigma);
    exp_in_place(&mut samples);
    Ok(samples)
}

/// Symmetric multiplicative uncertainty of `pct` percent:
/// `lognormal(1 / (1 + pct/100), 1 + pct/100)`.
pub fn percent<R: Rng>(rng: &mut R, n: usize, pct: f64, p: f64) -> Result<Vec<f64>> {
    require_finite("percent", pct)?;
    let factor = 1.0 + pct / 100.0;
    if factor <= 0.0 {
        return Err(invalid(format!("percent must exceed -100, got {pct}")));
    }
    lognormal(rng, n, factor.recip(), factor, p)
}

/// Symmetric multiplicative uncertainty of `x` decibels:
/// `lognormal(10^(-x/10), 10^(x/10))`.
pub fn db<R: Rng>(rng: &mut R, n: usize, x: f64, p: f64) -> Result<Vec<f64>> {
    require_finite("decibels", x)?;
    let factor = 10f64.powf(x / 10.0);
    lognormal(rng, n, factor.recip(), factor, p)
}

/// Normal with a standard deviation of half a unit in the last written
/// digit of `literal`, e.g. `"2.50"` gives `2.5 ± 0.005`.
pub fn sigfig<R: Rng>(rng: &mut R, n: usize, literal: &str) -> Result<Vec<f64>> {
    let resolution = sigfig_resolution(literal)?;
    let value: f64 = literal
        .trim()
        .parse()
        .map_err(|_| FermiError::parse(literal, "not a finite number"))?;
    plusminus(rng, n, value, 0.5 * resolution)
}

/// Normal matched to the mean and population standard deviation of `samples`.
pub fn normalfit<R: Rng>(rng: &mut R, n: usize, samples: &[f64]) -> Result<Vec<f64>> {
    let (Some(mu), Some(sigma)) = (mean(samples), std_dev(samples)) else {
        return Err(invalid("normalfit needs at least one sample"));
    };
    plusminus(rng, n, mu, sigma)
}

// ============================================================================
// BOUNDED SHAPES
// ============================================================================

/// Uniform on `[left, right)`.
pub fn uniform<R: Rng>(rng: &mut R, n: usize, left: f64, right: f64) -> Result<Vec<f64>> {
    require_finite("left", left)?;
    require_finite("right", right)?;
    let mut samples = draw(rng, n, StandardUniform);
    affine(&mut samples, left, right - left);
    Ok(samples)
}

/// Uniform on `[center - width, center + width)`.
pub fn rectangular<R: Rng>(rng: &mut R, n: usize, center: f64, width: f64) -> Result<Vec<f64>> {
    require_finite("center", center)?;
    require_finite("width", width)?;
    let mut samples = draw(rng, n, StandardUniform);
    // center + width * (2u - 1)
    affine(&mut samples, center - width, 2.0 * width);
    Ok(samples)
}

/// Triangular distribution with mode `center`.
///
/// With `right == None` the support is `[center - width, center + width]`;
/// with `Some(right)` the support is `[width, right]`.
pub fn triangular<R: Rng>(
    rng: &mut R,
    n: usize,
    center: f64,
    width: f64,
    right: Option<f64>,
) -> Result<Vec<f64>> {
    require_finite("center", center)?;
    require_finite("width", width)?;
    let (a, c, b) = match right {
        None => (center - width, center, center + width),
        Some(right) => {
            require_finite("right", right)?;
            (width, center, right)
        }
    };
    if !(a <= c && c <= b) {
        return Err(invalid(format!(
            "triangular needs left <= mode <= right, got ({a}, {c}, {b})"
        )));
    }
    if a == b {
        return Ok(vec![c; n]);
    }

    let span = b - a;
    let split = (c - a) / span;
    Ok((0..n)
        .map(|_| {
            let u: f64 = rng.random();
            if u < split {
                a + (u * span * (c - a)).sqrt()
            } else {
                b - ((1.0 - u) * span * (b - c)).sqrt()
            }
        })
        .collect())
}

// ============================================================================
// BAYESIAN RATES
// ============================================================================

fn beta_samples<R: Rng>(rng: &mut R, n: usize, alpha: f64, beta: f64) -> Result<Vec<f64>> {
    let distribution = Beta::new(alpha, beta)
        .map_err(|e| invalid(format!("beta({alpha}, {beta}): {e}")))?;
    Ok(draw(rng, n, distribution))
}

/// Posterior of an `a`-versus-`b` comparison with a uniform prior:
/// `Beta(a + 1, b + 1)`.
pub fn beta<R: Rng>(rng: &mut R, n: usize, a: f64, b: f64) -> Result<Vec<f64>> {
    beta_samples(rng, n, a + 1.0, b + 1.0)
}

/// Posterior success rate after `successes` out of `total` trials.
pub fn outof<R: Rng>(rng: &mut R, n: usize, successes: f64, total: f64) -> Result<Vec<f64>> {
    if !(0.0..=total).contains(&successes) {
        return Err(invalid(format!(
            "outof needs 0 <= successes <= total, got {successes} of {total}"
        )));
    }
    beta_samples(rng, n, successes + 1.0, total - successes + 1.0)
}

/// Raw `Beta(a, b)` with no smoothing.
pub fn against<R: Rng>(rng: &mut R, n: usize, a: f64, b: f64) -> Result<Vec<f64>> {
    beta_samples(rng, n, a, b)
}

/// `Gamma(shape + 1)` with unit scale.
pub fn gamma<R: Rng>(rng: &mut R, n: usize, shape: f64) -> Result<Vec<f64>> {
    let distribution = Gamma::new(shape + 1.0, 1.0)
        .map_err(|e| invalid(format!("gamma shape {}: {e}", shape + 1.0)))?;
    Ok(draw(rng, n, distribution))
}

// ============================================================================
// EMPIRICAL
// ============================================================================

fn weighted_index(weights: &[f64], expected: usize) -> Result<WeightedIndex<f64>> {
    if weights.len() != expected {
        return Err(invalid(format!(
            "{} weights given for {expected} entries",
            weights.len()
        )));
    }
    // WeightedIndex normalises by the total itself
    WeightedIndex::new(weights).map_err(|e| invalid(format!("weights: {e}")))
}

/// Bootstrap `n` draws with replacement from `values`, optionally weighted.
pub fn data<R: Rng>(
    rng: &mut R,
    n: usize,
    values: &[f64],
    weights: Option<&[f64]>,
) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(invalid("cannot bootstrap from an empty data set"));
    }
    match weights {
        Some(weights) => {
            let index = weighted_index(weights, values.len())?;
            Ok((0..n).map(|_| values[index.sample(rng)]).collect())
        }
        None => Ok((0..n)
            .map(|_| values[rng.random_range(0..values.len())])
            .collect()),
    }
}

/// Pool of bootstrap draws from several sample sets.
///
/// Each draw first picks a component (uniformly, or by `weights`), then a
/// random element of that component.
pub fn mixture<R: Rng>(
    rng: &mut R,
    n: usize,
    components: &[&[f64]],
    weights: Option<&[f64]>,
) -> Result<Vec<f64>> {
    if components.is_empty() || components.iter().any(|c| c.is_empty()) {
        return Err(invalid("mixture needs at least one non-empty component"));
    }
    let index = match weights {
        Some(weights) => Some(weighted_index(weights, components.len())?),
        None => None,
    };
    Ok((0..n)
        .map(|_| {
            let which = match &index {
                Some(index) => index.sample(rng),
                None => rng.random_range(0..components.len()),
            };
            let component = components[which];
            component[rng.random_range(0..component.len())]
        })
        .collect())
}
