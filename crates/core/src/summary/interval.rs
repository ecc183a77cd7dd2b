//! Interval estimates over sorted sample arrays
//!
//! Every function here expects its input sorted in non-decreasing order
//! (see [`Quantity::sorted_values`](crate::core_types::Quantity::sorted_values)).
//! `alpha` is always the total tail mass left outside the interval, so the
//! default `DEFAULT_ALPHA` yields a one-sigma-equivalent interval.

use crate::sampling::config::DEFAULT_CONFIDENCE;
use tracing::warn;

/// Tail mass outside the default interval.
pub const DEFAULT_ALPHA: f64 = 1.0 - DEFAULT_CONFIDENCE;

/// Fewer samples than this in a tail and the full range is reported instead.
pub const MIN_TAIL_SAMPLES: usize = 10;

/// Middle element for odd lengths, mean of the two middle elements for even.
pub fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some(0.5 * (sorted[n / 2 - 1] + sorted[n / 2])),
    }
}

/// Number of samples cut from each tail, or `None` when the fallback applies.
///
/// At least one sample always survives the cut, so `2 * cut < len` for any
/// non-empty `len` and `alpha` in `[0, 1]`.
fn tail_cut(len: usize, alpha: f64) -> Option<usize> {
    let cut = ((len as f64 * alpha / 2.0).floor() as usize).min(len.saturating_sub(1) / 2);
    if cut < MIN_TAIL_SAMPLES {
        warn!(len, alpha, cut, "tail too thin, using full sample range");
        None
    } else {
        Some(cut)
    }
}

/// Symmetric interval: drop `floor(len * alpha / 2)` samples from each tail.
///
/// Falls back to `[min, max]` when that cut is below [`MIN_TAIL_SAMPLES`].
///
/// # Returns
/// - `None` if `sorted` is empty or `alpha` is outside `[0, 1]`.
pub fn interval(sorted: &[f64], alpha: f64) -> Option<(f64, f64)> {
    let (&first, &last) = (sorted.first()?, sorted.last()?);
    if !(0.0..=1.0).contains(&alpha) {
        return None;
    }
    match tail_cut(sorted.len(), alpha) {
        Some(cut) => Some((sorted[cut], sorted[sorted.len() - 1 - cut])),
        None => Some((first, last)),
    }
}

/// Minimum-width window holding the same number of samples as [`interval`].
///
/// Slides a fixed-size window over the sorted samples and keeps the
/// narrowest; ties go to the leftmost window. The symmetric window is one of
/// the candidates, so the result is never wider than [`interval`].
pub fn shortest_interval(sorted: &[f64], alpha: f64) -> Option<(f64, f64)> {
    let (&first, &last) = (sorted.first()?, sorted.last()?);
    if !(0.0..=1.0).contains(&alpha) {
        return None;
    }
    let Some(cut) = tail_cut(sorted.len(), alpha) else {
        return Some((first, last));
    };

    // Index distance between the ends of a window keeping len - 2*cut samples.
    let span = sorted.len() - 1 - 2 * cut;
    let width = |start: usize| sorted[start + span] - sorted[start];
    let start = (0..=2 * cut).min_by(|&i, &j| width(i).total_cmp(&width(j)))?;
    Some((sorted[start], sorted[start + span]))
}

/// R-7 linear interpolation between order statistics (numpy's default).
///
/// # Returns
/// - `None` if `sorted` is empty or `p` is outside `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    if j + 1 >= n {
        return Some(sorted[n - 1]);
    }
    let g = h - h.floor();
    Some((1.0 - g) * sorted[j] + g * sorted[j + 1])
}

/// Kahan-compensated sum.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut compensation = 0.0;
    for &x in data {
        let y = x - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }
    sum
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Population standard deviation (denominator `n`), via Welford's update.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut running_mean = 0.0;
    let mut m2 = 0.0;
    for (i, &x) in data.iter().enumerate() {
        let delta = x - running_mean;
        running_mean += delta / (i + 1) as f64;
        m2 += delta * (x - running_mean);
    }
    Some((m2 / data.len() as f64).sqrt())
}
