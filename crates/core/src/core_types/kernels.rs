//! Data-parallel elementwise kernels over sample arrays
//!
//! Arrays combine when their lengths are equal, or when one side has a
//! single element (a literal such as `5 m`), which is broadcast. Each kernel
//! is a pure per-element map, so the rayon split never changes the result.

use crate::error::{FermiError, Result};
use rayon::prelude::*;

/// Below this many elements per task rayon's splitting costs more than it saves.
const MIN_PAR_LEN: usize = 4096;

/// Length of the result of combining arrays of length `left` and `right`.
pub(crate) fn broadcast_len(left: usize, right: usize) -> Result<usize> {
    match (left, right) {
        _ if left == right => Ok(left),
        (1, n) | (n, 1) => Ok(n),
        _ => Err(FermiError::ShapeMismatch { left, right }),
    }
}

#[inline(always)]
fn pick(values: &[f64], i: usize) -> f64 {
    if values.len() == 1 {
        values[0]
    } else {
        values[i]
    }
}

pub(crate) fn map_unary(values: &[f64], f: fn(f64) -> f64) -> Vec<f64> {
    values
        .par_iter()
        .with_min_len(MIN_PAR_LEN)
        .map(|&x| f(x))
        .collect()
}

/// Affine map `offset + scale * x`, the workhorse of every calibrated sampler.
pub(crate) fn affine(values: &mut [f64], offset: f64, scale: f64) {
    values
        .par_iter_mut()
        .with_min_len(MIN_PAR_LEN)
        .for_each(|x| *x = offset + scale * *x);
}

/// Elementwise `exp`, in place.
pub(crate) fn exp_in_place(values: &mut [f64]) {
    values
        .par_iter_mut()
        .with_min_len(MIN_PAR_LEN)
        .for_each(|x| *x = x.exp());
}

pub(crate) fn map_binary(a: &[f64], b: &[f64], f: fn(f64, f64) -> f64) -> Result<Vec<f64>> {
    if a.len() == b.len() {
        return Ok(a
            .par_iter()
            .zip(b.par_iter())
            .with_min_len(MIN_PAR_LEN)
            .map(|(&x, &y)| f(x, y))
            .collect());
    }
    match (a, b) {
        ([x], _) => {
            let x = *x;
            Ok(b.par_iter()
                .with_min_len(MIN_PAR_LEN)
                .map(|&y| f(x, y))
                .collect())
        }
        (_, [y]) => {
            let y = *y;
            Ok(a.par_iter()
                .with_min_len(MIN_PAR_LEN)
                .map(|&x| f(x, y))
                .collect())
        }
        _ => Err(FermiError::ShapeMismatch {
            left: a.len(),
            right: b.len(),
        }),
    }
}

/// Two-output binary kernel (e.g. quotient and remainder).
pub(crate) fn map_binary_pair(
    a: &[f64],
    b: &[f64],
    f: fn(f64, f64) -> (f64, f64),
) -> Result<(Vec<f64>, Vec<f64>)> {
    let n = broadcast_len(a.len(), b.len())?;
    Ok((0..n)
        .into_par_iter()
        .with_min_len(MIN_PAR_LEN)
        .map(|i| f(pick(a, i), pick(b, i)))
        .unzip())
}

/// Write `f(a, b)` into an existing buffer without allocating.
pub(crate) fn write_binary(
    a: &[f64],
    b: &[f64],
    f: fn(f64, f64) -> f64,
    out: &mut [f64],
) -> Result<()> {
    let n = broadcast_len(a.len(), b.len())?;
    if n != out.len() {
        return Err(FermiError::ShapeMismatch {
            left: out.len(),
            right: n,
        });
    }
    out.par_iter_mut()
        .with_min_len(MIN_PAR_LEN)
        .enumerate()
        .for_each(|(i, o)| *o = f(pick(a, i), pick(b, i)));
    Ok(())
}

/// `target[i] = f(target[i], b[i])`, broadcasting `b` when it has one element.
pub(crate) fn assign_binary(target: &mut [f64], b: &[f64], f: fn(f64, f64) -> f64) -> Result<()> {
    if b.len() != target.len() && b.len() != 1 {
        return Err(FermiError::ShapeMismatch {
            left: target.len(),
            right: b.len(),
        });
    }
    target
        .par_iter_mut()
        .with_min_len(MIN_PAR_LEN)
        .enumerate()
        .for_each(|(i, t)| *t = f(*t, pick(b, i)));
    Ok(())
}

/// Floor quotient and a remainder carrying the sign of the divisor.
pub(crate) fn floor_divmod(a: f64, b: f64) -> (f64, f64) {
    let quotient = (a / b).floor();
    (quotient, a - quotient * b)
}

/// Sorted copy (NaN sorts last).
pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.par_sort_unstable_by(f64::total_cmp);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(a: f64, b: f64) -> f64 {
        a + b
    }

    #[test]
    fn test_broadcast_len() {
        assert_eq!(broadcast_len(5, 5).unwrap(), 5);
        assert_eq!(broadcast_len(1, 7).unwrap(), 7);
        assert_eq!(broadcast_len(7, 1).unwrap(), 7);
        assert_eq!(
            broadcast_len(3, 4),
            Err(FermiError::ShapeMismatch { left: 3, right: 4 })
        );
    }

    #[test]
    fn test_map_binary_broadcasts_single_values() {
        assert_eq!(map_binary(&[1.0, 2.0], &[10.0, 20.0], add).unwrap(), vec![11.0, 22.0]);
        assert_eq!(map_binary(&[1.0], &[10.0, 20.0], add).unwrap(), vec![11.0, 21.0]);
        assert_eq!(map_binary(&[1.0, 2.0], &[10.0], add).unwrap(), vec![11.0, 12.0]);
        assert!(map_binary(&[1.0, 2.0], &[1.0, 2.0, 3.0], add).is_err());
    }

    #[test]
    fn test_large_arrays_match_sequential_result() {
        let a: Vec<f64> = (0..50_000).map(f64::from).collect();
        let b: Vec<f64> = (0..50_000).map(|i| f64::from(i) * 0.5).collect();
        let par = map_binary(&a, &b, add).unwrap();
        let seq: Vec<f64> = a.iter().zip(&b).map(|(x, y)| x + y).collect();
        assert_eq!(par, seq);
    }

    #[test]
    fn test_write_binary_reuses_buffer() {
        let mut out = vec![0.0; 3];
        let ptr = out.as_ptr();
        write_binary(&[1.0, 2.0, 3.0], &[1.0], add, &mut out).unwrap();
        assert_eq!(out, vec![2.0, 3.0, 4.0]);
        assert_eq!(out.as_ptr(), ptr);

        let mut short = vec![0.0; 2];
        assert!(write_binary(&[1.0, 2.0, 3.0], &[1.0], add, &mut short).is_err());
    }

    #[test]
    fn test_assign_binary() {
        let mut target = vec![1.0, 2.0];
        assign_binary(&mut target, &[3.0], add).unwrap();
        assert_eq!(target, vec![4.0, 5.0]);
        assert!(assign_binary(&mut target, &[1.0, 2.0, 3.0], add).is_err());
    }

    #[test]
    fn test_floor_divmod() {
        assert_eq!(floor_divmod(7.0, 2.0), (3.0, 1.0));
        assert_eq!(floor_divmod(-7.0, 2.0), (-4.0, 1.0));
        let (q, r) = map_binary_pair(&[7.0, 9.0], &[2.0], floor_divmod).unwrap();
        assert_eq!(q, vec![3.0, 4.0]);
        assert_eq!(r, vec![1.0, 1.0]);
    }

    #[test]
    fn test_affine_and_sorted() {
        let mut v = vec![0.0, 1.0, -1.0];
        affine(&mut v, 10.0, 2.0);
        assert_eq!(v, vec![10.0, 12.0, 8.0]);
        assert_eq!(sorted(&v), vec![8.0, 10.0, 12.0]);
    }
}
