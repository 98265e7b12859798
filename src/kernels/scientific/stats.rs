// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Descriptive Statistics Kernels** - *Sample Mean and Covariance Estimation*
//!
//! Empirical estimators used to cross-check the analytic moments reported by the
//! multivariate distributions.
//!
//! Both estimators accept optional per-observation weights. Without weights the
//! sample covariance is unbiased with divisor `N - 1`; with weights the divisor is
//! `Σw - 1`, treating the weights as frequency counts.

use crate::errors::{KernelError, log_length_mismatch};
use crate::kernels::scientific::matrix::{Dense, Matrix, SymDense};

/// Arithmetic mean of `x`, or the weighted mean Σwᵢxᵢ / Σwᵢ when `weights` is given.
///
/// Returns NaN for an empty input. Panics if `weights` and `x` differ in length.
pub fn mean(x: &[f64], weights: Option<&[f64]>) -> f64 {
    match weights {
        None => {
            let mut sum = 0.0;
            for &v in x {
                sum += v;
            }
            sum / x.len() as f64
        }
        Some(w) => {
            assert_eq!(
                w.len(),
                x.len(),
                "{}",
                log_length_mismatch("stats::mean".into(), x.len(), w.len())
            );
            let mut sum = 0.0;
            let mut sum_w = 0.0;
            for (&v, &wi) in x.iter().zip(w) {
                sum += wi * v;
                sum_w += wi;
            }
            sum / sum_w
        }
    }
}

/// Sample covariance matrix of the columns of `x`, where each row is one observation.
///
/// The result is written into `dst` following the optional-destination contract of
/// [`SymDense::reuse_or_new`].
pub fn covariance_matrix(
    dst: Option<SymDense>,
    x: &Dense,
    weights: Option<&[f64]>,
) -> Result<SymDense, KernelError> {
    let (r, c) = x.dims();
    if let Some(w) = weights {
        if w.len() != r {
            return Err(KernelError::LengthMismatch(log_length_mismatch(
                "stats::covariance_matrix".into(),
                r,
                w.len(),
            )));
        }
    }
    let mut cov = SymDense::reuse_or_new(dst, c)?;

    // Column means
    let mut mu = vec![0.0f64; c];
    let mut col = None;
    for (j, m) in mu.iter_mut().enumerate() {
        let v = x.col(col.take(), j)?;
        *m = mean(&v, weights);
        col = Some(v);
    }

    let denom = match weights {
        None => r as f64 - 1.0,
        Some(w) => w.iter().sum::<f64>() - 1.0,
    };

    // Upper triangle accumulation over centred rows
    let mut acc = vec![0.0f64; c * c];
    let mut centred = vec![0.0f64; c];
    for i in 0..r {
        let row = x.raw_row_view(i);
        for j in 0..c {
            centred[j] = row[j] - mu[j];
        }
        let wi = weights.map_or(1.0, |w| w[i]);
        for j in 0..c {
            let s = wi * centred[j];
            for k in j..c {
                acc[j * c + k] += s * centred[k];
            }
        }
    }
    for j in 0..c {
        for k in j..c {
            cov.set_sym(j, k, acc[j * c + k] / denom);
        }
    }
    Ok(cov)
}
