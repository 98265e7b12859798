// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! Multivariate normal distribution N(μ, Σ).

use minarrow::Vec64;

use crate::errors::{KernelError, log_length_mismatch};
use crate::kernels::scientific::distributions::multivariate::{
    Cover, Meaner, Prober, Rander, mean_dst,
};
use crate::kernels::scientific::distributions::shared::constants::LN_2PI;
use crate::kernels::scientific::distributions::shared::sampler::Sampler;
use crate::kernels::scientific::matrix::{
    Matrix, SymDense, cholesky, log_det_from_cholesky, mahalanobis_sq,
};

/// Multivariate normal distribution with mean `μ` and SPD covariance `Σ`.
///
/// The Cholesky factor `Σ = L·Lᵀ` is computed once on construction and reused by
/// `log_prob` (Mahalanobis term via [`mahalanobis_sq`]) and `rand` (`μ + L·z`).
#[derive(Debug, Clone)]
pub struct Normal {
    mu: Vec64<f64>,
    sigma: SymDense,
    chol: Vec64<f64>,
    log_det: f64,
    sampler: Sampler,
}

impl Normal {
    /// Builds N(`mu`, `sigma`).
    ///
    /// Returns `KernelError::LengthMismatch` when `mu` and `sigma` disagree in
    /// dimension, and `KernelError::InvalidArguments` when `sigma` is empty or not
    /// positive definite.
    pub fn new(mu: &[f64], sigma: &SymDense, sampler: Sampler) -> Result<Self, KernelError> {
        let d = mu.len();
        if d == 0 {
            return Err(KernelError::InvalidArguments(
                "Normal::new: zero-dimensional distribution".into(),
            ));
        }
        if sigma.symmetric() != d {
            return Err(KernelError::LengthMismatch(log_length_mismatch(
                "Normal::new".into(),
                d,
                sigma.symmetric(),
            )));
        }
        let chol = cholesky(sigma)?;
        let log_det = log_det_from_cholesky(&chol, d);
        Ok(Normal {
            mu: Vec64::from_slice(mu),
            sigma: sigma.clone(),
            chol,
            log_det,
            sampler,
        })
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.mu.len()
    }

    /// Differential entropy ½(d(1 + ln 2π) + ln|Σ|).
    pub fn entropy(&self) -> f64 {
        let d = self.dim() as f64;
        0.5 * (d * (1.0 + LN_2PI) + self.log_det)
    }

    /// Marginal distribution over the variables listed in `vars`, in that order.
    pub fn marginal(&self, vars: &[usize], sampler: Sampler) -> Result<Normal, KernelError> {
        let d = self.dim();
        if let Some(&bad) = vars.iter().find(|&&v| v >= d) {
            return Err(KernelError::OutOfBounds(format!(
                "Normal::marginal: variable {} with dimension {}",
                bad, d
            )));
        }
        let k = vars.len();
        let mut mu = Vec::with_capacity(k);
        let mut sigma = SymDense::new(k);
        for (i, &vi) in vars.iter().enumerate() {
            mu.push(self.mu[vi]);
            for (j, &vj) in vars.iter().enumerate().skip(i) {
                sigma.set_sym(i, j, self.sigma.at(vi, vj));
            }
        }
        Normal::new(&mu, &sigma, sampler)
    }
}

impl Prober for Normal {
    fn log_prob(&self, x: &[f64]) -> f64 {
        let d = self.dim();
        assert_eq!(
            x.len(),
            d,
            "{}",
            log_length_mismatch("Normal::log_prob".into(), x.len(), d)
        );
        let diff: Vec<f64> = x.iter().zip(self.mu.iter()).map(|(a, m)| a - m).collect();
        // dimensions were checked above, so only a LAPACK argument fault can land here
        let quad = mahalanobis_sq(&self.chol, d, &diff).unwrap_or(f64::NAN);
        -0.5 * ((d as f64) * LN_2PI + self.log_det + quad)
    }
}

impl Meaner for Normal {
    fn mean(&self, dst: Option<Vec64<f64>>) -> Result<Vec64<f64>, KernelError> {
        let mut out = mean_dst(dst, self.dim(), "Normal::mean")?;
        out.copy_from_slice(&self.mu);
        Ok(out)
    }
}

impl Cover for Normal {
    fn covariance_matrix(&self, dst: Option<SymDense>) -> Result<SymDense, KernelError> {
        let mut out = SymDense::reuse_or_new(dst, self.dim())?;
        out.copy_sym(&self.sigma)?;
        Ok(out)
    }
}

impl Rander for Normal {
    fn rand(&mut self, dst: &mut [f64]) {
        let d = self.dim();
        assert_eq!(
            dst.len(),
            d,
            "{}",
            log_length_mismatch("Normal::rand".into(), dst.len(), d)
        );
        let mut z = vec![0.0f64; d];
        self.sampler.fill_standard_normal(&mut z);
        // x = μ + L·z with L lower triangular
        for i in 0..d {
            let mut s = 0.0;
            for j in 0..=i {
                s += self.chol[i * d + j] * z[j];
            }
            dst[i] = self.mu[i] + s;
        }
    }
}
