// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! Uniform distribution over an axis-aligned box ∏ [minᵢ, maxᵢ].

use minarrow::Vec64;

use crate::errors::{KernelError, log_length_mismatch};
use crate::kernels::scientific::distributions::multivariate::{
    Cover, Meaner, Prober, Rander, mean_dst,
};
use crate::kernels::scientific::distributions::shared::sampler::Sampler;
use crate::kernels::scientific::matrix::SymDense;

/// Independent uniform coordinates over a box.
#[derive(Debug, Clone)]
pub struct Uniform {
    bounds: Vec<(f64, f64)>,
    log_volume: f64,
    sampler: Sampler,
}

impl Uniform {
    /// Builds the uniform distribution over `bounds`, one `(min, max)` pair per
    /// dimension with `min < max`, both finite.
    pub fn new(bounds: &[(f64, f64)], sampler: Sampler) -> Result<Self, KernelError> {
        if bounds.is_empty() {
            return Err(KernelError::InvalidArguments(
                "Uniform::new: zero-dimensional distribution".into(),
            ));
        }
        let mut log_volume = 0.0;
        for (i, &(lo, hi)) in bounds.iter().enumerate() {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(KernelError::InvalidArguments(format!(
                    "Uniform::new: bound {} is [{}, {}]",
                    i, lo, hi
                )));
            }
            log_volume += (hi - lo).ln();
        }
        Ok(Uniform {
            bounds: bounds.to_vec(),
            log_volume,
            sampler,
        })
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.bounds.len()
    }

    #[inline]
    pub fn bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    /// Differential entropy, the log-volume of the box.
    #[inline]
    pub fn entropy(&self) -> f64 {
        self.log_volume
    }
}

impl Prober for Uniform {
    /// `-ln(volume)` inside the closed box, `-∞` outside.
    fn log_prob(&self, x: &[f64]) -> f64 {
        let d = self.dim();
        assert_eq!(
            x.len(),
            d,
            "{}",
            log_length_mismatch("Uniform::log_prob".into(), x.len(), d)
        );
        let inside = x
            .iter()
            .zip(&self.bounds)
            .all(|(&v, &(lo, hi))| v >= lo && v <= hi);
        if inside {
            -self.log_volume
        } else {
            f64::NEG_INFINITY
        }
    }
}

impl Meaner for Uniform {
    fn mean(&self, dst: Option<Vec64<f64>>) -> Result<Vec64<f64>, KernelError> {
        let mut out = mean_dst(dst, self.dim(), "Uniform::mean")?;
        for (o, &(lo, hi)) in out.iter_mut().zip(&self.bounds) {
            *o = 0.5 * (lo + hi);
        }
        Ok(out)
    }
}

impl Cover for Uniform {
    /// Diagonal with entries (maxᵢ − minᵢ)² / 12.
    fn covariance_matrix(&self, dst: Option<SymDense>) -> Result<SymDense, KernelError> {
        let d = self.dim();
        let mut out = SymDense::reuse_or_new(dst, d)?;
        for i in 0..d {
            let (lo, hi) = self.bounds[i];
            for j in i..d {
                let v = if i == j { (hi - lo) * (hi - lo) / 12.0 } else { 0.0 };
                out.set_sym(i, j, v);
            }
        }
        Ok(out)
    }
}

impl Rander for Uniform {
    fn rand(&mut self, dst: &mut [f64]) {
        let d = self.dim();
        assert_eq!(
            dst.len(),
            d,
            "{}",
            log_length_mismatch("Uniform::rand".into(), dst.len(), d)
        );
        for (o, &(lo, hi)) in dst.iter_mut().zip(&self.bounds) {
            *o = self.sampler.uniform(lo, hi);
        }
    }
}
