// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! Dirichlet distribution over the probability simplex.

use minarrow::Vec64;

use crate::errors::{KernelError, log_length_mismatch};
use crate::kernels::scientific::distributions::multivariate::{
    Cover, Meaner, Prober, Rander, mean_dst,
};
use crate::kernels::scientific::distributions::shared::sampler::Sampler;
use crate::kernels::scientific::distributions::shared::scalar::ln_gamma;
use crate::kernels::scientific::matrix::SymDense;

/// Points whose coordinates sum to within this distance of one are on the simplex.
const SIMPLEX_TOL: f64 = 1e-12;

/// Dirichlet(α) with concentration parameters αᵢ > 0.
#[derive(Debug, Clone)]
pub struct Dirichlet {
    alpha: Vec64<f64>,
    sum_alpha: f64,
    // lnΓ(α₀) − Σ lnΓ(αᵢ)
    ln_norm: f64,
    sampler: Sampler,
}

impl Dirichlet {
    pub fn new(alpha: &[f64], sampler: Sampler) -> Result<Self, KernelError> {
        if alpha.len() < 2 {
            return Err(KernelError::InvalidArguments(
                "Dirichlet::new: at least two concentration parameters required".into(),
            ));
        }
        if !alpha.iter().all(|&a| a.is_finite() && a > 0.0) {
            return Err(KernelError::InvalidArguments(
                "Dirichlet::new: all alpha entries must be finite and > 0".into(),
            ));
        }
        let sum_alpha: f64 = alpha.iter().sum();
        let ln_norm = ln_gamma(sum_alpha) - alpha.iter().map(|&a| ln_gamma(a)).sum::<f64>();
        Ok(Dirichlet {
            alpha: Vec64::from_slice(alpha),
            sum_alpha,
            ln_norm,
            sampler,
        })
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.alpha.len()
    }
}

impl Prober for Dirichlet {
    /// Σ(αᵢ − 1) ln xᵢ + lnΓ(α₀) − Σ lnΓ(αᵢ) on the simplex, `-∞` off it.
    fn log_prob(&self, x: &[f64]) -> f64 {
        let d = self.dim();
        assert_eq!(
            x.len(),
            d,
            "{}",
            log_length_mismatch("Dirichlet::log_prob".into(), x.len(), d)
        );
        if x.iter().any(|&v| !(0.0..=1.0).contains(&v)) {
            return f64::NEG_INFINITY;
        }
        if (x.iter().sum::<f64>() - 1.0).abs() > SIMPLEX_TOL {
            return f64::NEG_INFINITY;
        }
        let mut lp = self.ln_norm;
        for (&v, &a) in x.iter().zip(self.alpha.iter()) {
            // αᵢ = 1 contributes nothing, including at xᵢ = 0
            if a != 1.0 {
                lp += (a - 1.0) * v.ln();
            }
        }
        lp
    }
}

impl Meaner for Dirichlet {
    fn mean(&self, dst: Option<Vec64<f64>>) -> Result<Vec64<f64>, KernelError> {
        let mut out = mean_dst(dst, self.dim(), "Dirichlet::mean")?;
        for (o, &a) in out.iter_mut().zip(self.alpha.iter()) {
            *o = a / self.sum_alpha;
        }
        Ok(out)
    }
}

impl Cover for Dirichlet {
    /// (αᵢ δᵢⱼ α₀ − αᵢ αⱼ) / (α₀² (α₀ + 1)).
    fn covariance_matrix(&self, dst: Option<SymDense>) -> Result<SymDense, KernelError> {
        let d = self.dim();
        let a0 = self.sum_alpha;
        let denom = a0 * a0 * (a0 + 1.0);
        let mut out = SymDense::reuse_or_new(dst, d)?;
        for i in 0..d {
            let ai = self.alpha[i];
            out.set_sym(i, i, ai * (a0 - ai) / denom);
            for j in (i + 1)..d {
                out.set_sym(i, j, -ai * self.alpha[j] / denom);
            }
        }
        Ok(out)
    }
}

impl Rander for Dirichlet {
    fn rand(&mut self, dst: &mut [f64]) {
        let d = self.dim();
        assert_eq!(
            dst.len(),
            d,
            "{}",
            log_length_mismatch("Dirichlet::rand".into(), dst.len(), d)
        );
        self.sampler.dirichlet_into(&self.alpha, dst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::scientific::matrix::Matrix;

    #[test]
    fn test_new_rejects_bad_alpha() {
        assert!(Dirichlet::new(&[1.0], Sampler::with_seed(1)).is_err());
        assert!(Dirichlet::new(&[1.0, 0.0], Sampler::with_seed(1)).is_err());
        assert!(Dirichlet::new(&[1.0, f64::NAN], Sampler::with_seed(1)).is_err());
    }

    #[test]
    fn test_flat_dirichlet_density() {
        // Dirichlet(1, 1, 1) is uniform on the 2-simplex with density Γ(3) = 2
        let d = Dirichlet::new(&[1.0, 1.0, 1.0], Sampler::with_seed(1)).unwrap();
        assert!((d.log_prob(&[0.2, 0.3, 0.5]) - 2.0f64.ln()).abs() < 1e-13);
        assert!((d.log_prob(&[0.0, 0.0, 1.0]) - 2.0f64.ln()).abs() < 1e-13);
        assert_eq!(d.log_prob(&[0.2, 0.3, 0.6]), f64::NEG_INFINITY);
        assert_eq!(d.log_prob(&[-0.1, 0.6, 0.5]), f64::NEG_INFINITY);
    }

    #[test]
    fn test_log_prob_closed_form() {
        // Γ(9)/(Γ(2)Γ(3)Γ(4)) · 0.2 · 0.3² · 0.5³ = 3360 · 0.00225 = 7.56
        let d = Dirichlet::new(&[2.0, 3.0, 4.0], Sampler::with_seed(1)).unwrap();
        assert!((d.log_prob(&[0.2, 0.3, 0.5]) - 7.56f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_moments() {
        let d = Dirichlet::new(&[2.0, 3.0, 5.0], Sampler::with_seed(1)).unwrap();
        let m = d.mean(None).unwrap();
        assert_eq!(m.as_slice(), &[0.2, 0.3, 0.5]);
        let c = d.covariance_matrix(None).unwrap();
        // α₀ = 10, denominator 1100
        assert!((c.at(0, 0) - 16.0 / 1100.0).abs() < 1e-16);
        assert!((c.at(0, 1) + 6.0 / 1100.0).abs() < 1e-16);
        assert!((c.at(2, 1) + 15.0 / 1100.0).abs() < 1e-16);
        // rows of a simplex covariance sum to zero
        for i in 0..3 {
            let s: f64 = (0..3).map(|j| c.at(i, j)).sum();
            assert!(s.abs() < 1e-16);
        }
    }

    #[test]
    fn test_rand_on_simplex() {
        let mut d = Dirichlet::new(&[0.7, 2.0, 4.0], Sampler::with_seed(4)).unwrap();
        let mut x = [0.0; 3];
        for _ in 0..500 {
            d.rand(&mut x);
            assert!(d.log_prob(&x).is_finite() || x.iter().any(|&v| v == 0.0));
        }
    }
}
