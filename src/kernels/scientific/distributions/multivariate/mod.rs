// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Multivariate Distributions Module** - *Multivariate Statistical Computing*
//!
//! Multivariate probability distributions providing log-density evaluation,
//! analytic moments and random sampling.
//!
//! ## Supported Multivariate Distributions
//! - **Multivariate Normal**: Gaussian distributions with arbitrary SPD covariance
//! - **Uniform**: Independent uniform coordinates over an axis-aligned box
//! - **Dirichlet**: Distributions over the probability simplex
//!
//! ## Capabilities
//! Each capability is a separate trait so that code needing only one of them, such
//! as the checkers in [`crate::verify`], does not require the others:
//! - [`Prober`]: `log_prob` and `prob` at a point
//! - [`Meaner`]: analytic mean vector
//! - [`Cover`]: analytic covariance matrix
//! - [`Rander`]: one random draw per call
//!
//! `Meaner` and `Cover` take an optional destination. `None` allocates; `Some`
//! reuses the buffer (a zero-value `SymDense` is grown). The returned values never
//! depend on which form was used.

use minarrow::Vec64;

use crate::errors::{KernelError, log_length_mismatch};
use crate::kernels::scientific::matrix::SymDense;

pub mod dirichlet;
pub mod normal;
pub mod uniform;

pub use dirichlet::Dirichlet;
pub use normal::Normal;
pub use uniform::Uniform;

/// Density evaluation at a point.
pub trait Prober {
    /// Natural log of the density at `x`. Panics if `x` has the wrong dimension.
    fn log_prob(&self, x: &[f64]) -> f64;

    /// Density at `x`.
    #[inline]
    fn prob(&self, x: &[f64]) -> f64 {
        self.log_prob(x).exp()
    }
}

/// Analytic mean.
pub trait Meaner {
    /// Returns the mean, written into `dst` when one is supplied.
    ///
    /// A supplied buffer must have one element per dimension.
    fn mean(&self, dst: Option<Vec64<f64>>) -> Result<Vec64<f64>, KernelError>;
}

/// Analytic covariance.
pub trait Cover {
    /// Returns the covariance matrix, written into `dst` when one is supplied.
    fn covariance_matrix(&self, dst: Option<SymDense>) -> Result<SymDense, KernelError>;
}

/// Random generation. The implementor owns its randomness source.
pub trait Rander {
    /// Writes one draw into `dst`. Panics if `dst` has the wrong dimension.
    fn rand(&mut self, dst: &mut [f64]);
}

/// Resolves an optional mean destination to a buffer of length `dim`.
pub(crate) fn mean_dst(
    dst: Option<Vec64<f64>>,
    dim: usize,
    fname: &str,
) -> Result<Vec64<f64>, KernelError> {
    match dst {
        Some(d) if d.len() != dim => Err(KernelError::LengthMismatch(log_length_mismatch(
            fname.into(),
            d.len(),
            dim,
        ))),
        Some(d) => Ok(d),
        None => {
            let mut d = Vec64::with_capacity(dim);
            d.resize(dim, 0.0);
            Ok(d)
        }
    }
}
