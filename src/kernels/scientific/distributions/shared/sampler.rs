// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Statistical Sampling Module** - *Pseudorandom Distribution Sampling*
//!
//! Pseudorandom number generation kernels providing the standard normal, uniform
//! and gamma draws that the multivariate samplers are built from.
//!
//! Every multivariate distribution owns one [`Sampler`]. Seeding it with
//! [`Sampler::with_seed`] makes a Monte Carlo run reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, rng};
use std::f64::consts::PI;

/// Statistical distribution sampler backed by a seedable PRNG.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// Creates a sampler seeded from the thread-local generator.
    #[inline]
    pub fn new() -> Self {
        Sampler {
            rng: StdRng::from_rng(&mut rng()),
        }
    }

    /// Creates a sampler with a fixed seed, giving a reproducible stream.
    #[inline]
    pub fn with_seed(seed: u64) -> Self {
        Sampler {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a single sample from the standard normal distribution N(0, 1).
    #[inline]
    pub fn sample_standard_normal(&mut self) -> f64 {
        sample_standard_normal(&mut self.rng)
    }

    /// Fills `out` with iid N(0,1) samples.
    #[inline]
    pub fn fill_standard_normal(&mut self, out: &mut [f64]) {
        for v in out.iter_mut() {
            *v = sample_standard_normal(&mut self.rng);
        }
    }

    /// Uniform draw on [lo, hi).
    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let u: f64 = self.rng.random::<f64>();
        lo + (hi - lo) * u
    }

    /// Gamma(shape, scale). Preconditions: shape > 0, scale > 0.
    #[inline]
    pub fn gamma(&mut self, shape: f64, scale: f64) -> f64 {
        sample_gamma(&mut self.rng, shape, scale)
    }

    /// Dirichlet-distributed probability vector via normalised gamma sampling,
    /// written into `out`.
    ///
    /// Preconditions: `alpha.len() == out.len()`; all entries finite and > 0.
    #[inline]
    pub fn dirichlet_into(&mut self, alpha: &[f64], out: &mut [f64]) {
        assert_eq!(alpha.len(), out.len(), "alpha and output length differ");
        let mut sum = 0.0;
        for (o, &a) in out.iter_mut().zip(alpha) {
            let x = self.gamma(a, 1.0);
            sum += x;
            *o = x;
        }
        // With the preconditions above, sum > 0 with probability 1
        out.iter_mut().for_each(|v| *v /= sum);
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

// Box–Muller to get one N(0,1)
/// Generates a single sample from the standard normal distribution N(0,1).
#[inline]
pub fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // U1 ∈ (0,1], U2 ∈ [0,1)
    let u1: f64 = rng.random::<f64>().max(f64::MIN_POSITIVE); // avoid log(0)
    let u2: f64 = rng.random::<f64>();
    let r = (-2.0 * u1.ln()).sqrt();
    r * (2.0 * PI * u2).cos()
}

/// Generates a single sample from the Gamma distribution using the Marsaglia–Tsang algorithm.
/// Preconditions: shape > 0, scale > 0.
#[inline]
pub fn sample_gamma<R: Rng + ?Sized>(rng: &mut R, shape: f64, scale: f64) -> f64 {
    assert!(shape.is_finite() && shape > 0.0, "shape must be finite and > 0");
    assert!(scale.is_finite() && scale > 0.0, "scale must be finite and > 0");

    // Handle 0 < shape < 1 by boosting to shape+1, then apply a power-law correction.
    if shape < 1.0 {
        let u: f64 = rng.random::<f64>();
        return sample_gamma(rng, shape + 1.0, scale) * u.powf(1.0 / shape);
    }

    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();

    loop {
        let x = sample_standard_normal(rng);
        let one_plus_cx = 1.0 + c * x;
        if one_plus_cx <= 0.0 {
            continue;
        }
        let v = one_plus_cx * one_plus_cx * one_plus_cx;
        let u: f64 = rng.random::<f64>();

        // Squeeze step
        if u < 1.0 - 0.0331 * (x * x) * (x * x) {
            return d * v * scale;
        }
        if u.ln() < 0.5 * x * x + d * (1.0 - v + v.ln()) {
            return d * v * scale;
        }
    }
}
