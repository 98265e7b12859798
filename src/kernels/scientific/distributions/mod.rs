// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Statistical Distributions Module** - *Multivariate Probability Distribution Computing*
//!
//! Multivariate probability distributions with log-density evaluation, analytic
//! moments and random sampling, plus the shared sampling and special-function
//! infrastructure they are built on.
//!
//! ## Numerical Precision
//! Closed-form densities (normal, uniform) are expected to agree with SciPy to within
//! 1e-14 absolute on the log scale. See `./tests` for the reference values and the
//! Monte Carlo moment checks. Platform specific differences may impact your test
//! results, and thus one should keep this in mind when evaluating this library's fit
//! for your use case.
//!
//! ## Disclaimer
//! This implementation is provided on a best-effort basis and is intended for
//! general scientific and engineering use. We make no guarantees as to correctness,
//! fitness for any particular purpose, or suitability for uses such as in
//! life-critical, safety-critical, or financial applications.

/// # **Shared Distribution Utilities** - *Common Infrastructure for Distribution Computing*
///
/// ## Modules
/// - **`constants`**: Mathematical constants
/// - **`sampler`**: Random number generation and sampling utilities
/// - **`scalar`**: Special functions
pub mod shared {
    pub mod constants;
    pub mod sampler;
    pub mod scalar;
}

pub mod multivariate;
