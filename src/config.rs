// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// These parameters should rarely need adjustment.

//! # **Configuration Constants** - *Verification Behaviour Parameters*
//!
//! Global configuration constants controlling the Monte Carlo verification
//! routines in [`crate::verify`]. These values are compile-time constants.

/// Absolute tolerance for log-probability and probability checks.
///
/// Applied by [`crate::verify::test_probability`] to every case. It assumes the
/// expected values come from closed-form densities evaluated in double precision,
/// so distributions whose normaliser is itself approximated (e.g. through a
/// Lanczos `ln_gamma`) should be checked separately with a looser tolerance.
pub const PROB_TOLERANCE: f64 = 1e-14;

/// Number of draws used by the standard Monte Carlo mean and covariance scenarios.
///
/// At this sample count the standard error of a unit-variance column mean is
/// 1e-3, so a tolerance of 1e-2 is roughly ten standard errors.
pub const DEFAULT_SAMPLE_COUNT: usize = 1_000_000;

/// Tolerance paired with [`DEFAULT_SAMPLE_COUNT`] for unit-scale distributions.
pub const DEFAULT_SAMPLE_TOLERANCE: f64 = 1e-2;
