// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Verification Module** - *Monte Carlo Cross-Checks for Multivariate Distributions*
//!
//! Routines that compare the analytic quantities a distribution reports against
//! closed-form expectations and against empirical estimates from random samples.
//!
//! ## Checks
//! - [`test_probability`]: `log_prob` and `prob` against expected log-densities
//! - [`generate_samples`]: fills a sample matrix one draw per row
//! - [`check_mean`]: mean calling conventions, then the empirical column mean
//! - [`check_cov`]: covariance calling conventions, then the sample covariance
//!
//! Failures are recorded in a [`Report`] and emitted as `tracing` error events.
//! No check stops at the first mismatch; call [`Report::finish`] at the end of a
//! test to fail it with every recorded message.
//!
//! ## Example
//! ```rust,ignore
//! let mut report = Report::new();
//! let mut x = Dense::new(DEFAULT_SAMPLE_COUNT, 2, None)?;
//! generate_samples(&mut x, &mut normal);
//! check_mean(&mut report, 0, &x, &normal, DEFAULT_SAMPLE_TOLERANCE);
//! check_cov(&mut report, 0, &x, &normal, DEFAULT_SAMPLE_TOLERANCE);
//! report.finish();
//! ```

use minarrow::Vec64;
use tracing::{debug, error, trace};

use crate::config::PROB_TOLERANCE;
use crate::kernels::scientific::distributions::multivariate::{Cover, Meaner, Prober, Rander};
use crate::kernels::scientific::floats::{self, equal_within_abs};
use crate::kernels::scientific::matrix::{self, Dense, Matrix, SymDense};
use crate::kernels::scientific::stats;

/// Non-fatal collection of verification failures.
///
/// A report must be consumed with [`Report::finish`] or drained with
/// [`Report::take_failures`]. Dropping one that still holds failures panics.
#[derive(Debug, Default)]
#[must_use = "a Report loses its failures unless `finish` is called"]
pub struct Report {
    failures: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one failure and continues.
    pub fn error(&mut self, check: &'static str, msg: String) {
        error!(check, "{}", msg);
        self.failures.push(msg);
    }

    #[inline]
    pub fn failed(&self) -> bool {
        !self.failures.is_empty()
    }

    #[inline]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Removes and returns the recorded failures, leaving the report clean.
    pub fn take_failures(&mut self) -> Vec<String> {
        std::mem::take(&mut self.failures)
    }

    /// Panics listing every recorded failure, if there were any.
    #[track_caller]
    pub fn finish(mut self) {
        let failures = self.take_failures();
        if !failures.is_empty() {
            panic!(
                "{} verification failure(s):\n{}",
                failures.len(),
                failures.join("\n")
            );
        }
    }
}

impl Drop for Report {
    fn drop(&mut self) {
        if !self.failures.is_empty() && !std::thread::panicking() {
            panic!(
                "Report dropped with {} unreported verification failure(s):\n{}",
                self.failures.len(),
                self.failures.join("\n")
            );
        }
    }
}

/// A point at which a distribution's log-density is known in closed form.
pub struct ProbCase<'a> {
    pub dist: &'a dyn Prober,
    pub loc: Vec<f64>,
    pub log_prob: f64,
}

/// Checks `log_prob` and `prob` for every case within [`PROB_TOLERANCE`].
pub fn test_probability(report: &mut Report, cases: &[ProbCase<'_>]) {
    for test in cases {
        let log_prob = test.dist.log_prob(&test.loc);
        if !equal_within_abs(log_prob, test.log_prob, PROB_TOLERANCE) {
            report.error(
                "log_prob",
                format!("LogProb mismatch: want: {}, got: {}", test.log_prob, log_prob),
            );
        }
        let want = test.log_prob.exp();
        let prob = test.dist.prob(&test.loc);
        if !equal_within_abs(prob, want, PROB_TOLERANCE) {
            report.error(
                "prob",
                format!("Prob mismatch: want: {}, got: {}", want, prob),
            );
        }
    }
    debug!(cases = cases.len(), "probability cases checked");
}

/// Fills every row of `x` with one draw from `r`, in place.
///
/// Panics if the row length differs from the sampler's dimension.
pub fn generate_samples<R: Rander + ?Sized>(x: &mut Dense, r: &mut R) {
    let (n, d) = x.dims();
    for i in 0..n {
        r.rand(x.raw_row_view_mut(i));
    }
    trace!(rows = n, cols = d, "samples generated");
}

/// Checks that `m.mean` agrees between an allocated and a supplied buffer, and that it
/// matches the column means of `x` within `tol`.
pub fn check_mean<M: Meaner + ?Sized>(report: &mut Report, case: usize, x: &Dense, m: &M, tol: f64) {
    let mean = match m.mean(None) {
        Ok(v) => v,
        Err(e) => {
            report.error("mean", format!("Mean failed. Case {}: {}", case, e));
            return;
        }
    };

    // Check that the answer is identical when allocating or reusing a buffer.
    let mut buf = Vec64::with_capacity(mean.len());
    buf.resize(mean.len(), 0.0);
    match m.mean(Some(buf)) {
        Ok(mean2) if floats::equal(&mean, &mean2) => {}
        Ok(_) => report.error(
            "mean",
            format!("Mean mismatch when providing nil and slice. Case {}", case),
        ),
        Err(e) => report.error(
            "mean",
            format!("Mean failed with a supplied slice. Case {}: {}", case, e),
        ),
    }

    // Check that the mean matches the samples.
    let (r, c) = x.dims();
    if c != mean.len() {
        report.error(
            "mean",
            format!(
                "Sample dimension {} differs from mean dimension {}. Case {}",
                c,
                mean.len(),
                case
            ),
        );
        return;
    }
    let mut col = Vec64::with_capacity(r);
    col.resize(r, 0.0);
    let mut mean_est = vec![0.0f64; c];
    for (i, est) in mean_est.iter_mut().enumerate() {
        col = match x.col(Some(col), i) {
            Ok(v) => v,
            Err(e) => {
                report.error("mean", format!("Column {} unavailable. Case {}: {}", i, case, e));
                return;
            }
        };
        *est = stats::mean(&col, None);
    }
    if !floats::equal_approx(&mean, &mean_est, tol) {
        report.error(
            "mean",
            format!(
                "Returned mean and sample mean mismatch. Case {}. Empirical {:?}, returned {:?}",
                case,
                mean_est,
                mean.as_slice()
            ),
        );
    }
    debug!(case, rows = r, "mean checked");
}

/// Checks that `c.covariance_matrix` agrees across an allocated, a pre-sized and a
/// zero-value destination, and that it matches the sample covariance of `x` within `tol`.
pub fn check_cov<C: Cover + ?Sized>(report: &mut Report, case: usize, x: &Dense, c: &C, tol: f64) {
    let cov = match c.covariance_matrix(None) {
        Ok(v) => v,
        Err(e) => {
            report.error("cov", format!("Cov failed. Case {}: {}", case, e));
            return;
        }
    };
    let n = cov.symmetric();
    match c.covariance_matrix(Some(SymDense::new(n))) {
        Ok(cov2) if matrix::equal(&cov, &cov2) => {}
        Ok(_) => report.error(
            "cov",
            format!("Cov mismatch when providing nil and matrix. Case {}", case),
        ),
        Err(e) => report.error(
            "cov",
            format!("Cov failed with a pre-sized matrix. Case {}: {}", case, e),
        ),
    }
    match c.covariance_matrix(Some(SymDense::default())) {
        Ok(cov3) if matrix::equal(&cov, &cov3) => {}
        Ok(_) => report.error(
            "cov",
            format!("Cov mismatch when providing zero matrix. Case {}", case),
        ),
        Err(e) => report.error(
            "cov",
            format!("Cov failed with a zero matrix. Case {}: {}", case, e),
        ),
    }

    // Check that the covariance matrix matches the samples.
    let cov_est = match stats::covariance_matrix(None, x, None) {
        Ok(v) => v,
        Err(e) => {
            report.error("cov", format!("Sample cov failed. Case {}: {}", case, e));
            return;
        }
    };
    if !matrix::equal_approx(&cov_est, &cov, tol) {
        report.error(
            "cov",
            format!(
                "Return cov and sample cov mismatch. Case {}.\nGot:\n{}\nWant:\n{}",
                case, cov, cov_est
            ),
        );
    }
    debug!(case, rows = x.dims().0, "covariance checked");
}
