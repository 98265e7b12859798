// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Scalar Distribution Utilities Module** - *Special Functions*
//!
//! Scalar special functions needed by the multivariate normalising constants.

use crate::kernels::scientific::distributions::shared::constants::{COF, HALF_LOG_TWO_PI, LN_PI};

/// Natural log of the absolute value of the Gamma function, ln|Γ(x)|.
///
/// * Lanczos approximation (g = 7, n = 9) for x ≥ 0.5.
/// * Reflection formula for x < 0.5 using `ln(|sin(πx)|)`.
/// * Poles at non-positive integers return **+∞**.
/// * Propagates NaN.
#[inline(always)]
pub fn ln_gamma(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x.is_infinite() && x.is_sign_positive() {
        return f64::INFINITY;
    }
    // Poles: Γ(x) has simple poles at 0, −1, −2, …
    if x <= 0.0 && (x.fract().abs() < 1e-14) {
        return f64::INFINITY;
    }
    if x < 0.5 {
        return LN_PI - (std::f64::consts::PI * x).sin().abs().ln() - ln_gamma(1.0 - x);
    }

    let z = x - 1.0;
    let mut a = COF[0];
    for (i, &c) in COF.iter().enumerate().skip(1) {
        a += c / (z + i as f64);
    }
    let t = z + 7.5; // g + ½
    HALF_LOG_TWO_PI + (z + 0.5) * t.ln() - t + a.ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ln_gamma_integers() {
        // ln((n-1)!)
        let expect = [0.0, 0.0, 2.0f64.ln(), 6.0f64.ln(), 24.0f64.ln(), 40320.0f64.ln()];
        let args = [1.0, 2.0, 3.0, 4.0, 5.0, 9.0];
        for (&x, &e) in args.iter().zip(expect.iter()) {
            assert!((ln_gamma(x) - e).abs() < 1e-13, "ln_gamma({x}) = {}", ln_gamma(x));
        }
    }

    #[test]
    fn test_ln_gamma_half_and_poles() {
        // Γ(½) = √π
        assert!((ln_gamma(0.5) - 0.5 * LN_PI).abs() < 1e-14);
        assert!((ln_gamma(-0.5) - (2.0 * std::f64::consts::PI.sqrt()).ln()).abs() < 1e-13);
        assert_eq!(ln_gamma(0.0), f64::INFINITY);
        assert_eq!(ln_gamma(-3.0), f64::INFINITY);
        assert!(ln_gamma(f64::NAN).is_nan());
    }
}
