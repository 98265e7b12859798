// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Float Comparison Kernels** - *Exact and Tolerance-Bounded Equality*
//!
//! Scalar and slice comparison helpers used to cross-check analytic results
//! against empirical estimates.
//!
//! Exact comparison is used to confirm that two calling conventions performed the
//! same computation. Approximate comparison accepts either an absolute or a relative
//! deviation within the tolerance, so it behaves sensibly for values near zero as
//! well as for large magnitudes.

/// Returns true when `a` and `b` have the same length and identical elements.
///
/// NaN never compares equal, so a slice containing NaN is not equal to itself.
#[inline]
pub fn equal(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// Returns true when `a` and `b` have the same length and every pair of elements
/// is within `tol` absolutely or relatively.
#[inline]
pub fn equal_approx(a: &[f64], b: &[f64], tol: f64) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(&x, &y)| equal_within_abs_or_rel(x, y, tol, tol))
}

/// |a - b| ≤ tol. Equal infinities of the same sign compare equal.
#[inline(always)]
pub fn equal_within_abs(a: f64, b: f64, tol: f64) -> bool {
    a == b || (a - b).abs() <= tol
}

/// |a - b| / max(|a|, |b|) ≤ tol.
///
/// Differences in the subnormal range are scaled against `f64::MIN_POSITIVE`
/// instead, as the relative error is meaningless there.
#[inline(always)]
pub fn equal_within_rel(a: f64, b: f64, tol: f64) -> bool {
    if a == b {
        return true;
    }
    let delta = (a - b).abs();
    if delta <= f64::MIN_POSITIVE {
        return delta <= tol * f64::MIN_POSITIVE;
    }
    delta / a.abs().max(b.abs()) <= tol
}

/// True if either the absolute or the relative test passes.
#[inline(always)]
pub fn equal_within_abs_or_rel(a: f64, b: f64, abs_tol: f64, rel_tol: f64) -> bool {
    equal_within_abs(a, b, abs_tol) || equal_within_rel(a, b, rel_tol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_equal_exact() {
        assert!(equal(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]));
        assert!(!equal(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0 + f64::EPSILON * 4.0]));
        assert!(!equal(&[1.0, 2.0], &[1.0, 2.0, 3.0]));
        assert!(equal(&[], &[]));
        assert!(!equal(&[f64::NAN], &[f64::NAN]));
    }

    #[test]
    fn test_equal_approx_abs_and_rel() {
        assert!(equal_approx(&[0.0, 1.0], &[0.005, 1.009], 1e-2));
        assert!(!equal_approx(&[0.0, 1.0], &[0.05, 1.0], 1e-2));
        // relative branch lets large magnitudes through
        assert!(equal_approx(&[1000.0], &[1005.0], 1e-2));
        assert!(!equal_approx(&[1.0], &[1.0, 1.0], 1.0));
    }

    #[test]
    fn test_infinities() {
        assert!(equal_within_abs(f64::NEG_INFINITY, f64::NEG_INFINITY, 1e-14));
        assert!(!equal_within_abs(f64::NEG_INFINITY, f64::INFINITY, 1e-14));
        assert!(!equal_within_abs(f64::NAN, f64::NAN, 1.0));
    }

    #[test]
    fn test_rel_subnormal() {
        let tiny = f64::MIN_POSITIVE / 4.0;
        assert!(equal_within_rel(0.0, tiny, 0.5));
        assert!(!equal_within_rel(0.0, tiny, 0.1));
    }

    proptest! {
        #[test]
        fn prop_equal_approx_is_symmetric(
            a in prop::collection::vec(-1e6f64..1e6, 0..16),
            shift in -1e-3f64..1e-3,
            tol in 1e-6f64..1e-1,
        ) {
            let b: Vec<f64> = a.iter().map(|x| x + shift).collect();
            prop_assert_eq!(equal_approx(&a, &b, tol), equal_approx(&b, &a, tol));
        }

        #[test]
        fn prop_equal_implies_approx(a in prop::collection::vec(-1e6f64..1e6, 0..16)) {
            prop_assert!(equal(&a, &a));
            prop_assert!(equal_approx(&a, &a, 0.0));
        }
    }
}
