// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Matrix Kernels Module** - *Dense and Symmetric Matrix Storage*
//!
//! Row-major dense matrices for sample storage, symmetric matrices for covariance
//! results, element-wise matrix comparison, and the Cholesky factorisation used by
//! the multivariate normal.
//!
//! ## Storage and Layout
//! - All data is row-major in a 64-byte aligned `Vec64<f64>`.
//! - `SymDense` stores the full `n × n` square so that row access is contiguous;
//!   every write goes through `set_sym`, which keeps both halves identical.
//!
//! ## Output reuse
//! Functions producing a `SymDense` take an `Option<SymDense>` destination. `None`
//! allocates, a zero-value `SymDense::default()` is grown to the required size, and a
//! non-empty matrix must already have that size.

use core::fmt;

#[cfg(feature = "linear_algebra")]
use lapack::{dpotrf, dpotrs};
use minarrow::Vec64;

use crate::errors::{KernelError, log_length_mismatch};
use crate::kernels::scientific::floats::equal_within_abs_or_rel;

/// Read access shared by [`Dense`] and [`SymDense`].
pub trait Matrix {
    /// Returns `(rows, cols)`.
    fn dims(&self) -> (usize, usize);

    /// Element at row `i`, column `j`. Panics when out of bounds.
    fn at(&self, i: usize, j: usize) -> f64;
}

#[inline(always)]
fn zeroed(len: usize) -> Vec64<f64> {
    let mut v = Vec64::with_capacity(len);
    v.resize(len, 0.0);
    v
}

/// Row-major `rows × cols` matrix.
#[derive(Debug, Clone)]
pub struct Dense {
    rows: usize,
    cols: usize,
    data: Vec64<f64>,
}

impl Dense {
    /// Creates a `rows × cols` matrix. `None` yields a zero matrix, otherwise `data`
    /// is taken as the row-major backing storage and must hold exactly `rows * cols`
    /// elements.
    pub fn new(rows: usize, cols: usize, data: Option<Vec64<f64>>) -> Result<Self, KernelError> {
        let data = match data {
            Some(d) => {
                if d.len() != rows * cols {
                    return Err(KernelError::LengthMismatch(log_length_mismatch(
                        "Dense::new".into(),
                        d.len(),
                        rows * cols,
                    )));
                }
                d
            }
            None => zeroed(rows * cols),
        };
        Ok(Dense { rows, cols, data })
    }

    /// Builds a matrix from row slices, all of which must share one length.
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self, KernelError> {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec64::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(KernelError::LengthMismatch(log_length_mismatch(
                    "Dense::from_rows".into(),
                    row.len(),
                    cols,
                )));
            }
            for &v in row.iter() {
                data.push(v);
            }
        }
        Ok(Dense {
            rows: rows.len(),
            cols,
            data,
        })
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: f64) {
        assert!(i < self.rows && j < self.cols, "Dense::set index out of range");
        self.data[i * self.cols + j] = v;
    }

    /// Contiguous view of row `i`.
    #[inline]
    pub fn raw_row_view(&self, i: usize) -> &[f64] {
        assert!(i < self.rows, "Dense::raw_row_view row out of range");
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Mutable view of row `i`, backed directly by the matrix storage.
    #[inline]
    pub fn raw_row_view_mut(&mut self, i: usize) -> &mut [f64] {
        assert!(i < self.rows, "Dense::raw_row_view_mut row out of range");
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Copies column `j` into `dst` (allocated when `None`, otherwise it must have
    /// `rows` elements) and returns it.
    pub fn col(&self, dst: Option<Vec64<f64>>, j: usize) -> Result<Vec64<f64>, KernelError> {
        if j >= self.cols {
            return Err(KernelError::OutOfBounds(format!(
                "Dense::col column {} with {} columns",
                j, self.cols
            )));
        }
        let mut out = match dst {
            Some(d) if d.len() != self.rows => {
                return Err(KernelError::LengthMismatch(log_length_mismatch(
                    "Dense::col".into(),
                    d.len(),
                    self.rows,
                )));
            }
            Some(d) => d,
            None => zeroed(self.rows),
        };
        for i in 0..self.rows {
            out[i] = self.data[i * self.cols + j];
        }
        Ok(out)
    }

    /// Row-major backing storage.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl Matrix for Dense {
    #[inline]
    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows && j < self.cols, "Dense::at index out of range");
        self.data[i * self.cols + j]
    }
}

/// Symmetric `n × n` matrix.
///
/// `SymDense::default()` is the zero value: `n == 0` with no storage. It is the only
/// size that output-reuse functions will grow.
#[derive(Debug, Clone)]
pub struct SymDense {
    n: usize,
    data: Vec64<f64>,
}

impl Default for SymDense {
    fn default() -> Self {
        SymDense {
            n: 0,
            data: Vec64::new(),
        }
    }
}

impl SymDense {
    /// Zero-filled `n × n` symmetric matrix.
    pub fn new(n: usize) -> Self {
        SymDense {
            n,
            data: zeroed(n * n),
        }
    }

    /// Builds from a full row-major `n × n` buffer, which must itself be symmetric.
    pub fn from_row_major(n: usize, data: &[f64]) -> Result<Self, KernelError> {
        if data.len() != n * n {
            return Err(KernelError::LengthMismatch(log_length_mismatch(
                "SymDense::from_row_major".into(),
                data.len(),
                n * n,
            )));
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if data[i * n + j] != data[j * n + i] {
                    return Err(KernelError::InvalidArguments(format!(
                        "SymDense::from_row_major: element ({}, {}) differs from ({}, {})",
                        i, j, j, i
                    )));
                }
            }
        }
        Ok(SymDense {
            n,
            data: Vec64::from_slice(data),
        })
    }

    /// Dimension of the square.
    #[inline]
    pub fn symmetric(&self) -> usize {
        self.n
    }

    /// True for the zero value.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.n == 0
    }

    /// Writes `v` at `(i, j)` and `(j, i)`.
    #[inline]
    pub fn set_sym(&mut self, i: usize, j: usize, v: f64) {
        assert!(i < self.n && j < self.n, "SymDense::set_sym index out of range");
        self.data[i * self.n + j] = v;
        self.data[j * self.n + i] = v;
    }

    /// Prepares the receiver to hold an `n × n` result. The zero value is grown;
    /// any other size must already equal `n`. Existing contents are kept.
    pub fn reuse_as(&mut self, n: usize) -> Result<(), KernelError> {
        if self.is_zero() {
            *self = SymDense::new(n);
            return Ok(());
        }
        if self.n != n {
            return Err(KernelError::LengthMismatch(log_length_mismatch(
                "SymDense::reuse_as".into(),
                self.n,
                n,
            )));
        }
        Ok(())
    }

    /// Copies `src` into the receiver, growing the zero value.
    pub fn copy_sym(&mut self, src: &SymDense) -> Result<(), KernelError> {
        self.reuse_as(src.n)?;
        self.data.copy_from_slice(&src.data);
        Ok(())
    }

    /// Resolves an optional output destination to an `n × n` matrix.
    pub fn reuse_or_new(dst: Option<SymDense>, n: usize) -> Result<SymDense, KernelError> {
        match dst {
            Some(mut d) => {
                d.reuse_as(n)?;
                Ok(d)
            }
            None => Ok(SymDense::new(n)),
        }
    }

    /// Full row-major backing storage.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl Matrix for SymDense {
    #[inline]
    fn dims(&self) -> (usize, usize) {
        (self.n, self.n)
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "SymDense::at index out of range");
        self.data[i * self.n + j]
    }
}

/// One bracketed row per line, four significant digits.
impl fmt::Display for SymDense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            write!(f, "[")?;
            for j in 0..self.n {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{}", significant(self.at(i, j), 4))?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Shortest `%g`-style rendering of `v` with `digits` significant digits: fixed
/// notation for exponents in `[-4, digits)`, scientific otherwise, trailing zeros
/// removed.
fn significant(v: f64, digits: usize) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    if v == 0.0 {
        return "0".into();
    }
    let digits = digits.max(1);
    // round first so that e.g. 9.99995 moves to the next decade
    let sci = format!("{:.*e}", digits - 1, v);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if exp < -4 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, v)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// True when `a` and `b` have identical dimensions and elements.
pub fn equal(a: &dyn Matrix, b: &dyn Matrix) -> bool {
    let (r, c) = a.dims();
    if b.dims() != (r, c) {
        return false;
    }
    for i in 0..r {
        for j in 0..c {
            if a.at(i, j) != b.at(i, j) {
                return false;
            }
        }
    }
    true
}

/// True when `a` and `b` have identical dimensions and every element pair is within
/// `tol` absolutely or relatively.
pub fn equal_approx(a: &dyn Matrix, b: &dyn Matrix, tol: f64) -> bool {
    let (r, c) = a.dims();
    if b.dims() != (r, c) {
        return false;
    }
    for i in 0..r {
        for j in 0..c {
            if !equal_within_abs_or_rel(a.at(i, j), b.at(i, j), tol, tol) {
                return false;
            }
        }
    }
    true
}

/// Cholesky factorisation Σ = L·Lᵀ of a symmetric positive-definite matrix.
///
/// Returns the lower-triangular `L` as a row-major `n × n` buffer with zeros above
/// the diagonal. With the `linear_algebra` feature this goes through LAPACK's
/// dpotrf; otherwise through [`cholesky_rowwise`].
#[inline]
pub fn cholesky(sigma: &SymDense) -> Result<Vec64<f64>, KernelError> {
    #[cfg(feature = "linear_algebra")]
    {
        cholesky_lapack(sigma)
    }
    #[cfg(not(feature = "linear_algebra"))]
    {
        cholesky_rowwise(sigma)
    }
}

/// Row-by-row Cholesky–Banachiewicz factorisation, same output layout as [`cholesky`].
pub fn cholesky_rowwise(sigma: &SymDense) -> Result<Vec64<f64>, KernelError> {
    let n = sigma.symmetric();
    let mut l = zeroed(n * n);
    for i in 0..n {
        for j in 0..=i {
            let mut s = sigma.at(i, j);
            for k in 0..j {
                s -= l[i * n + k] * l[j * n + k];
            }
            if i == j {
                if !(s > 0.0) || !s.is_finite() {
                    return Err(KernelError::InvalidArguments(
                        "cholesky: covariance not positive-definite".into(),
                    ));
                }
                l[i * n + i] = s.sqrt();
            } else {
                l[i * n + j] = s / l[j * n + j];
            }
        }
    }
    Ok(l)
}

#[cfg(feature = "linear_algebra")]
fn cholesky_lapack(sigma: &SymDense) -> Result<Vec64<f64>, KernelError> {
    let n = sigma.symmetric();
    if n == 0 {
        return Ok(Vec64::new());
    }
    // Σ is symmetric, so its row-major storage is also its column-major storage
    let mut a = Vec64::from_slice(sigma.as_slice());
    let mut info = 0;
    unsafe { dpotrf(b'L', n as i32, &mut a, n as i32, &mut info) };
    if info > 0 {
        return Err(KernelError::InvalidArguments(
            "cholesky: covariance not positive-definite".into(),
        ));
    } else if info < 0 {
        return Err(KernelError::InvalidArguments(format!(
            "cholesky: LAPACK dpotrf arg {} was invalid",
            -info
        )));
    }
    // a[i + j*n] = L[i,j] for i >= j; the strict upper triangle is untouched input
    let mut l = zeroed(n * n);
    for i in 0..n {
        for j in 0..=i {
            l[i * n + j] = a[i + j * n];
        }
    }
    Ok(l)
}

/// Squared Mahalanobis norm dᵀΣ⁻¹d, given the row-major Cholesky factor of Σ.
///
/// With the `linear_algebra` feature Σ·y = d is solved through LAPACK's dpotrs;
/// otherwise by forward substitution with [`solve_lower_in_place`].
pub fn mahalanobis_sq(l: &[f64], n: usize, diff: &[f64]) -> Result<f64, KernelError> {
    if diff.len() != n || l.len() != n * n {
        return Err(KernelError::LengthMismatch(log_length_mismatch(
            "mahalanobis_sq".into(),
            diff.len(),
            n,
        )));
    }
    #[cfg(feature = "linear_algebra")]
    {
        mahalanobis_sq_lapack(l, n, diff)
    }
    #[cfg(not(feature = "linear_algebra"))]
    {
        Ok(mahalanobis_sq_rowwise(l, n, diff))
    }
}

#[cfg_attr(feature = "linear_algebra", allow(dead_code))]
fn mahalanobis_sq_rowwise(l: &[f64], n: usize, diff: &[f64]) -> f64 {
    let mut y = diff.to_vec();
    solve_lower_in_place(l, n, &mut y);
    y.iter().map(|v| v * v).sum()
}

#[cfg(feature = "linear_algebra")]
fn mahalanobis_sq_lapack(l: &[f64], n: usize, diff: &[f64]) -> Result<f64, KernelError> {
    if n == 0 {
        return Ok(0.0);
    }
    // Row-major L read column-major is U = Lᵀ with Σ = UᵀU, hence uplo 'U'
    let mut b = diff.to_vec();
    let mut info = 0;
    unsafe { dpotrs(b'U', n as i32, 1, l, n as i32, &mut b, n as i32, &mut info) };
    if info < 0 {
        return Err(KernelError::InvalidArguments(format!(
            "mahalanobis_sq: LAPACK dpotrs arg {} was invalid",
            -info
        )));
    }
    Ok(diff.iter().zip(&b).map(|(d, y)| d * y).sum())
}

/// ln|Σ| = 2 Σ ln L_ii from a row-major Cholesky factor.
#[inline]
pub fn log_det_from_cholesky(l: &[f64], n: usize) -> f64 {
    let mut log_det = 0.0;
    for i in 0..n {
        log_det += l[i * n + i].ln();
    }
    2.0 * log_det
}

/// Solves L·y = b in place by forward substitution.
#[inline]
pub fn solve_lower_in_place(l: &[f64], n: usize, b: &mut [f64]) {
    debug_assert_eq!(b.len(), n);
    for i in 0..n {
        let mut s = b[i];
        for k in 0..i {
            s -= l[i * n + k] * b[k];
        }
        b[i] = s / l[i * n + i];
    }
}
