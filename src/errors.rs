// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Distribution and Matrix Error Handling*
//!
//! Error types for distribution construction, matrix reuse and descriptive
//! statistics, with structured error reporting.
//!
//! ## Error Categories
//! - **Dimension Errors**: Vector length and matrix size mismatches
//! - **Argument Errors**: Invalid parameters such as non-SPD covariance matrices
//! - **Boundary Errors**: Out-of-bounds row, column or variable access
//!
//! All errors include contextual message space for debugging.

use core::fmt;
use std::error::Error;

/// Error type for all distribution and matrix operations.
///
/// Each variant includes a contextual message string providing specific details
/// about the error condition.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Vector length or matrix dimension mismatch between operands.
    LengthMismatch(String),

    /// Invalid arguments provided to a constructor or kernel function.
    InvalidArguments(String),

    /// Row, column or variable index out of bounds.
    OutOfBounds(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::LengthMismatch(msg) => write!(f, "Length mismatch: {}", msg),
            KernelError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            KernelError::OutOfBounds(msg) => write!(f, "Out of bounds: {}", msg),
        }
    }
}

impl Error for KernelError {}

/// Creates a formatted error message for length mismatches between left-hand side (LHS) and right-hand side (RHS) operands.
///
/// # Arguments
/// * `fname` - Function name where the mismatch occurred
/// * `lhs` - Length of the left-hand side operand
/// * `rhs` - Length of the right-hand side operand
///
/// # Returns
/// A formatted error message string
pub fn log_length_mismatch(fname: String, lhs: usize, rhs: usize) -> String {
    format!("{} => Length mismatch: LHS {} RHS {}", fname, lhs, rhs)
}
