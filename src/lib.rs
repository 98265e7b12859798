// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

//! # **distmv** - *Multivariate Distribution Kernels*
//!
//! Multivariate normal, uniform and Dirichlet distributions, with the matrix,
//! descriptive statistics and comparison kernels needed to verify them against
//! Monte Carlo estimates (see [`verify`]).

// Link OpenBLAS when linear_algebra feature is enabled.
// This forces the linker to include the OpenBLAS symbols.
#[cfg(feature = "linear_algebra")]
extern crate openblas_src;

pub mod kernels {
    pub mod scientific {
        pub mod distributions;
        pub mod floats;
        pub mod matrix;
        pub mod stats;
    }
}

pub mod config;

pub mod errors;

pub mod verify;
