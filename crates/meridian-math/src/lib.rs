//! # Meridian Math
//!
//! Numerical utilities for the Meridian portfolio analytics library.
//!
//! This crate provides:
//!
//! - **Statistics**: Means, sample variances and covariance matrices
//! - **Regression**: First-degree ordinary least squares fits
//! - **Linear Algebra**: Quadratic forms and matrix-vector products
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: No state, no I/O, safe to call from any thread
//! - **Numerical Stability**: Degenerate inputs are reported, never turned into NaN
//! - **Explicit dimensions**: Length mismatches are errors, not broadcasts

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

pub mod error;
pub mod linear_algebra;
pub mod regression;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::linear_algebra::{mat_vec, quadratic_form};
    pub use crate::regression::{linear_regression, LinearFit};
    pub use crate::statistics::{covariance_matrix, mean, sample_covariance, sample_variance};
}

pub use error::{MathError, MathResult};
