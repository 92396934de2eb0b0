//! Descriptive statistics over return series.
//!
//! Variances and covariances use the unbiased (n - 1) estimator.

use nalgebra::DMatrix;

use crate::error::{MathError, MathResult};

/// Arithmetic mean.
///
/// # Errors
///
/// Returns `MathError::InsufficientData` for an empty slice.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    check_finite(values, "mean")?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance with n - 1 degrees of freedom.
pub fn sample_variance(values: &[f64]) -> MathResult<f64> {
    sample_covariance(values, values)
}

/// Sample covariance of two equally long series with n - 1 degrees of freedom.
///
/// # Errors
///
/// Returns an error if the lengths differ, fewer than two points are given,
/// or any value is non-finite.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> MathResult<f64> {
    if x.len() != y.len() {
        return Err(MathError::length_mismatch(x.len(), y.len()));
    }
    if x.len() < 2 {
        return Err(MathError::insufficient_data(2, x.len()));
    }

    let mx = mean(x)?;
    let my = mean(y)?;
    let sum: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mx) * (b - my))
        .sum();

    Ok(sum / (x.len() - 1) as f64)
}

/// Sample covariance matrix of a set of equally long columns.
///
/// Entry `(i, j)` is the sample covariance of `columns[i]` and `columns[j]`.
/// The result is symmetric by construction.
///
/// # Errors
///
/// Returns an error for no columns, ragged columns, fewer than two rows or
/// non-finite values.
pub fn covariance_matrix(columns: &[&[f64]]) -> MathResult<DMatrix<f64>> {
    let k = columns.len();
    if k == 0 {
        return Err(MathError::invalid_input("covariance of zero series"));
    }

    let n = columns[0].len();
    if let Some(bad) = columns.iter().find(|c| c.len() != n) {
        return Err(MathError::length_mismatch(n, bad.len()));
    }
    if n < 2 {
        return Err(MathError::insufficient_data(2, n));
    }

    let means = columns
        .iter()
        .map(|c| mean(c))
        .collect::<MathResult<Vec<f64>>>()?;

    let mut cov = DMatrix::zeros(k, k);
    let denom = (n - 1) as f64;
    for i in 0..k {
        for j in i..k {
            let s: f64 = (0..n)
                .map(|t| (columns[i][t] - means[i]) * (columns[j][t] - means[j]))
                .sum();
            cov[(i, j)] = s / denom;
            cov[(j, i)] = cov[(i, j)];
        }
    }

    Ok(cov)
}

pub(crate) fn check_finite(values: &[f64], operation: &str) -> MathResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(MathError::non_finite(operation))
    }
}
