//! Ordinary least squares regression.

use log::debug;

use crate::error::{MathError, MathResult};
use crate::statistics::{check_finite, mean};

/// Variance below which the regressor is treated as constant.
pub const DEGENERATE_VARIANCE: f64 = 1e-15;

/// Result of a first-degree least squares fit `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Slope (the beta of `y` on `x`).
    pub slope: f64,
    /// Intercept (alpha).
    pub intercept: f64,
    /// Coefficient of determination, 0 when undefined.
    pub r_squared: f64,
    /// Number of points in the fit.
    pub observations: usize,
    /// True when `x` has no variance and the slope was forced to zero.
    pub degenerate: bool,
}

/// Fits `y = a + b x` by ordinary least squares.
///
/// ## Formula
///
/// ```text
/// b = Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²
/// a = ȳ - b x̄
/// ```
///
/// When `x` is constant the denominator vanishes. The fit is then flagged
/// `degenerate`, with slope 0 and intercept `ȳ`, instead of producing NaN.
///
/// # Errors
///
/// Returns an error if the lengths differ, fewer than two points are given,
/// or any value is non-finite.
pub fn linear_regression(x: &[f64], y: &[f64]) -> MathResult<LinearFit> {
    if x.len() != y.len() {
        return Err(MathError::length_mismatch(x.len(), y.len()));
    }
    if x.len() < 2 {
        return Err(MathError::insufficient_data(2, x.len()));
    }
    check_finite(x, "linear_regression")?;
    check_finite(y, "linear_regression")?;

    let n = x.len();
    let mx = mean(x)?;
    let my = mean(y)?;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx / n as f64 <= DEGENERATE_VARIANCE {
        debug!("degenerate regression: regressor variance {:.3e} over {} points", sxx / n as f64, n);
        return Ok(LinearFit {
            slope: 0.0,
            intercept: my,
            r_squared: 0.0,
            observations: n,
            degenerate: true,
        });
    }

    let slope = sxy / sxx;
    let r_squared = if syy > 0.0 {
        ((sxy * sxy) / (sxx * syy)).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Ok(LinearFit {
        slope,
        intercept: my - slope * mx,
        r_squared,
        observations: n,
        degenerate: false,
    })
}
