//! Euler decomposition of portfolio volatility.

use meridian_core::Ticker;
use meridian_math::linear_algebra::mat_vec;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// One asset's share of portfolio volatility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskContribution {
    /// Asset ticker.
    pub ticker: Ticker,

    /// Weight used in the decomposition.
    pub weight: f64,

    /// Marginal contribution `(C·w)_i / σ`: the change in volatility per
    /// unit of extra weight.
    pub marginal: f64,

    /// Component contribution `w_i × marginal_i`. Components sum to `σ`.
    pub component: f64,

    /// Fraction of volatility, `component_i / σ`. Fractions sum to 1.
    pub fraction: f64,
}

/// Decomposes volatility `σ = sqrt(wᵀ C w)` into per-asset contributions.
///
/// ## Formula
///
/// ```text
/// m   = (C · w) / σ
/// c_i = w_i × m_i
/// f_i = c_i / σ
/// ```
///
/// Because `Σ w_i (C·w)_i = wᵀ C w = σ²`, the fractions sum to one for any
/// weight vector, normalized or not. When `σ` is not positive every field
/// but the weight is reported as 0.
///
/// # Errors
///
/// Returns an error if the matrix is not square or its size does not match
/// the tickers and weights.
pub fn euler_contributions(
    tickers: &[Ticker],
    covariance: &DMatrix<f64>,
    weights: &[f64],
    volatility: f64,
) -> PortfolioResult<Vec<RiskContribution>> {
    if tickers.len() != weights.len() {
        return Err(PortfolioError::WeightMismatch {
            expected: tickers.len(),
            actual: weights.len(),
        });
    }

    if covariance.nrows() != weights.len() {
        return Err(meridian_math::MathError::length_mismatch(covariance.nrows(), weights.len()).into());
    }

    if volatility.is_nan() || volatility <= 0.0 {
        return Ok(tickers
            .iter()
            .zip(weights)
            .map(|(ticker, &weight)| RiskContribution {
                ticker: ticker.clone(),
                weight,
                marginal: 0.0,
                component: 0.0,
                fraction: 0.0,
            })
            .collect());
    }

    let cw = mat_vec(covariance, weights)?;

    Ok(tickers
        .iter()
        .zip(weights)
        .zip(cw.iter())
        .map(|((ticker, &weight), &cw_i)| {
            let marginal = cw_i / volatility;
            let component = weight * marginal;
            RiskContribution {
                ticker: ticker.clone(),
                weight,
                marginal,
                component,
                fraction: component / volatility,
            }
        })
        .collect())
}
