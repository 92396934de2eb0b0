//! Annualized return, volatility and Sharpe ratio.

use meridian_config::{AnalyticsConfig, Validate};
use meridian_core::Ticker;
use meridian_math::linear_algebra::quadratic_form;
use meridian_math::statistics::{covariance_matrix, mean};
use serde::{Deserialize, Serialize};

use crate::contribution::{euler_contributions, RiskContribution};
use crate::error::{PortfolioError, PortfolioResult};
use crate::returns::ReturnsTable;
use crate::types::AnalyticsWarning;

/// Annualized volatility at or below this is reported as exactly zero.
///
/// A constant return series yields a variance of a few ulps rather than 0;
/// dividing by it would produce a meaningless Sharpe ratio.
pub const ZERO_VOLATILITY: f64 = 1e-12;

/// Portfolio risk statistics over a returns window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    /// Weighted mean daily return times the annualization factor.
    pub annualized_return: f64,

    /// `sqrt(wᵀ C w)` with `C` the annualized sample covariance.
    pub annualized_volatility: f64,

    /// `(return - risk_free) / volatility`, or 0 when volatility is 0.
    pub sharpe_ratio: f64,

    /// Per-asset Euler contributions, in returns-table column order.
    pub risk_contribution: Vec<RiskContribution>,

    /// Return rows used.
    pub observations: usize,

    /// Non-fatal issues found along the way.
    pub warnings: Vec<AnalyticsWarning>,
}

impl RiskResult {
    /// False when the window is shorter than the reliability threshold.
    #[must_use]
    pub fn is_reliable(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| matches!(w, AnalyticsWarning::ShortHistory { .. }))
    }

    /// Risk contribution of one ticker.
    #[must_use]
    pub fn contribution(&self, ticker: &Ticker) -> Option<&RiskContribution> {
        self.risk_contribution.iter().find(|c| &c.ticker == ticker)
    }

    /// Sum of contribution fractions: 1 when volatility is positive, else 0.
    #[must_use]
    pub fn total_fraction(&self) -> f64 {
        self.risk_contribution.iter().map(|c| c.fraction).sum()
    }
}

/// Computes annualized risk statistics for a weighted returns table.
///
/// ## Formula
///
/// ```text
/// R  = T × Σ w_i mean(r_i)
/// C  = T × cov(r)            (sample covariance, ddof 1)
/// σ  = sqrt(wᵀ C w)
/// S  = (R - rf) / σ          (0 when σ is 0)
/// ```
///
/// with `T = config.trading_days_per_year` and `rf = config.risk_free_rate`.
///
/// Weights are used exactly as given; a vector not summing to one is
/// flagged with [`AnalyticsWarning::WeightsNotNormalized`], never rescaled.
///
/// # Errors
///
/// Returns an error if:
/// - The config is invalid
/// - There is not one finite, non-negative weight per column
/// - Fewer than `config.min_return_rows` rows are available
pub fn compute_risk(
    returns: &ReturnsTable,
    weights: &[f64],
    config: &AnalyticsConfig,
) -> PortfolioResult<RiskResult> {
    config.validate_or_error()?;
    check_weights(returns.tickers(), weights)?;

    let observations = if returns.tickers().is_empty() {
        0
    } else {
        returns.len()
    };
    if observations < config.min_return_rows {
        return Err(PortfolioError::insufficient_data(
            config.min_return_rows,
            observations,
        ));
    }

    let annual = config.trading_days_per_year;
    let columns = returns.columns();
    let refs: Vec<&[f64]> = columns.iter().map(Vec::as_slice).collect();

    let mut annualized_return = 0.0;
    for (col, w) in refs.iter().zip(weights) {
        annualized_return += w * mean(col)? * annual;
    }

    let annual_cov = covariance_matrix(&refs)? * annual;
    let variance = quadratic_form(&annual_cov, weights)?;

    let mut warnings = Vec::new();
    let volatility = variance.max(0.0).sqrt();
    let (annualized_volatility, sharpe_ratio) = if volatility > ZERO_VOLATILITY {
        (
            volatility,
            (annualized_return - config.risk_free_rate) / volatility,
        )
    } else {
        warnings.push(AnalyticsWarning::ZeroVolatility);
        (0.0, 0.0)
    };

    let risk_contribution = euler_contributions(
        returns.tickers(),
        &annual_cov,
        weights,
        annualized_volatility,
    )?;

    if observations < config.min_reliable_observations {
        warnings.push(AnalyticsWarning::ShortHistory {
            observations,
            required: config.min_reliable_observations,
        });
    }

    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > config.weight_tolerance {
        warnings.push(AnalyticsWarning::WeightsNotNormalized { sum });
    }

    Ok(RiskResult {
        annualized_return,
        annualized_volatility,
        sharpe_ratio,
        risk_contribution,
        observations,
        warnings,
    })
}

fn check_weights(tickers: &[Ticker], weights: &[f64]) -> PortfolioResult<()> {
    if tickers.len() != weights.len() {
        return Err(PortfolioError::WeightMismatch {
            expected: tickers.len(),
            actual: weights.len(),
        });
    }
    for (ticker, &w) in tickers.iter().zip(weights) {
        if !w.is_finite() || w < 0.0 {
            return Err(PortfolioError::invalid_weight(ticker.as_str(), w));
        }
    }
    Ok(())
}
