//! Buy-and-rebalance backtests over historical prices.
//!
//! A backtest normalizes the portfolio, builds its daily return series on
//! the common-date returns table, compounds it into a growth-of-one curve
//! and delegates the summary statistics to [`compute_risk`].
//!
//! Weights are held constant every day, i.e. the portfolio is rebalanced
//! daily back to its target weights.

use meridian_config::{AnalyticsConfig, Validate};
use meridian_core::{Date, PriceTable, Ticker};
use serde::{Deserialize, Serialize};

use crate::analytics::compute_risk;
use crate::contribution::RiskContribution;
use crate::error::PortfolioResult;
use crate::returns::ReturnsTable;
use crate::types::{AnalyticsWarning, Position};
use crate::Portfolio;

/// Why a backtest produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum NoDataReason {
    /// The price source returned nothing.
    EmptyPriceTable,

    /// None of the portfolio's tickers had usable prices.
    NoMatchingTickers {
        /// The tickers that were requested.
        requested: Vec<Ticker>,
    },

    /// Only zero-weight positions had prices.
    NoWeightedPositions,

    /// Too few aligned return rows after dropping incomplete dates.
    InsufficientReturns {
        /// Rows that survived alignment.
        rows: usize,
        /// Rows needed.
        required: usize,
    },
}

impl std::fmt::Display for NoDataReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPriceTable => write!(f, "no price data was returned"),
            Self::NoMatchingTickers { requested } => write!(
                f,
                "no price data for any of {}",
                requested
                    .iter()
                    .map(Ticker::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::NoWeightedPositions => write!(f, "only zero-weight positions have price data"),
            Self::InsufficientReturns { rows, required } => {
                write!(f, "{rows} aligned return rows, at least {required} needed")
            }
        }
    }
}

/// Completed backtest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Growth of one unit, compounded from the first return date.
    pub cumulative_returns: Vec<(Date, f64)>,

    /// Daily weighted portfolio returns.
    pub portfolio_returns: Vec<(Date, f64)>,

    /// Last cumulative value minus one.
    pub total_return: f64,

    /// Largest peak-to-trough decline of the curve as a fraction (≤ 0),
    /// measured from the initial value of 1.
    pub max_drawdown: f64,

    /// Normalized weights actually used.
    pub weights: Vec<Position>,

    /// See [`RiskResult::annualized_return`](crate::analytics::RiskResult::annualized_return).
    pub annualized_return: f64,

    /// See [`RiskResult::annualized_volatility`](crate::analytics::RiskResult::annualized_volatility).
    pub annualized_volatility: f64,

    /// See [`RiskResult::sharpe_ratio`](crate::analytics::RiskResult::sharpe_ratio).
    pub sharpe_ratio: f64,

    /// Per-asset risk contributions.
    pub risk_contribution: Vec<RiskContribution>,

    /// Return rows used.
    pub observations: usize,

    /// Backtest and risk warnings together.
    pub warnings: Vec<AnalyticsWarning>,
}

impl BacktestResult {
    /// False when the window is shorter than the reliability threshold.
    #[must_use]
    pub fn is_reliable(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| matches!(w, AnalyticsWarning::ShortHistory { .. }))
    }

    /// Final value of the growth-of-one curve.
    #[must_use]
    pub fn final_value(&self) -> f64 {
        self.cumulative_returns.last().map_or(1.0, |(_, v)| *v)
    }
}

/// Either a completed backtest or the reason there is none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum BacktestOutcome {
    /// The backtest ran.
    Completed(BacktestResult),
    /// There was not enough data to run it.
    NoData(NoDataReason),
}

impl BacktestOutcome {
    /// The result, if completed.
    #[must_use]
    pub fn result(&self) -> Option<&BacktestResult> {
        match self {
            Self::Completed(r) => Some(r),
            Self::NoData(_) => None,
        }
    }

    /// Consumes the outcome, returning the result if completed.
    #[must_use]
    pub fn into_result(self) -> Option<BacktestResult> {
        match self {
            Self::Completed(r) => Some(r),
            Self::NoData(_) => None,
        }
    }

    /// Returns true for a no-data outcome.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData(_))
    }
}

/// Runs a backtest of `portfolio` on `prices`.
///
/// Steps:
/// 1. Drop portfolio tickers with no prices (warning `MissingTickers`).
/// 2. Normalize the remaining weights by their sum (warning
///    `WeightsNormalized` when the original portfolio did not sum to one).
/// 3. `p[t] = Σ w_i r_i[t]` on the common-date returns table.
/// 4. `cum[0] = 1 + p[0]`, `cum[t] = cum[t-1] × (1 + p[t])`.
/// 5. Risk statistics from [`compute_risk`] on the same table and weights.
///
/// Lack of data is an outcome, not an error: see [`NoDataReason`].
///
/// # Errors
///
/// Returns an error only if the config is invalid.
pub fn run_backtest(
    portfolio: &Portfolio,
    prices: &PriceTable,
    config: &AnalyticsConfig,
) -> PortfolioResult<BacktestOutcome> {
    config.validate_or_error()?;

    if prices.is_empty() {
        return Ok(BacktestOutcome::NoData(NoDataReason::EmptyPriceTable));
    }

    let available = prices.drop_empty_columns();
    let (present, missing): (Vec<Ticker>, Vec<Ticker>) = portfolio
        .tickers()
        .into_iter()
        .partition(|t| available.contains(t));

    if present.is_empty() {
        return Ok(BacktestOutcome::NoData(NoDataReason::NoMatchingTickers {
            requested: portfolio.tickers(),
        }));
    }

    let Some(held) = portfolio.restricted_to(&present) else {
        return Ok(BacktestOutcome::NoData(NoDataReason::NoWeightedPositions));
    };

    let mut warnings = Vec::new();
    if !missing.is_empty() {
        warnings.push(AnalyticsWarning::MissingTickers { tickers: missing });
    }
    if !portfolio.is_normalized(config.weight_tolerance) {
        warnings.push(AnalyticsWarning::WeightsNormalized {
            original_sum: portfolio.total_weight(),
        });
    }

    let held = held.normalized();
    let returns = ReturnsTable::from_prices(&available.select(&held.tickers())?);
    if returns.len() < config.min_return_rows {
        return Ok(BacktestOutcome::NoData(NoDataReason::InsufficientReturns {
            rows: returns.len(),
            required: config.min_return_rows,
        }));
    }

    let weights = held.weights();
    let daily = returns.weighted_returns(&weights)?;
    let cumulative = compound(&daily);
    let total_return = cumulative.last().map_or(0.0, |v| v - 1.0);
    let max_drawdown = max_drawdown(&cumulative);

    let risk = compute_risk(&returns, &weights, config)?;
    warnings.extend(risk.warnings);

    let dates = returns.dates();
    Ok(BacktestOutcome::Completed(BacktestResult {
        cumulative_returns: dates.iter().copied().zip(cumulative).collect(),
        portfolio_returns: dates.iter().copied().zip(daily).collect(),
        total_return,
        max_drawdown,
        weights: held.positions().to_vec(),
        annualized_return: risk.annualized_return,
        annualized_volatility: risk.annualized_volatility,
        sharpe_ratio: risk.sharpe_ratio,
        risk_contribution: risk.risk_contribution,
        observations: risk.observations,
        warnings,
    }))
}

/// Compounds periodic returns into a growth-of-one curve.
#[must_use]
pub fn compound(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0, |value, r| {
            *value *= 1.0 + r;
            Some(*value)
        })
        .collect()
}

/// Largest relative decline from a running peak, starting from a value of 1.
#[must_use]
pub fn max_drawdown(curve: &[f64]) -> f64 {
    let mut peak: f64 = 1.0;
    let mut worst: f64 = 0.0;
    for &v in curve {
        peak = peak.max(v);
        worst = worst.min(v / peak - 1.0);
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn t(s: &str) -> Ticker {
        Ticker::new(s).unwrap()
    }

    fn series(daily: f64, days: usize) -> Vec<(Date, f64)> {
        let start = Date::from_ymd(2025, 2, 3).unwrap();
        let mut price = 100.0;
        let mut out = vec![(start, price)];
        for i in 1..=days {
            price *= 1.0 + daily;
            out.push((start.add_days(i as i64), price));
        }
        out
    }

    #[test]
    fn test_compound_and_drawdown() {
        let curve = compound(&[0.1, -0.5, 0.2]);
        assert_relative_eq!(curve[0], 1.1, epsilon = 1e-12);
        assert_relative_eq!(curve[1], 0.55, epsilon = 1e-12);
        assert_relative_eq!(curve[2], 0.66, epsilon = 1e-12);
        assert_relative_eq!(max_drawdown(&curve), -0.5, epsilon = 1e-12);

        assert_eq!(max_drawdown(&[1.01, 1.02]), 0.0);
        assert_relative_eq!(max_drawdown(&[0.9, 0.95]), -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_offsetting_assets() {
        let prices = PriceTable::from_series(vec![
            (t("UP"), series(0.01, 5)),
            (t("DOWN"), series(-0.01, 5)),
        ]);
        let portfolio = Portfolio::from_pairs(&[("UP", 0.5), ("DOWN", 0.5)]).unwrap();

        let outcome = run_backtest(&portfolio, &prices, &AnalyticsConfig::default()).unwrap();
        let result = outcome.result().unwrap();

        assert_eq!(result.cumulative_returns.len(), 5);
        for (_, v) in &result.cumulative_returns {
            assert_relative_eq!(*v, 1.0, epsilon = 1e-12);
        }
        assert_relative_eq!(result.total_return, 0.0, epsilon = 1e-12);
        assert!(!result.is_reliable());
    }

    #[test]
    fn test_missing_ticker_is_dropped() {
        let prices = PriceTable::from_series(vec![(t("UP"), series(0.01, 5))]);
        let portfolio = Portfolio::from_pairs(&[("UP", 0.5), ("GONE", 0.5)]).unwrap();

        let result = run_backtest(&portfolio, &prices, &AnalyticsConfig::default())
            .unwrap()
            .into_result()
            .unwrap();

        assert_eq!(result.weights, vec![Position::new(t("UP"), 1.0)]);
        assert!(result.warnings.contains(&AnalyticsWarning::MissingTickers {
            tickers: vec![t("GONE")]
        }));
        assert_relative_eq!(result.total_return, 1.01f64.powi(5) - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_data_outcomes() {
        let portfolio = Portfolio::from_pairs(&[("AAA", 1.0)]).unwrap();
        let config = AnalyticsConfig::default();

        let outcome = run_backtest(&portfolio, &PriceTable::empty(), &config).unwrap();
        assert_eq!(outcome, BacktestOutcome::NoData(NoDataReason::EmptyPriceTable));

        let other = PriceTable::from_series(vec![(t("BBB"), series(0.01, 5))]);
        let outcome = run_backtest(&portfolio, &other, &config).unwrap();
        assert!(matches!(
            outcome,
            BacktestOutcome::NoData(NoDataReason::NoMatchingTickers { .. })
        ));

        let short = PriceTable::from_series(vec![(t("AAA"), series(0.01, 1))]);
        let outcome = run_backtest(&portfolio, &short, &config).unwrap();
        assert_eq!(
            outcome,
            BacktestOutcome::NoData(NoDataReason::InsufficientReturns { rows: 1, required: 2 })
        );
    }

    #[test]
    fn test_zero_weight_survivor() {
        let prices = PriceTable::from_series(vec![(t("AAA"), series(0.01, 5))]);
        let portfolio = Portfolio::from_pairs(&[("AAA", 0.0), ("BBB", 1.0)]).unwrap();
        let outcome = run_backtest(&portfolio, &prices, &AnalyticsConfig::default()).unwrap();
        assert_eq!(outcome, BacktestOutcome::NoData(NoDataReason::NoWeightedPositions));
    }

    #[test]
    fn test_normalization_warning() {
        let prices = PriceTable::from_series(vec![
            (t("UP"), series(0.01, 5)),
            (t("DOWN"), series(-0.005, 5)),
        ]);
        let raw = Portfolio::from_pairs(&[("UP", 60.0), ("DOWN", 40.0)]).unwrap();
        let result = run_backtest(&raw, &prices, &AnalyticsConfig::default())
            .unwrap()
            .into_result()
            .unwrap();
        assert!(result
            .warnings
            .contains(&AnalyticsWarning::WeightsNormalized { original_sum: 100.0 }));
        assert!(!result
            .warnings
            .iter()
            .any(|w| matches!(w, AnalyticsWarning::WeightsNotNormalized { .. })));
    }
}
