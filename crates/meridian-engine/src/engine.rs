//! The analytics engine.
//!
//! Every operation fetches what it needs from the [`PriceSource`], hands the
//! table to the pure functions in `meridian-portfolio`, and logs the outcome.
//! The engine keeps no state beyond its source and configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use meridian_config::{EngineConfig, Validate};
use meridian_core::{Lookback, PriceTable, Ticker};
use meridian_portfolio::{
    self as analytics, AnalyticsWarning, BacktestOutcome, FactorBetaReport, FactorBetaTable,
    Portfolio, StressResult, StressScenario, StressSummary,
};
use meridian_traits::PriceSource;

use crate::error::EngineResult;

/// Betas, per-scenario results and a summary from one stress run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressTestReport {
    /// Betas the scenarios were applied to.
    pub betas: FactorBetaReport,
    /// One result per scenario, in input order.
    pub results: Vec<StressResult>,
    /// Worst, best and average impact. `None` when no scenario was given.
    pub summary: Option<StressSummary>,
}

impl StressTestReport {
    /// Returns the result with the most negative impact.
    #[must_use]
    pub fn worst_case(&self) -> Option<&StressResult> {
        analytics::worst_case(&self.results)
    }

    /// Returns the result with the most positive impact.
    #[must_use]
    pub fn best_case(&self) -> Option<&StressResult> {
        analytics::best_case(&self.results)
    }
}

/// Async entry point over a price source.
///
/// # Example
///
/// ```rust
/// use meridian_core::{Date, Lookback, Ticker};
/// use meridian_engine::{AnalyticsEngine, InMemoryPriceSource};
/// use meridian_portfolio::Portfolio;
///
/// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// rt.block_on(async {
///     let as_of = Date::from_ymd(2025, 1, 10).unwrap();
///     let engine = AnalyticsEngine::new(InMemoryPriceSource::new(as_of));
///     let portfolio = Portfolio::from_pairs(&[("SPY", 1.0)]).unwrap();
///
///     let outcome = engine.run_backtest(&portfolio, Lookback::ONE_YEAR).await.unwrap();
///     assert!(outcome.is_no_data());
/// });
/// ```
#[derive(Debug, Clone)]
pub struct AnalyticsEngine<S: PriceSource> {
    source: S,
    config: EngineConfig,
}

impl<S: PriceSource> AnalyticsEngine<S> {
    /// Creates an engine with the default configuration.
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: EngineConfig::default(),
        }
    }

    /// Creates an engine with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`](crate::EngineError::Config) if the
    /// configuration fails validation.
    pub fn with_config(source: S, config: EngineConfig) -> EngineResult<Self> {
        config.validate_or_error()?;
        Ok(Self { source, config })
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the price source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Backtests `portfolio` over `lookback`.
    ///
    /// A source that returns nothing yields
    /// [`BacktestOutcome::NoData`], not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails the request or the analytics
    /// configuration is invalid.
    pub async fn run_backtest(
        &self,
        portfolio: &Portfolio,
        lookback: Lookback,
    ) -> EngineResult<BacktestOutcome> {
        let tickers = portfolio.tickers();
        let prices = self.fetch(&tickers, lookback).await?;

        let outcome = analytics::run_backtest(portfolio, &prices, &self.config.analytics)?;
        match &outcome {
            BacktestOutcome::Completed(result) => {
                log_warnings(portfolio.name(), &result.warnings);
                info!(
                    portfolio = portfolio.name(),
                    observations = result.observations,
                    total_return = result.total_return,
                    volatility = result.annualized_volatility,
                    "backtest completed"
                );
            }
            BacktestOutcome::NoData(reason) => {
                warn!(portfolio = portfolio.name(), %reason, "backtest has no data");
            }
        }

        Ok(outcome)
    }

    /// Like [`run_backtest`](Self::run_backtest) with the configured default window.
    ///
    /// # Errors
    ///
    /// Same as [`run_backtest`](Self::run_backtest).
    pub async fn run_default_backtest(&self, portfolio: &Portfolio) -> EngineResult<BacktestOutcome> {
        self.run_backtest(portfolio, self.config.default_lookback).await
    }

    /// Estimates betas of `tickers` to the configured factors.
    ///
    /// Assets and factor proxies are fetched in one request so both sides
    /// share the same window.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails the request or the analytics
    /// configuration is invalid.
    pub async fn compute_factor_betas(
        &self,
        tickers: &[Ticker],
        lookback: Lookback,
    ) -> EngineResult<FactorBetaReport> {
        let mut seen = HashSet::new();
        let request: Vec<Ticker> = tickers
            .iter()
            .cloned()
            .chain(self.config.factors.tickers())
            .filter(|t| seen.insert(t.clone()))
            .collect();

        let prices = self.fetch(&request, lookback).await?;
        let report = analytics::compute_factor_betas(
            &prices,
            tickers,
            &self.config.factors,
            &self.config.analytics,
        )?;

        for pair in &report.omitted {
            debug!(
                asset = %pair.asset,
                factor = %pair.factor,
                observations = pair.observations,
                "beta omitted for short overlap"
            );
        }
        log_warnings("factor betas", &report.warnings);
        info!(
            assets = report.table.len(),
            fits = report.fits.len(),
            omitted = report.omitted.len(),
            "factor betas computed"
        );

        Ok(report)
    }

    /// Projects the portfolio return under one scenario.
    pub fn compute_stress_impact(
        &self,
        portfolio: &Portfolio,
        betas: &FactorBetaTable,
        scenario: &StressScenario,
    ) -> f64 {
        analytics::compute_stress_impact(portfolio, betas, scenario)
    }

    /// Estimates betas over `lookback` and applies every scenario to them.
    ///
    /// # Errors
    ///
    /// Returns an error if the beta estimation fails.
    pub async fn stress_test_portfolio(
        &self,
        portfolio: &Portfolio,
        scenarios: &[StressScenario],
        lookback: Lookback,
    ) -> EngineResult<StressTestReport> {
        let betas = self
            .compute_factor_betas(&portfolio.tickers(), lookback)
            .await?;

        let results =
            analytics::run_stress_tests(portfolio, &betas.table, scenarios, &self.config.analytics);
        for result in &results {
            log_warnings(&result.scenario_name, &result.warnings);
        }

        let summary = analytics::summarize_results(&results);
        if let Some(summary) = &summary {
            info!(
                portfolio = portfolio.name(),
                scenarios = summary.scenario_count,
                worst = %summary.worst_scenario,
                worst_impact = summary.worst_impact,
                "stress test completed"
            );
        }

        Ok(StressTestReport {
            betas,
            results,
            summary,
        })
    }

    async fn fetch(&self, tickers: &[Ticker], lookback: Lookback) -> EngineResult<PriceTable> {
        let prices = self.source.fetch_prices(tickers, lookback).await?;
        debug!(
            source = self.source.name(),
            requested = tickers.len(),
            returned = prices.tickers().len(),
            rows = prices.len(),
            %lookback,
            "fetched prices"
        );
        Ok(prices)
    }
}

fn log_warnings(context: &str, warnings: &[AnalyticsWarning]) {
    for warning in warnings {
        warn!(context, %warning, "analytics warning");
    }
}
