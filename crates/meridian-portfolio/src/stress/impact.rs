//! Stress impact calculations.
//!
//! Projects factor shocks onto a portfolio through its factor betas:
//!
//! ```text
//! asset_impact     = Σ_factor beta[asset, factor] × shock[factor] / 100
//! portfolio_impact = Σ_asset  weight[asset] × asset_impact
//! ```
//!
//! Impacts are fractions (-0.15 is a 15% loss). Weights are used exactly as
//! the portfolio holds them. A missing or non-finite beta contributes 0, as
//! does a non-finite shock. The result reports every such fallback as a
//! warning.

use std::collections::BTreeMap;

use meridian_config::AnalyticsConfig;
use meridian_core::Ticker;
use serde::{Deserialize, Serialize};

use super::scenarios::StressScenario;
use crate::analytics::{maybe_parallel_map, FactorBetaTable};
use crate::types::AnalyticsWarning;
use crate::Portfolio;

/// Projected move of one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetImpact {
    /// Asset ticker.
    pub ticker: Ticker,
    /// Portfolio weight.
    pub weight: f64,
    /// Projected asset return.
    pub impact: f64,
    /// `weight × impact`.
    pub weighted_impact: f64,
}

/// Result of a stress test on a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressResult {
    /// Scenario name.
    pub scenario_name: String,

    /// Projected portfolio return as a fraction.
    pub portfolio_impact: f64,

    /// Per-position detail in portfolio order.
    pub asset_impacts: Vec<AssetImpact>,

    /// Weighted contribution of each shocked factor to the portfolio impact.
    pub factor_impacts: BTreeMap<String, f64>,

    /// Zero-fallbacks taken.
    pub warnings: Vec<AnalyticsWarning>,
}

impl StressResult {
    /// Projected portfolio return in percent.
    #[must_use]
    pub fn portfolio_impact_pct(&self) -> f64 {
        self.portfolio_impact * 100.0
    }

    /// Returns true if this is a gain.
    #[must_use]
    pub fn is_gain(&self) -> bool {
        self.portfolio_impact > 0.0
    }

    /// Returns true if this is a loss.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.portfolio_impact < 0.0
    }
}

/// Projects the portfolio return under `scenario`.
///
/// Same value as [`run_stress_test`]`.portfolio_impact`.
#[must_use]
pub fn compute_stress_impact(
    portfolio: &Portfolio,
    betas: &FactorBetaTable,
    scenario: &StressScenario,
) -> f64 {
    run_stress_test(portfolio, betas, scenario).portfolio_impact
}

/// Runs one scenario with per-asset and per-factor detail.
///
/// Warnings:
/// - [`AnalyticsWarning::UnknownFactors`] for shocked factors that are not
///   columns of the beta table.
/// - [`AnalyticsWarning::MissingBetas`] for positions lacking a beta to a
///   shocked, known factor.
#[must_use]
pub fn run_stress_test(
    portfolio: &Portfolio,
    betas: &FactorBetaTable,
    scenario: &StressScenario,
) -> StressResult {
    let mut factor_impacts: BTreeMap<String, f64> = BTreeMap::new();
    let mut missing_betas = Vec::new();

    let asset_impacts: Vec<AssetImpact> = portfolio
        .positions()
        .iter()
        .map(|position| {
            let mut impact = 0.0;
            let mut missing = false;
            for (factor, shock) in scenario.shocks.iter().filter(|(_, s)| s.is_finite()) {
                match betas.get(&position.ticker, factor).filter(|b| b.is_finite()) {
                    Some(beta) => {
                        let term = beta * (shock / 100.0);
                        impact += term;
                        *factor_impacts.entry(factor.clone()).or_default() += position.weight * term;
                    }
                    None => missing |= betas.has_factor(factor),
                }
            }
            if missing {
                missing_betas.push(position.ticker.clone());
            }
            AssetImpact {
                ticker: position.ticker.clone(),
                weight: position.weight,
                impact,
                weighted_impact: position.weight * impact,
            }
        })
        .collect();

    let portfolio_impact = asset_impacts.iter().map(|a| a.weighted_impact).sum();

    let mut warnings = Vec::new();
    let non_finite: Vec<String> = scenario
        .shocks
        .iter()
        .filter(|(_, s)| !s.is_finite())
        .map(|(f, _)| f.clone())
        .collect();
    if !non_finite.is_empty() {
        warnings.push(AnalyticsWarning::NonFiniteShocks {
            factors: non_finite,
        });
    }
    let unknown: Vec<String> = scenario
        .shocks
        .iter()
        .filter(|(f, s)| s.is_finite() && !betas.has_factor(f))
        .map(|(f, _)| f.clone())
        .collect();
    if !unknown.is_empty() {
        warnings.push(AnalyticsWarning::UnknownFactors { factors: unknown });
    }
    if !missing_betas.is_empty() {
        warnings.push(AnalyticsWarning::MissingBetas {
            tickers: missing_betas,
        });
    }

    StressResult {
        scenario_name: scenario.name.clone(),
        portfolio_impact,
        asset_impacts,
        factor_impacts,
        warnings,
    }
}

/// Runs several scenarios, in parallel above the config threshold.
///
/// Results come back in scenario order.
#[must_use]
pub fn run_stress_tests(
    portfolio: &Portfolio,
    betas: &FactorBetaTable,
    scenarios: &[StressScenario],
    config: &AnalyticsConfig,
) -> Vec<StressResult> {
    maybe_parallel_map(scenarios, config, |s| run_stress_test(portfolio, betas, s))
}

/// The scenario with the lowest portfolio impact.
#[must_use]
pub fn worst_case(results: &[StressResult]) -> Option<&StressResult> {
    results
        .iter()
        .min_by(|a, b| a.portfolio_impact.total_cmp(&b.portfolio_impact))
}

/// The scenario with the highest portfolio impact.
#[must_use]
pub fn best_case(results: &[StressResult]) -> Option<&StressResult> {
    results
        .iter()
        .max_by(|a, b| a.portfolio_impact.total_cmp(&b.portfolio_impact))
}

/// Summary of stress test results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressSummary {
    /// Number of scenarios tested.
    pub scenario_count: usize,

    /// Worst-case portfolio impact.
    pub worst_impact: f64,

    /// Worst-case scenario name.
    pub worst_scenario: String,

    /// Best-case portfolio impact.
    pub best_impact: f64,

    /// Best-case scenario name.
    pub best_scenario: String,

    /// Average impact across all scenarios.
    pub average_impact: f64,
}

/// Creates a summary of stress test results.
#[must_use]
pub fn summarize_results(results: &[StressResult]) -> Option<StressSummary> {
    let worst = worst_case(results)?;
    let best = best_case(results)?;

    let average_impact =
        results.iter().map(|r| r.portfolio_impact).sum::<f64>() / results.len() as f64;

    Some(StressSummary {
        scenario_count: results.len(),
        worst_impact: worst.portfolio_impact,
        worst_scenario: worst.scenario_name.clone(),
        best_impact: best.portfolio_impact,
        best_scenario: best.scenario_name.clone(),
        average_impact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stress::standard;
    use approx::assert_relative_eq;

    fn t(s: &str) -> Ticker {
        Ticker::new(s).unwrap()
    }

    fn betas(entries: &[(&str, &str, f64)]) -> FactorBetaTable {
        let mut table = FactorBetaTable::default();
        for (asset, factor, beta) in entries {
            table.insert(t(asset), *factor, *beta);
        }
        table
    }

    #[test]
    fn test_single_asset_single_factor() {
        let portfolio = Portfolio::from_pairs(&[("AAA", 1.0)]).unwrap();
        let table = betas(&[("AAA", "F", 1.5)]);
        let scenario = StressScenario::new("Down").with_shock("F", -10.0);

        let impact = compute_stress_impact(&portfolio, &table, &scenario);
        assert_relative_eq!(impact, -0.15, epsilon = 1e-9);
    }

    #[test]
    fn test_multi_factor_weighted() {
        let portfolio = Portfolio::from_pairs(&[("AAA", 0.6), ("BBB", 0.4)]).unwrap();
        let table = betas(&[
            ("AAA", "Equity", 1.2),
            ("AAA", "Gold", 0.0),
            ("BBB", "Equity", 0.1),
            ("BBB", "Gold", 0.8),
        ]);
        let scenario = StressScenario::new("Mixed")
            .with_shock("Equity", -20.0)
            .with_shock("Gold", 10.0);

        let result = run_stress_test(&portfolio, &table, &scenario);

        let aaa = 1.2 * -0.2;
        let bbb = 0.1 * -0.2 + 0.8 * 0.1;
        assert_relative_eq!(result.asset_impacts[0].impact, aaa, epsilon = 1e-12);
        assert_relative_eq!(result.asset_impacts[1].impact, bbb, epsilon = 1e-12);
        assert_relative_eq!(result.portfolio_impact, 0.6 * aaa + 0.4 * bbb, epsilon = 1e-12);

        let by_factor: f64 = result.factor_impacts.values().sum();
        assert_relative_eq!(by_factor, result.portfolio_impact, epsilon = 1e-12);
        assert!(result.warnings.is_empty());
        assert!(result.is_loss());
    }

    #[test]
    fn test_missing_asset_contributes_zero() {
        let portfolio = Portfolio::from_pairs(&[("AAA", 0.5), ("NEW", 0.5)]).unwrap();
        let table = betas(&[("AAA", "F", 2.0)]);
        let scenario = StressScenario::new("S").with_shock("F", 10.0);

        let result = run_stress_test(&portfolio, &table, &scenario);
        assert_relative_eq!(result.portfolio_impact, 0.1, epsilon = 1e-12);
        assert_eq!(result.asset_impacts[1].impact, 0.0);
        assert_eq!(
            result.warnings,
            vec![AnalyticsWarning::MissingBetas {
                tickers: vec![t("NEW")]
            }]
        );
    }

    #[test]
    fn test_unknown_factor_contributes_zero() {
        let portfolio = Portfolio::from_pairs(&[("AAA", 1.0)]).unwrap();
        let table = betas(&[("AAA", "F", 2.0)]);
        let scenario = StressScenario::new("S").with_shock("Volatility", 50.0);

        let result = run_stress_test(&portfolio, &table, &scenario);
        assert_eq!(result.portfolio_impact, 0.0);
        assert_eq!(
            result.warnings,
            vec![AnalyticsWarning::UnknownFactors {
                factors: vec!["Volatility".to_string()]
            }]
        );
    }

    #[test]
    fn test_non_finite_shocks_and_betas_ignored() {
        let portfolio = Portfolio::from_pairs(&[("AAA", 0.5), ("BBB", 0.5)]).unwrap();
        let table = betas(&[
            ("AAA", "F", 1.0),
            ("AAA", "G", 1.0),
            ("BBB", "F", f64::NAN),
            ("BBB", "G", 1.0),
        ]);
        let scenario = StressScenario::new("Broken")
            .with_shock("F", -10.0)
            .with_shock("G", f64::NAN)
            .with_shock("H", f64::INFINITY);

        let result = run_stress_test(&portfolio, &table, &scenario);
        assert_relative_eq!(result.portfolio_impact, -0.05, epsilon = 1e-12);
        assert!(result.asset_impacts.iter().all(|a| a.impact.is_finite()));
        assert!(result.factor_impacts.values().all(|v| v.is_finite()));
        assert_eq!(
            result.warnings,
            vec![
                AnalyticsWarning::NonFiniteShocks {
                    factors: vec!["G".to_string(), "H".to_string()]
                },
                AnalyticsWarning::MissingBetas {
                    tickers: vec![t("BBB")]
                },
            ]
        );
    }

    #[test]
    fn test_weights_are_not_normalized() {
        let portfolio = Portfolio::from_pairs(&[("AAA", 50.0)]).unwrap();
        let table = betas(&[("AAA", "F", 1.0)]);
        let scenario = StressScenario::new("S").with_shock("F", -10.0);
        assert_relative_eq!(compute_stress_impact(&portfolio, &table, &scenario), -5.0);
    }

    #[test]
    fn test_run_and_summarize() {
        let portfolio = Portfolio::from_pairs(&[("SPY", 1.0)]).unwrap();
        let table = betas(&[
            ("SPY", standard::EQUITY_MARKET, 1.0),
            ("SPY", standard::GOLD, 0.0),
        ]);
        let scenarios = vec![standard::equity_crash(), standard::risk_on_rally()];

        let results = run_stress_tests(&portfolio, &table, &scenarios, &AnalyticsConfig::default());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].scenario_name, "Equity Crash");

        let summary = summarize_results(&results).unwrap();
        assert_eq!(summary.scenario_count, 2);
        assert_eq!(summary.worst_scenario, "Equity Crash");
        assert_relative_eq!(summary.worst_impact, -0.2, epsilon = 1e-12);
        assert_eq!(summary.best_scenario, "Risk-On Rally");
        assert_relative_eq!(summary.average_impact, (-0.2 + 0.15) / 2.0, epsilon = 1e-12);

        assert!(summarize_results(&[]).is_none());
    }
}
