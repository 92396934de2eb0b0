//! # Meridian Portfolio
//!
//! Portfolio risk and factor analytics over historical prices.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Explicit alignment**: Series are joined by date, never by position
//! - **No silent NaN**: Degenerate inputs produce flagged zero values, and
//!   missing data produces a distinguishable no-data outcome
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Features
//!
//! - **Returns**: Simple returns on common or pairwise date sets
//! - **Risk**: Annualized return, volatility, Sharpe ratio
//! - **Contribution**: Euler decomposition of volatility by asset
//! - **Factor Betas**: Least squares sensitivity to named factors
//! - **Backtests**: Growth-of-one curves, total return, drawdown
//! - **Stress Testing**: Linear projection of factor shocks
//! - **Classification**: Keyword-based asset-class labels
//!
//! ## Quick Start
//!
//! ```rust
//! use meridian_core::{Date, PriceTable, Ticker};
//! use meridian_portfolio::prelude::*;
//!
//! let start = Date::from_ymd(2025, 1, 6).unwrap();
//! let prices = |growth: f64| -> Vec<(Date, f64)> {
//!     (0..10).map(|i| (start.add_days(i), 100.0 * growth.powi(i as i32))).collect()
//! };
//! let table = PriceTable::from_series(vec![
//!     (Ticker::new("AAA").unwrap(), prices(1.01)),
//!     (Ticker::new("BBB").unwrap(), prices(0.995)),
//! ]);
//!
//! let portfolio = PortfolioBuilder::new()
//!     .add_position("AAA", 60.0)
//!     .add_position("BBB", 40.0)
//!     .build()
//!     .unwrap();
//!
//! let outcome = run_backtest(&portfolio, &table, &AnalyticsConfig::default()).unwrap();
//! let result = outcome.result().unwrap();
//! assert_eq!(result.cumulative_returns.len(), 9);
//! assert!(result.total_return > 0.0);
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Risk statistics, factor betas, parallel helpers
//! - [`backtest`] - Backtest engine and no-data outcomes
//! - [`bucketing`] - Asset-class classification
//! - [`contribution`] - Euler risk contribution
//! - [`portfolio`] - Portfolio and builder types
//! - [`returns`] - Returns tables and date alignment
//! - [`stress`] - Stress scenarios and impact
//! - [`types`] - Positions and warnings
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel processing for large universes

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

// Module declarations
pub mod analytics;
pub mod backtest;
pub mod bucketing;
pub mod contribution;
pub mod error;
pub mod portfolio;
pub mod returns;
pub mod stress;
pub mod types;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

// Re-export main types
pub use types::{AnalyticsWarning, Position};

// Re-export portfolio types
pub use portfolio::{Portfolio, PortfolioBuilder};

// Re-export returns
pub use returns::{align_on_dates, column_returns, compute_returns, ReturnsTable};

// Re-export analytics types and functions
pub use analytics::{
    // Factor betas
    compute_factor_betas,
    // Risk
    compute_risk,
    // Parallel utilities
    maybe_parallel_map,
    FactorBetaReport,
    FactorBetaTable,
    FactorFit,
    OmittedPair,
    RiskResult,
};

// Re-export contribution types
pub use contribution::{euler_contributions, RiskContribution};

// Re-export backtest types and functions
pub use backtest::{run_backtest, BacktestOutcome, BacktestResult, NoDataReason};

// Re-export bucketing types and functions
pub use bucketing::{classify_asset, classify_portfolio, AssetClass, AssetClassDistribution};

// Re-export stress testing types and functions
pub use stress::{
    best_case, compute_stress_impact, run_stress_test, run_stress_tests, standard,
    summarize_results, worst_case, AssetImpact, StressResult, StressScenario, StressSummary,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::{compute_factor_betas, compute_risk, FactorBetaTable, RiskResult};
    pub use crate::backtest::{run_backtest, BacktestOutcome, BacktestResult, NoDataReason};
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::portfolio::{Portfolio, PortfolioBuilder};
    pub use crate::returns::{compute_returns, ReturnsTable};
    pub use crate::stress::{compute_stress_impact, run_stress_test, StressScenario};
    pub use crate::types::{AnalyticsWarning, Position};
    pub use meridian_config::{AnalyticsConfig, FactorSet};
}
