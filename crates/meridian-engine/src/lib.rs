//! # Meridian Engine
//!
//! Async orchestration of the Meridian analytics over a [`PriceSource`].
//!
//! This crate provides:
//! - [`AnalyticsEngine`]: backtests, factor betas and stress tests, each
//!   fetching its own prices
//! - [`InMemoryPriceSource`]: a price source over fixed series, for tests and
//!   for callers that already hold clean data
//! - [`EngineError`]: one error type over source, config and analytics failures
//!
//! ## Architecture
//!
//! ```text
//! PriceSource ─> PriceTable ─┬─> run_backtest ─────────> BacktestOutcome
//!                            │
//!                            └─> compute_factor_betas ─> FactorBetaReport
//!                                         │
//!                                         └─> run_stress_tests ─> StressTestReport
//! ```
//!
//! Outcomes are logged with `tracing`. Install a subscriber to see them.
//!
//! [`PriceSource`]: meridian_traits::PriceSource

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod error;
pub mod memory;

pub use engine::{AnalyticsEngine, StressTestReport};
pub use error::{EngineError, EngineResult};
pub use memory::InMemoryPriceSource;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{AnalyticsEngine, StressTestReport};
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::memory::InMemoryPriceSource;
    pub use meridian_config::EngineConfig;
    pub use meridian_core::{Date, Lookback, Ticker};
    pub use meridian_portfolio::{BacktestOutcome, Portfolio, StressScenario};
    pub use meridian_traits::PriceSource;
}
