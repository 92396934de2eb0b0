//! Portfolio-level analytics.
//!
//! This module provides:
//! - Annualized return, volatility and Sharpe ratio ([`compute_risk`])
//! - Factor betas by pairwise least squares ([`compute_factor_betas`])
//! - Config-driven parallel iteration helpers
//!
//! All functions are pure - they take returns or prices and configuration as
//! input and return computed results. No caching, no I/O, no side effects.

mod factors;
mod parallel;
mod risk;

pub use factors::*;
pub use parallel::*;
pub use risk::*;
