//! A single weighted holding.

use meridian_core::Ticker;
use serde::{Deserialize, Serialize};

/// A ticker and its portfolio weight.
///
/// Weights are raw allocations: they may be percentages (60, 40) or
/// fractions (0.6, 0.4). Analytics that need fractions normalize explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Asset ticker.
    pub ticker: Ticker,
    /// Allocation weight.
    pub weight: f64,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(ticker: Ticker, weight: f64) -> Self {
        Self { ticker, weight }
    }
}
