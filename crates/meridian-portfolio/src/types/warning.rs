//! Non-fatal annotations attached to analytics results.

use std::fmt;

use meridian_core::Ticker;
use serde::{Deserialize, Serialize};

/// A degenerate input that was handled with a best-effort result.
///
/// Warnings never stop a computation. They mark where a value was clamped,
/// defaulted or computed on less data than the caller might expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalyticsWarning {
    /// Fewer return rows than one statistically reliable year.
    ShortHistory {
        /// Return rows used.
        observations: usize,
        /// Rows needed for a reliable result.
        required: usize,
    },

    /// Portfolio volatility is zero; Sharpe and contributions were set to 0.
    ZeroVolatility,

    /// Weights did not sum to one and were normalized before use.
    WeightsNormalized {
        /// Sum of the weights as supplied.
        original_sum: f64,
    },

    /// Weights did not sum to one and were used as given.
    WeightsNotNormalized {
        /// Sum of the weights as supplied.
        sum: f64,
    },

    /// A factor had no variance against this asset; its beta was set to 0.
    ZeroVarianceFactor {
        /// Asset being regressed.
        asset: Ticker,
        /// Factor name.
        factor: String,
    },

    /// Portfolio tickers with no price data; they were left out.
    MissingTickers {
        /// The absent tickers.
        tickers: Vec<Ticker>,
    },

    /// Assets lacking a beta for a shocked factor; those terms count as 0.
    MissingBetas {
        /// The affected tickers.
        tickers: Vec<Ticker>,
    },

    /// Shocks that were NaN or infinite; they were ignored.
    NonFiniteShocks {
        /// Factors whose shock was ignored.
        factors: Vec<String>,
    },

    /// Shocked factors that no beta was estimated for.
    UnknownFactors {
        /// The unknown factor names.
        factors: Vec<String>,
    },
}

impl fmt::Display for AnalyticsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortHistory {
                observations,
                required,
            } => write!(
                f,
                "only {observations} return observations (less than {required}); statistics may be unreliable"
            ),
            Self::ZeroVolatility => write!(f, "portfolio volatility is zero"),
            Self::WeightsNormalized { original_sum } => {
                write!(f, "weights summed to {original_sum} and were normalized")
            }
            Self::WeightsNotNormalized { sum } => {
                write!(f, "weights sum to {sum}, not 1")
            }
            Self::ZeroVarianceFactor { asset, factor } => {
                write!(f, "factor '{factor}' has no variance against {asset}; beta set to 0")
            }
            Self::MissingTickers { tickers } => {
                write!(f, "no price data for {}", join(tickers))
            }
            Self::MissingBetas { tickers } => {
                write!(f, "missing betas for {}; treated as 0", join(tickers))
            }
            Self::NonFiniteShocks { factors } => {
                write!(f, "non-finite shocks ignored for {}", factors.join(", "))
            }
            Self::UnknownFactors { factors } => {
                write!(f, "no betas for shocked factors {}", factors.join(", "))
            }
        }
    }
}

fn join(tickers: &[Ticker]) -> String {
    tickers
        .iter()
        .map(Ticker::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
