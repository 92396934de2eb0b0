//! Error types for portfolio analytics.
//!
//! Configuration-class failures (bad tickers, bad weights, bad config) are
//! raised before any numeric work begins. `InsufficientData` is the only
//! error a well-formed request can produce; the backtest converts it into a
//! [`NoDataReason`](crate::backtest::NoDataReason) instead of raising.

use meridian_config::ConfigError;
use meridian_core::CoreError;
use meridian_math::MathError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Invalid portfolio configuration.
    #[error("Invalid portfolio: {reason}")]
    InvalidPortfolio {
        /// The reason the portfolio is invalid.
        reason: String,
    },

    /// Invalid weight (negative or non-finite).
    #[error("Invalid weight for '{ticker}': {value}")]
    InvalidWeight {
        /// The ticker the weight belongs to.
        ticker: String,
        /// The invalid weight value.
        value: String,
    },

    /// Weight vector does not line up with the returns table.
    #[error("Weight count mismatch: {expected} tickers, {actual} weights")]
    WeightMismatch {
        /// Number of tickers in the returns table.
        expected: usize,
        /// Number of weights supplied.
        actual: usize,
    },

    /// Empty portfolio.
    #[error("Portfolio has no positions")]
    EmptyPortfolio,

    /// Not enough aligned observations to compute a statistic.
    #[error("Insufficient data: need at least {required} aligned return rows, got {actual}")]
    InsufficientData {
        /// Minimum rows needed.
        required: usize,
        /// Rows available.
        actual: usize,
    },

    /// Analytics configuration failed validation.
    #[error("Invalid analytics configuration: {0}")]
    InvalidConfig(String),

    /// Error from core types.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Error from a numeric routine.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl PortfolioError {
    /// Create an invalid portfolio error.
    #[must_use]
    pub fn invalid_portfolio(reason: impl Into<String>) -> Self {
        Self::InvalidPortfolio {
            reason: reason.into(),
        }
    }

    /// Create an invalid weight error.
    #[must_use]
    pub fn invalid_weight(ticker: impl Into<String>, value: f64) -> Self {
        Self::InvalidWeight {
            ticker: ticker.into(),
            value: value.to_string(),
        }
    }

    /// Create an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Returns true for errors raised before numeric work begins.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::InsufficientData { .. } | Self::Math(_))
    }
}

impl From<ConfigError> for PortfolioError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
