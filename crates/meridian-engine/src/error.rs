//! Engine error types.

use meridian_config::ConfigError;
use meridian_core::CoreError;
use meridian_portfolio::PortfolioError;
use meridian_traits::TraitError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine errors.
///
/// A request that merely lacks data is not an error: backtests report it
/// as [`BacktestOutcome::NoData`](meridian_portfolio::BacktestOutcome::NoData).
#[derive(Error, Debug)]
pub enum EngineError {
    /// The price source failed the whole request.
    #[error("price source error: {0}")]
    Source(#[from] TraitError),

    /// Analytics rejected its inputs.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    /// Engine configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid core value, such as a malformed ticker.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl EngineError {
    /// Returns true for errors raised before any numeric work.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Self::Config(_) | Self::Core(_) => true,
            Self::Portfolio(e) => e.is_configuration_error(),
            Self::Source(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_trait_error() {
        let err: EngineError = TraitError::Timeout.into();
        assert!(err.to_string().contains("timeout"));
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_configuration_classification() {
        let err: EngineError = CoreError::invalid_ticker("", "empty").into();
        assert!(err.is_configuration_error());

        let err: EngineError = PortfolioError::insufficient_data(2, 0).into();
        assert!(!err.is_configuration_error());
    }
}
