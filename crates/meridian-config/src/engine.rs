//! Top-level configuration for the analytics engine.

use serde::{Deserialize, Serialize};
use std::path::Path;

use meridian_core::Lookback;

use crate::analytics::AnalyticsConfig;
use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::factors::FactorSet;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Analytics parameters shared by every computation.
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Benchmark factors for betas and stress tests.
    #[serde(default)]
    pub factors: FactorSet,

    /// Window used by backtests when the caller does not choose one.
    #[serde(default)]
    pub default_lookback: Lookback,

    /// Window used to estimate factor betas.
    #[serde(default)]
    pub factor_lookback: Lookback,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            analytics: AnalyticsConfig::default(),
            factors: FactorSet::standard(),
            default_lookback: Lookback::ONE_YEAR,
            factor_lookback: Lookback::ONE_YEAR,
        }
    }
}

impl EngineConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Sets the analytics parameters.
    #[must_use]
    pub fn with_analytics(mut self, analytics: AnalyticsConfig) -> Self {
        self.analytics = analytics;
        self
    }

    /// Sets the factor set.
    #[must_use]
    pub fn with_factors(mut self, factors: FactorSet) -> Self {
        self.factors = factors;
        self
    }

    /// Sets the factor estimation window.
    #[must_use]
    pub fn with_factor_lookback(mut self, lookback: Lookback) -> Self {
        self.factor_lookback = lookback;
        self
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.analytics.validate();
        errors.extend(self.factors.validate());
        errors
    }
}
