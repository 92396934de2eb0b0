//! Numeric and data-sufficiency settings for the analytics functions.

use serde::{Deserialize, Serialize};

use crate::error::{Validate, ValidationError};

/// Settings passed explicitly into every analytics computation.
///
/// Controls annualization, data-sufficiency thresholds and parallelism.
/// Every field has a serde default so partial TOML tables are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Trading days per year used to annualize daily statistics.
    pub trading_days_per_year: f64,

    /// Annual risk-free rate subtracted from the return in the Sharpe ratio.
    /// Zero by default, i.e. Sharpe is return over volatility.
    pub risk_free_rate: f64,

    /// Return rows below which a risk result is flagged as short history.
    pub min_reliable_observations: usize,

    /// Aligned return rows below which a computation is refused.
    pub min_return_rows: usize,

    /// Overlapping observations required to fit one asset/factor beta.
    pub min_regression_observations: usize,

    /// Tolerance for treating a weight vector as summing to one.
    pub weight_tolerance: f64,

    /// Enable parallel processing (requires the 'parallel' feature).
    pub parallel: bool,

    /// Batch size from which assets or scenarios are spread over rayon.
    pub parallel_threshold: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: 252.0,
            risk_free_rate: 0.0,
            min_reliable_observations: 252,
            min_return_rows: 2,
            min_regression_observations: 2,
            weight_tolerance: 1e-6,
            parallel: true,
            parallel_threshold: 64,
        }
    }
}

impl AnalyticsConfig {
    /// Same as [`AnalyticsConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with rayon switched off, for reproducible single-thread runs.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the annualization factor.
    #[must_use]
    pub fn with_trading_days(mut self, days: f64) -> Self {
        self.trading_days_per_year = days;
        self
    }

    /// Sets the annual risk-free rate used by the Sharpe ratio.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the short-history threshold.
    #[must_use]
    pub fn with_min_reliable_observations(mut self, n: usize) -> Self {
        self.min_reliable_observations = n;
        self
    }

    /// Sets the minimum overlapping observations for a beta.
    #[must_use]
    pub fn with_min_regression_observations(mut self, n: usize) -> Self {
        self.min_regression_observations = n;
        self
    }

    /// Switches rayon fan-out on or off.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the batch size that triggers fan-out.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing is requested for the given count.
    ///
    /// Whether rayon is actually compiled in is decided by the caller's
    /// `parallel` feature.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        self.parallel && count >= self.parallel_threshold
    }
}

impl Validate for AnalyticsConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.trading_days_per_year.is_finite() && self.trading_days_per_year > 0.0) {
            errors.push(ValidationError::new(
                "trading_days_per_year",
                "must be a positive number",
            ));
        }
        if !self.risk_free_rate.is_finite() {
            errors.push(ValidationError::new("risk_free_rate", "must be finite"));
        }
        if self.min_return_rows < 2 {
            errors.push(ValidationError::new(
                "min_return_rows",
                "sample covariance needs at least 2 rows",
            ));
        }
        if self.min_regression_observations < 2 {
            errors.push(ValidationError::new(
                "min_regression_observations",
                "a regression line needs at least 2 points",
            ));
        }
        if !(self.weight_tolerance.is_finite() && self.weight_tolerance >= 0.0) {
            errors.push(ValidationError::new(
                "weight_tolerance",
                "must be a non-negative number",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.trading_days_per_year, 252.0);
        assert_eq!(config.risk_free_rate, 0.0);
        assert_eq!(config.min_reliable_observations, 252);
        assert_eq!(config.min_return_rows, 2);
        assert!(config.is_valid());
    }

    #[test]
    fn test_builder_pattern() {
        let config = AnalyticsConfig::new()
            .with_trading_days(260.0)
            .with_risk_free_rate(0.02)
            .with_min_reliable_observations(60)
            .with_parallel(false)
            .with_threshold(10);

        assert_eq!(config.trading_days_per_year, 260.0);
        assert_eq!(config.risk_free_rate, 0.02);
        assert_eq!(config.min_reliable_observations, 60);
        assert!(!config.parallel);
        assert_eq!(config.parallel_threshold, 10);
    }

    #[test]
    fn test_should_parallelize() {
        let config = AnalyticsConfig::new().with_threshold(100);
        assert!(!config.should_parallelize(50));
        assert!(config.should_parallelize(100));
        assert!(!AnalyticsConfig::sequential().should_parallelize(10_000));
    }

    #[test]
    fn test_validation() {
        let mut config = AnalyticsConfig::default().with_trading_days(0.0);
        config.min_return_rows = 1;
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "trading_days_per_year");
    }

    #[test]
    fn test_serde_partial() {
        let config: AnalyticsConfig = serde_json::from_str(r#"{"risk_free_rate": 0.03}"#).unwrap();
        assert_eq!(config.risk_free_rate, 0.03);
        assert_eq!(config.trading_days_per_year, 252.0);
    }
}
