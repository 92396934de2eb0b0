//! Meridian Configuration Layer
//!
//! This crate holds every tunable of the analytics core. Nothing here is read
//! from the environment: callers build a config in code or load it from TOML,
//! validate it, and pass it explicitly into each computation.
//!
//! # Features
//!
//! - **Analytics Configuration**: annualization factor, risk-free rate,
//!   reliability and regression thresholds, parallelism
//! - **Factor Configuration**: the named benchmark factors used for betas
//!   and stress testing
//! - **Engine Configuration**: default lookback windows plus the above,
//!   loadable from a TOML file
//! - **Validation**: every config implements [`Validate`]
//!
//! # Example
//!
//! ```rust
//! use meridian_config::{EngineConfig, Validate};
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     default_lookback = "2y"
//!
//!     [analytics]
//!     trading_days_per_year = 252
//!
//!     [[factors]]
//!     name = "Equity Market"
//!     ticker = "SPY"
//! "#).unwrap();
//!
//! assert!(config.is_valid());
//! assert_eq!(config.factors.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod analytics;
mod engine;
mod error;
mod factors;

pub use analytics::AnalyticsConfig;
pub use engine::EngineConfig;
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use factors::{FactorDefinition, FactorSet};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::AnalyticsConfig;
    pub use crate::engine::EngineConfig;
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::factors::{FactorDefinition, FactorSet};
}
