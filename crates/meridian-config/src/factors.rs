//! Named benchmark factors.
//!
//! A factor is identified by a display name (the key used in stress
//! scenarios and beta tables) and the ticker of a fetchable price series
//! that proxies it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use meridian_core::Ticker;

use crate::error::{Validate, ValidationError};

/// A named market factor backed by a price series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactorDefinition {
    /// Display name, e.g. "Equity Market".
    pub name: String,
    /// Proxy series, e.g. `SPY`.
    pub ticker: Ticker,
}

impl FactorDefinition {
    /// Creates a factor definition.
    #[must_use]
    pub fn new(name: impl Into<String>, ticker: Ticker) -> Self {
        Self {
            name: name.into(),
            ticker,
        }
    }
}

/// An ordered set of factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorSet(Vec<FactorDefinition>);

impl FactorSet {
    /// Creates a factor set from definitions, preserving their order.
    #[must_use]
    pub fn new(factors: Vec<FactorDefinition>) -> Self {
        Self(factors)
    }

    /// The standard macro factor set.
    ///
    /// | Name | Proxy |
    /// |------|-------|
    /// | Equity Market | `SPY` |
    /// | Interest Rates | `^TNX` |
    /// | Crude Oil | `CL=F` |
    /// | Gold | `GC=F` |
    /// | US Dollar | `DX-Y.NYB` |
    #[must_use]
    pub fn standard() -> Self {
        let defs = [
            ("Equity Market", "SPY"),
            ("Interest Rates", "^TNX"),
            ("Crude Oil", "CL=F"),
            ("Gold", "GC=F"),
            ("US Dollar", "DX-Y.NYB"),
        ];
        Self(
            defs.iter()
                .filter_map(|(name, sym)| {
                    Ticker::new(sym)
                        .ok()
                        .map(|t| FactorDefinition::new(*name, t))
                })
                .collect(),
        )
    }

    /// Returns the factors in order.
    #[must_use]
    pub fn factors(&self) -> &[FactorDefinition] {
        &self.0
    }

    /// Returns the factor names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|f| f.name.as_str()).collect()
    }

    /// Returns the proxy tickers in order.
    #[must_use]
    pub fn tickers(&self) -> Vec<Ticker> {
        self.0.iter().map(|f| f.ticker.clone()).collect()
    }

    /// Looks up a factor by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FactorDefinition> {
        self.0.iter().find(|f| f.name == name)
    }

    /// Returns the number of factors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no factors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FactorSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl Validate for FactorSet {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut names = HashSet::new();

        for f in &self.0 {
            if f.name.trim().is_empty() {
                errors.push(ValidationError::new("factors.name", "factor name is empty"));
            } else if !names.insert(f.name.as_str()) {
                errors.push(ValidationError::new(
                    "factors.name",
                    format!("duplicate factor '{}'", f.name),
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set() {
        let set = FactorSet::standard();
        assert_eq!(set.len(), 5);
        assert_eq!(set.names()[0], "Equity Market");
        assert_eq!(set.get("Gold").unwrap().ticker.as_str(), "GC=F");
        assert!(set.is_valid());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let spy = Ticker::new("SPY").unwrap();
        let set = FactorSet::new(vec![
            FactorDefinition::new("Equity", spy.clone()),
            FactorDefinition::new("Equity", spy),
        ]);
        assert_eq!(set.validate().len(), 1);
    }

    #[test]
    fn test_serde_rejects_bad_ticker() {
        let json = r#"[{"name": "Equity", "ticker": "S P Y"}]"#;
        assert!(serde_json::from_str::<FactorSet>(json).is_err());
    }
}
