//! Portfolio struct and core methods.

use std::collections::HashSet;

use meridian_core::Ticker;
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::Position;

/// An ordered set of weighted tickers.
///
/// Invariants (checked on construction):
/// - At least one position.
/// - Tickers are unique.
/// - Weights are finite and non-negative.
/// - Weights have a positive sum, so the portfolio can always be normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PortfolioRepr", into = "PortfolioRepr")]
pub struct Portfolio {
    name: String,
    positions: Vec<Position>,
}

impl Portfolio {
    /// Creates a validated portfolio.
    pub fn new(name: impl Into<String>, positions: Vec<Position>) -> PortfolioResult<Self> {
        let portfolio = Self {
            name: name.into(),
            positions,
        };
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// Creates a portfolio from `(symbol, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if a symbol is not a valid ticker or the weights
    /// break a portfolio invariant.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[(S, f64)]) -> PortfolioResult<Self> {
        let positions = pairs
            .iter()
            .map(|(symbol, weight)| Ok(Position::new(Ticker::new(symbol)?, *weight)))
            .collect::<PortfolioResult<Vec<_>>>()?;
        Self::new("Portfolio", positions)
    }

    /// Creates a new portfolio builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> super::PortfolioBuilder {
        super::PortfolioBuilder::new().name(name)
    }

    /// Portfolio name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positions in construction order.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Tickers in position order.
    #[must_use]
    pub fn tickers(&self) -> Vec<Ticker> {
        self.positions.iter().map(|p| p.ticker.clone()).collect()
    }

    /// Raw weights in position order.
    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        self.positions.iter().map(|p| p.weight).collect()
    }

    /// Returns the number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false for a validated portfolio.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Sum of raw weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.positions.iter().map(|p| p.weight).sum()
    }

    /// Returns true if the weights sum to one within `tolerance`.
    #[must_use]
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.total_weight() - 1.0).abs() <= tolerance
    }

    /// Weight of a ticker, if held.
    #[must_use]
    pub fn weight_of(&self, ticker: &Ticker) -> Option<f64> {
        self.positions
            .iter()
            .find(|p| &p.ticker == ticker)
            .map(|p| p.weight)
    }

    /// Returns a copy with every weight divided by the weight sum.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.total_weight();
        Self {
            name: self.name.clone(),
            positions: self
                .positions
                .iter()
                .map(|p| Position::new(p.ticker.clone(), p.weight / total))
                .collect(),
        }
    }

    /// Returns the positions whose tickers are in `tickers`, keeping order.
    ///
    /// Weights are left as they are. Returns `None` when nothing with a
    /// positive weight remains.
    #[must_use]
    pub fn restricted_to(&self, tickers: &[Ticker]) -> Option<Self> {
        let keep: HashSet<&Ticker> = tickers.iter().collect();
        let positions: Vec<Position> = self
            .positions
            .iter()
            .filter(|p| keep.contains(&p.ticker))
            .cloned()
            .collect();

        let restricted = Self {
            name: self.name.clone(),
            positions,
        };
        restricted.validate().ok().map(|()| restricted)
    }

    fn validate(&self) -> PortfolioResult<()> {
        if self.positions.is_empty() {
            return Err(PortfolioError::EmptyPortfolio);
        }

        let mut seen = HashSet::with_capacity(self.positions.len());
        for p in &self.positions {
            if !p.weight.is_finite() || p.weight < 0.0 {
                return Err(PortfolioError::invalid_weight(p.ticker.as_str(), p.weight));
            }
            if !seen.insert(&p.ticker) {
                return Err(PortfolioError::invalid_portfolio(format!(
                    "duplicate ticker {}",
                    p.ticker
                )));
            }
        }

        if self.total_weight() <= 0.0 {
            return Err(PortfolioError::invalid_portfolio(
                "weights must have a positive sum",
            ));
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct PortfolioRepr {
    name: String,
    positions: Vec<Position>,
}

impl TryFrom<PortfolioRepr> for Portfolio {
    type Error = PortfolioError;

    fn try_from(repr: PortfolioRepr) -> PortfolioResult<Self> {
        Self::new(repr.name, repr.positions)
    }
}

impl From<Portfolio> for PortfolioRepr {
    fn from(p: Portfolio) -> Self {
        Self {
            name: p.name,
            positions: p.positions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn t(s: &str) -> Ticker {
        Ticker::new(s).unwrap()
    }

    #[test]
    fn test_from_pairs() {
        let p = Portfolio::from_pairs(&[("SPY", 60.0), ("AGG", 40.0)]).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.tickers(), vec![t("SPY"), t("AGG")]);
        assert_relative_eq!(p.total_weight(), 100.0);
        assert!(!p.is_normalized(1e-6));
    }

    #[test]
    fn test_normalized() {
        let p = Portfolio::from_pairs(&[("SPY", 60.0), ("AGG", 40.0)]).unwrap();
        let n = p.normalized();
        assert_relative_eq!(n.weights()[0], 0.6);
        assert_relative_eq!(n.weights()[1], 0.4);
        assert!(n.is_normalized(1e-12));
    }

    #[test]
    fn test_rejects_invalid_weights() {
        assert!(matches!(
            Portfolio::from_pairs(&[("SPY", -0.1)]),
            Err(PortfolioError::InvalidWeight { .. })
        ));
        assert!(matches!(
            Portfolio::from_pairs(&[("SPY", f64::NAN)]),
            Err(PortfolioError::InvalidWeight { .. })
        ));
        assert!(matches!(
            Portfolio::from_pairs(&[("SPY", 0.0)]),
            Err(PortfolioError::InvalidPortfolio { .. })
        ));
        assert!(matches!(
            Portfolio::from_pairs::<&str>(&[]),
            Err(PortfolioError::EmptyPortfolio)
        ));
    }

    #[test]
    fn test_rejects_bad_ticker_and_duplicates() {
        let err = Portfolio::from_pairs(&[("SP Y", 1.0)]).unwrap_err();
        assert!(matches!(err, PortfolioError::Core(_)));

        let err = Portfolio::from_pairs(&[("SPY", 0.5), ("SPY", 0.5)]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_restricted_to() {
        let p = Portfolio::from_pairs(&[("SPY", 0.5), ("AGG", 0.3), ("GLD", 0.2)]).unwrap();

        let r = p.restricted_to(&[t("GLD"), t("SPY")]).unwrap();
        assert_eq!(r.tickers(), vec![t("SPY"), t("GLD")]);
        assert_relative_eq!(r.total_weight(), 0.7);

        assert!(p.restricted_to(&[t("QQQ")]).is_none());
    }

    #[test]
    fn test_weight_of() {
        let p = Portfolio::from_pairs(&[("SPY", 0.5), ("AGG", 0.5)]).unwrap();
        assert_eq!(p.weight_of(&t("AGG")), Some(0.5));
        assert_eq!(p.weight_of(&t("QQQ")), None);
    }

    #[test]
    fn test_serde_validates() {
        let p = Portfolio::from_pairs(&[("SPY", 1.0)]).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: Portfolio = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);

        let bad = r#"{"name":"x","positions":[{"ticker":"SPY","weight":-1.0}]}"#;
        assert!(serde_json::from_str::<Portfolio>(bad).is_err());
    }
}
