//! Keyword-based asset-class classification.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use meridian_core::Ticker;
use serde::{Deserialize, Serialize};

use crate::Portfolio;

/// Broad asset class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// Stocks and equity funds.
    Equity,
    /// Bonds and fixed income funds.
    Bond,
    /// REITs and property funds.
    RealEstate,
    /// Commodities and precious metals.
    Commodity,
    /// Money market and T-bill funds.
    Cash,
    /// No keyword matched.
    Unclassified,
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Equity => "Equity",
            Self::Bond => "Bond",
            Self::RealEstate => "Real Estate",
            Self::Commodity => "Commodity",
            Self::Cash => "Cash",
            Self::Unclassified => "Unclassified",
        };
        write!(f, "{s}")
    }
}

// Checked in order; the first class with a matching keyword wins.
// Cash precedes Bond so "Treasury Bill" is not read as a bond.
const RULES: &[(AssetClass, &[&str])] = &[
    (
        AssetClass::Cash,
        &["money market", "treasury bill", "t-bill", "cash", "0-3 month"],
    ),
    (
        AssetClass::RealEstate,
        &["reit", "real estate", "property", "properties"],
    ),
    (
        AssetClass::Bond,
        &[
            "bond",
            "treasury",
            "fixed income",
            "aggregate",
            "municipal",
            "tips",
            "credit",
            "high yield",
            "debt",
        ],
    ),
    (
        AssetClass::Commodity,
        &[
            "gold", "silver", "commodity", "commodities", "oil", "metals", "platinum",
        ],
    ),
    (
        AssetClass::Equity,
        &[
            "equity",
            "stock",
            "s&p",
            "nasdaq",
            "dow jones",
            "russell",
            "msci",
            "total market",
            "large cap",
            "mid cap",
            "small cap",
            "growth",
            "value",
            "dividend",
            "shares",
        ],
    ),
];

/// Classifies an asset by case-insensitive keyword matching on its name.
///
/// Keywords match whole words, so "Goldman Sachs" is not a commodity.
#[must_use]
pub fn classify_asset(name: &str) -> AssetClass {
    let lower = name.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| contains_word(&lower, k)))
        .map_or(AssetClass::Unclassified, |(class, _)| *class)
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    let is_word = |c: char| c.is_alphanumeric();
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(is_word) && !after.is_some_and(is_word)
    })
}

/// Positions that fell into one asset class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassBucket {
    /// Number of positions.
    pub count: usize,
    /// Share of the portfolio's total weight (0-100).
    pub weight_pct: f64,
    /// Tickers in portfolio order.
    pub tickers: Vec<Ticker>,
}

/// Portfolio weight by asset class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetClassDistribution {
    /// Buckets by class, including [`AssetClass::Unclassified`] when used.
    pub by_class: BTreeMap<AssetClass, ClassBucket>,
}

impl AssetClassDistribution {
    /// Weight percentage of one class, 0 if absent.
    #[must_use]
    pub fn weight_pct(&self, class: AssetClass) -> f64 {
        self.by_class.get(&class).map_or(0.0, |b| b.weight_pct)
    }

    /// Tickers no keyword matched.
    #[must_use]
    pub fn unclassified(&self) -> &[Ticker] {
        self.by_class
            .get(&AssetClass::Unclassified)
            .map(|b| b.tickers.as_slice())
            .unwrap_or(&[])
    }
}

/// Groups a portfolio's weight by the asset class of each position's name.
///
/// Positions without an entry in `names` are unclassified.
#[must_use]
pub fn classify_portfolio(
    portfolio: &Portfolio,
    names: &HashMap<Ticker, String>,
) -> AssetClassDistribution {
    let total = portfolio.total_weight();
    let mut by_class: BTreeMap<AssetClass, ClassBucket> = BTreeMap::new();

    for position in portfolio.positions() {
        let class = names
            .get(&position.ticker)
            .map_or(AssetClass::Unclassified, |n| classify_asset(n));
        let bucket = by_class.entry(class).or_default();
        bucket.count += 1;
        bucket.weight_pct += position.weight / total * 100.0;
        bucket.tickers.push(position.ticker.clone());
    }

    AssetClassDistribution { by_class }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_classify_asset() {
        assert_eq!(classify_asset("SPDR S&P 500 ETF Trust"), AssetClass::Equity);
        assert_eq!(classify_asset("Vanguard Total Stock Market"), AssetClass::Equity);
        assert_eq!(classify_asset("iShares 20+ Year Treasury Bond ETF"), AssetClass::Bond);
        assert_eq!(classify_asset("Vanguard Real Estate ETF"), AssetClass::RealEstate);
        assert_eq!(classify_asset("SPDR Gold Shares"), AssetClass::Commodity);
        assert_eq!(classify_asset("SPDR Bloomberg 1-3 Month T-Bill ETF"), AssetClass::Cash);
        assert_eq!(classify_asset("ARK Innovation"), AssetClass::Unclassified);
    }

    #[test]
    fn test_whole_words_only() {
        assert_eq!(classify_asset("Goldman Sachs Physical"), AssetClass::Unclassified);
        assert_eq!(classify_asset("BOND"), AssetClass::Bond);
        assert_eq!(classify_asset("Bondholder Trust"), AssetClass::Unclassified);
    }

    #[test]
    fn test_classify_portfolio() {
        let portfolio = Portfolio::from_pairs(&[("SPY", 60.0), ("AGG", 30.0), ("XYZ", 10.0)]).unwrap();
        let names: HashMap<Ticker, String> = [
            ("SPY", "SPDR S&P 500 ETF Trust"),
            ("AGG", "iShares Core U.S. Aggregate Bond ETF"),
        ]
        .into_iter()
        .map(|(t, n)| (Ticker::new(t).unwrap(), n.to_string()))
        .collect();

        let dist = classify_portfolio(&portfolio, &names);
        assert_relative_eq!(dist.weight_pct(AssetClass::Equity), 60.0);
        assert_relative_eq!(dist.weight_pct(AssetClass::Bond), 30.0);
        assert_relative_eq!(dist.weight_pct(AssetClass::Unclassified), 10.0);
        assert_eq!(dist.unclassified(), &[Ticker::new("XYZ").unwrap()]);
        assert_eq!(dist.weight_pct(AssetClass::Cash), 0.0);
    }
}
