//! In-memory price source.
//!
//! Serves fixed per-ticker series. Useful for testing and for callers that
//! already hold cleaned prices. Data is not persisted.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Bound;

use async_trait::async_trait;
use meridian_core::{Date, Lookback, PriceTable, Ticker};
use meridian_traits::{PriceSource, TraitError};

/// Price source backed by in-memory series.
///
/// Lookback windows are measured back from the source's `as_of` date and
/// include both ends. Tickers without a series are silently left out.
///
/// # Example
///
/// ```rust
/// use meridian_core::{Date, Ticker};
/// use meridian_engine::InMemoryPriceSource;
///
/// let as_of = Date::from_ymd(2025, 1, 10).unwrap();
/// let source = InMemoryPriceSource::new(as_of)
///     .with_series(Ticker::new("SPY").unwrap(), vec![(as_of, 590.0)]);
/// assert_eq!(source.tickers().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryPriceSource {
    name: String,
    as_of: Date,
    series: HashMap<Ticker, BTreeMap<Date, f64>>,
}

impl InMemoryPriceSource {
    /// Creates an empty source that treats `as_of` as today.
    #[must_use]
    pub fn new(as_of: Date) -> Self {
        Self {
            name: "memory".to_string(),
            as_of,
            series: HashMap::new(),
        }
    }

    /// Sets the source name reported in logs.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a series, merging into any existing series for the ticker.
    #[must_use]
    pub fn with_series(mut self, ticker: Ticker, points: Vec<(Date, f64)>) -> Self {
        self.insert_series(ticker, points);
        self
    }

    /// Adds a series in place. Later points win on a repeated date.
    pub fn insert_series(&mut self, ticker: Ticker, points: Vec<(Date, f64)>) {
        self.series.entry(ticker).or_default().extend(points);
    }

    /// The date lookback windows end on.
    #[must_use]
    pub fn as_of(&self) -> Date {
        self.as_of
    }

    /// Tickers with a series, sorted.
    #[must_use]
    pub fn tickers(&self) -> Vec<Ticker> {
        let mut tickers: Vec<Ticker> = self.series.keys().cloned().collect();
        tickers.sort();
        tickers
    }
}

#[async_trait]
impl PriceSource for InMemoryPriceSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_prices(
        &self,
        tickers: &[Ticker],
        lookback: Lookback,
    ) -> Result<PriceTable, TraitError> {
        let start = lookback.start_date(self.as_of)?;
        let mut seen = HashSet::new();

        let series = tickers
            .iter()
            .filter(|t| seen.insert(*t))
            .filter_map(|t| {
                let points = self.series.get(t)?;
                let lower = start.map_or(Bound::Unbounded, Bound::Included);
                let window: Vec<(Date, f64)> = points
                    .range((lower, Bound::Included(self.as_of)))
                    .map(|(d, p)| (*d, *p))
                    .collect();
                Some((t.clone(), window))
            })
            .collect();

        Ok(PriceTable::from_series(series))
    }
}
