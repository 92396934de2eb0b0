//! Price history source trait.

use async_trait::async_trait;

use crate::error::TraitError;
use meridian_core::{Lookback, PriceTable, Ticker};

/// Provider of aligned closing prices.
///
/// Contract:
/// - The returned table's columns are a subset of `tickers`. A ticker with
///   no retrievable data is silently left out; that alone is never an error.
/// - Rows are one per trading day present in the source, dates strictly
///   increasing (guaranteed by [`PriceTable`]).
/// - Total failure is either an empty table or a [`TraitError`].
/// - Timeouts and retries are the implementation's concern.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    /// Fetches closing prices for `tickers` over `lookback`.
    async fn fetch_prices(
        &self,
        tickers: &[Ticker],
        lookback: Lookback,
    ) -> Result<PriceTable, TraitError>;
}

#[async_trait]
impl<T: PriceSource + ?Sized> PriceSource for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch_prices(
        &self,
        tickers: &[Ticker],
        lookback: Lookback,
    ) -> Result<PriceTable, TraitError> {
        (**self).fetch_prices(tickers, lookback).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::Date;
    use std::sync::Arc;

    struct Fixed;

    #[async_trait]
    impl PriceSource for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch_prices(
            &self,
            tickers: &[Ticker],
            _lookback: Lookback,
        ) -> Result<PriceTable, TraitError> {
            let day = Date::from_ymd(2025, 1, 2)?;
            Ok(PriceTable::from_series(
                tickers
                    .iter()
                    .filter(|t| t.as_str() != "GONE")
                    .map(|t| (t.clone(), vec![(day, 100.0)]))
                    .collect(),
            ))
        }
    }

    #[tokio::test]
    async fn test_arc_forwarding_and_silent_drop() {
        let source: Arc<dyn PriceSource> = Arc::new(Fixed);
        let tickers = Ticker::parse_list(["SPY", "GONE"]).unwrap();

        let table = source.fetch_prices(&tickers, Lookback::ONE_YEAR).await.unwrap();
        assert_eq!(source.name(), "fixed");
        assert_eq!(table.tickers().len(), 1);
        assert_eq!(table.tickers()[0].as_str(), "SPY");
    }
}
