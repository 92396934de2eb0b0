//! Simple periodic returns from aligned price tables.
//!
//! Two alignment policies live here:
//!
//! - **Common dates** ([`ReturnsTable::from_prices`], [`compute_returns`]):
//!   every retained ticker must have a return on every retained date. Used
//!   for portfolio-wide statistics.
//! - **Pairwise** ([`column_returns`] + [`align_on_dates`]): each series keeps
//!   every return it has, and two series are joined on their shared dates.
//!   Used for asset/factor regressions.
//!
//! A return at date `t` is `price[t] / price[t-1] - 1` where `t-1` is the
//! previous row of the table. It is defined only when both prices exist.

use std::collections::BTreeMap;

use meridian_config::AnalyticsConfig;
use meridian_core::{Date, PriceTable, Ticker};
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Aligned simple returns: one row per date, one column per ticker.
///
/// Invariants: dates strictly increasing, every cell finite, every row as
/// wide as the ticker list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnsTable {
    tickers: Vec<Ticker>,
    dates: Vec<Date>,
    rows: Vec<Vec<f64>>,
}

impl ReturnsTable {
    /// Creates a returns table from explicit rows.
    ///
    /// # Errors
    ///
    /// Returns an error if a row has the wrong width, a value is not finite,
    /// the dates are not strictly increasing, or the counts differ.
    pub fn new(tickers: Vec<Ticker>, dates: Vec<Date>, rows: Vec<Vec<f64>>) -> PortfolioResult<Self> {
        if dates.len() != rows.len() {
            return Err(PortfolioError::invalid_portfolio(format!(
                "{} dates for {} return rows",
                dates.len(),
                rows.len()
            )));
        }
        for (date, row) in dates.iter().zip(&rows) {
            if row.len() != tickers.len() {
                return Err(meridian_core::CoreError::RowWidthMismatch {
                    date: date.to_string(),
                    expected: tickers.len(),
                    actual: row.len(),
                }
                .into());
            }
            if row.iter().any(|r| !r.is_finite()) {
                return Err(meridian_math::MathError::non_finite("returns table").into());
            }
        }
        if let Some(pair) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(meridian_core::CoreError::UnorderedDates {
                previous: pair[0].to_string(),
                next: pair[1].to_string(),
            }
            .into());
        }

        Ok(Self {
            tickers,
            dates,
            rows,
        })
    }

    /// Computes common-date returns, keeping whatever survives alignment.
    ///
    /// Columns with no price at all are dropped first; then any date where a
    /// retained ticker lacks a return is dropped. The result may be empty.
    #[must_use]
    pub fn from_prices(prices: &PriceTable) -> Self {
        let prices = prices.drop_empty_columns();
        let tickers = prices.tickers().to_vec();
        let mut dates = Vec::new();
        let mut rows = Vec::new();

        for pair in prices.rows().windows(2) {
            let row: Option<Vec<f64>> = pair[0]
                .prices
                .iter()
                .zip(&pair[1].prices)
                .map(|(prev, curr)| simple_return(*prev, *curr))
                .collect();
            if let Some(row) = row {
                dates.push(pair[1].date);
                rows.push(row);
            }
        }

        Self {
            tickers,
            dates,
            rows,
        }
    }

    /// Tickers in column order.
    #[must_use]
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Return dates in order.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Return rows in date order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of return rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows or no tickers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.tickers.is_empty()
    }

    /// Column position of a ticker.
    #[must_use]
    pub fn ticker_index(&self, ticker: &Ticker) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    /// Returns one column by index.
    #[must_use]
    pub fn column(&self, idx: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[idx]).collect()
    }

    /// Returns every column in ticker order.
    #[must_use]
    pub fn columns(&self) -> Vec<Vec<f64>> {
        (0..self.tickers.len()).map(|i| self.column(i)).collect()
    }

    /// Weighted sum of each row.
    ///
    /// # Errors
    ///
    /// Returns `WeightMismatch` if `weights` is not one per ticker.
    pub fn weighted_returns(&self, weights: &[f64]) -> PortfolioResult<Vec<f64>> {
        if weights.len() != self.tickers.len() {
            return Err(PortfolioError::WeightMismatch {
                expected: self.tickers.len(),
                actual: weights.len(),
            });
        }
        Ok(self
            .rows
            .iter()
            .map(|row| row.iter().zip(weights).map(|(r, w)| r * w).sum())
            .collect())
    }
}

/// Computes common-date returns and refuses a table too short to use.
///
/// # Errors
///
/// Returns `PortfolioError::InsufficientData` if fewer than
/// `config.min_return_rows` rows survive alignment, or if no ticker does.
pub fn compute_returns(prices: &PriceTable, config: &AnalyticsConfig) -> PortfolioResult<ReturnsTable> {
    let returns = ReturnsTable::from_prices(prices);
    let required = config.min_return_rows.max(1);
    let actual = if returns.tickers.is_empty() { 0 } else { returns.len() };
    if actual < required {
        return Err(PortfolioError::insufficient_data(required, actual));
    }
    Ok(returns)
}

/// Returns every defined return of one ticker, keyed by date.
///
/// # Errors
///
/// Returns an error if the ticker is not in the table.
pub fn column_returns(prices: &PriceTable, ticker: &Ticker) -> PortfolioResult<Vec<(Date, f64)>> {
    let column = prices.column(ticker)?;
    let dates = prices.dates();

    Ok(column
        .windows(2)
        .zip(dates.iter().skip(1))
        .filter_map(|(pair, date)| simple_return(pair[0], pair[1]).map(|r| (*date, r)))
        .collect())
}

/// Inner-joins two dated series on their date key.
///
/// Returns the paired values in date order; dates present in only one
/// series are skipped.
#[must_use]
pub fn align_on_dates(left: &[(Date, f64)], right: &[(Date, f64)]) -> (Vec<f64>, Vec<f64>) {
    let right: BTreeMap<Date, f64> = right.iter().copied().collect();
    left.iter()
        .filter_map(|(date, l)| right.get(date).map(|r| (*l, *r)))
        .unzip()
}

fn simple_return(prev: Option<f64>, curr: Option<f64>) -> Option<f64> {
    let r = curr? / prev? - 1.0;
    r.is_finite().then_some(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use meridian_core::PriceRow;

    fn t(s: &str) -> Ticker {
        Ticker::new(s).unwrap()
    }

    fn d(day: u32) -> Date {
        Date::from_ymd(2025, 1, day).unwrap()
    }

    fn table(tickers: &[&str], rows: Vec<(u32, Vec<Option<f64>>)>) -> PriceTable {
        PriceTable::new(
            tickers.iter().map(|s| t(s)).collect(),
            rows.into_iter()
                .map(|(day, prices)| PriceRow {
                    date: d(day),
                    prices,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_simple_returns() {
        let prices = table(
            &["AAA", "BBB"],
            vec![
                (2, vec![Some(100.0), Some(50.0)]),
                (3, vec![Some(110.0), Some(45.0)]),
                (6, vec![Some(99.0), Some(54.0)]),
            ],
        );
        let returns = ReturnsTable::from_prices(&prices);

        assert_eq!(returns.len(), 2);
        assert_eq!(returns.dates(), &[d(3), d(6)]);
        assert_relative_eq!(returns.rows()[0][0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(returns.rows()[0][1], -0.1, epsilon = 1e-12);
        assert_relative_eq!(returns.rows()[1][0], -0.1, epsilon = 1e-12);
        assert_relative_eq!(returns.rows()[1][1], 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_gap_drops_both_adjacent_rows() {
        let prices = table(
            &["AAA", "BBB"],
            vec![
                (2, vec![Some(100.0), Some(50.0)]),
                (3, vec![Some(101.0), None]),
                (6, vec![Some(102.0), Some(51.0)]),
                (7, vec![Some(103.0), Some(52.0)]),
            ],
        );
        let returns = ReturnsTable::from_prices(&prices);
        assert_eq!(returns.dates(), &[d(7)]);
    }

    #[test]
    fn test_empty_column_is_dropped() {
        let prices = table(
            &["AAA", "DEAD"],
            vec![(2, vec![Some(100.0), None]), (3, vec![Some(101.0), None])],
        );
        let returns = ReturnsTable::from_prices(&prices);
        assert_eq!(returns.tickers(), &[t("AAA")]);
        assert_eq!(returns.len(), 1);
    }

    #[test]
    fn test_compute_returns_insufficient() {
        let prices = table(
            &["AAA"],
            vec![(2, vec![Some(100.0)]), (3, vec![Some(101.0)])],
        );
        let err = compute_returns(&prices, &AnalyticsConfig::default()).unwrap_err();
        assert_eq!(err, PortfolioError::insufficient_data(2, 1));

        let err = compute_returns(&PriceTable::empty(), &AnalyticsConfig::default()).unwrap_err();
        assert_eq!(err, PortfolioError::insufficient_data(2, 0));
    }

    #[test]
    fn test_column_returns_and_alignment() {
        let prices = table(
            &["AAA", "FAC"],
            vec![
                (2, vec![Some(100.0), Some(10.0)]),
                (3, vec![Some(102.0), None]),
                (6, vec![Some(104.04), Some(10.5)]),
                (7, vec![Some(102.0), Some(10.0)]),
            ],
        );
        let a = column_returns(&prices, &t("AAA")).unwrap();
        let f = column_returns(&prices, &t("FAC")).unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(f.len(), 1);
        assert_eq!(f[0].0, d(7));

        let (x, y) = align_on_dates(&a, &f);
        assert_eq!(x.len(), 1);
        assert_relative_eq!(y[0], 10.0 / 10.5 - 1.0, epsilon = 1e-12);

        assert!(column_returns(&prices, &t("ZZZ")).is_err());
    }

    #[test]
    fn test_new_validates() {
        let ok = ReturnsTable::new(vec![t("AAA")], vec![d(2), d(3)], vec![vec![0.1], vec![0.2]]);
        assert!(ok.is_ok());

        let bad = ReturnsTable::new(vec![t("AAA")], vec![d(3), d(2)], vec![vec![0.1], vec![0.2]]);
        assert!(bad.is_err());

        let bad = ReturnsTable::new(vec![t("AAA")], vec![d(2)], vec![vec![f64::NAN]]);
        assert!(bad.is_err());

        let bad = ReturnsTable::new(vec![t("AAA")], vec![d(2)], vec![vec![0.1, 0.2]]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_weighted_returns() {
        let r = ReturnsTable::new(
            vec![t("AAA"), t("BBB")],
            vec![d(2)],
            vec![vec![0.01, -0.01]],
        )
        .unwrap();
        let p = r.weighted_returns(&[0.5, 0.5]).unwrap();
        assert_relative_eq!(p[0], 0.0);
        assert!(r.weighted_returns(&[1.0]).is_err());
    }
}
