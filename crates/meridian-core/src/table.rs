//! Date-indexed tables of closing prices.
//!
//! A [`PriceTable`] is the unit of exchange between a price source and the
//! analytics crates. Alignment is explicit: every row is keyed by its date and
//! every cell is addressed by ticker, so two tables are only ever combined
//! through a join on the date key.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Ticker};

/// One trading day of closing prices, one cell per table ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Trading date.
    pub date: Date,
    /// Prices in table ticker order; `None` marks a missing observation.
    pub prices: Vec<Option<f64>>,
}

/// Aligned closing prices for a ticker universe.
///
/// Invariants (checked on construction):
/// - Tickers are unique.
/// - Dates are strictly increasing.
/// - Every row has exactly one cell per ticker.
/// - Stored prices are finite and strictly positive; anything else is
///   stored as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    tickers: Vec<Ticker>,
    rows: Vec<PriceRow>,
}

impl PriceTable {
    /// Creates a table from a ticker header and rows.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate tickers, a row of the wrong width, or
    /// dates that are not strictly increasing.
    pub fn new(tickers: Vec<Ticker>, rows: Vec<PriceRow>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(tickers.len());
        for t in &tickers {
            if !seen.insert(t) {
                return Err(CoreError::DuplicateTicker {
                    ticker: t.to_string(),
                });
            }
        }

        let mut clean = Vec::with_capacity(rows.len());
        let mut previous: Option<Date> = None;
        for row in rows {
            if row.prices.len() != tickers.len() {
                return Err(CoreError::RowWidthMismatch {
                    date: row.date.to_string(),
                    expected: tickers.len(),
                    actual: row.prices.len(),
                });
            }
            if let Some(prev) = previous {
                if row.date <= prev {
                    return Err(CoreError::UnorderedDates {
                        previous: prev.to_string(),
                        next: row.date.to_string(),
                    });
                }
            }
            previous = Some(row.date);
            clean.push(PriceRow {
                date: row.date,
                prices: row.prices.into_iter().map(sanitize).collect(),
            });
        }

        Ok(Self {
            tickers,
            rows: clean,
        })
    }

    /// Creates an empty table (no tickers, no rows).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table by outer-joining per-ticker series on their dates.
    ///
    /// Dates present for some tickers but not others produce missing cells.
    /// Within one series a repeated date keeps the last price. A ticker with
    /// no usable observation is left out of the table entirely, and a ticker
    /// listed twice is merged into one column.
    #[must_use]
    pub fn from_series(series: Vec<(Ticker, Vec<(Date, f64)>)>) -> Self {
        let mut tickers: Vec<Ticker> = Vec::new();
        let mut index: HashMap<Ticker, usize> = HashMap::new();
        let mut cells: BTreeMap<Date, HashMap<usize, f64>> = BTreeMap::new();

        for (ticker, points) in series {
            let usable: Vec<(Date, f64)> = points
                .into_iter()
                .filter(|(_, p)| sanitize(Some(*p)).is_some())
                .collect();
            if usable.is_empty() {
                continue;
            }

            let col = *index.entry(ticker.clone()).or_insert_with(|| {
                tickers.push(ticker);
                tickers.len() - 1
            });
            for (date, price) in usable {
                cells.entry(date).or_default().insert(col, price);
            }
        }

        let width = tickers.len();
        let rows = cells
            .into_iter()
            .map(|(date, values)| PriceRow {
                date,
                prices: (0..width).map(|i| values.get(&i).copied()).collect(),
            })
            .collect();

        Self { tickers, rows }
    }

    /// Returns the ticker header in column order.
    #[must_use]
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Returns the rows in date order.
    #[must_use]
    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    /// Returns the row dates in order.
    #[must_use]
    pub fn dates(&self) -> Vec<Date> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows or no tickers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.tickers.is_empty()
    }

    /// Returns the first date, if any.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.rows.first().map(|r| r.date)
    }

    /// Returns the last date, if any.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.rows.last().map(|r| r.date)
    }

    /// Returns the column index of a ticker.
    #[must_use]
    pub fn ticker_index(&self, ticker: &Ticker) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    /// Returns true if the table has a column for the ticker.
    #[must_use]
    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.ticker_index(ticker).is_some()
    }

    /// Returns one ticker's cells in date order.
    pub fn column(&self, ticker: &Ticker) -> CoreResult<Vec<Option<f64>>> {
        let idx = self
            .ticker_index(ticker)
            .ok_or_else(|| CoreError::ticker_not_found(ticker.as_str()))?;
        Ok(self.rows.iter().map(|r| r.prices[idx]).collect())
    }

    /// Looks up a single price by date and ticker.
    #[must_use]
    pub fn price(&self, date: Date, ticker: &Ticker) -> Option<f64> {
        let col = self.ticker_index(ticker)?;
        let row = self.rows.binary_search_by(|r| r.date.cmp(&date)).ok()?;
        self.rows[row].prices[col]
    }

    /// Returns a table restricted to the given tickers, in the given order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::TickerNotFound` if a requested ticker is absent.
    pub fn select(&self, tickers: &[Ticker]) -> CoreResult<Self> {
        let indices = tickers
            .iter()
            .map(|t| {
                self.ticker_index(t)
                    .ok_or_else(|| CoreError::ticker_not_found(t.as_str()))
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let rows = self
            .rows
            .iter()
            .map(|r| PriceRow {
                date: r.date,
                prices: indices.iter().map(|&i| r.prices[i]).collect(),
            })
            .collect();

        Self::new(tickers.to_vec(), rows)
    }

    /// Returns a copy without columns that have no observation at all.
    #[must_use]
    pub fn drop_empty_columns(&self) -> Self {
        let keep: Vec<usize> = (0..self.tickers.len())
            .filter(|&i| self.rows.iter().any(|r| r.prices[i].is_some()))
            .collect();

        Self {
            tickers: keep.iter().map(|&i| self.tickers[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| PriceRow {
                    date: r.date,
                    prices: keep.iter().map(|&i| r.prices[i]).collect(),
                })
                .collect(),
        }
    }

    /// Returns the rows dated within `[start, end]`; `None` leaves a side open.
    #[must_use]
    pub fn between(&self, start: Option<Date>, end: Option<Date>) -> Self {
        Self {
            tickers: self.tickers.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| start.map_or(true, |s| r.date >= s) && end.map_or(true, |e| r.date <= e))
                .cloned()
                .collect(),
        }
    }
}

fn sanitize(price: Option<f64>) -> Option<f64> {
    price.filter(|p| p.is_finite() && *p > 0.0)
}
