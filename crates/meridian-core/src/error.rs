//! Error types for the Meridian core types.
//!
//! Every variant here is a configuration-class error: it is raised while
//! constructing inputs, before any numeric work begins.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building core domain values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Malformed ticker symbol.
    #[error("Invalid ticker '{ticker}': {reason}")]
    InvalidTicker {
        /// The rejected symbol.
        ticker: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Unparseable lookback window.
    #[error("Invalid lookback '{input}': expected forms like 30d, 6mo, 1y or max")]
    InvalidLookback {
        /// The rejected input.
        input: String,
    },

    /// Dates in a table are not strictly increasing.
    #[error("Dates must be strictly increasing: {previous} followed by {next}")]
    UnorderedDates {
        /// The earlier row's date.
        previous: String,
        /// The offending row's date.
        next: String,
    },

    /// A row does not have one cell per ticker.
    #[error("Row for {date} has {actual} values, expected {expected}")]
    RowWidthMismatch {
        /// Date of the malformed row.
        date: String,
        /// Number of tickers in the table.
        expected: usize,
        /// Number of cells in the row.
        actual: usize,
    },

    /// The same ticker appears twice in a table header.
    #[error("Duplicate ticker in table: {ticker}")]
    DuplicateTicker {
        /// The repeated ticker.
        ticker: String,
    },

    /// A ticker was requested from a table that does not contain it.
    #[error("Ticker not found in table: {ticker}")]
    TickerNotFound {
        /// The missing ticker.
        ticker: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid ticker error.
    #[must_use]
    pub fn invalid_ticker(ticker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTicker {
            ticker: ticker.into(),
            reason: reason.into(),
        }
    }

    /// Creates a ticker-not-found error.
    #[must_use]
    pub fn ticker_not_found(ticker: impl Into<String>) -> Self {
        Self::TickerNotFound {
            ticker: ticker.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_ticker("SP Y", "contains whitespace");
        assert!(err.to_string().contains("SP Y"));
        assert!(err.to_string().contains("whitespace"));

        let err = CoreError::RowWidthMismatch {
            date: "2025-01-02".to_string(),
            expected: 3,
            actual: 2,
        };
        assert!(err.to_string().contains("expected 3"));
    }
}
