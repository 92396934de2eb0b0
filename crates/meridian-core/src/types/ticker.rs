//! Validated ticker symbols.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Maximum accepted symbol length.
const MAX_TICKER_LEN: usize = 24;

/// A market data symbol such as `SPY`, `^TNX`, `CL=F` or `BRK-B`.
///
/// Symbols are trimmed on construction. Only ASCII alphanumerics and
/// `.`, `-`, `^`, `=`, `_` are accepted; case is preserved.
///
/// # Example
///
/// ```rust
/// use meridian_core::types::Ticker;
///
/// let t = Ticker::new(" ^TNX ").unwrap();
/// assert_eq!(t.as_str(), "^TNX");
/// assert!(Ticker::new("SP Y").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Creates a validated ticker.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTicker` for empty, overlong or
    /// malformed symbols.
    pub fn new(symbol: impl AsRef<str>) -> CoreResult<Self> {
        let raw = symbol.as_ref();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(CoreError::invalid_ticker(raw, "symbol is empty"));
        }
        if trimmed.len() > MAX_TICKER_LEN {
            return Err(CoreError::invalid_ticker(
                raw,
                format!("longer than {MAX_TICKER_LEN} characters"),
            ));
        }
        if let Some(bad) = trimmed.chars().find(|c| !is_symbol_char(*c)) {
            return Err(CoreError::invalid_ticker(
                raw,
                format!("unexpected character '{bad}'"),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Parses a list of symbols, failing on the first malformed one.
    pub fn parse_list<I, S>(symbols: I) -> CoreResult<Vec<Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        symbols.into_iter().map(Self::new).collect()
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=' | '_')
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
