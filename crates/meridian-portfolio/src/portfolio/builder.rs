//! Portfolio builder for fluent construction.

use meridian_core::Ticker;

use crate::error::PortfolioResult;
use crate::types::Position;
use crate::Portfolio;

/// Builder for constructing a [`Portfolio`].
///
/// Symbols are parsed at [`build`](Self::build) time so a chain of
/// `add_position` calls never needs intermediate error handling.
///
/// # Example
///
/// ```rust
/// use meridian_portfolio::prelude::*;
///
/// let portfolio = PortfolioBuilder::new()
///     .name("Balanced")
///     .add_position("SPY", 60.0)
///     .add_position("AGG", 40.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(portfolio.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioBuilder {
    name: Option<String>,
    entries: Vec<(String, f64)>,
}

impl PortfolioBuilder {
    /// Creates a new portfolio builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the portfolio name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a position by symbol.
    #[must_use]
    pub fn add_position(mut self, symbol: impl Into<String>, weight: f64) -> Self {
        self.entries.push((symbol.into(), weight));
        self
    }

    /// Adds an already-parsed position.
    #[must_use]
    pub fn add(mut self, position: Position) -> Self {
        self.entries
            .push((position.ticker.as_str().to_string(), position.weight));
        self
    }

    /// Adds multiple positions by symbol.
    #[must_use]
    pub fn add_positions<S: Into<String>>(
        mut self,
        positions: impl IntoIterator<Item = (S, f64)>,
    ) -> Self {
        self.entries
            .extend(positions.into_iter().map(|(s, w)| (s.into(), w)));
        self
    }

    /// Builds the portfolio.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A symbol is not a valid ticker
    /// - A weight is negative or non-finite
    /// - A ticker repeats, or the portfolio is empty or has zero total weight
    pub fn build(self) -> PortfolioResult<Portfolio> {
        let positions = self
            .entries
            .into_iter()
            .map(|(symbol, weight)| Ok(Position::new(Ticker::new(symbol)?, weight)))
            .collect::<PortfolioResult<Vec<_>>>()?;

        Portfolio::new(self.name.unwrap_or_else(|| "Portfolio".to_string()), positions)
    }
}
