//! # Meridian Traits
//!
//! Interfaces between the analytics core and its environment.
//!
//! The core consumes exactly one collaborator: a [`PriceSource`] that returns
//! aligned closing prices for a set of tickers over a lookback window.
//! Vendor adapters, caches and file loaders live outside the core and
//! implement this trait.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod market_data;

pub use error::TraitError;
pub use market_data::PriceSource;
