//! # Meridian Core
//!
//! Core types shared by every Meridian crate.
//!
//! This crate provides the foundational building blocks for portfolio analytics:
//!
//! - **Types**: `Date`, `Ticker`, `Lookback`
//! - **Price tables**: date-indexed, explicitly aligned closing prices
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes prevent mixing tickers with free-form strings
//! - **Explicit Alignment**: Tables are joined by date key, never by position
//! - **No I/O**: Fetching prices is the job of a `PriceSource` implementation
//!
//! ## Example
//!
//! ```rust
//! use meridian_core::prelude::*;
//!
//! let spy = Ticker::new("SPY").unwrap();
//! let d1 = Date::from_ymd(2025, 1, 2).unwrap();
//! let d2 = Date::from_ymd(2025, 1, 3).unwrap();
//!
//! let table = PriceTable::from_series(vec![(spy.clone(), vec![(d1, 100.0), (d2, 101.0)])]);
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.price(d2, &spy), Some(101.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod table;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::table::{PriceRow, PriceTable};
    pub use crate::types::{Date, Lookback, Ticker};
}

pub use error::{CoreError, CoreResult};
pub use table::{PriceRow, PriceTable};
pub use types::{Date, Lookback, Ticker};
