//! Risk contribution analysis.
//!
//! Splits portfolio volatility into per-asset pieces with the Euler
//! decomposition. The pieces always reconcile with the total.
//!
//! # Example
//!
//! ```rust,ignore
//! use meridian_portfolio::contribution::euler_contributions;
//!
//! let parts = euler_contributions(&tickers, &annual_cov, &weights, volatility)?;
//! for c in &parts {
//!     println!("{}: {:.1}% of risk", c.ticker, c.fraction * 100.0);
//! }
//! ```

mod risk;

pub use risk::*;
