//! Portfolio bucketing and classification.
//!
//! Best-effort grouping of positions into broad asset classes from their
//! descriptive names. This is a labelling heuristic for display and is not
//! used by any numeric computation.
//!
//! # Example
//!
//! ```rust
//! use meridian_portfolio::bucketing::{classify_asset, AssetClass};
//!
//! assert_eq!(classify_asset("iShares Core U.S. Aggregate Bond ETF"), AssetClass::Bond);
//! assert_eq!(classify_asset("Something Else Entirely"), AssetClass::Unclassified);
//! ```

mod asset_class;

pub use asset_class::*;
