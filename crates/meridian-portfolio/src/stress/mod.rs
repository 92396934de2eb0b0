//! Factor-shock stress testing.
//!
//! This module provides:
//! - Scenario definitions as named sets of factor shocks
//! - Linear impact projection through factor betas
//! - Multi-scenario runs with worst/best/average summaries
//!
//! The projection is first order: no cross-factor interaction and no
//! convexity. An asset's move is `Σ beta × shock`, and the portfolio's is
//! the weighted sum of asset moves.

mod impact;
mod scenarios;

pub use impact::*;
pub use scenarios::*;
