//! Core types for portfolio analytics.

mod position;
mod warning;

pub use position::Position;
pub use warning::AnalyticsWarning;
