//! Domain primitives.

mod date;
mod lookback;
mod ticker;

pub use date::Date;
pub use lookback::Lookback;
pub use ticker::Ticker;
