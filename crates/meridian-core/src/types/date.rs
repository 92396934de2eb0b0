//! Calendar date for price series.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A trading date keying one row of a price or returns table.
///
/// Ordered chronologically and serialized as `YYYY-MM-DD`.
///
/// # Example
///
/// ```rust
/// use meridian_core::types::Date;
///
/// let date = Date::from_ymd(2025, 1, 31).unwrap();
/// let later = date.add_months(1).unwrap();
/// assert_eq!(later.to_string(), "2025-02-28");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Builds a date, rejecting impossible days such as February 30.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses `YYYY-MM-DD`, ignoring surrounding whitespace.
    pub fn parse(s: &str) -> CoreResult<Self> {
        s.parse()
    }

    /// Calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month, 1 to 12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Shifts by `days`, which may be negative.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + chrono::Duration::days(days))
    }

    /// Shifts by `days`, failing instead of leaving the supported calendar.
    pub fn checked_add_days(&self, days: i64) -> CoreResult<Self> {
        chrono::Duration::try_days(days)
            .and_then(|d| self.0.checked_add_signed(d))
            .map(Self)
            .ok_or_else(|| CoreError::invalid_date(format!("{self} shifted by {days} days")))
    }

    /// Shifts by whole months, clamping to the last day of a shorter month.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let shift = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.0.checked_add_months(shift)
        } else {
            self.0.checked_sub_months(shift)
        };
        shifted
            .map(Self)
            .ok_or_else(|| CoreError::invalid_date(format!("{self} shifted by {months} months")))
    }

    /// Shifts by whole years. February 29 lands on February 28.
    pub fn add_years(&self, years: i32) -> CoreResult<Self> {
        self.add_months(years.saturating_mul(12))
    }

    /// True on Saturday and Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// First Monday-to-Friday date after this one.
    #[must_use]
    pub fn next_weekday(&self) -> Self {
        let mut next = self.add_days(1);
        while next.is_weekend() {
            next = next.add_days(1);
        }
        next
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| CoreError::invalid_date(format!("'{s}': {e}")))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
