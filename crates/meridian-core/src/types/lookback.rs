//! Lookback windows for price history requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{CoreError, CoreResult};

/// How much history to request, counted back from an end date.
///
/// Parses the compact forms used by most market data vendors:
/// `30d`, `6mo`, `1y`, `5y`, `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Lookback {
    /// A number of calendar days.
    Days(u32),
    /// A number of calendar months.
    Months(u32),
    /// A number of calendar years.
    Years(u32),
    /// All available history.
    Max,
}

impl Lookback {
    /// One calendar year, the usual window for annualized statistics.
    pub const ONE_YEAR: Self = Self::Years(1);

    /// Returns the inclusive first date of the window ending at `end`.
    ///
    /// Returns `None` for [`Lookback::Max`].
    ///
    /// # Errors
    ///
    /// Returns an error if the window reaches past the representable
    /// calendar, e.g. `100000000d`.
    pub fn start_date(&self, end: Date) -> CoreResult<Option<Date>> {
        let start = match *self {
            Self::Days(n) => end.checked_add_days(-i64::from(n))?,
            Self::Months(n) => end.add_months(-self.count(n)?)?,
            Self::Years(n) => end.add_years(-self.count(n)?)?,
            Self::Max => return Ok(None),
        };
        Ok(Some(start))
    }

    fn count(&self, n: u32) -> CoreResult<i32> {
        i32::try_from(n).map_err(|_| CoreError::InvalidLookback {
            input: self.to_string(),
        })
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Self::ONE_YEAR
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(n) => write!(f, "{n}d"),
            Self::Months(n) => write!(f, "{n}mo"),
            Self::Years(n) => write!(f, "{n}y"),
            Self::Max => f.write_str("max"),
        }
    }
}

impl FromStr for Lookback {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();
        if input == "max" {
            return Ok(Self::Max);
        }

        let split = input
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(input.len());
        let (digits, unit) = input.split_at(split);
        let invalid = || CoreError::InvalidLookback {
            input: s.to_string(),
        };

        let n: u32 = digits.parse().map_err(|_| invalid())?;
        if n == 0 {
            return Err(invalid());
        }

        match unit {
            "d" => Ok(Self::Days(n)),
            "mo" => Ok(Self::Months(n)),
            "y" => Ok(Self::Years(n)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Lookback {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Lookback> for String {
    fn from(lookback: Lookback) -> Self {
        lookback.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("30d".parse::<Lookback>().unwrap(), Lookback::Days(30));
        assert_eq!("6mo".parse::<Lookback>().unwrap(), Lookback::Months(6));
        assert_eq!("5Y".parse::<Lookback>().unwrap(), Lookback::Years(5));
        assert_eq!("max".parse::<Lookback>().unwrap(), Lookback::Max);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for s in ["", "y", "0y", "12w", "1.5y", "-1y"] {
            assert!(s.parse::<Lookback>().is_err(), "{s} should be rejected");
        }
    }

    #[test]
    fn test_display_round_trip() {
        for lb in [Lookback::Days(10), Lookback::Months(3), Lookback::Years(2), Lookback::Max] {
            assert_eq!(lb.to_string().parse::<Lookback>().unwrap(), lb);
        }
    }

    #[test]
    fn test_start_date() {
        let end = Date::from_ymd(2025, 3, 31).unwrap();
        assert_eq!(
            Lookback::Months(1).start_date(end).unwrap(),
            Some(Date::from_ymd(2025, 2, 28).unwrap())
        );
        assert_eq!(
            Lookback::Days(31).start_date(end).unwrap(),
            Some(Date::from_ymd(2025, 2, 28).unwrap())
        );
        assert_eq!(Lookback::Max.start_date(end).unwrap(), None);
    }

    #[test]
    fn test_start_date_out_of_range() {
        let end = Date::from_ymd(2025, 3, 31).unwrap();
        for s in ["100000000d", "2147483648mo", "2147483648y", "4000000y"] {
            let lookback: Lookback = s.parse().unwrap();
            assert!(lookback.start_date(end).is_err(), "{s} should not resolve");
        }
    }
}
