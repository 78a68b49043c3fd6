use chrono::{Days, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Trailing window of history requested per symbol, written as `6M`, `1Y`...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Days(u32),
    Weeks(u32),
    Months(u32),
    Years(u32),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid period '{0}', expected a count and one of D, W, M, Y (e.g. 6M)")]
pub struct InvalidPeriod(pub String);

impl Period {
    /// Inclusive date range covering the period and ending on `to`.
    pub fn range_ending(&self, to: NaiveDate) -> (NaiveDate, NaiveDate) {
        let from = match *self {
            Period::Days(n) => to.checked_sub_days(Days::new(n as u64)),
            Period::Weeks(n) => to.checked_sub_days(Days::new(n as u64 * 7)),
            Period::Months(n) => to.checked_sub_months(Months::new(n)),
            Period::Years(n) => to.checked_sub_months(Months::new(n.saturating_mul(12))),
        };
        (from.unwrap_or(NaiveDate::MIN), to)
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::Months(6)
    }
}

impl FromStr for Period {
    type Err = InvalidPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || InvalidPeriod(s.to_string());

        let unit = trimmed.chars().last().ok_or_else(invalid)?;
        let count: u32 = trimmed[..trimmed.len() - unit.len_utf8()]
            .parse()
            .map_err(|_| invalid())?;
        if count == 0 {
            return Err(invalid());
        }

        match unit.to_ascii_uppercase() {
            'D' => Ok(Period::Days(count)),
            'W' => Ok(Period::Weeks(count)),
            'M' => Ok(Period::Months(count)),
            'Y' => Ok(Period::Years(count)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Period::Days(n) => write!(f, "{}D", n),
            Period::Weeks(n) => write!(f, "{}W", n),
            Period::Months(n) => write!(f, "{}M", n),
            Period::Years(n) => write!(f, "{}Y", n),
        }
    }
}
