//! Monthly period key used to index the KPI matrix.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{KpiError, Result};

/// A calendar month collapsed into a single chronological key.
///
/// Ordering is chronological: by year, then by month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Build a period from a year and a 1-based month.
    ///
    /// # Errors
    ///
    /// Returns [`KpiError::InvalidMonth`] when the pair does not name a real
    /// calendar month (month outside 1–12 or a year chrono cannot represent).
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let date =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(KpiError::InvalidMonth { year, month })?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
        })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// First day of the month.
    pub fn first_day(self) -> NaiveDate {
        // Validated in `new`.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_chronologically() {
        let dec = YearMonth::new(2023, 12).unwrap();
        let jan = YearMonth::new(2024, 1).unwrap();
        let feb = YearMonth::new(2024, 2).unwrap();
        let mut periods = vec![feb, dec, jan];
        periods.sort();
        assert_eq!(periods, vec![dec, jan, feb]);
    }

    #[test]
    fn rejects_out_of_range_month() {
        assert_eq!(
            YearMonth::new(2024, 13),
            Err(KpiError::InvalidMonth {
                year: 2024,
                month: 13
            })
        );
        assert!(YearMonth::new(2024, 0).is_err());
    }

    #[test]
    fn displays_as_iso_month() {
        let period = YearMonth::new(2025, 3).unwrap();
        assert_eq!(period.to_string(), "2025-03");
        assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }
}
