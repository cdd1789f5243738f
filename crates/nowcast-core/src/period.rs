use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::NowcastError;
use crate::time_value::days_between;
use crate::NowcastResult;

/// The analysis window. All values are projected to `end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl AnalysisPeriod {
    /// Build a period, rejecting zero-length and inverted windows.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> NowcastResult<Self> {
        let period = Self {
            start_date,
            end_date,
        };
        period.validate()?;
        Ok(period)
    }

    pub fn validate(&self) -> NowcastResult<()> {
        if self.start_date >= self.end_date {
            return Err(NowcastError::InvalidPeriod {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Exact days from start to end; always positive for a valid period.
    pub fn elapsed_days(&self) -> NowcastResult<i64> {
        self.validate()?;
        Ok(days_between(self.start_date, self.end_date))
    }

    /// Whole calendar months in the period, rounded up when the end day falls
    /// later in the month than the start day. At least one.
    ///
    /// Used for labelling only; valuation runs on day counts.
    pub fn horizon_months(&self) -> u32 {
        let mut months = calendar_month_diff(self.start_date, self.end_date);
        if self.end_date.day() > self.start_date.day() {
            months += 1;
        }
        months.max(1) as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// 1-based month of `date` counted from the month of `start`, floored at 1.
pub fn month_index(start: NaiveDate, date: NaiveDate) -> u32 {
    (calendar_month_diff(start, date) + 1).max(1) as u32
}

/// Human label for a 1-based month index, e.g. "Year 2, Month 3".
pub fn month_label(month: u32) -> String {
    if month == 0 {
        return "Invalid month".to_string();
    }
    let years = (month - 1) / 12;
    let months = (month - 1) % 12 + 1;
    if years == 0 {
        format!("Month {months}")
    } else {
        format!("Year {}, Month {months}", years + 1)
    }
}

fn calendar_month_diff(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_rejects_inverted_and_empty_periods() {
        assert!(matches!(
            AnalysisPeriod::new(d(2024, 6, 1), d(2024, 6, 1)),
            Err(NowcastError::InvalidPeriod { .. })
        ));
        assert!(matches!(
            AnalysisPeriod::new(d(2024, 6, 2), d(2024, 6, 1)),
            Err(NowcastError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_elapsed_days() {
        let p = AnalysisPeriod::new(d(2024, 1, 1), d(2025, 1, 1)).unwrap();
        assert_eq!(p.elapsed_days().unwrap(), 366);
    }

    #[test]
    fn test_horizon_months() {
        let p = AnalysisPeriod::new(d(2024, 1, 1), d(2025, 1, 1)).unwrap();
        assert_eq!(p.horizon_months(), 12);
        let p = AnalysisPeriod::new(d(2024, 1, 15), d(2024, 3, 20)).unwrap();
        assert_eq!(p.horizon_months(), 3);
        let p = AnalysisPeriod::new(d(2024, 1, 15), d(2024, 1, 16)).unwrap();
        assert_eq!(p.horizon_months(), 1);
    }

    #[test]
    fn test_month_index_disagrees_with_day_count() {
        // 28th to the 2nd of the next month is one index apart but only 5 days
        assert_eq!(month_index(d(2024, 1, 28), d(2024, 2, 2)), 2);
        assert_eq!(month_index(d(2024, 1, 2), d(2024, 1, 28)), 1);
        assert_eq!(month_index(d(2024, 3, 1), d(2024, 1, 1)), 1);
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(3), "Month 3");
        assert_eq!(month_label(14), "Year 2, Month 2");
        assert_eq!(month_label(25), "Year 3, Month 1");
        assert_eq!(month_label(0), "Invalid month");
    }
}
