//! Per-month billing breakdown records and month-boundary arithmetic.

use std::fmt;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{ResultUtility, error::UtilityError};

/// Consumption of a single calendar month, bounded by the first day of the
/// month and the first day of the following one.
///
/// Readings and delta stay numeric; `Display` renders the bill line with
/// two decimal places.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBill {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub start_reading: f64,
    pub end_reading: f64,
    pub delta: f64,
}

impl MonthlyBill {
    pub fn new(
        period_start: NaiveDate,
        period_end: NaiveDate,
        start_reading: f64,
        end_reading: f64,
    ) -> Self {
        Self {
            period_start,
            period_end,
            start_reading,
            end_reading,
            delta: end_reading - start_reading,
        }
    }
}

impl fmt::Display for MonthlyBill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}: {:.2} -> {:.2} = {:.2}",
            self.period_start, self.period_end, self.start_reading, self.end_reading, self.delta
        )
    }
}

/// Returns the billing period of a month: its first day and the first day
/// of the following month. December rolls into January of the next year.
pub(crate) fn month_span(year: i32, month: u32) -> ResultUtility<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| UtilityError::InvalidDate(format!("{year:04}-{month:02}-01")))?;
    let end = start
        .checked_add_months(Months::new(1))
        .ok_or_else(|| UtilityError::InvalidDate(format!("{year:04}-{month:02}-01")))?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_two_decimals() {
        let bill = MonthlyBill::new(
            "2024-01-01".parse().unwrap(),
            "2024-02-01".parse().unwrap(),
            100.0,
            130.5,
        );
        assert_eq!(
            bill.to_string(),
            "2024-01-01..2024-02-01: 100.00 -> 130.50 = 30.50"
        );
    }

    #[test]
    fn month_span_covers_whole_month() {
        let (start, end) = month_span(2024, 2).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn month_span_rolls_december_into_january() {
        let (start, end) = month_span(2024, 12).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn month_span_rejects_non_calendar_months() {
        assert!(matches!(
            month_span(2024, 0),
            Err(UtilityError::InvalidDate(_))
        ));
        assert!(matches!(
            month_span(2024, 13),
            Err(UtilityError::InvalidDate(_))
        ));
    }
}
