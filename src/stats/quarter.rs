//! Quarter calendar: maps quarter labels to fixed calendar intervals.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::DeriveActiveEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::stats::StatsError;

/// One of the four fixed three-month calendar periods of a year.
///
/// Stored as `"Q1"`..`"Q4"` strings in the `report` table. Quarter
/// boundaries use fixed month/day pairs, so no leap-year handling is
/// needed anywhere.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "quarter")]
pub enum Quarter {
    #[sea_orm(string_value = "Q1")]
    Q1,
    #[sea_orm(string_value = "Q2")]
    Q2,
    #[sea_orm(string_value = "Q3")]
    Q3,
    #[sea_orm(string_value = "Q4")]
    Q4,
}

impl Quarter {
    /// Parses a quarter label, rejecting anything outside `Q1`..`Q4`.
    ///
    /// This is the only modeled validation failure of the stats core and
    /// runs before any write.
    pub fn parse(label: &str) -> Result<Self, StatsError> {
        label
            .parse()
            .map_err(|_| StatsError::InvalidQuarter(label.to_owned()))
    }

    /// First and last calendar day of this quarter in `year`.
    #[must_use]
    pub fn bounds(self, year: i32) -> (NaiveDate, NaiveDate) {
        let ((m1, d1), (m2, d2)) = match self {
            Self::Q1 => ((1, 1), (3, 31)),
            Self::Q2 => ((4, 1), (6, 30)),
            Self::Q3 => ((7, 1), (9, 30)),
            Self::Q4 => ((10, 1), (12, 31)),
        };
        (quarter_date(year, m1, d1), quarter_date(year, m2, d2))
    }
}

// Fixed month/day pairs are always valid; only a year outside chrono's
// supported range could fail, and years are validated at the API boundary.
fn quarter_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("quarter boundary is a valid calendar date")
}

/// A (quarter_from, year_from, quarter_to, year_to) tuple identifying a
/// report and resolving to a concrete date interval.
///
/// Chronological ordering of the endpoints is deliberately not validated:
/// a backwards range selects no rows and yields zero-valued snapshots
/// rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    pub quarter_from: Quarter,
    pub year_from: i32,
    pub quarter_to: Quarter,
    pub year_to: i32,
}

impl ReportRange {
    #[must_use]
    pub const fn new(
        quarter_from: Quarter,
        year_from: i32,
        quarter_to: Quarter,
        year_to: i32,
    ) -> Self {
        Self {
            quarter_from,
            year_from,
            quarter_to,
            year_to,
        }
    }

    /// (start of `quarter_from`, end of `quarter_to`), both inclusive.
    #[must_use]
    pub fn date_bounds(&self) -> (NaiveDate, NaiveDate) {
        let (start, _) = self.quarter_from.bounds(self.year_from);
        let (_, end) = self.quarter_to.bounds(self.year_to);
        (start, end)
    }

    /// Half-open datetime window covering the range with an inclusive
    /// calendar end: `[start 00:00:00, day-after-end 00:00:00)`.
    ///
    /// Used for filtering datetime columns so that timestamps anywhere on
    /// the last day of the range still count.
    #[must_use]
    pub fn datetime_bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        let (start, end) = self.date_bounds();
        let end_exclusive = end
            .succ_opt()
            .expect("range end is far from the calendar maximum");
        (
            start.and_time(NaiveTime::MIN),
            end_exclusive.and_time(NaiveTime::MIN),
        )
    }

    /// Display title for the report resolved from this range.
    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "Report {}{} - {}{}",
            self.year_from, self.quarter_from, self.year_to, self.quarter_to
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn quarter_bounds_are_fixed_calendar_intervals() {
        assert_eq!(Quarter::Q1.bounds(1999), (date(1999, 1, 1), date(1999, 3, 31)));
        assert_eq!(Quarter::Q2.bounds(2023), (date(2023, 4, 1), date(2023, 6, 30)));
        assert_eq!(Quarter::Q3.bounds(2023), (date(2023, 7, 1), date(2023, 9, 30)));
        assert_eq!(Quarter::Q4.bounds(2024), (date(2024, 10, 1), date(2024, 12, 31)));
    }

    #[test]
    fn q1_bounds_ignore_leap_years() {
        // Feb 29 never matters: Q1 always ends on Mar 31.
        assert_eq!(Quarter::Q1.bounds(2024).1, date(2024, 3, 31));
        assert_eq!(Quarter::Q1.bounds(2023).1, date(2023, 3, 31));
    }

    #[test]
    fn single_quarter_range_spans_that_quarter() {
        let range = ReportRange::new(Quarter::Q1, 2024, Quarter::Q1, 2024);
        assert_eq!(range.date_bounds(), (date(2024, 1, 1), date(2024, 3, 31)));
    }

    #[test]
    fn multi_year_range_spans_from_start_to_end() {
        let range = ReportRange::new(Quarter::Q3, 2022, Quarter::Q2, 2024);
        assert_eq!(range.date_bounds(), (date(2022, 7, 1), date(2024, 6, 30)));
    }

    #[test]
    fn backwards_range_is_not_rejected() {
        let range = ReportRange::new(Quarter::Q4, 2024, Quarter::Q1, 2024);
        let (start, end) = range.date_bounds();
        assert!(start > end);
    }

    #[test]
    fn datetime_bounds_include_the_whole_last_day() {
        let range = ReportRange::new(Quarter::Q1, 2024, Quarter::Q1, 2024);
        let (start, end) = range.datetime_bounds();
        assert_eq!(start, date(2024, 1, 1).and_time(NaiveTime::MIN));
        assert_eq!(end, date(2024, 4, 1).and_time(NaiveTime::MIN));
    }

    #[test]
    fn parse_accepts_the_four_labels() {
        assert_eq!(Quarter::parse("Q1").unwrap(), Quarter::Q1);
        assert_eq!(Quarter::parse("Q4").unwrap(), Quarter::Q4);
    }

    #[test]
    fn parse_rejects_unknown_labels() {
        for label in ["Q5", "q1", "1", ""] {
            let err = Quarter::parse(label).unwrap_err();
            assert!(matches!(err, StatsError::InvalidQuarter(ref l) if l == label));
        }
    }

    #[test]
    fn title_matches_report_naming_scheme() {
        let range = ReportRange::new(Quarter::Q1, 2024, Quarter::Q2, 2025);
        assert_eq!(range.title(), "Report 2024Q1 - 2025Q2");
    }
}
