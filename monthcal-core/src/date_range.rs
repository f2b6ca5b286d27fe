//! Month grid computation and reference-month helpers.
//!
//! The month view shows whole weeks (Sunday to Saturday), so the grid starts on
//! the Sunday on or before the first of the month and ends on the Saturday on
//! or after its last day.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::{MonthCalError, MonthCalResult};

pub const DAYS_PER_WEEK: usize = 7;

/// Weekday header labels, Sunday first.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A day cell in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDay {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from neighboring months.
    pub in_month: bool,
}

/// The range of days shown for one reference month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub reference: NaiveDate,
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    pub grid_start: NaiveDate,
    pub grid_end: NaiveDate,
}

impl MonthGrid {
    pub fn for_date(reference: NaiveDate) -> Self {
        let month_start = first_day_of_month(reference);
        let month_end = last_day_of_month(reference);

        let lead = u64::from(month_start.weekday().num_days_from_sunday());
        let trail = 6 - u64::from(month_end.weekday().num_days_from_sunday());

        MonthGrid {
            reference,
            month_start,
            month_end,
            grid_start: month_start.checked_sub_days(Days::new(lead)).unwrap_or(NaiveDate::MIN),
            grid_end: month_end.checked_add_days(Days::new(trail)).unwrap_or(NaiveDate::MAX),
        }
    }

    /// Every day from `grid_start` to `grid_end` inclusive, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.grid_start
            .iter_days()
            .take_while(move |d| *d <= self.grid_end)
    }

    /// Grid days with their in-month flag.
    pub fn grid_days(&self) -> impl Iterator<Item = GridDay> + '_ {
        self.days().map(move |date| GridDay {
            date,
            in_month: self.contains(date),
        })
    }

    /// Grid rows of seven days each.
    pub fn weeks(&self) -> Vec<Vec<GridDay>> {
        let days: Vec<GridDay> = self.grid_days().collect();
        days.chunks(DAYS_PER_WEEK).map(|week| week.to_vec()).collect()
    }

    pub fn day_count(&self) -> usize {
        (self.grid_end - self.grid_start).num_days() as usize + 1
    }

    /// Whether `date` falls inside the reference month (not just the grid).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.month_start && date <= self.month_end
    }
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_day_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Move the reference date by `delta` months (negative for earlier months).
///
/// The day is clamped to the target month's length, so Jan 31 + 1 month is
/// the last day of February.
pub fn shift_month(reference: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        reference.checked_add_months(months)
    } else {
        reference.checked_sub_months(months)
    };
    shifted.unwrap_or(reference)
}

/// `YYYY-MM`, as used in export filenames.
pub fn month_key(reference: NaiveDate) -> String {
    reference.format("%Y-%m").to_string()
}

/// `March 2024`, as used in the month view title.
pub fn month_title(reference: NaiveDate) -> String {
    reference.format("%B %Y").to_string()
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> MonthCalResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| MonthCalError::InvalidDate(s.to_string()))
}

/// Parse a reference month given as `YYYY-MM` (first of month) or `YYYY-MM-DD`.
pub fn parse_month_ref(s: &str) -> MonthCalResult<NaiveDate> {
    let trimmed = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .map_err(|_| MonthCalError::InvalidMonth(s.to_string()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_march_2024_grid_bounds() {
        // March 1st 2024 is a Friday, March 31st a Sunday.
        let grid = MonthGrid::for_date(ymd(2024, 3, 15));
        assert_eq!(grid.month_start, ymd(2024, 3, 1));
        assert_eq!(grid.month_end, ymd(2024, 3, 31));
        assert_eq!(grid.grid_start, ymd(2024, 2, 25));
        assert_eq!(grid.grid_end, ymd(2024, 4, 6));
        assert_eq!(grid.day_count(), 42);
    }

    #[test]
    fn test_february_2015_fits_in_four_weeks() {
        // Starts on a Sunday and has 28 days.
        let grid = MonthGrid::for_date(ymd(2015, 2, 10));
        assert_eq!(grid.grid_start, ymd(2015, 2, 1));
        assert_eq!(grid.grid_end, ymd(2015, 2, 28));
        assert_eq!(grid.day_count(), 28);
        assert_eq!(grid.weeks().len(), 4);
    }

    #[test]
    fn test_grid_is_whole_weeks_and_covers_month_for_every_month() {
        for year in [1999, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let reference = ymd(year, month, 1);
                let grid = MonthGrid::for_date(reference);
                let days: Vec<_> = grid.days().collect();

                assert_eq!(days.len() % DAYS_PER_WEEK, 0, "{year}-{month}");
                assert!((28..=42).contains(&days.len()), "{year}-{month}");
                assert_eq!(days.len(), grid.day_count());
                assert_eq!(days[0].weekday(), Weekday::Sun);
                assert_eq!(days[days.len() - 1].weekday(), Weekday::Sat);
                assert!(days.contains(&grid.month_start));
                assert!(days.contains(&grid.month_end));
                assert!(days.windows(2).all(|w| w[1] == w[0].succ_opt().unwrap()));
            }
        }
    }

    #[test]
    fn test_in_month_flags_neighboring_days() {
        let grid = MonthGrid::for_date(ymd(2024, 3, 1));
        let flags: Vec<_> = grid.grid_days().collect();
        assert!(!flags[0].in_month);
        assert!(flags[5].in_month);
        assert_eq!(flags[5].date, ymd(2024, 3, 1));
        assert_eq!(flags.iter().filter(|d| d.in_month).count(), 31);
    }

    #[test]
    fn test_leap_february() {
        assert_eq!(last_day_of_month(ymd(2024, 2, 10)), ymd(2024, 2, 29));
        assert_eq!(last_day_of_month(ymd(2023, 2, 10)), ymd(2023, 2, 28));
        assert_eq!(last_day_of_month(ymd(2023, 12, 31)), ymd(2023, 12, 31));
    }

    #[test]
    fn test_shift_month_clamps_day() {
        assert_eq!(shift_month(ymd(2024, 1, 31), 1), ymd(2024, 2, 29));
        assert_eq!(shift_month(ymd(2024, 3, 31), -1), ymd(2024, 2, 29));
        assert_eq!(shift_month(ymd(2024, 12, 5), 1), ymd(2025, 1, 5));
        assert_eq!(shift_month(ymd(2024, 1, 5), -1), ymd(2023, 12, 5));
        assert_eq!(shift_month(ymd(2024, 1, 5), 0), ymd(2024, 1, 5));
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(month_key(ymd(2024, 3, 15)), "2024-03");
        assert_eq!(month_title(ymd(2024, 3, 15)), "March 2024");
    }

    #[test]
    fn test_parse_month_ref() {
        assert_eq!(parse_month_ref("2024-03").unwrap(), ymd(2024, 3, 1));
        assert_eq!(parse_month_ref("2024-03-20").unwrap(), ymd(2024, 3, 20));
        assert!(parse_month_ref("2024-13").is_err());
        assert!(parse_month_ref("March").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-15").unwrap(), ymd(2024, 3, 15));
        assert!(matches!(
            parse_date("2024-02-30"),
            Err(MonthCalError::InvalidDate(_))
        ));
    }
}
