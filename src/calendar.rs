//! Calendar arithmetic for the date picker and the due-date format.
//!
//! Pure date math, no state. Due dates travel as `YYYY-MM-DD` strings
//! (zero-padded, local calendar date, no time component); this module owns
//! formatting and parsing of that shape plus the 42-cell month grid the
//! picker renders.

use chrono::{Datelike, Duration, NaiveDate};

/// 6 weeks x 7 days, enough to cover any month from the Sunday on or before
/// its 1st.
pub const GRID_CELLS: usize = 42;

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    /// Whether the cell belongs to the reference month (as opposed to the
    /// leading/trailing fill days).
    pub in_month: bool,
}

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

/// First day of the month `delta` months away from the month containing
/// `date`. Negative deltas move backwards.
pub fn add_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = date.year() * 12 + date.month0() as i32 + delta;
    let year = months.div_euclid(12);
    let month = months.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).expect("month in 1..=12")
}

/// The 42-cell grid for the month containing `view_month`, starting on the
/// Sunday on or before the 1st.
pub fn month_grid(view_month: NaiveDate) -> Vec<GridCell> {
    let first = start_of_month(view_month);
    let first_cell = first - Duration::days(first.weekday().num_days_from_sunday() as i64);
    (0..GRID_CELLS as i64)
        .map(|offset| {
            let date = first_cell + Duration::days(offset);
            GridCell {
                date,
                in_month: date.month() == first.month() && date.year() == first.year(),
            }
        })
        .collect()
}

/// Formats a date as the wire shape `YYYY-MM-DD`.
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a `YYYY-MM-DD` string; `None` for anything else, including
/// non-zero-padded variants (the wire shape is canonical).
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    if to_iso_date(date) != trimmed {
        return None;
    }
    Some(date)
}
