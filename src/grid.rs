//! Month grids, as displayed by a calendar view
//!
//! A grid always starts on a Sunday, and contains either 5 or 6 full weeks.
//! Days of the neighbouring months are included (and flagged as "outside") so that every row is complete.

use std::error::Error;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Grid size when the month fits in 5 weeks
pub const SHORT_GRID_SIZE: usize = 35;
/// Grid size when the month needs a 6th week
pub const LONG_GRID_SIZE: usize = 42;

/// Short weekday names, in grid column order
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// A day position in a month grid
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    date: NaiveDate,
    day_of_week: u32,
    day_of_month: u32,
    is_outside: bool,
}

impl DayCell {
    fn new(date: NaiveDate, displayed_month: u32) -> Self {
        Self {
            date,
            day_of_week: date.weekday().num_days_from_sunday(),
            day_of_month: date.day(),
            is_outside: date.month0() != displayed_month,
        }
    }

    pub fn date(&self) -> NaiveDate    { self.date }
    /// 0 for Sunday, 6 for Saturday
    pub fn day_of_week(&self) -> u32   { self.day_of_week }
    pub fn day_of_month(&self) -> u32  { self.day_of_month }
    /// Whether this day belongs to the previous or the next month
    pub fn is_outside(&self) -> bool   { self.is_outside }

    /// The date of this cell, as a `YYYY-MM-DD` string
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Returns the English name of a month (`month` is 0-based)
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month as usize).copied()
}

fn first_day_of(year: i32, month: u32) -> Result<NaiveDate, Box<dyn Error>> {
    if month > 11 {
        return Err(format!("Invalid month {} (expected 0 to 11)", month).into());
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .ok_or_else(|| format!("Year {} is out of the supported date range", year).into())
}

/// Returns the (year, month) that follows the given one
pub(crate) fn next_month_of(year: i32, month: u32) -> (i32, u32) {
    if month == 11 { (year + 1, 0) } else { (year, month + 1) }
}

/// Returns the (year, month) that precedes the given one
pub(crate) fn prev_month_of(year: i32, month: u32) -> (i32, u32) {
    if month == 0 { (year - 1, 11) } else { (year, month - 1) }
}

/// Number of days of a month (`month` is 0-based)
pub fn days_in_month(year: i32, month: u32) -> Result<u32, Box<dyn Error>> {
    let first = first_day_of(year, month)?;
    let (next_year, next_month) = next_month_of(year, month);
    let next_first = first_day_of(next_year, next_month)?;
    Ok(next_first.signed_duration_since(first).num_days() as u32)
}

/// Weekday of the first day of a month (0 for Sunday)
pub fn first_weekday(year: i32, month: u32) -> Result<u32, Box<dyn Error>> {
    Ok(first_day_of(year, month)?.weekday().num_days_from_sunday())
}

/// Build the grid of a month (`month` is 0-based).
///
/// The grid holds the last days of the previous month (so that it starts on a Sunday), every day of the month,
/// then the first days of the next month, up to 35 cells, or 42 if the month does not fit in 5 weeks.
///
/// This only relies on calendar dates, so the result never depends on the current time or timezone. \
/// Returns an error if `month` is not in `0..=11`, or if the year is outside of the range supported by `chrono`.
pub fn generate(year: i32, month: u32) -> Result<Vec<DayCell>, Box<dyn Error>> {
    let first = first_day_of(year, month)?;
    let leading = first.weekday().num_days_from_sunday();
    let filled = (leading + days_in_month(year, month)?) as usize;
    let grid_size = if filled <= SHORT_GRID_SIZE { SHORT_GRID_SIZE } else { LONG_GRID_SIZE };

    let mut date = first;
    for _ in 0..leading {
        date = date.pred_opt()
            .ok_or_else(|| format!("Month {}-{} starts too close to the supported date range", year, month + 1))?;
    }

    let mut cells = Vec::with_capacity(grid_size);
    for i in 0..grid_size {
        if i > 0 {
            date = date.succ_opt()
                .ok_or_else(|| format!("Month {}-{} ends too close to the supported date range", year, month + 1))?;
        }
        cells.push(DayCell::new(date, month));
    }

    log::trace!("Generated a {}-cell grid for {}-{}", grid_size, year, month + 1);
    Ok(cells)
}
