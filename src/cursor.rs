//! The month a calendar displays

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::grid::{next_month_of, prev_month_of};

/// A (month, year) pair. `month` is 0-based, and always in `0..=11`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarCursor {
    month: u32,
    year: i32,
}

impl CalendarCursor {
    /// Returns `None` if `month` is not in `0..=11`
    pub fn new(month: u32, year: i32) -> Option<Self> {
        if month > 11 {
            return None;
        }
        Some(Self { month, year })
    }

    /// The month a date belongs to
    pub fn containing(date: NaiveDate) -> Self {
        Self { month: date.month0(), year: date.year() }
    }

    /// The current month, according to the local clock
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn month(&self) -> u32  { self.month }
    pub fn year(&self) -> i32   { self.year  }

    /// The following month. December wraps to January of the next year
    pub fn next(self) -> Self {
        if self.month == 11 && self.year == i32::MAX {
            log::warn!("Cannot go past year {}", self.year);
            return self;
        }
        let (year, month) = next_month_of(self.year, self.month);
        Self { month, year }
    }

    /// The preceding month. January wraps to December of the previous year
    pub fn prev(self) -> Self {
        if self.month == 0 && self.year == i32::MIN {
            log::warn!("Cannot go before year {}", self.year);
            return self;
        }
        let (year, month) = prev_month_of(self.year, self.month);
        Self { month, year }
    }
}
