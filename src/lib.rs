//! This crate provides the logic behind a month calendar with per-day tasks and public holidays.
//!
//! It does not draw anything: a UI calls it in response to user actions, and displays what it returns.
//!
//! * the [`grid`] module computes which days a month view shows (always 5 or 6 full weeks, starting on a Sunday),
//! * a [`TaskStore`] owns the tasks attached to days, and handles searches and drag and drop,
//! * a [`HolidayCache`](cache::HolidayCache) fetches public holidays from a [`HolidaySource`](traits::HolidaySource) (usually a [`Client`](client::Client)), at most once per country and year,
//! * a [`CalendarController`] ties them together, and tracks the displayed month and country.
//!
//! Everything lives in memory. A [`Snapshot`](snapshot::Snapshot) can be used to save and restore the state of a planner.

#![deny(rustdoc::broken_intra_doc_links)]

pub mod traits;

pub mod grid;
pub use grid::DayCell;
pub mod cursor;
pub use cursor::CalendarCursor;
mod task;
pub use task::Task;
pub mod task_store;
pub use task_store::{DropPayload, TaskStore};
pub mod holiday;
pub use holiday::{Country, CountryHolidayMap, PublicHoliday};
pub mod controller;
pub use controller::CalendarController;

pub mod cache;
pub mod client;
pub mod progress;
pub mod snapshot;

#[cfg(any(test, feature = "local_holiday_mocks"))]
pub mod mock_behaviour;
#[cfg(any(test, feature = "local_holiday_mocks"))]
pub mod mock_source;

pub mod config;
pub mod utils;
