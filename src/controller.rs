//! This module combines a month cursor, the task store and the holiday cache into what a calendar view displays
//!
//! A UI calls the navigation methods of a [`CalendarController`] in response to user actions, then calls
//! [`CalendarController::render`] to get the content of every cell of the grid.

use std::error::Error;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::cache::{HolidayCache, LoadOutcome};
use crate::client::Client;
use crate::cursor::CalendarCursor;
use crate::grid::{self, DayCell};
use crate::holiday::{Country, PublicHoliday};
use crate::progress::LoadEvent;
use crate::task::Task;
use crate::task_store::TaskStore;
use crate::traits::HolidaySource;

/// A controller that fetches holidays from a remote API
pub type RemoteCalendarController = CalendarController<Client>;

/// A holiday fetch running in the background.
///
/// It is not cancelled when this handle is dropped, and its result is stored in the cache whatever the displayed month has become in the meantime.
pub type HolidayLoad = JoinHandle<LoadOutcome>;

/// Everything a calendar view needs to display a cell
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedCell {
    pub cell: DayCell,
    pub tasks: Vec<Task>,
    pub holidays: Vec<PublicHoliday>,
    pub is_today: bool,
}

impl RenderedCell {
    /// New tasks can only be added to days of the displayed month
    pub fn can_add_task(&self) -> bool {
        self.cell.is_outside() == false
    }
}


/// The state of a month calendar: which month and country are displayed, the tasks, and the known holidays.
///
/// Changing the month or the country takes effect immediately, and starts fetching the holidays of the displayed (country, year) in the background, unless they are already known.
#[derive(Debug)]
pub struct CalendarController<S>
where
    S: HolidaySource,
{
    cursor: CalendarCursor,
    country: String,
    countries: Vec<Country>,
    search: String,
    /// `None` to follow the local clock
    today: Option<NaiveDate>,

    tasks: TaskStore,
    holidays: Arc<HolidayCache<S>>,
}

impl<S> CalendarController<S>
where
    S: HolidaySource + Send + Sync + 'static,
{
    /// Create a controller that displays the current month, for the default country (see [`config`](crate::config)).
    ///
    /// Nothing is fetched until [`Self::start`] (or a navigation method) is called
    pub fn new(source: Arc<S>) -> Self {
        Self::with_parts(HolidayCache::new(source), TaskStore::new(), None)
    }

    /// Create a controller from existing parts (e.g. restored from a [`Snapshot`](crate::snapshot::Snapshot)).
    ///
    /// `today` pins the current date (e.g. to replay a session). With `None`, the local clock is used
    pub fn with_parts(holidays: HolidayCache<S>, tasks: TaskStore, today: Option<NaiveDate>) -> Self {
        let initial_date = today.unwrap_or_else(|| Local::now().date_naive());
        Self {
            cursor: CalendarCursor::containing(initial_date),
            country: crate::config::read(&crate::config::DEFAULT_COUNTRY_CODE),
            countries: Country::default_list(),
            search: String::new(),
            today,
            tasks,
            holidays: Arc::new(holidays),
        }
    }

    pub fn cursor(&self) -> CalendarCursor      { self.cursor }
    pub fn country(&self) -> &str               { &self.country }
    pub fn countries(&self) -> &[Country]       { &self.countries }
    pub fn search(&self) -> &str                { &self.search }
    pub fn tasks(&self) -> &TaskStore           { &self.tasks }
    pub fn tasks_mut(&mut self) -> &mut TaskStore   { &mut self.tasks }
    pub fn holidays(&self) -> &HolidayCache<S>  { &self.holidays }

    /// The holiday cache, to be shared with code that outlives a borrow of this controller
    pub fn holiday_cache(&self) -> Arc<HolidayCache<S>> {
        Arc::clone(&self.holidays)
    }

    /// The date cells are flagged as "today" against. This follows the local clock, unless it has been pinned
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Pin the current date, or follow the local clock again with `None`
    pub fn set_today(&mut self, today: Option<NaiveDate>) {
        self.today = today;
    }

    /// The title of the displayed month, e.g. `March 2024`
    pub fn title(&self) -> String {
        format!("{} {}", grid::month_name(self.cursor.month()).unwrap_or_default(), self.cursor.year())
    }

    /// Fetch the list of available countries and the holidays of the displayed month
    pub async fn start(&mut self) -> LoadOutcome {
        self.refresh_countries().await;
        self.refresh_holidays().await
    }

    /// Display the next month
    pub fn next_month(&mut self) -> HolidayLoad {
        self.cursor = self.cursor.next();
        log::debug!("Now displaying {}", self.title());
        self.load_holidays()
    }

    /// Display the previous month
    pub fn prev_month(&mut self) -> HolidayLoad {
        self.cursor = self.cursor.prev();
        log::debug!("Now displaying {}", self.title());
        self.load_holidays()
    }

    /// Display the holidays of another country. The displayed month does not change
    pub fn select_country(&mut self, country_code: &str) -> HolidayLoad {
        if self.country != country_code {
            log::debug!("Switching country from {} to {}", self.country, country_code);
            self.country = country_code.to_string();
        }
        self.load_holidays()
    }

    /// Start fetching the holidays of the displayed (country, year) in the background.
    ///
    /// This is a no-op if they are already known, or already being fetched.
    /// This must be called from within a Tokio runtime.
    pub fn load_holidays(&self) -> HolidayLoad {
        let cache = Arc::clone(&self.holidays);
        let country = self.country.clone();
        let year = self.cursor.year();
        tokio::spawn(async move {
            cache.ensure_loaded(&country, year).await
        })
    }

    /// Same as [`Self::load_holidays`], but waits for the fetch to complete.
    ///
    /// Dropping the returned future does not cancel the fetch
    pub async fn refresh_holidays(&self) -> LoadOutcome {
        match self.load_holidays().await {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("Holiday fetch did not complete: {}", err);
                LoadOutcome::Failed
            },
        }
    }

    /// Fetch the list of available countries.
    ///
    /// In case of failure, the current list is kept (it is the default list until a fetch succeeds).
    /// Returns whether the list has been updated
    pub async fn refresh_countries(&mut self) -> bool {
        let what = "available countries";
        let progress = self.holidays.progress();
        progress.feedback(LoadEvent::Fetching{ what: what.to_string() });

        match self.holidays.source().fetch_available_countries().await {
            Err(err) => {
                progress.failed(what, &err.to_string());
                false
            },
            Ok(countries) => {
                progress.feedback(LoadEvent::Loaded{ what: what.to_string(), count: countries.len() });
                self.countries = countries;
                true
            },
        }
    }

    /// Only show tasks that contain this text (case-insensitively). An empty text shows every task
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_lowercase();
    }

    /// Returns the content of every cell of the displayed month grid
    pub fn render(&self) -> Result<Vec<RenderedCell>, Box<dyn Error>> {
        let year = self.cursor.year();
        let today = self.today();
        let cells = grid::generate(year, self.cursor.month())?;
        let tasks_by_date = self.tasks.tasks_by_date(Some(&self.search));

        let rendered = cells.into_iter()
            .map(|cell| {
                let date = cell.date();
                let tasks: Vec<Task> = tasks_by_date.get(&date)
                    .map(|tasks| tasks.iter().map(|&t| t.clone()).collect())
                    .unwrap_or_default();
                RenderedCell {
                    tasks,
                    holidays: self.holidays.holidays_on(date, &self.country, year),
                    is_today: date == today,
                    cell,
                }
            })
            .collect();
        Ok(rendered)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use crate::mock_behaviour::MockBehaviour;
    use crate::mock_source::MockSource;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn controller(source: &Arc<MockSource>, today: NaiveDate) -> CalendarController<MockSource> {
        CalendarController::with_parts(HolidayCache::new(Arc::clone(source)), TaskStore::new(), Some(today))
    }

    fn source() -> MockSource {
        MockSource::new()
            .with_country(Country::new("UA", "Ukraine"))
            .with_country(Country::new("PL", "Poland"))
            .with_holiday("UA", PublicHoliday::new(ymd(2023, 12, 25), "Christmas Day"))
            .with_holiday("UA", PublicHoliday::new(ymd(2024, 1, 1), "New Year's Day"))
            .with_holiday("PL", PublicHoliday::new(ymd(2024, 1, 6), "Epiphany"))
    }

    #[tokio::test]
    async fn navigation_loads_each_year_once() {
        let _ = env_logger::builder().is_test(true).try_init();

        let source = Arc::new(source());
        let mut controller = controller(&source, ymd(2023, 11, 15));
        assert_eq!(controller.title(), "November 2023");
        assert_eq!(controller.country(), "UA");

        assert_eq!(controller.start().await, LoadOutcome::Fetched);
        assert_eq!(controller.next_month().await.unwrap(), LoadOutcome::AlreadyCached);
        assert_eq!(controller.title(), "December 2023");
        assert_eq!(controller.next_month().await.unwrap(), LoadOutcome::Fetched);
        assert_eq!(controller.title(), "January 2024");
        assert_eq!(controller.prev_month().await.unwrap(), LoadOutcome::AlreadyCached);
        assert_eq!(controller.next_month().await.unwrap(), LoadOutcome::AlreadyCached);

        assert_eq!(source.holiday_requests(), vec![("UA".to_string(), 2023), ("UA".to_string(), 2024)]);
        assert_eq!(controller.countries().len(), 2);
    }

    #[tokio::test]
    async fn country_switch() {
        let source = Arc::new(source());
        let mut controller = controller(&source, ymd(2024, 1, 10));
        controller.start().await;

        assert_eq!(controller.select_country("PL").await.unwrap(), LoadOutcome::Fetched);
        assert_eq!(controller.cursor(), CalendarCursor::new(0, 2024).unwrap());
        assert_eq!(controller.select_country("PL").await.unwrap(), LoadOutcome::AlreadyCached);
        assert_eq!(controller.select_country("UA").await.unwrap(), LoadOutcome::AlreadyCached);
        assert_eq!(source.holiday_fetch_count(), 2);

        controller.select_country("PL").await.unwrap();
        let cells = controller.render().unwrap();
        let epiphany = cells.iter().find(|c| c.cell.date() == ymd(2024, 1, 6)).unwrap();
        assert_eq!(epiphany.holidays[0].name, "Epiphany");
        assert!(cells.iter().all(|c| c.cell.date() == ymd(2024, 1, 6) || c.holidays.is_empty()));
    }

    #[tokio::test]
    async fn render_model() {
        let source = Arc::new(source());
        let mut controller = controller(&source, ymd(2024, 1, 10));
        controller.start().await;

        controller.tasks_mut().add(ymd(2024, 1, 1), "Sleep");
        controller.tasks_mut().add(ymd(2024, 1, 1), "Call grandma");
        controller.tasks_mut().add(ymd(2024, 2, 3), "Outside task");
        controller.tasks_mut().add(ymd(2023, 12, 31), "Party");

        let cells = controller.render().unwrap();
        // January 2024 starts on a Monday and has 31 days
        assert_eq!(cells.len(), 35);
        assert_eq!(cells[0].cell.date(), ymd(2023, 12, 31));
        assert!(cells[0].can_add_task() == false);
        assert_eq!(cells[0].tasks[0].text(), "Party");
        // Holidays are looked up for the displayed year only
        assert!(cells[0].holidays.is_empty());

        let new_year = &cells[1];
        assert_eq!(new_year.holidays[0].name, "New Year's Day");
        let texts: Vec<&str> = new_year.tasks.iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["Sleep", "Call grandma"]);
        assert!(new_year.can_add_task());

        assert!(cells[10].is_today);
        assert_eq!(cells.iter().filter(|c| c.is_today).count(), 1);
        assert_eq!(cells[34].tasks[0].text(), "Outside task");

        controller.set_search("CALL");
        let cells = controller.render().unwrap();
        let texts: Vec<&str> = cells[1].tasks.iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["Call grandma"]);
        assert!(cells[0].tasks.is_empty());
        assert_eq!(controller.tasks().len(), 4);
    }

    #[tokio::test]
    async fn superseded_fetches_are_merged() {
        let source = Arc::new(source().with_latency(std::time::Duration::from_millis(50)));
        let mut controller = controller(&source, ymd(2023, 12, 10));
        assert_eq!(controller.refresh_holidays().await, LoadOutcome::Fetched);

        // Go to January, and come back before its holidays have arrived
        let pending = controller.next_month();
        let back = controller.prev_month();
        assert_eq!(controller.cursor(), CalendarCursor::new(11, 2023).unwrap());
        assert_eq!(back.await.unwrap(), LoadOutcome::AlreadyCached);
        assert!(controller.holidays().is_loaded("UA", 2024) == false);
        drop(pending);

        tokio::time::sleep(std::time::Duration::from_millis(150)).await;
        assert!(controller.holidays().is_loaded("UA", 2024));
        assert_eq!(source.holiday_requests(), vec![("UA".to_string(), 2023), ("UA".to_string(), 2024)]);
        assert_eq!(controller.next_month().await.unwrap(), LoadOutcome::AlreadyCached);
    }

    #[test]
    fn today_is_computed_at_render_time() {
        let source = Arc::new(source());
        let following = CalendarController::with_parts(HolidayCache::new(Arc::clone(&source)), TaskStore::new(), None);
        let clock_today = Local::now().date_naive();
        assert_eq!(following.cursor(), CalendarCursor::containing(clock_today));
        let flagged: Vec<NaiveDate> = following.render().unwrap().iter().filter(|c| c.is_today).map(|c| c.cell.date()).collect();
        assert_eq!(flagged, vec![following.today()]);

        let mut pinned = controller(&source, ymd(2024, 1, 10));
        assert!(pinned.render().unwrap()[10].is_today);
        // The session stays open past midnight
        pinned.set_today(Some(ymd(2024, 1, 11)));
        let cells = pinned.render().unwrap();
        assert!(cells[10].is_today == false);
        assert!(cells[11].is_today);
    }

    #[tokio::test]
    async fn failures_keep_previous_state() {
        let behaviour = Arc::new(Mutex::new(MockBehaviour::fail_now(1)));
        let source = Arc::new(source().with_mock_behaviour(behaviour));
        let mut controller = controller(&source, ymd(2024, 1, 10));

        assert_eq!(controller.start().await, LoadOutcome::Failed);
        assert_eq!(controller.countries(), &[Country::new("UA", "Ukraine")][..]);
        assert!(controller.render().unwrap().iter().all(|c| c.holidays.is_empty()));
        assert_eq!(controller.holidays().progress().n_errors(), 2);

        // Retried on the next refresh
        assert_eq!(controller.refresh_holidays().await, LoadOutcome::Fetched);
        assert!(controller.refresh_countries().await);
        assert_eq!(controller.render().unwrap()[1].holidays.len(), 1);
    }
}
