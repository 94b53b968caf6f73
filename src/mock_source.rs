//! An in-memory [`HolidaySource`], mostly useful for tests and offline use
#![cfg(any(test, feature = "local_holiday_mocks"))]

use std::error::Error;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::holiday::{Country, CountryHolidayMap, PublicHoliday};
use crate::mock_behaviour::MockBehaviour;
use crate::traits::HolidaySource;

/// A [`HolidaySource`] that serves fixed data, and keeps track of the requests it receives.
///
/// Every fetch suspends at least once before completing, like a network request would.
#[derive(Debug, Default)]
pub struct MockSource {
    countries: Vec<Country>,
    holidays: CountryHolidayMap,
    latency: Option<Duration>,

    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
    requests: Mutex<Requests>,
}

#[derive(Debug, Default)]
struct Requests {
    countries: usize,
    holidays: Vec<(String, i32)>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a country this source knows about
    pub fn with_country(mut self, country: Country) -> Self {
        self.holidays.entry(country.country_code.clone()).or_default();
        self.countries.push(country);
        self
    }

    /// Add a holiday. Its country is added if needed
    pub fn with_holiday(mut self, country_code: &str, holiday: PublicHoliday) -> Self {
        use chrono::Datelike;

        if self.countries.iter().any(|c| c.country_code == country_code) == false {
            self.countries.push(Country::new(country_code, country_code));
        }
        self.holidays
            .entry(country_code.to_string()).or_default()
            .entry(holiday.date.year()).or_default()
            .push(holiday);
        self
    }

    /// Make every fetch take (at least) this long
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make fetches fail according to a shared [`MockBehaviour`]
    pub fn with_mock_behaviour(mut self, mock_behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        self.mock_behaviour = Some(mock_behaviour);
        self
    }

    /// How many times the country list has been requested
    pub fn country_fetch_count(&self) -> usize {
        self.requests().countries
    }

    /// How many times holidays have been requested
    pub fn holiday_fetch_count(&self) -> usize {
        self.requests().holidays.len()
    }

    /// Every holiday request, as `(country code, year)`, in the order they were received
    pub fn holiday_requests(&self) -> Vec<(String, i32)> {
        self.requests().holidays.clone()
    }

    fn requests(&self) -> MutexGuard<'_, Requests> {
        match self.requests.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    async fn simulate_network(&self) {
        tokio::task::yield_now().await;
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn check_behaviour<F>(&self, check: F) -> Result<(), Box<dyn Error>>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), Box<dyn Error>>,
    {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(behaviour) => match behaviour.lock() {
                Ok(mut b) => check(&mut *b),
                Err(poisoned) => check(&mut *poisoned.into_inner()),
            },
        }
    }
}

#[async_trait]
impl HolidaySource for MockSource {
    async fn fetch_available_countries(&self) -> Result<Vec<Country>, Box<dyn Error>> {
        self.requests().countries += 1;
        self.simulate_network().await;

        self.check_behaviour(MockBehaviour::can_fetch_countries)?;
        Ok(self.countries.clone())
    }

    async fn fetch_public_holidays(&self, year: i32, country_code: &str) -> Result<Vec<PublicHoliday>, Box<dyn Error>> {
        self.requests().holidays.push((country_code.to_string(), year));
        self.simulate_network().await;

        self.check_behaviour(MockBehaviour::can_fetch_holidays)?;
        match self.holidays.get(country_code) {
            None => Err(format!("Unknown country code {:?}", country_code).into()),
            Some(years) => Ok(years.get(&year).cloned().unwrap_or_default()),
        }
    }
}
