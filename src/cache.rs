//! This module provides a local cache for public holidays
//!
//! Holidays are fetched per (country, year). Once a key has been fetched, it is never fetched again:
//! past and future holidays are not expected to change during the lifetime of an app.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::client::Client;
use crate::holiday::{CountryHolidayMap, PublicHoliday};
use crate::progress::{FeedbackSender, LoadEvent, LoadProgress};
use crate::traits::HolidaySource;

/// A holiday cache that fetches from a remote API
pub type RemoteHolidayCache = HolidayCache<Client>;

/// What [`HolidayCache::ensure_loaded`] has done
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The holidays were already there, the source has not been called
    AlreadyCached,
    /// Another call is already fetching these holidays, the source has not been called
    InFlight,
    /// The holidays have been fetched and stored
    Fetched,
    /// The fetch has failed. Nothing has been stored, so that a later call will try again
    Failed,
}

/// A cache of public holidays, that fetches each (country, year) at most once
///
/// This is the only writer of its [`CountryHolidayMap`]. Updates are copy-on-write, so that a map
/// returned by [`HolidayCache::snapshot`] is never modified afterwards.
#[derive(Debug)]
pub struct HolidayCache<S>
where
    S: HolidaySource,
{
    source: Arc<S>,
    data: Mutex<Arc<CountryHolidayMap>>,
    in_flight: Mutex<HashSet<(String, i32)>>,
    progress: LoadProgress,
}

impl<S> HolidayCache<S>
where
    S: HolidaySource,
{
    /// Create an empty cache, that will fetch from `source`
    pub fn new(source: Arc<S>) -> Self {
        Self::from_map(source, CountryHolidayMap::new())
    }

    /// Create a cache with some already-known holidays (e.g. from a snapshot).
    /// Keys that are present in `map` will not be fetched again.
    pub fn from_map(source: Arc<S>, map: CountryHolidayMap) -> Self {
        Self {
            source,
            data: Mutex::new(Arc::new(map)),
            in_flight: Mutex::new(HashSet::new()),
            progress: LoadProgress::new(),
        }
    }

    /// Forward fetch events to a feedback channel
    pub fn with_feedback(mut self, feedback_sender: FeedbackSender) -> Self {
        self.progress = LoadProgress::new_with_feedback_channel(feedback_sender);
        self
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// The reporter fetch failures are sent to
    pub fn progress(&self) -> &LoadProgress {
        &self.progress
    }

    /// Make sure the holidays of a country for a given year are (or are being) fetched.
    ///
    /// The source is not called if the holidays are already cached, or if another call is currently fetching them.
    /// A failure is reported to [`Self::progress`], and does not populate the cache, so that the next call retries.
    pub async fn ensure_loaded(&self, country: &str, year: i32) -> LoadOutcome {
        if self.is_loaded(country, year) {
            return LoadOutcome::AlreadyCached;
        }

        let _in_flight = match InFlightGuard::acquire(&self.in_flight, country, year) {
            None => {
                log::debug!("Holidays for {} in {} are already being fetched", country, year);
                return LoadOutcome::InFlight;
            },
            Some(guard) => guard,
        };
        // Another fetch may have completed between the first check and the acquisition
        if self.is_loaded(country, year) {
            return LoadOutcome::AlreadyCached;
        }

        let what = format!("holidays for {} in {}", country, year);
        self.progress.feedback(LoadEvent::Fetching{ what: what.clone() });

        match self.source.fetch_public_holidays(year, country).await {
            Err(err) => {
                self.progress.failed(&what, &err.to_string());
                LoadOutcome::Failed
            },
            Ok(holidays) => {
                let count = holidays.len();
                self.merge(country, year, holidays);
                self.progress.debug(&format!("Cached {} {}", count, what));
                self.progress.feedback(LoadEvent::Loaded{ what, count });
                LoadOutcome::Fetched
            },
        }
    }

    /// Whether the holidays of this (country, year) have already been fetched
    pub fn is_loaded(&self, country: &str, year: i32) -> bool {
        self.data()
            .get(country)
            .map(|years| years.contains_key(&year))
            .unwrap_or(false)
    }

    /// The holidays that fall on a given date, in the order the source returned them.
    ///
    /// This is empty if there are none, or if the holidays of this (country, year) are not loaded (yet)
    pub fn holidays_on(&self, date: NaiveDate, country: &str, year: i32) -> Vec<PublicHoliday> {
        self.data()
            .get(country)
            .and_then(|years| years.get(&year))
            .map(|holidays| {
                holidays.iter()
                    .filter(|h| h.date == date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every holiday of a (country, year), or `None` if they have not been fetched
    pub fn holidays(&self, country: &str, year: i32) -> Option<Vec<PublicHoliday>> {
        self.data()
            .get(country)
            .and_then(|years| years.get(&year))
            .cloned()
    }

    /// The current content of the cache. Later fetches will not alter it
    pub fn snapshot(&self) -> Arc<CountryHolidayMap> {
        let data = self.data();
        Arc::clone(&*data)
    }


    fn data(&self) -> MutexGuard<'_, Arc<CountryHolidayMap>> {
        match self.data.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn merge(&self, country: &str, year: i32, holidays: Vec<PublicHoliday>) {
        let mut data = self.data();
        // Clones the map in case someone still holds a snapshot of it
        Arc::make_mut(&mut *data)
            .entry(country.to_string())
            .or_default()
            .insert(year, holidays);
    }
}


/// Marks a key as being fetched, until it is dropped (including when a fetch future is dropped before completion)
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<(String, i32)>>,
    key: (String, i32),
}

impl<'a> InFlightGuard<'a> {
    fn acquire(set: &'a Mutex<HashSet<(String, i32)>>, country: &str, year: i32) -> Option<Self> {
        let key = (country.to_string(), year);
        let inserted = match set.lock() {
            Ok(mut keys) => keys.insert(key.clone()),
            Err(poisoned) => poisoned.into_inner().insert(key.clone()),
        };
        if inserted {
            Some(Self { set, key })
        } else {
            None
        }
    }
}

impl<'a> Drop for InFlightGuard<'a> {
    fn drop(&mut self) {
        match self.set.lock() {
            Ok(mut keys) => keys.remove(&self.key),
            Err(poisoned) => poisoned.into_inner().remove(&self.key),
        };
    }
}
