//! Public holidays and the countries they can be fetched for

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A country the holiday API knows about
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub country_code: String,
    pub name: String,
}

impl Country {
    pub fn new<S: ToString, T: ToString>(country_code: S, name: T) -> Self {
        Self { country_code: country_code.to_string(), name: name.to_string() }
    }

    /// The country list to use before (or instead of) fetching it, see [`config`](crate::config)
    pub fn default_list() -> Vec<Country> {
        vec![Country::new(
            crate::config::read(&crate::config::DEFAULT_COUNTRY_CODE),
            crate::config::read(&crate::config::DEFAULT_COUNTRY_NAME),
        )]
    }
}

/// A public holiday.
///
/// Only the date and the name are kept; any other field the API may return is ignored when deserializing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    pub date: NaiveDate,
    pub name: String,
}

impl PublicHoliday {
    pub fn new<S: ToString>(date: NaiveDate, name: S) -> Self {
        Self { date, name: name.to_string() }
    }
}

/// Holidays by country code, then by year
pub type CountryHolidayMap = HashMap<String, HashMap<i32, Vec<PublicHoliday>>>;
