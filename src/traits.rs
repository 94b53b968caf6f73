use std::error::Error;

use async_trait::async_trait;

use crate::holiday::{Country, PublicHoliday};

/// A source of public holidays (usually a remote API)
#[async_trait]
pub trait HolidaySource {
    /// Returns the countries this source has holidays for.
    /// This may be a long process, and can fail (e.g. in case of a remote server)
    async fn fetch_available_countries(&self) -> Result<Vec<Country>, Box<dyn Error>>;

    /// Returns the public holidays of a country for a given year
    /// This may be a long process, and can fail (e.g. in case of a remote server)
    async fn fetch_public_holidays(&self, year: i32, country_code: &str) -> Result<Vec<PublicHoliday>, Box<dyn Error>>;
}
