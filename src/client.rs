//! This module provides a client to fetch public holidays from a [Nager.Date](https://date.nager.at)-compatible HTTP API

use std::error::Error;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::holiday::{Country, PublicHoliday};
use crate::traits::HolidaySource;


/// A [`HolidaySource`] that fetches its data from a remote API
#[derive(Clone, Debug)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self, Box<dyn Error>> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(format!("{} cannot be used as a base URL", base_url).into());
        }

        Ok(Self{
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client for the API set in [`config::API_BASE_URL`](crate::config::API_BASE_URL)
    pub fn from_config() -> Result<Self, Box<dyn Error>> {
        Self::new(crate::config::read(&crate::config::API_BASE_URL))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Box<dyn Error>> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| format!("{} cannot be used as a base URL", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Box<dyn Error>> {
        log::debug!("GET {}", url);
        let response = self.http
            .get(url.clone())
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} for {}", response.status(), url).into());
        }

        let text = response.text().await?;
        let parsed = serde_json::from_str(&text)
            .map_err(|err| format!("Unable to parse the response of {}: {}", url, err))?;
        Ok(parsed)
    }
}

#[async_trait]
impl HolidaySource for Client {
    async fn fetch_available_countries(&self) -> Result<Vec<Country>, Box<dyn Error>> {
        let url = self.endpoint(&["AvailableCountries"])?;
        let countries: Vec<Country> = self.get_json(url).await?;
        log::info!("Fetched {} available countries", countries.len());
        Ok(countries)
    }

    async fn fetch_public_holidays(&self, year: i32, country_code: &str) -> Result<Vec<PublicHoliday>, Box<dyn Error>> {
        let year = year.to_string();
        let url = self.endpoint(&["PublicHolidays", &year, country_code])?;
        // Only `date` and `name` are deserialized, every other field of the response is dropped
        let holidays: Vec<PublicHoliday> = self.get_json(url).await?;
        log::info!("Fetched {} public holidays for {} in {}", holidays.len(), country_code, year);
        Ok(holidays)
    }
}
