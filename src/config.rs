//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Base URL of the public-holiday API used by [`Client::from_config`](crate::client::Client::from_config).
/// Feel free to override it when initing this library (e.g. to point to a local mirror).
pub static API_BASE_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("https://date.nager.at/api/v3".to_string())));

/// The country that is selected before the user picks one
pub static DEFAULT_COUNTRY_CODE: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("UA".to_string())));

/// Display name of [`DEFAULT_COUNTRY_CODE`], used until the list of available countries has been fetched
pub static DEFAULT_COUNTRY_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("Ukraine".to_string())));

/// Read the current value of one of the settings of this module
pub fn read(setting: &Lazy<Arc<Mutex<String>>>) -> String {
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Override one of the settings of this module
pub fn set(setting: &Lazy<Arc<Mutex<String>>>, new_value: &str) {
    match setting.lock() {
        Ok(mut value) => *value = new_value.to_string(),
        Err(poisoned) => *poisoned.into_inner() = new_value.to_string(),
    }
}
