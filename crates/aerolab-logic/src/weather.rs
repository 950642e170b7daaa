//! Weather at a location.
//!
//! A static description of conditions in a city: where it is, local time,
//! temperature, and a free-form condition string ("clear", "rain", ...).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::ABSOLUTE_ZERO_C;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Degrees east, -180..=180.
    pub longitude: f64,
    /// Degrees north, -90..=90.
    pub latitude: f64,
    pub country: String,
    pub city: String,
    /// Local time as reported by the source.
    pub time: String,
    /// Temperature in °C.
    pub temperature: f64,
    pub condition: String,
}

impl Weather {
    pub fn new(
        longitude: f64,
        latitude: f64,
        country: impl Into<String>,
        city: impl Into<String>,
        time: impl Into<String>,
        temperature: f64,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            longitude,
            latitude,
            country: country.into(),
            city: city.into(),
            time: time.into(),
            temperature,
            condition: condition.into(),
        }
    }

    pub fn temperature_kelvin(&self) -> f64 {
        self.temperature - ABSOLUTE_ZERO_C
    }
}

impl Default for Weather {
    fn default() -> Self {
        Self::new(126.98, 37.57, "South Korea", "Seoul", "12:00", 15.0, "clear")
    }
}

/// Weather validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    #[error("latitude {0} outside -90..=90")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside -180..=180")]
    LongitudeOutOfRange(f64),
    #[error("temperature {0} °C is not above absolute zero")]
    BelowAbsoluteZero(f64),
    #[error("country is empty")]
    EmptyCountry,
    #[error("city is empty")]
    EmptyCity,
}

/// Validate a weather record, returning all errors found.
pub fn validate_weather(weather: &Weather) -> Vec<WeatherError> {
    let mut errors = Vec::new();

    // NaN fails both range checks, which is what we want.
    if !(-90.0..=90.0).contains(&weather.latitude) {
        errors.push(WeatherError::LatitudeOutOfRange(weather.latitude));
    }
    if !(-180.0..=180.0).contains(&weather.longitude) {
        errors.push(WeatherError::LongitudeOutOfRange(weather.longitude));
    }
    // Written this way round so NaN is rejected too.
    if !(weather.temperature > ABSOLUTE_ZERO_C) {
        errors.push(WeatherError::BelowAbsoluteZero(weather.temperature));
    }
    if weather.country.trim().is_empty() {
        errors.push(WeatherError::EmptyCountry);
    }
    if weather.city.trim().is_empty() {
        errors.push(WeatherError::EmptyCity);
    }

    errors
}
