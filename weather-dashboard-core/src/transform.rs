use chrono::{DateTime, SecondsFormat, Utc};

use crate::model::{RawWeather, WeatherRecord};

/// Flatten a raw response into a [`WeatherRecord`] stamped with the current time.
///
/// Returns `None` when there is no response to flatten or it is empty.
pub fn process_weather_data(raw: Option<&RawWeather>) -> Option<WeatherRecord> {
    process_weather_data_at(raw, Utc::now())
}

pub fn process_weather_data_at(
    raw: Option<&RawWeather>,
    captured_at: DateTime<Utc>,
) -> Option<WeatherRecord> {
    let raw = raw.filter(|raw| !raw.is_empty())?;

    Some(WeatherRecord {
        city: raw.location_name().map(str::to_owned),
        region: raw.region().map(str::to_owned),
        country: raw.country().map(str::to_owned),
        temperature: raw.temp_c(),
        condition: raw.condition_text().map(str::to_owned),
        humidity: raw.humidity(),
        wind_kph: raw.wind_kph(),
        timestamp: captured_at.to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}
