use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::RawWeather;

pub mod weatherapi;

pub use weatherapi::WeatherApiClient;

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Current conditions for `city`.
    async fn current(&self, city: &str) -> anyhow::Result<RawWeather>;
}

/// Fetch current weather, logging any failure and returning `None` in its place.
pub async fn fetch_weather(source: &dyn WeatherSource, city: &str) -> Option<RawWeather> {
    match source.current(city).await {
        Ok(raw) => Some(raw),
        Err(err) => {
            log::error!("Error fetching weather data: {err:#}");
            None
        }
    }
}
