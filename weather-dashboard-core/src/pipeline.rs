use chrono::Utc;

use crate::{
    config::PipelineConfig,
    model::WeatherRecord,
    source::{WeatherSource, fetch_weather},
    storage::{ObjectStore, ProvisionOutcome, SaveOutcome, ensure_bucket, object_key, save_record},
    transform::process_weather_data,
};

/// What each step of a run did. Every step completes even if an earlier one produced nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub bucket: ProvisionOutcome,
    pub record: Option<WeatherRecord>,
    pub save: SaveOutcome,
}

/// Provision -> fetch -> transform -> save, against a single bucket.
#[derive(Debug)]
pub struct Pipeline<'a> {
    config: &'a PipelineConfig,
    source: &'a dyn WeatherSource,
    store: &'a dyn ObjectStore,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a PipelineConfig,
        source: &'a dyn WeatherSource,
        store: &'a dyn ObjectStore,
    ) -> Self {
        Self { config, source, store }
    }

    pub async fn run(&self) -> PipelineReport {
        log::info!("Setting up S3 bucket...");
        let bucket = ensure_bucket(self.store, &self.config.bucket, &self.config.region).await;

        log::info!("Fetching weather data for {}...", self.config.weather.city);
        let raw = fetch_weather(self.source, &self.config.weather.city).await;

        log::info!("Processing weather data...");
        let record = process_weather_data(raw.as_ref());

        log::info!("Saving data to S3...");
        let key = object_key(Utc::now());
        let save = save_record(self.store, &self.config.bucket, record.as_ref(), &key).await;

        PipelineReport { bucket, record, save }
    }
}
