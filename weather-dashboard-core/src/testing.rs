//! In-memory fakes shared by the unit tests.

use async_trait::async_trait;
use std::{fmt, sync::Mutex};

use crate::{
    model::{RawWeather, WeatherRecord},
    source::WeatherSource,
    storage::{ObjectStore, StorageError},
};

#[derive(Debug)]
pub struct StaticSource {
    response: Result<RawWeather, String>,
    cities: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn ok(raw: RawWeather) -> Self {
        Self { response: Ok(raw), cities: Mutex::default() }
    }

    pub fn failing(message: &str) -> Self {
        Self { response: Err(message.to_string()), cities: Mutex::default() }
    }

    pub fn requested_cities(&self) -> Vec<String> {
        self.cities.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherSource for StaticSource {
    async fn current(&self, city: &str) -> anyhow::Result<RawWeather> {
        self.cities.lock().unwrap().push(city.to_string());
        self.response.clone().map_err(|msg| anyhow::anyhow!(msg))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    CreateBucket { bucket: String, location_constraint: Option<String> },
    PutObject { bucket: String, key: String, body: Vec<u8>, content_type: String },
}

type CreateError = Box<dyn Fn(&str) -> StorageError + Send + Sync>;
type PutError = Box<dyn Fn() -> StorageError + Send + Sync>;

#[derive(Default)]
pub struct RecordingStore {
    calls: Mutex<Vec<StoreCall>>,
    create_error: Option<CreateError>,
    put_error: Option<PutError>,
}

impl fmt::Debug for RecordingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingStore").field("calls", &self.calls).finish_non_exhaustive()
    }
}

impl RecordingStore {
    pub fn with_create_error(
        mut self,
        err: impl Fn(&str) -> StorageError + Send + Sync + 'static,
    ) -> Self {
        self.create_error = Some(Box::new(err));
        self
    }

    pub fn with_put_error(mut self, err: impl Fn() -> StorageError + Send + Sync + 'static) -> Self {
        self.put_error = Some(Box::new(err));
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    /// `(bucket, key, body, content_type)` for every `put_object` call.
    pub fn uploads(&self) -> Vec<(String, String, Vec<u8>, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::PutObject { bucket, key, body, content_type } => {
                    Some((bucket, key, body, content_type))
                }
                StoreCall::CreateBucket { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn create_bucket(
        &self,
        bucket: &str,
        location_constraint: Option<&str>,
    ) -> Result<(), StorageError> {
        self.calls.lock().unwrap().push(StoreCall::CreateBucket {
            bucket: bucket.to_string(),
            location_constraint: location_constraint.map(str::to_string),
        });

        match &self.create_error {
            Some(err) => Err(err(bucket)),
            None => Ok(()),
        }
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.calls.lock().unwrap().push(StoreCall::PutObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body,
            content_type: content_type.to_string(),
        });

        match &self.put_error {
            Some(err) => Err(err()),
            None => Ok(()),
        }
    }
}

pub fn sample_record() -> WeatherRecord {
    WeatherRecord {
        city: Some("London".into()),
        region: Some(String::new()),
        country: Some("UK".into()),
        temperature: Some(15.0),
        condition: Some("Sunny".into()),
        humidity: Some(50),
        wind_kph: Some(10.0),
        timestamp: "2024-05-01T12:30:00.000000Z".into(),
    }
}

pub fn london_raw() -> RawWeather {
    serde_json::from_str(
        r#"{
            "location": {"name": "London", "region": "", "country": "UK"},
            "current": {"temp_c": 15.0, "condition": {"text": "Sunny"}, "humidity": 50, "wind_kph": 10.0}
        }"#,
    )
    .expect("fixture must decode")
}
