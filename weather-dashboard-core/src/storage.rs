use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;
use thiserror::Error;

use crate::model::WeatherRecord;

pub mod s3;

pub use s3::S3Store;

/// Region that must not carry an explicit location constraint.
pub const NO_CONSTRAINT_REGION: &str = "us-east-1";

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("bucket {bucket} already exists")]
    BucketAlreadyExists { bucket: String },

    #[error("bucket {bucket} is already owned by you")]
    BucketAlreadyOwnedByYou { bucket: String },

    #[error("{operation} failed: {message}")]
    Service { operation: &'static str, message: String },

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[async_trait]
pub trait ObjectStore: Send + Sync + Debug {
    async fn create_bucket(
        &self,
        bucket: &str,
        location_constraint: Option<&str>,
    ) -> Result<(), StorageError>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    AlreadyExists,
    AlreadyOwned,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { key: String },
    Skipped,
    Failed(String),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. })
    }
}

pub fn location_constraint(region: &str) -> Option<&str> {
    if region == NO_CONSTRAINT_REGION { None } else { Some(region) }
}

/// `weather_data_<YYYYMMDDHHMMSS>.json` for the given instant.
pub fn object_key(at: DateTime<Utc>) -> String {
    format!("weather_data_{}.json", at.format("%Y%m%d%H%M%S"))
}

/// Create `bucket` in `region` unless it already exists. Never fails the caller.
pub async fn ensure_bucket(store: &dyn ObjectStore, bucket: &str, region: &str) -> ProvisionOutcome {
    match store.create_bucket(bucket, location_constraint(region)).await {
        Ok(()) => {
            log::info!("Created bucket: {bucket}");
            ProvisionOutcome::Created
        }
        Err(StorageError::BucketAlreadyExists { .. }) => {
            log::info!("Bucket already exists: {bucket}");
            ProvisionOutcome::AlreadyExists
        }
        Err(StorageError::BucketAlreadyOwnedByYou { .. }) => {
            log::info!("Bucket already owned by you: {bucket}");
            ProvisionOutcome::AlreadyOwned
        }
        Err(err) => {
            log::error!("Error creating bucket: {err}");
            ProvisionOutcome::Failed(err.to_string())
        }
    }
}

/// Upload `record` as JSON under `key`. A missing record is a logged no-op.
pub async fn save_record(
    store: &dyn ObjectStore,
    bucket: &str,
    record: Option<&WeatherRecord>,
    key: &str,
) -> SaveOutcome {
    let Some(record) = record else {
        log::warn!("No data to save");
        return SaveOutcome::Skipped;
    };

    match upload(store, bucket, record, key).await {
        Ok(()) => {
            log::info!("Data saved to S3 bucket {bucket} with file name {key}");
            SaveOutcome::Saved { key: key.to_string() }
        }
        Err(err) => {
            log::error!("Error saving to S3: {err}");
            SaveOutcome::Failed(err.to_string())
        }
    }
}

async fn upload(
    store: &dyn ObjectStore,
    bucket: &str,
    record: &WeatherRecord,
    key: &str,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec(record)?;
    store.put_object(bucket, key, body, JSON_CONTENT_TYPE).await
}
