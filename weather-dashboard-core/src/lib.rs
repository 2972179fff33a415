//! Core library for the `weather-dashboard` pipeline.
//!
//! This crate defines:
//! - Configuration resolved from file, environment and CLI
//! - The WeatherAPI.com source and the raw/flat weather models
//! - Object storage abstraction with an S3 backend
//! - The provision -> fetch -> transform -> save pipeline
//!
//! It is used by `weather-dashboard-cli`, but can also be driven by other binaries.

pub mod config;
pub mod model;
pub mod pipeline;
pub mod source;
pub mod storage;
pub mod transform;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Config, PipelineConfig, WeatherApiSettings};
pub use model::{RawWeather, WeatherRecord};
pub use pipeline::{Pipeline, PipelineReport};
pub use source::{WeatherApiClient, WeatherSource};
pub use storage::{ObjectStore, ProvisionOutcome, S3Store, SaveOutcome, StorageError};
