use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};

use weather_dashboard_core::{
    Config, Pipeline, PipelineConfig, S3Store, WeatherApiClient, WeatherApiSettings,
    config::{DEFAULT_CITY, DEFAULT_REGION, process_env},
    source::fetch_weather,
    transform::process_weather_data,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Fetch current weather and archive it in S3")]
pub struct Cli {
    /// Defaults to `run` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the bucket if needed, fetch the weather and upload it.
    Run {
        /// City to fetch; overrides CITY and the config file.
        #[arg(long)]
        city: Option<String>,

        /// Exit with an error when no record was saved.
        #[arg(long)]
        strict: bool,
    },

    /// Fetch and print the flattened record without touching storage.
    Fetch {
        #[arg(long)]
        city: Option<String>,
    },

    /// Interactively write the config file.
    Configure,

    /// Print the config file location.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Run { city: None, strict: false }) {
            Command::Run { city, strict } => run_pipeline(city, strict).await,
            Command::Fetch { city } => fetch_only(city).await,
            Command::Configure => configure(),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

async fn run_pipeline(city: Option<String>, strict: bool) -> anyhow::Result<()> {
    let file = Config::load()?;
    let config = PipelineConfig::resolve(&file, &process_env, city)?;

    let source = weather_client(&config.weather);
    let store = S3Store::connect(&config.region).await;

    let report = Pipeline::new(&config, &source, &store).run().await;
    log::debug!("Pipeline report: {report:?}");

    if strict && !report.save.is_saved() {
        bail!("Weather data pipeline finished without saving data: {:?}", report.save);
    }

    println!("Weather data pipeline completed successfully.");
    Ok(())
}

async fn fetch_only(city: Option<String>) -> anyhow::Result<()> {
    let file = Config::load()?;
    let settings = WeatherApiSettings::resolve(&file, &process_env, city)?;
    let source = weather_client(&settings);

    let raw = fetch_weather(&source, &settings.city).await;
    match process_weather_data(raw.as_ref()) {
        Some(record) => {
            let json = serde_json::to_string_pretty(&record)
                .context("Failed to serialize weather record")?;
            println!("{json}");
        }
        None => println!("No data for {}", settings.city),
    }

    Ok(())
}

fn weather_client(settings: &WeatherApiSettings) -> WeatherApiClient {
    WeatherApiClient::with_base_url(settings.api_key.clone(), settings.base_url.clone())
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("WeatherAPI key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()?;
    if !api_key.trim().is_empty() {
        cfg.weatherapi.api_key = Some(api_key.trim().to_string());
    }

    let bucket = Text::new("S3 bucket name:")
        .with_initial_value(cfg.storage.bucket.as_deref().unwrap_or_default())
        .prompt()?;
    cfg.storage.bucket = non_empty(bucket);

    let region = Text::new("S3 region:")
        .with_default(cfg.storage.region.as_deref().unwrap_or(DEFAULT_REGION))
        .prompt()?;
    cfg.storage.region = non_empty(region);

    let city = Text::new("City:")
        .with_default(cfg.city.as_deref().unwrap_or(DEFAULT_CITY))
        .prompt()?;
    cfg.city = non_empty(city);

    let path = cfg.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
