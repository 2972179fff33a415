//! Binary crate for the `weather-dashboard` command-line tool.
//!
//! This crate focuses on:
//! - Loading `.env` and initializing logging
//! - Parsing CLI arguments
//! - Interactive configuration

use clap::Parser;

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let cmd = cli::Cli::parse();
    cmd.run().await
}
