mod catalog;
mod cli;
mod config;
mod container;
mod error;
mod remote;
mod repository;
mod state;
mod trivia;
mod usecase;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Args;
use crate::config::Config;
use crate::error::Result;

const DEFAULT_LOG_DIRECTIVE: &str = "animedev=info";

fn setup_logging() -> Result<()> {
    let data_dir = config::data_dir()?;
    std::fs::create_dir_all(&data_dir)?;

    let file_appender = tracing_appender::rolling::daily(&data_dir, "animedev.log");

    let filter = match DEFAULT_LOG_DIRECTIVE.parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(file_appender).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Log to a file so stdout carries only command output
    if let Err(e) = setup_logging() {
        eprintln!("Warning: Could not set up logging: {}", e);
    }

    let args: Args = argh::from_env();
    info!("Starting animedev");

    let config = Config::load()?;
    info!(backend = %config.general.backend, "Loaded config");

    args.run(config).await
}
