use anyhow::{Context, Result};
use clap::Parser;
use nutriflow::cli::Cli;
use nutriflow::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config_path();
    let config = Config::load_or_create(&config_path).context("Failed to load configuration")?;

    // Set up logging directory
    let log_dir = nutriflow::utils::get_log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;

    // Initialize tracing with file logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Write to file
    let file_appender = tracing_appender::rolling::never(&log_dir, "nutriflow.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false) // Disable ANSI colors in file
        .init();

    tracing::info!("nutriflow starting with config {:?}", config_path);
    let result = cli.execute(&config);

    // Flush buffered log lines before exit
    drop(guard);

    result
}
