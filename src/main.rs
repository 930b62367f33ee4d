// iiq-export - Incident IQ to CSV Export Tool
// Copyright (c) 2025 iiq-export Contributors
// Licensed under the MIT License

use clap::Parser;
use iiq_export::cli::Cli;
use iiq_export::config::load_config;
use iiq_export::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Optional: a missing .env is silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration from {}: {e}", cli.config);
            process::exit(2);
        }
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.logging.log_level);
    let guard = match init_logging(log_level, &config.logging, &config.general.log_path) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config,
        "iiq-export - Incident IQ to CSV Export Tool"
    );

    let exit_code = match cli.sync.execute(&config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Sync failed to start");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors, flush the file writer first
    drop(guard);
    process::exit(exit_code);
}
