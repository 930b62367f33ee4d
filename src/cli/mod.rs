//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::Parser;

/// Incident IQ data export
#[derive(Parser, Debug)]
#[command(name = "iiq-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "iiq.toml", env = "IIQ_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "IIQ_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(flatten)]
    pub sync: commands::sync::SyncArgs,
}
