//! Core business logic for the exporter.
//!
//! # Modules
//!
//! - [`activity`] - Optional per-asset device activity enrichment
//! - [`sync`] - Sync orchestration, summary and exit codes
//! - [`transform`] - Record flattening, custom fields and vendor payloads
//!
//! # Sync Workflow
//!
//! For tickets, then assets, then users:
//!
//! 1. **Fetch**: Pull the whole collection in one bulk request
//! 2. **Definitions**: Pull the custom field definitions for the entity scope
//! 3. **Flatten**: Build one fixed-shape row per record
//! 4. **Write**: Replace `<data_path>/<entity>s.csv` atomically
//! 5. **Report**: Record rows, timing and any error in the summary
//!
//! # Example
//!
//! ```rust,no_run
//! use iiq_export::config::load_config;
//! use iiq_export::core::sync::SyncCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("iiq.toml")?;
//! let coordinator = SyncCoordinator::from_config(&config, false)?;
//!
//! let summary = coordinator.run_all().await;
//! summary.log_summary();
//! std::process::exit(summary.exit_code());
//! # }
//! ```

pub mod activity;
pub mod sync;
pub mod transform;
