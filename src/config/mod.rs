//! Configuration management for the exporter.
//!
//! # Overview
//!
//! Configuration is a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `IIQ_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`InstanceConfig`] - Instance URL, API token and site identifier
//! - [`GeneralConfig`] - Output data directory and log directory
//! - [`SyncConfig`] - Bulk fetch page size and asset status filter
//! - [`ActivityConfig`] - Device activity enrichment
//! - [`LoggingConfig`] - Log level and file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [instance]
//! base_url = "https://district.incidentiq.com"
//! token = "${IIQ_TOKEN}"
//! site_id = "c77a6863-c13d-4f39-a995-5fe37ac3f910"
//!
//! [general]
//! data_path = "/srv/iiq/data"
//! log_path = "/srv/iiq/logs"
//!
//! [activity]
//! max_delay_ms = 1000
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ActivityConfig, GeneralConfig, IiqConfig, InstanceConfig, LoggingConfig, SyncConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
