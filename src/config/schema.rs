//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML file.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main exporter configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IiqConfig {
    /// Incident IQ instance connection
    pub instance: InstanceConfig,

    /// Output and log locations
    pub general: GeneralConfig,

    /// Bulk fetch settings
    #[serde(default)]
    pub sync: SyncConfig,

    /// Device activity enrichment settings
    #[serde(default)]
    pub activity: ActivityConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl IiqConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.instance.validate()?;
        self.general.validate()?;
        self.sync.validate()?;
        self.activity.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Incident IQ instance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Base URL of the instance, e.g. `https://district.incidentiq.com`
    pub base_url: String,

    /// API bearer token
    /// Stored securely in memory and automatically zeroized on drop
    pub token: SecretString,

    /// Site identifier sent with every request
    pub site_id: String,

    /// Whole-request timeout in seconds, unset means no timeout
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl InstanceConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("instance.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("instance.base_url must start with http:// or https://".to_string());
        }

        if let Err(e) = url::Url::parse(&self.base_url) {
            return Err(format!("instance.base_url is not a valid URL: {e}"));
        }

        if self.token.expose_secret().is_empty() {
            return Err("instance.token cannot be empty".to_string());
        }

        if self.site_id.is_empty() {
            return Err("instance.site_id cannot be empty".to_string());
        }

        if self.timeout_seconds == Some(0) {
            return Err("instance.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

/// Output and log directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory the CSV files are written to
    pub data_path: String,

    /// Directory log files are written to
    #[serde(default = "default_log_path")]
    pub log_path: String,
}

impl GeneralConfig {
    fn validate(&self) -> Result<(), String> {
        if self.data_path.is_empty() {
            return Err("general.data_path cannot be empty".to_string());
        }
        if self.log_path.is_empty() {
            return Err("general.log_path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Bulk fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// `$s` page size for bulk requests, large enough to return everything
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Asset `Status` facet filter; empty disables the filter
    #[serde(default = "default_asset_status_filter")]
    pub asset_status_filter: String,
}

impl SyncConfig {
    fn validate(&self) -> Result<(), String> {
        if self.page_size == 0 {
            return Err("sync.page_size must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            asset_status_filter: default_asset_status_filter(),
        }
    }
}

/// Device activity enrichment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    /// Asset categories that get an activity lookup
    #[serde(default = "default_activity_categories")]
    pub categories: Vec<String>,

    /// Upper bound of the random pause after each activity request
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl ActivityConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_delay_ms > 60_000 {
            return Err(format!(
                "activity.max_delay_ms must be <= 60000, got {}",
                self.max_delay_ms
            ));
        }
        Ok(())
    }
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            categories: default_activity_categories(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid logging.log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            local_enabled: true,
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_page_size() -> u32 {
    999_999
}

fn default_asset_status_filter() -> String {
    "Available".to_string()
}

fn default_activity_categories() -> Vec<String> {
    vec![
        "Tablets".to_string(),
        "Chromebooks".to_string(),
        "Laptops / Notebooks".to_string(),
    ]
}

fn default_max_delay_ms() -> u64 {
    1000
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
