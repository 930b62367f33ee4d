//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::IiqConfig;
use super::secret::secret_string;
use crate::domain::errors::IiqError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into IiqConfig
/// 4. Applies environment variable overrides (IIQ_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use iiq_export::config::loader::load_config;
///
/// let config = load_config("iiq.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<IiqConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(IiqError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        IiqError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: IiqConfig = toml::from_str(&contents)
        .map_err(|e| IiqError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        IiqError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| IiqError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        // Comment lines are copied untouched
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(IiqError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using IIQ_* prefix
///
/// Environment variables follow the pattern: IIQ_<SECTION>_<KEY>
/// For example: IIQ_INSTANCE_TOKEN, IIQ_GENERAL_DATA_PATH
fn apply_env_overrides(config: &mut IiqConfig) {
    // Instance overrides
    if let Ok(val) = std::env::var("IIQ_INSTANCE_BASE_URL") {
        config.instance.base_url = val;
    }
    if let Ok(val) = std::env::var("IIQ_INSTANCE_TOKEN") {
        config.instance.token = secret_string(val);
    }
    if let Ok(val) = std::env::var("IIQ_INSTANCE_SITE_ID") {
        config.instance.site_id = val;
    }
    if let Ok(val) = std::env::var("IIQ_INSTANCE_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.instance.timeout_seconds = Some(timeout);
        }
    }

    // General overrides
    if let Ok(val) = std::env::var("IIQ_GENERAL_DATA_PATH") {
        config.general.data_path = val;
    }
    if let Ok(val) = std::env::var("IIQ_GENERAL_LOG_PATH") {
        config.general.log_path = val;
    }

    // Sync overrides
    if let Ok(val) = std::env::var("IIQ_SYNC_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.sync.page_size = size;
        }
    }
    if let Ok(val) = std::env::var("IIQ_SYNC_ASSET_STATUS_FILTER") {
        config.sync.asset_status_filter = val;
    }

    // Activity overrides
    if let Ok(val) = std::env::var("IIQ_ACTIVITY_MAX_DELAY_MS") {
        if let Ok(delay) = val.parse() {
            config.activity.max_delay_ms = delay;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("IIQ_LOGGING_LOG_LEVEL") {
        config.logging.log_level = val;
    }
    if let Ok(val) = std::env::var("IIQ_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("IIQ_LOADER_TEST_VAR", "test_value");
        let input = "token = \"${IIQ_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "token = \"test_value\"\n");
        std::env::remove_var("IIQ_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("IIQ_LOADER_MISSING_VAR");
        let input = "token = \"${IIQ_LOADER_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("IIQ_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("IIQ_LOADER_COMMENTED_VAR");
        let input = "# token = \"${IIQ_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[instance]
base_url = "https://district.incidentiq.com"
token = "token-value"
site_id = "site-123"

[general]
data_path = "/tmp/iiq/data"
log_path = "/tmp/iiq/logs"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.instance.site_id, "site-123");
        assert_eq!(config.general.data_path, "/tmp/iiq/data");
        assert_eq!(config.sync.page_size, 999_999);
        assert_eq!(config.activity.max_delay_ms, 1000);
    }

    #[test]
    fn test_load_config_invalid_fails_validation() {
        let toml_content = r#"
[instance]
base_url = "district.incidentiq.com"
token = "token-value"
site_id = "site-123"

[general]
data_path = "/tmp/iiq/data"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("instance.base_url"));
    }
}
