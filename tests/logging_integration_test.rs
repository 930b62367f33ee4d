//! Integration tests for logging functionality

use iiq_export::config::LoggingConfig;
use iiq_export::logging::{init_logging, LOG_FILE_PREFIX};
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.log_level, "info");
}

// Only one subscriber can be installed per process, so this file holds a
// single initialization test.
#[test]
fn test_init_logging_creates_log_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_rotation: "never".to_string(),
        ..LoggingConfig::default()
    };

    let guard = init_logging("info", &config, &log_path).expect("Failed to initialize logging");
    tracing::info!(entity = "asset", "written from test");
    drop(guard);

    assert!(log_path.is_dir());
    let names: Vec<String> = std::fs::read_dir(&log_path)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert!(names.iter().any(|name| name.starts_with(LOG_FILE_PREFIX)));
}
