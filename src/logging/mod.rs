//! Logging and observability
//!
//! Structured logging through `tracing`: human-readable console output and
//! JSON lines in a rotating file under `general.log_path`.
//!
//! # Example
//!
//! ```no_run
//! use iiq_export::logging::init_logging;
//! use iiq_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config, "logs").expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard, LOG_FILE_PREFIX};

/// Log the start of one entity sync
///
/// # Example
///
/// ```no_run
/// use iiq_export::log_sync_start;
/// use iiq_export::domain::EntityKind;
///
/// log_sync_start!(EntityKind::Asset);
/// ```
#[macro_export]
macro_rules! log_sync_start {
    ($entity:expr) => {
        tracing::info!(entity = %$entity, "Starting {} sync", $entity);
    };
}

/// Log the completion of one entity sync
///
/// # Example
///
/// ```no_run
/// use iiq_export::log_sync_complete;
/// use iiq_export::domain::EntityKind;
/// use std::time::Duration;
///
/// log_sync_complete!(EntityKind::User, 42, Duration::from_secs(3));
/// ```
#[macro_export]
macro_rules! log_sync_complete {
    ($entity:expr, $rows:expr, $duration:expr) => {
        tracing::info!(
            entity = %$entity,
            rows = $rows,
            duration_ms = $duration.as_millis() as u64,
            "{} sync completed",
            $entity
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use iiq_export::log_error_with_context;
/// use iiq_export::domain::IiqError;
///
/// let error = IiqError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log row-building progress every 1000 rows and at the end
///
/// # Example
///
/// ```no_run
/// use iiq_export::log_row_progress;
///
/// log_row_progress!("asset", 1000, 4500);
/// ```
#[macro_export]
macro_rules! log_row_progress {
    ($entity:expr, $current:expr, $total:expr) => {
        if $current % 1000 == 0 || $current == $total {
            tracing::debug!(
                entity = %$entity,
                current = $current,
                total = $total,
                progress_pct = ($current as f64 / $total as f64 * 100.0),
                "Building rows"
            );
        }
    };
}
