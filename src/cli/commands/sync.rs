//! Sync command implementation
//!
//! Runs the ticket, asset and user syncs and maps the outcome to a process
//! exit code.

use crate::config::IiqConfig;
use crate::core::sync::SyncCoordinator;
use clap::Args;

/// Arguments for a sync run
#[derive(Args, Debug, Default, Clone)]
pub struct SyncArgs {
    /// Retrieve device activity for tablets, Chromebooks and laptops
    #[arg(long = "activity")]
    pub device_activity: bool,
}

impl SyncArgs {
    /// Execute a full sync with an already loaded configuration
    pub async fn execute(&self, config: &IiqConfig) -> anyhow::Result<i32> {
        tracing::info!(
            device_activity = self.device_activity,
            data_path = %config.general.data_path,
            "Starting sync command"
        );

        let coordinator = SyncCoordinator::from_config(config, self.device_activity)?;
        let summary = coordinator.run_all().await;
        summary.log_summary();

        if !summary.is_successful() {
            for report in summary.reports.iter().filter(|r| !r.is_successful()) {
                eprintln!(
                    "{} sync failed: {}",
                    report.kind,
                    report.error.as_deref().unwrap_or("unknown error")
                );
            }
        }

        Ok(summary.exit_code())
    }
}
