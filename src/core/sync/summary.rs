//! Sync summary and reporting
//!
//! This module defines structures for tracking and reporting sync results.

use crate::domain::EntityKind;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// Process exit code when every entity sync succeeded
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit code when at least one entity sync failed
pub const EXIT_PARTIAL_FAILURE: i32 = 1;

/// Outcome of one entity sync
#[derive(Debug, Clone)]
pub struct EntityReport {
    /// Entity type synced
    pub kind: EntityKind,

    /// Rows written (zero on failure)
    pub rows: usize,

    /// File written, `None` when the sync failed
    pub path: Option<PathBuf>,

    /// Vendor payloads that degraded to empty columns
    pub payload_failures: usize,

    /// Wall-clock time spent on this entity
    pub duration: Duration,

    /// Error message if the sync failed
    pub error: Option<String>,
}

impl EntityReport {
    /// Report for a table that was written
    pub fn written(
        kind: EntityKind,
        rows: usize,
        path: PathBuf,
        payload_failures: usize,
        duration: Duration,
    ) -> Self {
        Self {
            kind,
            rows,
            path: Some(path),
            payload_failures,
            duration,
            error: None,
        }
    }

    /// Report for a sync that failed before its file was written
    pub fn failed(kind: EntityKind, error: String, duration: Duration) -> Self {
        Self {
            kind,
            rows: 0,
            path: None,
            payload_failures: 0,
            duration,
            error: Some(error),
        }
    }

    pub fn is_successful(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a whole run
#[derive(Debug, Clone, Default)]
pub struct SyncSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Reports in sync order
    pub reports: Vec<EntityReport>,

    /// Total wall-clock duration
    pub duration: Duration,
}

impl SyncSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty summary stamped with a start time
    pub fn started(at: DateTime<Utc>) -> Self {
        Self {
            started_at: at,
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn add_report(&mut self, report: EntityReport) {
        self.reports.push(report);
    }

    /// Report for an entity type, if it was synced
    pub fn report(&self, kind: EntityKind) -> Option<&EntityReport> {
        self.reports.iter().find(|r| r.kind == kind)
    }

    pub fn total_rows(&self) -> usize {
        self.reports.iter().map(|r| r.rows).sum()
    }

    pub fn failed_count(&self) -> usize {
        self.reports.iter().filter(|r| !r.is_successful()).count()
    }

    /// Check if every entity sync succeeded
    pub fn is_successful(&self) -> bool {
        self.failed_count() == 0
    }

    /// Process exit code for this run
    pub fn exit_code(&self) -> i32 {
        if self.is_successful() {
            EXIT_SUCCESS
        } else {
            EXIT_PARTIAL_FAILURE
        }
    }

    /// Log the summary
    pub fn log_summary(&self) {
        for report in &self.reports {
            let path = report
                .path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();

            match &report.error {
                None => tracing::info!(
                    entity = %report.kind,
                    rows = report.rows,
                    path = %path,
                    payload_failures = report.payload_failures,
                    duration_secs = report.duration.as_secs_f64(),
                    "{} sync took {}",
                    report.kind,
                    format_elapsed(report.duration)
                ),
                Some(error) => tracing::warn!(
                    entity = %report.kind,
                    error = %error,
                    duration_secs = report.duration.as_secs_f64(),
                    "{} sync failed",
                    report.kind
                ),
            }
        }

        tracing::info!(
            started_at = %self.started_at.to_rfc3339(),
            total_rows = self.total_rows(),
            failed = self.failed_count(),
            duration_secs = self.duration.as_secs_f64(),
            "Total run time: {}",
            format_elapsed(self.duration)
        );
    }
}

/// Render a duration as `H:MM:SS.ffffff`
pub fn format_elapsed(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!(
        "{}:{:02}:{:02}.{:06}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        duration.subsec_micros()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(kind: EntityKind, rows: usize) -> EntityReport {
        EntityReport::written(
            kind,
            rows,
            PathBuf::from(kind.file_name()),
            0,
            Duration::from_millis(10),
        )
    }

    #[test]
    fn test_summary_creation() {
        let summary = SyncSummary::new();
        assert!(summary.reports.is_empty());
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.is_successful());
        assert_eq!(summary.exit_code(), EXIT_SUCCESS);
    }

    #[test]
    fn test_summary_totals() {
        let mut summary = SyncSummary::new().with_duration(Duration::from_secs(5));
        summary.add_report(written(EntityKind::Ticket, 10));
        summary.add_report(written(EntityKind::Asset, 5));

        assert_eq!(summary.total_rows(), 15);
        assert_eq!(summary.duration, Duration::from_secs(5));
        assert_eq!(summary.report(EntityKind::Asset).map(|r| r.rows), Some(5));
        assert!(summary.report(EntityKind::User).is_none());
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(3250)), "0:00:03.250000");
        assert_eq!(format_elapsed(Duration::from_secs(3723)), "1:02:03.000000");
    }

    #[test]
    fn test_started_at() {
        let at = Utc::now();
        assert_eq!(SyncSummary::started(at).started_at, at);
    }

    #[test]
    fn test_failed_entity_sets_exit_code() {
        let mut summary = SyncSummary::new();
        summary.add_report(EntityReport::failed(
            EntityKind::Ticket,
            "Request failed".to_string(),
            Duration::from_millis(3),
        ));
        summary.add_report(written(EntityKind::User, 2));

        assert!(!summary.is_successful());
        assert_eq!(summary.failed_count(), 1);
        assert_eq!(summary.exit_code(), EXIT_PARTIAL_FAILURE);

        let ticket = summary.report(EntityKind::Ticket).unwrap();
        assert_eq!(ticket.rows, 0);
        assert!(ticket.path.is_none());
    }
}
