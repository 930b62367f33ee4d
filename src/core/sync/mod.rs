//! Sync orchestration and reporting
//!
//! This module provides the run loop of the exporter:
//! - Sequential per-entity sync coordination
//! - Summary, timing and exit code reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::SyncCoordinator;
pub use summary::{format_elapsed, EntityReport, SyncSummary, EXIT_PARTIAL_FAILURE, EXIT_SUCCESS};
