//! Sync coordinator - main orchestrator for a run
//!
//! Runs the ticket, asset and user syncs one after another. Each sync
//! fetches its collection and custom field definitions, flattens every
//! record and writes the table. A failed fetch ends that entity's sync
//! without touching its previous output; the next entity still runs.

use crate::adapters::iiq::{BulkQuery, HelpdeskApi, IiqClient};
use crate::adapters::output::CsvTableWriter;
use crate::config::{ActivityConfig, IiqConfig, SyncConfig};
use crate::core::activity::DeviceActivityEnricher;
use crate::core::sync::summary::{EntityReport, SyncSummary};
use crate::core::transform::{build_asset_row, build_row, CustomFieldMap, RowShape};
use crate::domain::{EntityKind, EntityRecord, Result, Table};
use crate::{log_error_with_context, log_row_progress, log_sync_complete, log_sync_start};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Sync coordinator
pub struct SyncCoordinator {
    api: Arc<dyn HelpdeskApi>,
    writer: CsvTableWriter,
    sync: SyncConfig,
    enricher: Option<DeviceActivityEnricher>,
}

impl SyncCoordinator {
    /// Create a coordinator over any API implementation
    pub fn new(api: Arc<dyn HelpdeskApi>, writer: CsvTableWriter, sync: SyncConfig) -> Self {
        Self {
            api,
            writer,
            sync,
            enricher: None,
        }
    }

    /// Enable per-asset device activity lookups
    pub fn with_device_activity(mut self, config: &ActivityConfig) -> Self {
        self.enricher = Some(DeviceActivityEnricher::new(self.api.clone(), config));
        self
    }

    /// Build a coordinator talking to the configured instance
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &IiqConfig, device_activity: bool) -> Result<Self> {
        let api: Arc<dyn HelpdeskApi> = Arc::new(IiqClient::new(&config.instance)?);
        let writer = CsvTableWriter::new(&config.general.data_path);
        let coordinator = Self::new(api, writer, config.sync.clone());

        tracing::debug!(
            base_url = %coordinator.api.base_url(),
            data_path = %config.general.data_path,
            device_activity,
            "Sync coordinator created"
        );

        if device_activity {
            Ok(coordinator.with_device_activity(&config.activity))
        } else {
            Ok(coordinator)
        }
    }

    /// Run every entity sync in order: tickets, assets, users
    pub async fn run_all(&self) -> SyncSummary {
        let start_time = Instant::now();
        let mut summary = SyncSummary::started(Utc::now());

        for kind in EntityKind::ALL {
            summary.add_report(self.sync_entity(kind).await);
        }

        summary.with_duration(start_time.elapsed())
    }

    /// Run one entity sync, capturing any failure in the report
    pub async fn sync_entity(&self, kind: EntityKind) -> EntityReport {
        let start_time = Instant::now();
        log_sync_start!(kind);

        match self.export(kind).await {
            Ok((path, rows, payload_failures)) => {
                let duration = start_time.elapsed();
                log_sync_complete!(kind, rows, duration);
                EntityReport::written(kind, rows, path, payload_failures, duration)
            }
            Err(e) => {
                log_error_with_context!(&e, format!("{kind} sync failed, output left unchanged"));
                EntityReport::failed(kind, e.to_string(), start_time.elapsed())
            }
        }
    }

    async fn export(&self, kind: EntityKind) -> Result<(PathBuf, usize, usize)> {
        let (table, payload_failures) = self.build_table(kind).await?;
        let path = self.writer.write(&table)?;
        Ok((path, table.len(), payload_failures))
    }

    /// Fetch and flatten one collection
    ///
    /// Returns the table and the number of degraded vendor payloads.
    pub async fn build_table(&self, kind: EntityKind) -> Result<(Table, usize)> {
        let records = self
            .api
            .fetch_records(&BulkQuery::records(kind, &self.sync))
            .await?;
        tracing::info!(entity = %kind, count = records.len(), "Fetched records");

        let definitions = self
            .api
            .fetch_custom_field_definitions(&BulkQuery::custom_fields(kind, &self.sync))
            .await?;
        let custom_fields = CustomFieldMap::from_definitions(&definitions);

        let mut table = Table::new(kind, RowShape::of(kind).columns);
        let mut payload_failures = 0;
        let total = records.len();

        for (idx, record) in records.iter().enumerate() {
            let built = match kind {
                EntityKind::Asset => {
                    let activity = self.device_activity(record).await;
                    build_asset_row(record, &custom_fields, activity)
                }
                _ => build_row(kind, record, &custom_fields),
            };
            payload_failures += built.payload_failures;
            table.push(built.row);
            log_row_progress!(kind, idx + 1, total);
        }

        table.log_info();
        Ok((table, payload_failures))
    }

    async fn device_activity(&self, record: &EntityRecord) -> Option<String> {
        match &self.enricher {
            Some(enricher) => enricher.enrich(record).await,
            None => None,
        }
    }
}
