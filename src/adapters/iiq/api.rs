//! Helpdesk API trait definition
//!
//! This module defines the `HelpdeskApi` trait that the sync layer talks to.
//! [`IiqClient`](super::IiqClient) implements it over HTTP; tests implement
//! it in memory.

use super::models::{BulkQuery, CustomFieldDefinition};
use crate::domain::{EntityRecord, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Operations the exporter needs from the platform
///
/// # Example
///
/// ```no_run
/// use iiq_export::adapters::iiq::{BulkQuery, HelpdeskApi, IiqClient};
/// use iiq_export::config::load_config;
/// use iiq_export::domain::EntityKind;
///
/// # async fn example() -> iiq_export::domain::Result<()> {
/// let config = load_config("iiq.toml")?;
/// let client = IiqClient::new(&config.instance)?;
///
/// let query = BulkQuery::records(EntityKind::User, &config.sync);
/// let users = client.fetch_records(&query).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait HelpdeskApi: Send + Sync {
    /// Fetch a whole collection in one bulk request
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// body without an `Items` array.
    async fn fetch_records(&self, query: &BulkQuery) -> Result<Vec<EntityRecord>>;

    /// Fetch custom field definitions for one entity scope
    ///
    /// # Errors
    ///
    /// Same failure modes as [`HelpdeskApi::fetch_records`].
    async fn fetch_custom_field_definitions(
        &self,
        query: &BulkQuery,
    ) -> Result<Vec<CustomFieldDefinition>>;

    /// Fetch the activity log of one asset
    ///
    /// Returns `Ok(None)` when the server answers with an empty body and an
    /// empty list when the body has no `Items`.
    async fn fetch_asset_activities(&self, asset_id: &str) -> Result<Option<Vec<Value>>>;

    /// Base URL of the instance
    fn base_url(&self) -> &str;
}
